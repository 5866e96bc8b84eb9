// ── Analytics store ──
//
// Order stats, visitor stats and top earners. All writes run on the main
// execution context.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use tracing::{debug, info};
use woo_api::models::{Leaderboard, OrderStats, Product, SiteVisitStats, TopEarnerStats};
use woo_storage::{
    ExecutionContext, OrderStatsRecord, ProductRecord, SiteVisitStatsRecord, StorageManager,
    TopEarnerStatsRecord,
};

use super::{Store, complete, unsupported_action};
use crate::action::{Action, ActionKind, AnalyticsAction};
use crate::convert::{
    ToDto, update_order_stats, update_product, update_site_visit_stats, update_top_earner_stats,
};
use crate::error::{AnalyticsStoreError, SiteVisitStatsStoreError, StoreError};
use crate::leaderboard::{
    TOP_PRODUCTS_ID, missing_product_ids, top_earner_stats_items, top_product_ids,
};
use crate::range::{AnalyticsRange, build_date_string};
use crate::remote::WooRemote;

/// How many top earners are requested and stored.
pub const DEFAULT_TOP_EARNER_STATS_LIMIT: u32 = 3;

/// Handles [`AnalyticsAction`]s.
pub struct AnalyticsStore {
    remote: Arc<dyn WooRemote>,
    storage: StorageManager,
}

impl AnalyticsStore {
    pub fn new(remote: Arc<dyn WooRemote>, storage: StorageManager) -> Self {
        Self { remote, storage }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Delete every stored order stats row (intervals go with it).
    pub async fn reset_stored_stats(&self) -> Result<(), StoreError> {
        let removed = self
            .storage
            .perform(ExecutionContext::Main, |ctx| {
                Ok::<_, StoreError>(ctx.delete_all::<OrderStatsRecord>())
            })
            .await?;
        info!(removed, "stored order stats deleted");
        Ok(())
    }

    pub async fn retrieve_stats(
        &self,
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
    ) -> Result<(), StoreError> {
        let stats = self
            .remote
            .load_order_stats(
                site_id,
                time_range.interval_granularity(),
                earliest,
                latest,
                quantity,
                force_refresh,
            )
            .await?;
        self.upsert_order_stats(stats, time_range).await
    }

    /// Remote failures are classified into [`SiteVisitStatsStoreError`].
    pub async fn retrieve_site_visit_stats(
        &self,
        site_id: i64,
        site_timezone: FixedOffset,
        time_range: AnalyticsRange,
        latest: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let quantity = time_range.site_visit_stats_quantity(latest, site_timezone);
        let latest_day = latest.with_timezone(&site_timezone).date_naive();

        let stats = self
            .remote
            .load_site_visit_stats(
                site_id,
                time_range.site_visit_stats_granularity(),
                latest_day,
                quantity,
            )
            .await
            .map_err(SiteVisitStatsStoreError::from)?;
        self.upsert_site_visit_stats(stats, time_range).await
    }

    /// Fetch the products leaderboard and store it as top earner stats.
    ///
    /// Product details are taken from storage where available; only the
    /// missing products are fetched, and those are cached for next time.
    pub async fn retrieve_top_earner_stats(
        &self,
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let leaderboards = self
            .remote
            .load_leaderboards(
                site_id,
                time_range.leaderboards_granularity(),
                earliest,
                latest,
                DEFAULT_TOP_EARNER_STATS_LIMIT,
            )
            .await?;

        let top_products = leaderboards
            .into_iter()
            .find(|board| board.id == TOP_PRODUCTS_ID)
            .ok_or(AnalyticsStoreError::MissingTopProducts)?;

        let products = self.load_products(site_id, &top_products).await?;

        let granularity = time_range.top_earner_stats_granularity();
        let stats = TopEarnerStats {
            site_id,
            date: build_date_string(latest, granularity),
            granularity,
            limit: DEFAULT_TOP_EARNER_STATS_LIMIT.to_string(),
            items: top_earner_stats_items(&top_products, &products),
        };
        self.upsert_top_earner_stats(stats).await
    }

    // ── Products for top earners ─────────────────────────────────────

    async fn load_products(
        &self,
        site_id: i64,
        top_products: &Leaderboard,
    ) -> Result<Vec<Product>, StoreError> {
        let ids = top_product_ids(top_products);
        let stored: Vec<Product> = self
            .storage
            .view_storage()
            .products(site_id, &ids)
            .into_iter()
            .map(|record| record.to_dto())
            .collect();

        let missing = missing_product_ids(top_products, &stored);
        if missing.is_empty() {
            debug!(site_id, count = stored.len(), "all top products already stored");
            return Ok(stored);
        }

        let fetched = self.remote.load_products(site_id, &missing).await?;
        debug!(
            site_id,
            missing = missing.len(),
            fetched = fetched.len(),
            "fetched missing top products"
        );
        self.upsert_products(fetched.clone()).await?;

        let mut products = fetched;
        products.extend(stored);
        Ok(products)
    }

    // ── Persistence ──────────────────────────────────────────────────

    async fn upsert_order_stats(
        &self,
        stats: OrderStats,
        time_range: AnalyticsRange,
    ) -> Result<(), StoreError> {
        let site_id = stats.site_id;
        let outcome = self
            .storage
            .perform(ExecutionContext::Main, move |ctx| {
                let record = ctx.load_or_insert((stats.site_id, time_range.as_str().to_owned()), || {
                    OrderStatsRecord::new(stats.site_id, time_range.as_str())
                });
                Ok::<_, StoreError>(update_order_stats(record, &stats))
            })
            .await?;
        debug!(
            site_id,
            %time_range,
            inserted = outcome.inserted,
            updated = outcome.updated,
            deleted = outcome.deleted,
            "order stats stored"
        );
        Ok(())
    }

    async fn upsert_site_visit_stats(
        &self,
        stats: SiteVisitStats,
        time_range: AnalyticsRange,
    ) -> Result<(), StoreError> {
        let site_id = stats.site_id;
        let outcome = self
            .storage
            .perform(ExecutionContext::Main, move |ctx| {
                let record = ctx.load_or_insert((stats.site_id, time_range.as_str().to_owned()), || {
                    SiteVisitStatsRecord::new(stats.site_id, time_range.as_str())
                });
                Ok::<_, StoreError>(update_site_visit_stats(record, &stats))
            })
            .await?;
        debug!(
            site_id,
            %time_range,
            items = outcome.retained(),
            deleted = outcome.deleted,
            "site visit stats stored"
        );
        Ok(())
    }

    async fn upsert_top_earner_stats(&self, stats: TopEarnerStats) -> Result<(), StoreError> {
        let site_id = stats.site_id;
        let outcome = self
            .storage
            .perform(ExecutionContext::Main, move |ctx| {
                let granularity = stats.granularity.to_string();
                let key = (stats.site_id, granularity.clone(), stats.date.clone());
                let record = ctx.load_or_insert(key, || {
                    TopEarnerStatsRecord::new(stats.site_id, granularity, stats.date.clone())
                });
                Ok::<_, StoreError>(update_top_earner_stats(record, &stats))
            })
            .await?;
        debug!(
            site_id,
            items = outcome.retained(),
            deleted = outcome.deleted,
            "top earner stats stored"
        );
        Ok(())
    }

    async fn upsert_products(&self, products: Vec<Product>) -> Result<(), StoreError> {
        self.storage
            .perform(ExecutionContext::Main, move |ctx| {
                for product in &products {
                    let record = ctx.load_or_insert((product.site_id, product.product_id), || {
                        ProductRecord::new(product.site_id, product.product_id)
                    });
                    update_product(record, product);
                }
                Ok::<_, StoreError>(())
            })
            .await
    }
}

#[async_trait]
impl Store for AnalyticsStore {
    fn kind(&self) -> ActionKind {
        ActionKind::Analytics
    }

    async fn on_action(&self, action: Action) {
        let action = match action {
            Action::Analytics(action) => action,
            other @ Action::SystemPlugin(_) => {
                unsupported_action(self.kind(), &other);
                return;
            }
        };

        match action {
            AnalyticsAction::ResetStoredStats { on_completion } => {
                complete(on_completion, self.reset_stored_stats().await);
            }
            AnalyticsAction::RetrieveStats {
                site_id,
                time_range,
                earliest,
                latest,
                quantity,
                force_refresh,
                on_completion,
            } => {
                let result = self
                    .retrieve_stats(site_id, time_range, earliest, latest, quantity, force_refresh)
                    .await;
                complete(on_completion, result);
            }
            AnalyticsAction::RetrieveSiteVisitStats {
                site_id,
                site_timezone,
                time_range,
                latest,
                on_completion,
            } => {
                let result = self
                    .retrieve_site_visit_stats(site_id, site_timezone, time_range, latest)
                    .await;
                complete(on_completion, result);
            }
            AnalyticsAction::RetrieveTopEarnerStats {
                site_id,
                time_range,
                earliest,
                latest,
                on_completion,
            } => {
                let result = self
                    .retrieve_top_earner_stats(site_id, time_range, earliest, latest)
                    .await;
                complete(on_completion, result);
            }
        }
    }
}
