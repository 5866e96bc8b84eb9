// ── Stores manager ──
//
// Owns the remote, the storage and a dispatcher with both stores
// registered. Consumers either dispatch actions themselves or use the
// typed helpers, which build the action and await its completion.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use tracing::{debug, info};
use woo_api::models::{Site, SystemPlugin};
use woo_api::{TransportConfig, WooClient};
use woo_storage::{ExecutionContext, SiteRecord, StorageManager};

use crate::action::{AnalyticsAction, SystemPluginAction};
use crate::config::SessionConfig;
use crate::convert::{ToDto, update_site};
use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::range::AnalyticsRange;
use crate::remote::WooRemote;
use crate::store::{AnalyticsStore, SystemPluginStore};

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct StoresManager {
    inner: Arc<Inner>,
}

struct Inner {
    remote: Arc<dyn WooRemote>,
    storage: StorageManager,
    dispatcher: Dispatcher,
}

impl StoresManager {
    /// Wire both stores to the given collaborators.
    pub fn new(remote: Arc<dyn WooRemote>, storage: StorageManager) -> Self {
        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(AnalyticsStore::new(
            Arc::clone(&remote),
            storage.clone(),
        )));
        dispatcher.register(Arc::new(SystemPluginStore::new(
            Arc::clone(&remote),
            storage.clone(),
        )));

        Self {
            inner: Arc::new(Inner {
                remote,
                storage,
                dispatcher,
            }),
        }
    }

    /// Build the HTTP client and storage described by `config`.
    pub fn connect(config: &SessionConfig) -> Result<Self, StoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = WooClient::new(config.base_url.clone(), &config.token, &transport)?;

        let storage = match &config.cache_path {
            Some(path) => StorageManager::persistent(path)?,
            None => StorageManager::in_memory(),
        };
        debug!(
            base_url = %config.base_url,
            cache = ?storage.cache_path(),
            "stores manager ready"
        );

        Ok(Self::new(Arc::new(client), storage))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn storage(&self) -> &StorageManager {
        &self.inner.storage
    }

    // ── Analytics ────────────────────────────────────────────────────

    pub async fn retrieve_stats(
        &self,
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
    ) -> Result<(), StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| AnalyticsAction::RetrieveStats {
                site_id,
                time_range,
                earliest,
                latest,
                quantity,
                force_refresh,
                on_completion,
            })
            .await
    }

    pub async fn retrieve_site_visit_stats(
        &self,
        site_id: i64,
        site_timezone: FixedOffset,
        time_range: AnalyticsRange,
        latest: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| AnalyticsAction::RetrieveSiteVisitStats {
                site_id,
                site_timezone,
                time_range,
                latest,
                on_completion,
            })
            .await
    }

    pub async fn retrieve_top_earner_stats(
        &self,
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
    ) -> Result<(), StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| AnalyticsAction::RetrieveTopEarnerStats {
                site_id,
                time_range,
                earliest,
                latest,
                on_completion,
            })
            .await
    }

    pub async fn reset_stored_stats(&self) -> Result<(), StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| AnalyticsAction::ResetStoredStats { on_completion })
            .await
    }

    // ── System plugins ───────────────────────────────────────────────

    pub async fn synchronize_system_plugins(&self, site_id: i64) -> Result<(), StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| SystemPluginAction::SynchronizeSystemPlugins {
                site_id,
                on_completion,
            })
            .await
    }

    pub async fn fetch_system_plugins(&self, site_id: i64) -> Result<Vec<SystemPlugin>, StoreError> {
        self.inner
            .dispatcher
            .request(|on_completion| SystemPluginAction::FetchSystemPlugins {
                site_id,
                on_completion,
            })
            .await
    }

    // ── Sites ────────────────────────────────────────────────────────

    /// Fetch the account's sites and replace the stored set with them.
    pub async fn synchronize_sites(&self) -> Result<Vec<Site>, StoreError> {
        let sites = self.inner.remote.load_sites().await?;
        let fetched = sites.clone();

        let stale = self
            .inner
            .storage
            .perform(ExecutionContext::Main, move |ctx| {
                for site in &sites {
                    let record = ctx.load_or_insert(site.site_id, || SiteRecord::new(site.site_id));
                    update_site(record, site);
                }
                let current: HashSet<i64> = sites.iter().map(|s| s.site_id).collect();
                Ok::<_, StoreError>(
                    ctx.delete_where::<SiteRecord>(|record| !current.contains(&record.site_id)),
                )
            })
            .await?;

        info!(fetched = fetched.len(), stale, "sites synchronized");
        Ok(fetched)
    }

    /// A stored site, if it has been synchronized.
    pub fn site(&self, site_id: i64) -> Option<Site> {
        self.inner
            .storage
            .view_storage()
            .site(site_id)
            .map(ToDto::to_dto)
    }
}

impl std::fmt::Debug for StoresManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoresManager")
            .field("dispatcher", &self.inner.dispatcher)
            .field("cache_path", &self.inner.storage.cache_path())
            .finish_non_exhaustive()
    }
}
