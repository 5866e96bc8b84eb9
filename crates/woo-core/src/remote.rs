// ── Remote seam ──
//
// The stores talk to the network only through this trait, so tests can
// substitute a scripted remote.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use woo_api::WooClient;
use woo_api::models::{
    Leaderboard, OrderStats, Product, Site, SiteVisitStats, StatGranularity, StatsGranularityV4,
    SystemPlugin,
};

/// Remote operations the stores depend on.
#[async_trait]
pub trait WooRemote: Send + Sync {
    async fn load_order_stats(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
    ) -> Result<OrderStats, woo_api::Error>;

    async fn load_site_visit_stats(
        &self,
        site_id: i64,
        unit: StatGranularity,
        latest: NaiveDate,
        quantity: u32,
    ) -> Result<SiteVisitStats, woo_api::Error>;

    async fn load_leaderboards(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
    ) -> Result<Vec<Leaderboard>, woo_api::Error>;

    async fn load_products(
        &self,
        site_id: i64,
        product_ids: &[i64],
    ) -> Result<Vec<Product>, woo_api::Error>;

    async fn load_system_plugins(&self, site_id: i64) -> Result<Vec<SystemPlugin>, woo_api::Error>;

    async fn load_sites(&self) -> Result<Vec<Site>, woo_api::Error>;
}

#[async_trait]
impl WooRemote for WooClient {
    async fn load_order_stats(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
    ) -> Result<OrderStats, woo_api::Error> {
        WooClient::load_order_stats(self, site_id, unit, earliest, latest, quantity, force_refresh)
            .await
    }

    async fn load_site_visit_stats(
        &self,
        site_id: i64,
        unit: StatGranularity,
        latest: NaiveDate,
        quantity: u32,
    ) -> Result<SiteVisitStats, woo_api::Error> {
        WooClient::load_site_visit_stats(self, site_id, unit, latest, quantity).await
    }

    async fn load_leaderboards(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
    ) -> Result<Vec<Leaderboard>, woo_api::Error> {
        WooClient::load_leaderboards(self, site_id, unit, earliest, latest, quantity).await
    }

    async fn load_products(
        &self,
        site_id: i64,
        product_ids: &[i64],
    ) -> Result<Vec<Product>, woo_api::Error> {
        WooClient::load_products(self, site_id, product_ids).await
    }

    async fn load_system_plugins(&self, site_id: i64) -> Result<Vec<SystemPlugin>, woo_api::Error> {
        WooClient::load_system_plugins(self, site_id).await
    }

    async fn load_sites(&self) -> Result<Vec<Site>, woo_api::Error> {
        WooClient::load_sites(self).await
    }
}
