use std::sync::Arc;

use crate::records::{
    OrderStatsRecord, ProductRecord, SiteRecord, SiteVisitStatsRecord, SystemPluginRecord,
    TopEarnerStatsRecord,
};
use crate::tables::{Entity, Tables};

/// Read-only, point-in-time view of the committed storage.
///
/// Cheap to clone; holding one never blocks writers.
#[derive(Debug, Clone)]
pub struct ViewStorage {
    tables: Arc<Tables>,
}

impl ViewStorage {
    pub(crate) fn new(tables: Arc<Tables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn load<R: Entity>(&self, key: &R::Key) -> Option<&R> {
        R::table(&self.tables).get(key)
    }

    pub fn load_all<R: Entity>(&self) -> impl Iterator<Item = &R> {
        R::table(&self.tables).iter()
    }

    pub fn count<R: Entity>(&self) -> usize {
        R::table(&self.tables).len()
    }

    // ── Typed queries ────────────────────────────────────────────────

    pub fn order_stats(&self, site_id: i64, time_range: &str) -> Option<&OrderStatsRecord> {
        self.load::<OrderStatsRecord>(&(site_id, time_range.to_owned()))
    }

    pub fn site_visit_stats(&self, site_id: i64, time_range: &str) -> Option<&SiteVisitStatsRecord> {
        self.load::<SiteVisitStatsRecord>(&(site_id, time_range.to_owned()))
    }

    pub fn top_earner_stats(
        &self,
        site_id: i64,
        granularity: &str,
        date: &str,
    ) -> Option<&TopEarnerStatsRecord> {
        self.load::<TopEarnerStatsRecord>(&(site_id, granularity.to_owned(), date.to_owned()))
    }

    /// Plugins of one site, ordered by name.
    pub fn system_plugins(&self, site_id: i64) -> Vec<&SystemPluginRecord> {
        // Keys are (site_id, name), so key order is name order within a site.
        self.load_all::<SystemPluginRecord>()
            .filter(|p| p.site_id == site_id)
            .collect()
    }

    /// Stored products of one site among `product_ids`.
    pub fn products(&self, site_id: i64, product_ids: &[i64]) -> Vec<&ProductRecord> {
        product_ids
            .iter()
            .filter_map(|id| self.load::<ProductRecord>(&(site_id, *id)))
            .collect()
    }

    pub fn site(&self, site_id: i64) -> Option<&SiteRecord> {
        self.load::<SiteRecord>(&site_id)
    }
}
