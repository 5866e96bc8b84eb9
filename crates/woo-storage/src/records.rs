// ── Persisted records ──
//
// Mutable, identity-keyed rows of the local cache. Each record type has a
// natural key; owned children live in keyed maps so a parent can never
// hold two children with the same key.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A row type with a natural key.
pub trait Record: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: Ord + Clone + Debug + Send + Sync;

    /// Short name used in log output.
    const NAME: &'static str;

    fn key(&self) -> Self::Key;
}

// ── Order stats ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsRecord {
    pub site_id: i64,
    /// Raw value of the analytics range this row was synced for.
    pub time_range: String,
    pub granularity: String,
    pub totals: OrderStatsTotalsRecord,
    /// Keyed by `interval`.
    pub intervals: BTreeMap<String, OrderStatsIntervalRecord>,
}

impl OrderStatsRecord {
    pub fn new(site_id: i64, time_range: impl Into<String>) -> Self {
        Self {
            site_id,
            time_range: time_range.into(),
            ..Self::default()
        }
    }
}

impl Record for OrderStatsRecord {
    type Key = (i64, String);
    const NAME: &'static str = "order_stats";

    fn key(&self) -> Self::Key {
        (self.site_id, self.time_range.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsTotalsRecord {
    pub total_orders: i64,
    pub total_items_sold: i64,
    pub gross_revenue: f64,
    pub coupons_discount: f64,
    pub total_coupons: i64,
    pub refunds: f64,
    pub taxes: f64,
    pub shipping: f64,
    pub net_revenue: f64,
    pub total_products: Option<i64>,
    pub average_order_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsIntervalRecord {
    pub interval: String,
    pub date_start: String,
    pub date_end: String,
    pub subtotals: OrderStatsTotalsRecord,
}

// ── Site visit stats ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteVisitStatsRecord {
    pub site_id: i64,
    pub time_range: String,
    pub date: String,
    pub granularity: String,
    /// Keyed by `period`.
    pub items: BTreeMap<String, SiteVisitStatsItemRecord>,
}

impl SiteVisitStatsRecord {
    pub fn new(site_id: i64, time_range: impl Into<String>) -> Self {
        Self {
            site_id,
            time_range: time_range.into(),
            ..Self::default()
        }
    }
}

impl Record for SiteVisitStatsRecord {
    type Key = (i64, String);
    const NAME: &'static str = "site_visit_stats";

    fn key(&self) -> Self::Key {
        (self.site_id, self.time_range.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteVisitStatsItemRecord {
    pub period: String,
    pub visitors: i64,
    pub views: i64,
}

// ── Top earners ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopEarnerStatsRecord {
    pub site_id: i64,
    pub granularity: String,
    pub date: String,
    pub limit: String,
    /// Keyed by `product_id`.
    pub items: BTreeMap<i64, TopEarnerStatsItemRecord>,
}

impl TopEarnerStatsRecord {
    pub fn new(site_id: i64, granularity: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            site_id,
            granularity: granularity.into(),
            date: date.into(),
            ..Self::default()
        }
    }
}

impl Record for TopEarnerStatsRecord {
    type Key = (i64, String, String);
    const NAME: &'static str = "top_earner_stats";

    fn key(&self) -> Self::Key {
        (self.site_id, self.granularity.clone(), self.date.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopEarnerStatsItemRecord {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub currency: String,
    pub image_url: Option<String>,
}

// ── System plugins ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPluginRecord {
    pub site_id: i64,
    pub name: String,
    pub plugin: String,
    pub url: String,
    pub author_name: String,
    pub author_url: String,
    pub version: String,
    pub version_latest: String,
    pub network_activated: bool,
    pub active: bool,
}

impl SystemPluginRecord {
    pub fn new(site_id: i64, name: impl Into<String>) -> Self {
        Self {
            site_id,
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Record for SystemPluginRecord {
    type Key = (i64, String);
    const NAME: &'static str = "system_plugin";

    fn key(&self) -> Self::Key {
        (self.site_id, self.name.clone())
    }
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub site_id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: String,
    pub permalink: String,
    pub images: Vec<String>,
}

impl ProductRecord {
    pub fn new(site_id: i64, product_id: i64) -> Self {
        Self {
            site_id,
            product_id,
            ..Self::default()
        }
    }
}

impl Record for ProductRecord {
    type Key = (i64, i64);
    const NAME: &'static str = "product";

    fn key(&self) -> Self::Key {
        (self.site_id, self.product_id)
    }
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub site_id: i64,
    pub name: String,
    pub description: String,
    pub url: String,
    pub plan: String,
    pub is_woocommerce_active: bool,
    pub is_wordpress_store: bool,
    pub timezone: String,
    pub gmt_offset: f64,
}

impl SiteRecord {
    pub fn new(site_id: i64) -> Self {
        Self {
            site_id,
            ..Self::default()
        }
    }
}

impl Record for SiteRecord {
    type Key = i64;
    const NAME: &'static str = "site";

    fn key(&self) -> Self::Key {
        self.site_id
    }
}
