use serde::{Deserialize, Serialize};

use super::granularity::StatGranularity;

/// Top-selling products for a period. Built locally from a leaderboard
/// and product data; there is no endpoint that returns this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEarnerStats {
    pub site_id: i64,
    /// Period identifier formatted for the granularity (`2019-07-09`, `2019-W28`, ...).
    pub date: String,
    pub granularity: StatGranularity,
    pub limit: String,
    pub items: Vec<TopEarnerStatsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEarnerStatsItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub currency: String,
    pub image_url: Option<String>,
}
