use serde::{Deserialize, Serialize};

use super::granularity::StatsGranularityV4;

/// Revenue stats for one site, one granularity.
///
/// `site_id` and `granularity` are not part of the payload; the remote
/// fills them from the request that produced the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub site_id: i64,
    pub granularity: StatsGranularityV4,
    pub totals: OrderStatsTotals,
    pub intervals: Vec<OrderStatsInterval>,
}

/// Aggregate figures for a whole period or one interval of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsTotals {
    #[serde(rename = "orders_count", default, deserialize_with = "super::de::i64_lenient")]
    pub total_orders: i64,
    #[serde(rename = "num_items_sold", default, deserialize_with = "super::de::i64_lenient")]
    pub total_items_sold: i64,
    #[serde(rename = "total_sales", default, deserialize_with = "super::de::f64_lenient")]
    pub gross_revenue: f64,
    #[serde(rename = "coupons", default, deserialize_with = "super::de::f64_lenient")]
    pub coupons_discount: f64,
    #[serde(rename = "coupons_count", default, deserialize_with = "super::de::i64_lenient")]
    pub total_coupons: i64,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub refunds: f64,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub taxes: f64,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub shipping: f64,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub net_revenue: f64,
    #[serde(rename = "products", default)]
    pub total_products: Option<i64>,
    #[serde(rename = "avg_order_value", default, deserialize_with = "super::de::f64_lenient")]
    pub average_order_value: f64,
}

/// One bucket of an [`OrderStats`] series.
///
/// `interval` is the natural key (e.g. `"2019-07-09 10"` for hourly data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatsInterval {
    pub interval: String,
    #[serde(default)]
    pub date_start: String,
    #[serde(default)]
    pub date_end: String,
    #[serde(default)]
    pub subtotals: OrderStatsTotals,
}

/// Raw `reports/revenue/stats` body.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderStatsPayload {
    #[serde(default)]
    pub totals: OrderStatsTotals,
    #[serde(default)]
    pub intervals: Vec<OrderStatsInterval>,
}

impl OrderStatsPayload {
    pub(crate) fn into_stats(self, site_id: i64, granularity: StatsGranularityV4) -> OrderStats {
        OrderStats {
            site_id,
            granularity,
            totals: self.totals,
            intervals: self.intervals,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_totals_with_string_amounts() {
        let payload: OrderStatsPayload = serde_json::from_value(json!({
            "totals": {
                "orders_count": 3,
                "num_items_sold": 5,
                "total_sales": "120.50",
                "coupons": 0,
                "coupons_count": 0,
                "refunds": 0,
                "taxes": 4.5,
                "shipping": 10,
                "net_revenue": 106,
                "products": 2,
                "avg_order_value": 40.16
            },
            "intervals": [{
                "interval": "2019-07-09",
                "date_start": "2019-07-09 00:00:00",
                "date_end": "2019-07-09 23:59:59",
                "subtotals": { "orders_count": 3, "total_sales": 120.5 }
            }]
        }))
        .unwrap();

        let stats = payload.into_stats(42, StatsGranularityV4::Daily);
        assert_eq!(stats.site_id, 42);
        assert_eq!(stats.totals.total_orders, 3);
        assert!((stats.totals.gross_revenue - 120.5).abs() < f64::EPSILON);
        assert_eq!(stats.totals.total_products, Some(2));
        assert_eq!(stats.intervals.len(), 1);
        assert_eq!(stats.intervals[0].subtotals.total_orders, 3);
        assert_eq!(stats.intervals[0].subtotals.total_items_sold, 0);
    }
}
