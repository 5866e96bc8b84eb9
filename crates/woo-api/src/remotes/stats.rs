// Stats endpoints
//
// Order (revenue) stats come from `wc-analytics` through the Jetpack
// tunnel; visitor stats come straight from WordPress.com.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::format_wc_date;
use crate::client::WooClient;
use crate::error::Error;
use crate::models::granularity::{StatGranularity, StatsGranularityV4};
use crate::models::order_stats::{OrderStats, OrderStatsPayload};
use crate::models::site_visit_stats::{SiteVisitStats, SiteVisitStatsPayload};

impl WooClient {
    /// Fetch revenue stats bucketed by `unit`.
    ///
    /// `GET /wc-analytics/reports/revenue/stats`
    ///
    /// `quantity` caps the number of intervals returned.
    pub async fn load_order_stats(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
    ) -> Result<OrderStats, Error> {
        let url = self.jetpack_url(
            site_id,
            "/wc-analytics/reports/revenue/stats",
            &[
                ("interval", unit.to_string()),
                ("after", format_wc_date(earliest)),
                ("before", format_wc_date(latest)),
                ("per_page", quantity.to_string()),
                ("force_cache_refresh", force_refresh.to_string()),
            ],
        )?;
        debug!(site_id, %unit, quantity, "fetching order stats");

        let payload: OrderStatsPayload = self.get_jetpack(url).await?;
        Ok(payload.into_stats(site_id, unit))
    }

    /// Fetch visitor stats ending at `latest`.
    ///
    /// `GET sites/{site}/stats/visits/`
    pub async fn load_site_visit_stats(
        &self,
        site_id: i64,
        unit: StatGranularity,
        latest: NaiveDate,
        quantity: u32,
    ) -> Result<SiteVisitStats, Error> {
        let mut url = self.dotcom_url(&format!("sites/{site_id}/stats/visits/"))?;
        url.query_pairs_mut()
            .append_pair("unit", unit.as_ref())
            .append_pair("date", &latest.format("%Y-%m-%d").to_string())
            .append_pair("quantity", &quantity.to_string())
            .append_pair("stat_fields", "visitors,views");
        debug!(site_id, %unit, quantity, "fetching site visit stats");

        let payload: SiteVisitStatsPayload = self.get_dotcom(url).await?;
        Ok(payload.into_stats(site_id))
    }
}
