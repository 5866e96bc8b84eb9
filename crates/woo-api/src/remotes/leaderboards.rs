use chrono::NaiveDateTime;
use tracing::debug;

use super::format_wc_date;
use crate::client::WooClient;
use crate::error::Error;
use crate::models::granularity::StatsGranularityV4;
use crate::models::leaderboard::Leaderboard;

impl WooClient {
    /// Fetch all leaderboards (products, categories, coupons, customers)
    /// for the period, each truncated to `quantity` rows.
    ///
    /// `GET /wc-analytics/leaderboards`
    pub async fn load_leaderboards(
        &self,
        site_id: i64,
        unit: StatsGranularityV4,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
    ) -> Result<Vec<Leaderboard>, Error> {
        let url = self.jetpack_url(
            site_id,
            "/wc-analytics/leaderboards",
            &[
                ("interval", unit.to_string()),
                ("after", format_wc_date(earliest)),
                ("before", format_wc_date(latest)),
                ("per_page", quantity.to_string()),
            ],
        )?;
        debug!(site_id, %unit, quantity, "fetching leaderboards");
        self.get_jetpack(url).await
    }
}
