use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::value_to_i64;
use super::granularity::StatGranularity;

/// Visitor stats for one site, as returned by `sites/{id}/stats/visits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteVisitStats {
    pub site_id: i64,
    pub date: String,
    pub granularity: StatGranularity,
    pub items: Vec<SiteVisitStatsItem>,
}

/// One period of visitor stats. `period` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVisitStatsItem {
    pub period: String,
    pub visitors: i64,
    pub views: i64,
}

/// Raw visits body: a column-major table described by `fields`.
///
/// ```json
/// { "date": "2019-07-09", "unit": "day",
///   "fields": ["period", "views", "visitors"],
///   "data": [["2019-07-09", 12, 5]] }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct SiteVisitStatsPayload {
    pub date: String,
    pub unit: StatGranularity,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl SiteVisitStatsPayload {
    pub(crate) fn into_stats(self, site_id: i64) -> SiteVisitStats {
        let column = |name: &str| self.fields.iter().position(|f| f == name);
        let period_idx = column("period");
        let visitors_idx = column("visitors");
        let views_idx = column("views");

        let items = self
            .data
            .iter()
            .filter_map(|row| {
                let period = row.get(period_idx?)?.as_str()?.to_owned();
                let number = |idx: Option<usize>| {
                    idx.and_then(|i| row.get(i))
                        .and_then(value_to_i64)
                        .unwrap_or_default()
                };
                Some(SiteVisitStatsItem {
                    period,
                    visitors: number(visitors_idx),
                    views: number(views_idx),
                })
            })
            .collect();

        SiteVisitStats {
            site_id,
            date: self.date,
            granularity: self.unit,
            items,
        }
    }
}
