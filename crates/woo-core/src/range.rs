// ── Analytics ranges ──
//
// The four dashboard ranges and the granularities each one maps to on
// the different stats endpoints.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use woo_api::models::{StatGranularity, StatsGranularityV4};

/// A dashboard time range.
///
/// The string form (`"today"`, `"thisWeek"`, ...) is the key stats are
/// stored under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AnalyticsRange {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl AnalyticsRange {
    /// Raw value used as the storage key.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Bucket size for order stats intervals.
    pub fn interval_granularity(self) -> StatsGranularityV4 {
        match self {
            Self::Today => StatsGranularityV4::Hourly,
            Self::ThisWeek | Self::ThisMonth => StatsGranularityV4::Daily,
            Self::ThisYear => StatsGranularityV4::Monthly,
        }
    }

    /// Bucket size for visitor stats.
    pub fn site_visit_stats_granularity(self) -> StatGranularity {
        match self {
            Self::Today | Self::ThisWeek | Self::ThisMonth => StatGranularity::Day,
            Self::ThisYear => StatGranularity::Month,
        }
    }

    /// Interval passed to the leaderboards endpoint.
    pub fn leaderboards_granularity(self) -> StatsGranularityV4 {
        match self {
            Self::Today => StatsGranularityV4::Daily,
            Self::ThisWeek => StatsGranularityV4::Weekly,
            Self::ThisMonth => StatsGranularityV4::Monthly,
            Self::ThisYear => StatsGranularityV4::Yearly,
        }
    }

    /// Granularity top earner stats are stored under.
    pub fn top_earner_stats_granularity(self) -> StatGranularity {
        match self {
            Self::Today => StatGranularity::Day,
            Self::ThisWeek => StatGranularity::Week,
            Self::ThisMonth => StatGranularity::Month,
            Self::ThisYear => StatGranularity::Year,
        }
    }

    /// How many visitor stats buckets cover this range ending at `date`.
    ///
    /// For `ThisMonth` that is the number of days in the month `date`
    /// falls in, as seen from the site's timezone.
    pub fn site_visit_stats_quantity(self, date: DateTime<Utc>, site_timezone: FixedOffset) -> u32 {
        match self {
            Self::Today => 1,
            Self::ThisWeek => 7,
            Self::ThisMonth => days_in_month(date.with_timezone(&site_timezone).date_naive()),
            Self::ThisYear => 12,
        }
    }

    /// First and last second of the range containing `now`, both local to
    /// the site. Weeks start on Monday.
    pub fn bounds(self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let today = now.date();
        let (first, last) = match self {
            Self::Today => (today, today),
            Self::ThisWeek => {
                let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
                (monday, monday + Days::new(6))
            }
            Self::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                (first, first + Days::new(u64::from(days_in_month(first)) - 1))
            }
            Self::ThisYear => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
            ),
        };
        (first.and_time(NaiveTime::MIN), last.and_time(end_of_day()))
    }

    /// Number of order stats intervals covering the range containing `now`.
    pub fn order_stats_quantity(self, now: NaiveDateTime) -> u32 {
        match self {
            Self::Today => 24,
            Self::ThisWeek => 7,
            Self::ThisMonth => days_in_month(now.date()),
            Self::ThisYear => 12,
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| u32::try_from(next.signed_duration_since(first).num_days()).ok())
        .unwrap_or(31)
}

/// Format `date` the way stats are keyed for `granularity`:
/// `2019-07-09`, `2019-W28`, `2019-07`, or `2019`.
pub fn build_date_string(date: NaiveDateTime, granularity: StatGranularity) -> String {
    let format = match granularity {
        StatGranularity::Day => "%Y-%m-%d",
        StatGranularity::Week => "%G-W%V",
        StatGranularity::Month => "%Y-%m",
        StatGranularity::Year => "%Y",
    };
    date.format(format).to_string()
}
