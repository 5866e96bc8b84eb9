use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Interval granularity understood by the `wc-analytics` endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum StatsGranularityV4 {
    #[serde(rename = "hour")]
    #[strum(serialize = "hour")]
    Hourly,
    #[serde(rename = "day")]
    #[strum(serialize = "day")]
    Daily,
    #[serde(rename = "week")]
    #[strum(serialize = "week")]
    Weekly,
    #[serde(rename = "month")]
    #[strum(serialize = "month")]
    Monthly,
    #[serde(rename = "year")]
    #[strum(serialize = "year")]
    Yearly,
}

/// Granularity used by WordPress.com stats (visits) and top earners.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatGranularity {
    Day,
    Week,
    Month,
    Year,
}
