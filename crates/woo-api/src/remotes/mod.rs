// Endpoint modules
//
// One file per resource, each adding inherent methods to `WooClient`.

mod leaderboards;
mod products;
mod sites;
mod stats;
mod system_plugins;

use chrono::NaiveDateTime;

/// Date format the `wc-analytics` endpoints expect for `after` / `before`:
/// ISO-8601 without a zone designator, interpreted in the store's timezone.
pub(crate) const WC_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) fn format_wc_date(date: NaiveDateTime) -> String {
    date.format(WC_DATE_FORMAT).to_string()
}
