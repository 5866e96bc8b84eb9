// Remote DTOs
//
// Immutable value types decoded from API responses. Where the payload
// shape differs from the domain shape (column tables, nested options,
// ids injected from the request) a crate-private `*Payload` type does
// the decoding and the public type stays flat.

pub(crate) mod de;
pub mod granularity;
pub mod leaderboard;
pub mod order_stats;
pub mod product;
pub mod site;
pub mod site_visit_stats;
pub mod system_plugin;
pub mod top_earner;

pub use granularity::{StatGranularity, StatsGranularityV4};
pub use leaderboard::{Leaderboard, LeaderboardRow, LeaderboardRowContent};
pub use order_stats::{OrderStats, OrderStatsInterval, OrderStatsTotals};
pub use product::{Product, ProductImage};
pub use site::Site;
pub use site_visit_stats::{SiteVisitStats, SiteVisitStatsItem};
pub use system_plugin::SystemPlugin;
pub use top_earner::{TopEarnerStats, TopEarnerStatsItem};
