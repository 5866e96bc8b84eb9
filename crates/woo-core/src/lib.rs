// woo-core: Action-dispatched stores that keep WooCommerce data in local storage.

pub mod action;
pub mod config;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod leaderboard;
pub mod manager;
pub mod range;
pub mod remote;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, ActionKind, AnalyticsAction, Completion, SystemPluginAction};
pub use config::SessionConfig;
pub use dispatcher::Dispatcher;
pub use error::{AnalyticsStoreError, SiteVisitStatsStoreError, StoreError};
pub use manager::StoresManager;
pub use range::{AnalyticsRange, build_date_string};
pub use remote::WooRemote;
pub use store::{AnalyticsStore, Store, SystemPluginStore};
