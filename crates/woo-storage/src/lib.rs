//! Local record storage for the `woo` stores.
//!
//! - **[`StorageManager`]** owns the committed [`Tables`] and serializes
//!   writes. [`perform`](StorageManager::perform) runs a write closure on
//!   an explicit [`ExecutionContext`] against a private [`StorageContext`],
//!   then commits only if the closure succeeded and changed something.
//!
//! - **[`ViewStorage`]** is a wait-free snapshot for readers;
//!   **[`StorageStream`]** observes commits (`current()` / `latest()` /
//!   `changed()`, or as a `Stream`).
//!
//! - **[`reconcile_children`]** brings a parent's keyed children in line
//!   with a freshly fetched list.

pub mod context;
pub mod error;
pub mod manager;
pub mod reconcile;
pub mod records;
pub mod stream;
pub mod tables;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use context::StorageContext;
pub use error::StorageError;
pub use manager::{ExecutionContext, StorageManager};
pub use reconcile::{ReconcileOutcome, reconcile_children};
pub use records::{
    OrderStatsIntervalRecord, OrderStatsRecord, OrderStatsTotalsRecord, ProductRecord, Record,
    SiteRecord, SiteVisitStatsItemRecord, SiteVisitStatsRecord, SystemPluginRecord,
    TopEarnerStatsItemRecord, TopEarnerStatsRecord,
};
pub use stream::{StorageStream, StorageWatchStream};
pub use tables::{Entity, Table, Tables};
pub use view::ViewStorage;
