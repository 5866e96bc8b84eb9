// ── Store actions ──
//
// Every request to a store is a typed action variant carrying its
// parameters and exactly one completion. A `oneshot::Sender` can only be
// consumed once, so a store cannot answer twice.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use strum::Display;
use tokio::sync::oneshot;
use woo_api::models::SystemPlugin;

use crate::error::StoreError;
use crate::range::AnalyticsRange;

/// Completion channel for an action producing `T`.
pub type Completion<T> = oneshot::Sender<Result<T, StoreError>>;

/// Which store handles an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Analytics,
    SystemPlugin,
}

/// Any action understood by a registered store.
#[derive(Debug)]
pub enum Action {
    Analytics(AnalyticsAction),
    SystemPlugin(SystemPluginAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Analytics(_) => ActionKind::Analytics,
            Self::SystemPlugin(_) => ActionKind::SystemPlugin,
        }
    }
}

impl From<AnalyticsAction> for Action {
    fn from(action: AnalyticsAction) -> Self {
        Self::Analytics(action)
    }
}

impl From<SystemPluginAction> for Action {
    fn from(action: SystemPluginAction) -> Self {
        Self::SystemPlugin(action)
    }
}

// ── Analytics ────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum AnalyticsAction {
    /// Delete every stored order stats row.
    ResetStoredStats { on_completion: Completion<()> },

    /// Sync order (revenue) stats for `time_range`.
    ///
    /// Dates are local to the site.
    RetrieveStats {
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        quantity: u32,
        force_refresh: bool,
        on_completion: Completion<()>,
    },

    /// Sync visitor stats for `time_range`, ending at `latest`.
    RetrieveSiteVisitStats {
        site_id: i64,
        site_timezone: FixedOffset,
        time_range: AnalyticsRange,
        latest: DateTime<Utc>,
        on_completion: Completion<()>,
    },

    /// Sync the top earners for `time_range`.
    ///
    /// Dates are local to the site.
    RetrieveTopEarnerStats {
        site_id: i64,
        time_range: AnalyticsRange,
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        on_completion: Completion<()>,
    },
}

// ── System plugins ───────────────────────────────────────────────────

#[derive(Debug)]
pub enum SystemPluginAction {
    /// Fetch the site's plugins and replace the stored set with them.
    SynchronizeSystemPlugins {
        site_id: i64,
        on_completion: Completion<()>,
    },

    /// Read the stored plugins of a site, ordered by name.
    FetchSystemPlugins {
        site_id: i64,
        on_completion: Completion<Vec<SystemPlugin>>,
    },
}
