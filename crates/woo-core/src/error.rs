// ── Store error types ──
//
// Remote errors pass through untouched; the stores only add their own
// domain failures and the typed site-visit classification.

use thiserror::Error;
use woo_api::DotcomError;
use woo_storage::StorageError;

/// Error delivered to a store action's completion.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport, HTTP, or decoding failure from the remote, verbatim.
    #[error(transparent)]
    Remote(#[from] woo_api::Error),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsStoreError),

    #[error(transparent)]
    SiteVisitStats(#[from] SiteVisitStatsStoreError),

    /// The action was dropped without a response (no store registered
    /// for it, or the store went away).
    #[error("action was dropped before completing")]
    Cancelled,
}

impl StoreError {
    /// The remote error behind this failure, if any.
    pub fn remote(&self) -> Option<&woo_api::Error> {
        match self {
            Self::Remote(e) | Self::SiteVisitStats(SiteVisitStatsStoreError::Unknown(e)) => Some(e),
            _ => None,
        }
    }
}

/// Analytics failures raised locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsStoreError {
    /// The leaderboards response had no `products` leaderboard.
    #[error("leaderboards response is missing the top products leaderboard")]
    MissingTopProducts,
}

/// Why site visit stats could not be retrieved.
#[derive(Debug, Error)]
pub enum SiteVisitStatsStoreError {
    #[error("the Jetpack stats module is disabled for this site")]
    StatsModuleDisabled,

    #[error("the current user has no permission to view site stats")]
    NoPermission,

    #[error("failed to load site visit stats: {0}")]
    Unknown(#[source] woo_api::Error),
}

impl From<woo_api::Error> for SiteVisitStatsStoreError {
    fn from(err: woo_api::Error) -> Self {
        match err.dotcom().cloned() {
            Some(DotcomError::NoStatsPermission) => Self::NoPermission,
            Some(DotcomError::StatsModuleDisabled) => Self::StatsModuleDisabled,
            _ => Self::Unknown(err),
        }
    }
}
