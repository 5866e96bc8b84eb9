//! CLI error types with miette diagnostics.
//!
//! Maps store and config failures into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use woo_api::DotcomError;
use woo_config::ConfigError;
use woo_core::{AnalyticsStoreError, SiteVisitStatsStoreError, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {url}")]
    #[diagnostic(
        code(woo::connection_failed),
        help("Check your network connection and the profile's api_base.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(woo::timeout),
        help("Increase the timeout with --timeout or the profile's timeout setting.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(woo::auth_failed),
        help(
            "The token was rejected. Store a fresh one with:\n\
             woo config set-token <TOKEN> --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(woo::no_credentials),
        help(
            "Pass --token, set WOO_TOKEN, or run: woo config set-token <TOKEN>\n\
             Profiles may also name an env var with token_env."
        )
    )]
    NoCredentials { profile: String },

    #[error("{reason}")]
    #[diagnostic(code(woo::permission_denied))]
    PermissionDenied { reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("No site selected")]
    #[diagnostic(
        code(woo::no_site),
        help("Pass --site <ID> or set site_id in the profile. List sites with: woo sites list")
    )]
    NoSite,

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(woo::not_found),
        help("Run: woo {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Stats are unavailable: {reason}")]
    #[diagnostic(
        code(woo::stats_unavailable),
        help("Enable the Jetpack Stats module on the site, then try again.")
    )]
    StatsUnavailable { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(woo::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(woo::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(woo::config))]
    Config(ConfigError),

    // ── Local storage ────────────────────────────────────────────────
    #[error("Local record cache failed: {0}")]
    #[diagnostic(
        code(woo::storage),
        help("Retry with --no-cache, or delete the profile's cache file.")
    )]
    Storage(#[source] woo_storage::StorageError),

    #[error("Internal error: {0}")]
    #[diagnostic(code(woo::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(woo::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } | Self::StatsUnavailable { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::NoSite => exit_code::USAGE,
            Self::Config(ConfigError::NoCredentials { .. }) => exit_code::AUTH,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── StoreError → CliError ────────────────────────────────────────────

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Remote(e) | StoreError::SiteVisitStats(SiteVisitStatsStoreError::Unknown(e)) => {
                e.into()
            }
            StoreError::SiteVisitStats(SiteVisitStatsStoreError::NoPermission) => {
                Self::PermissionDenied {
                    reason: "this account cannot view stats for the site".into(),
                }
            }
            StoreError::SiteVisitStats(SiteVisitStatsStoreError::StatsModuleDisabled) => {
                Self::StatsUnavailable {
                    reason: "the Jetpack Stats module is disabled".into(),
                }
            }
            StoreError::Analytics(AnalyticsStoreError::MissingTopProducts) => Self::ApiError {
                code: "missing_top_products".into(),
                message: AnalyticsStoreError::MissingTopProducts.to_string(),
            },
            StoreError::Storage(e) => Self::Storage(e),
            StoreError::Cancelled => Self::Internal("store action was dropped".into()),
        }
    }
}

impl From<woo_api::Error> for CliError {
    fn from(err: woo_api::Error) -> Self {
        match err {
            woo_api::Error::Transport(e) if e.is_timeout() => Self::Timeout,
            woo_api::Error::Transport(e) => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: Box::new(e),
            },
            woo_api::Error::Dotcom(DotcomError::Unauthorized) => Self::AuthFailed {
                profile: "current".into(),
            },
            woo_api::Error::Dotcom(DotcomError::NoStatsPermission) => Self::PermissionDenied {
                reason: "this account cannot view stats for the site".into(),
            },
            woo_api::Error::Dotcom(DotcomError::StatsModuleDisabled) => Self::StatsUnavailable {
                reason: "the Jetpack Stats module is disabled".into(),
            },
            woo_api::Error::Dotcom(DotcomError::ResourceDoesNotExist) => Self::NotFound {
                resource_type: "endpoint".into(),
                identifier: "WooCommerce REST route".into(),
                list_command: "sites list".into(),
            },
            woo_api::Error::Dotcom(DotcomError::Unknown { code, message }) => {
                Self::ApiError { code, message }
            }
            woo_api::Error::Dotcom(other) => Self::ApiError {
                code: "dotcom".into(),
                message: other.to_string(),
            },
            woo_api::Error::Http { status, body } => Self::ApiError {
                code: status.to_string(),
                message: body,
            },
            woo_api::Error::InvalidUrl(e) => Self::Validation {
                field: "api_base".into(),
                reason: e.to_string(),
            },
            other @ (woo_api::Error::ClientBuild(_) | woo_api::Error::Deserialization { .. }) => {
                Self::Internal(other.to_string())
            }
        }
    }
}
