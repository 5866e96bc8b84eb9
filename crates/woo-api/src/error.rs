use thiserror::Error;

/// Top-level error type for the `woo-api` crate.
///
/// Covers every failure mode of the remote layer: transport, HTTP status,
/// WordPress.com error envelopes, and payload decoding.
/// `woo-core` passes these through to callers unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client construction failed (bad token header, TLS backend, ...).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Structured `{ error, message }` envelope returned by WordPress.com
    /// or tunnelled through Jetpack from the store.
    #[error("WordPress.com error: {0}")]
    Dotcom(DotcomError),

    /// Non-success HTTP status without a recognizable error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The store layer never retries; this is for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The WordPress.com error carried by this error, if any.
    pub fn dotcom(&self) -> Option<&DotcomError> {
        match self {
            Self::Dotcom(e) => Some(e),
            _ => None,
        }
    }
}

// ── DotcomError ─────────────────────────────────────────────────────

/// Error reported by WordPress.com in the `{ "error": code, "message": msg }` envelope.
///
/// A handful of code/message combinations carry a specific meaning and get
/// their own variant; everything else lands in [`DotcomError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotcomError {
    #[error("unauthorized")]
    Unauthorized,

    /// The authenticated user cannot view stats for the site.
    #[error("no permission to view site stats")]
    NoStatsPermission,

    /// The Jetpack stats module is switched off on the site.
    #[error("stats module disabled")]
    StatsModuleDisabled,

    #[error("request failed")]
    RequestFailed,

    #[error("resource does not exist")]
    ResourceDoesNotExist,

    #[error("{code}: {message}")]
    Unknown { code: String, message: String },
}

impl DotcomError {
    const UNAUTHORIZED: &'static str = "unauthorized";
    const INVALID_BLOG: &'static str = "invalid_blog";
    const REQUEST_FAILED: &'static str = "http_request_failed";
    const NOT_FOUND: &'static str = "rest_no_route";

    const NO_STATS_PERMISSION_MESSAGE: &'static str = "user cannot view stats";
    const STATS_MODULE_DISABLED_MESSAGE: &'static str =
        "This blog does not have the Stats module enabled";

    /// Classify an error envelope by its code and message.
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            Self::UNAUTHORIZED if message == Self::NO_STATS_PERMISSION_MESSAGE => {
                Self::NoStatsPermission
            }
            Self::UNAUTHORIZED => Self::Unauthorized,
            Self::INVALID_BLOG if message == Self::STATS_MODULE_DISABLED_MESSAGE => {
                Self::StatsModuleDisabled
            }
            Self::REQUEST_FAILED => Self::RequestFailed,
            Self::NOT_FOUND => Self::ResourceDoesNotExist,
            _ => Self::Unknown {
                code: code.to_owned(),
                message: message.to_owned(),
            },
        }
    }
}
