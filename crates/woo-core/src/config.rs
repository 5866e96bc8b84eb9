// ── Runtime session configuration ──
//
// Describes *how* to reach the API and where to cache records. Carries
// the credential, but never touches config files. The CLI builds a
// `SessionConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Everything needed to build a [`StoresManager`](crate::StoresManager).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API root (e.g. `https://public-api.wordpress.com/`).
    pub base_url: Url,
    /// WordPress.com bearer token.
    pub token: SecretString,
    /// Store the commands operate on. Site listing works without one.
    pub site_id: Option<i64>,
    /// Request timeout.
    pub timeout: Duration,
    /// JSON cache file. `None` keeps records in memory only.
    pub cache_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            base_url,
            token,
            site_id: None,
            timeout: Duration::from_secs(30),
            cache_path: None,
        }
    }
}
