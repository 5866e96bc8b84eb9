// WordPress.com / WooCommerce HTTP client
//
// Wraps `reqwest::Client` with URL construction for the two request
// flavours the stores use: plain WordPress.com REST calls and WooCommerce
// calls tunnelled through Jetpack. Endpoint methods live in `remotes/`
// as inherent impls so this module stays focused on transport mechanics.

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{DotcomError, Error};
use crate::transport::TransportConfig;

/// Default WordPress.com API root.
pub const DEFAULT_BASE_URL: &str = "https://public-api.wordpress.com/";

const DOTCOM_API_VERSION: &str = "rest/v1.1";

/// Raw HTTP client for the WordPress.com REST API.
///
/// Jetpack-tunnelled responses are wrapped in `{ "data": ... }`; the
/// wrapper and `{ "error", "message" }` envelopes are stripped here so
/// callers only ever see decoded payloads or an [`Error`].
#[derive(Clone)]
pub struct WooClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WooClient {
    /// Create a client authenticating every request with `token`.
    pub fn new(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_token(token)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Used by tests and by callers that manage authentication themselves.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}rest/v1.1/{path}`
    pub(crate) fn dotcom_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{DOTCOM_API_VERSION}/{path}"))?)
    }

    /// Jetpack tunnel URL for a WooCommerce route on `site_id`.
    ///
    /// The WooCommerce query travels inside the `path` parameter:
    /// `{base}rest/v1.1/jetpack-blogs/{site}/rest-api/?path=/wc/v3/x?a=1%26_method=get&json=true`
    pub(crate) fn jetpack_url(
        &self,
        site_id: i64,
        wc_path: &str,
        query: &[(&str, String)],
    ) -> Result<Url, Error> {
        let mut inner = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in query {
            inner.append_pair(key, value);
        }
        let inner = inner.finish();

        let tunnelled = if inner.is_empty() {
            format!("{wc_path}&_method=get")
        } else {
            format!("{wc_path}?{inner}&_method=get")
        };

        let mut url = self.dotcom_url(&format!("jetpack-blogs/{site_id}/rest-api/"))?;
        url.query_pairs_mut()
            .append_pair("path", &tunnelled)
            .append_pair("json", "true");
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a WordPress.com endpoint and decode the body as-is.
    pub(crate) async fn get_dotcom<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_body(url).await?;
        decode(&body)
    }

    /// GET a Jetpack-tunnelled endpoint and unwrap the `data` envelope.
    pub(crate) async fn get_jetpack<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let body = self.get_body(url).await?;
        let envelope: JetpackEnvelope<T> = decode(&body)?;
        Ok(envelope.data)
    }

    async fn get_body(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if let Some(err) = parse_error_envelope(&body) {
            return Err(Error::Dotcom(err));
        }
        if !status.is_success() {
            return Err(status_error(status, body));
        }
        Ok(body)
    }
}

// ── Envelopes ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct JetpackEnvelope<T> {
    data: T,
}

/// Detect `{ "error": code, "message": msg }`, which WordPress.com sends
/// both with error statuses and, for tunnelled calls, with 200.
fn parse_error_envelope(body: &str) -> Option<DotcomError> {
    let value: Value = serde_json::from_str(body).ok()?;
    let code = value.get("error")?.as_str()?;
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(DotcomError::from_code(code, message))
}

fn status_error(status: StatusCode, body: String) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::Dotcom(DotcomError::Unauthorized);
    }
    Error::Http {
        status: status.as_u16(),
        body,
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
