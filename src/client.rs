//! football-data API client.
//!
//! Low-level HTTP client that handles authentication, raw requests and
//! last-response tracking. Entity-specific operations are implemented via
//! traits on model types and surfaced as convenience methods in `facade`.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{FootballError, Result};
use crate::response::{RequestResult, ResponseCache};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FOOTBALL_DATA_API_KEY";
/// Older key variable, read when [`API_KEY_ENV`] is unset.
pub const LEGACY_API_KEY_ENV: &str = "PYFOOTBALL_API_KEY";
/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "FOOTBALL_DATA_API_URL";

const DEFAULT_API_URL: &str = "https://api.football-data.org/v1/";
const AUTH_HEADER: &str = "X-Auth-Token";
const USER_AGENT: &str = concat!("footballdata/", env!("CARGO_PKG_VERSION"));

/// football-data API client.
///
/// Handles authentication and HTTP requests, and keeps the outcome of the
/// most recent request for [`last_response`](Self::last_response).
///
/// Clones share the connection pool and the last-response slot; separately
/// constructed clients never see each other's responses.
///
/// # Example
///
/// ```no_run
/// use footballdata::FootballClient;
///
/// # fn example() -> footballdata::Result<()> {
/// // Key from FOOTBALL_DATA_API_KEY
/// let client = FootballClient::from_env()?;
///
/// // Or explicitly, against another deployment
/// let client = FootballClient::with_base_url("your-api-key", "http://localhost:8080/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FootballClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    last_response: Arc<ResponseCache>,
}

impl std::fmt::Debug for FootballClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootballClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FootballClient {
    /// Create a client for the public API with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Configuration`] if `api_key` is empty.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    /// Create a client from environment variables.
    ///
    /// Uses `FOOTBALL_DATA_API_KEY` (or, failing that, `PYFOOTBALL_API_KEY`)
    /// for authentication and optionally `FOOTBALL_DATA_API_URL` for the
    /// base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FootballError::Configuration`] if no key is set.
    pub fn from_env() -> Result<Self> {
        Self::from_key_or_env(None)
    }

    /// Create a client from an explicit key, falling back to the environment.
    ///
    /// The explicit key wins when both are present. No request is made.
    pub fn from_key_or_env(api_key: Option<&str>) -> Result<Self> {
        let token = resolve_api_key(api_key, |var| env::var(var).ok())?;
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::with_base_url(&token, &base_url)
    }

    /// Create a new client with the provided key and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the base URL is invalid.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let token = resolve_api_key(Some(api_key), |_| None)?;

        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(FootballError::Transport)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token,
            last_response: Arc::new(ResponseCache::default()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Outcome of the most recent request, `None` before the first one.
    pub fn last_response(&self) -> Option<RequestResult> {
        self.last_response.last()
    }

    /// Make a GET request and decode the JSON body.
    ///
    /// `path` is relative to the base URL. Absolute URLs and paths that
    /// resolve outside the base URL are rejected with
    /// [`FootballError::InvalidArgument`] before anything is sent.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch(&self, path: &str) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        let request = self.http.get(url.clone());

        self.execute(url, request).await
    }

    /// Make a GET request with query parameters and decode the JSON body.
    ///
    /// Same path rules as [`dispatch`](Self::dispatch).
    #[tracing::instrument(skip(self, query))]
    pub async fn dispatch_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        let request = self.http.get(url.clone()).query(query);

        self.execute(url, request).await
    }

    /// Join `path` onto the base URL, refusing anything that leaves it.
    ///
    /// Keeps the API key on the configured origin and base prefix.
    fn endpoint_url(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path)?;

        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path())
        {
            return Err(FootballError::InvalidArgument(format!(
                "path '{path}' resolves outside the API base URL"
            )));
        }

        Ok(url)
    }

    /// Send an authenticated request, record its outcome and check the status.
    async fn execute(&self, url: Url, request: RequestBuilder) -> Result<Value> {
        let sent = match request.header(AUTH_HEADER, &self.token).build() {
            Ok(request) => self.http.execute(request).await,
            Err(e) => Err(e),
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "request failed before a response arrived");
                self.last_response
                    .record(RequestResult::transport_failure(e.url().cloned().unwrap_or(url)));
                return Err(FootballError::Transport(e));
            }
        };

        let result = Self::capture(response).await;
        let (result, read_error) = match result {
            Ok(result) => (result, None),
            Err((partial, e)) => (partial, Some(e)),
        };
        self.last_response.record(result.clone());

        tracing::debug!(
            status = ?result.status_code(),
            requests_available = ?result.requests_available(),
            "response recorded"
        );

        if let Some(e) = read_error {
            return Err(FootballError::Transport(e));
        }

        Self::check_status(&result)?;

        Ok(serde_json::from_str(result.body())?)
    }

    /// Copy status, headers and body out of a response.
    ///
    /// When the body cannot be read, the status and headers are still
    /// returned alongside the error.
    async fn capture(
        response: Response,
    ) -> core::result::Result<RequestResult, (RequestResult, reqwest::Error)> {
        let url = response.url().clone();
        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        match response.text().await {
            Ok(body) => Ok(RequestResult::new(url, Some(status), headers, body)),
            Err(e) => Err((RequestResult::new(url, Some(status), headers, String::new()), e)),
        }
    }

    /// Check response status and convert errors.
    fn check_status(result: &RequestResult) -> Result<()> {
        let status = result.status_code().unwrap_or_default();

        match status {
            200..=299 => Ok(()),
            401 | 403 => Err(FootballError::Authentication {
                status,
                message: Self::extract_error_message(result.body(), status),
            }),
            404 => Err(FootballError::NotFound {
                entity_type: "resource",
                id: result.url().path().trim_start_matches('/').to_string(),
            }),
            _ => {
                if status == 429 {
                    tracing::warn!(
                        reset_after_secs = ?result.request_counter_reset(),
                        "rate limit exhausted"
                    );
                }
                Err(FootballError::Request {
                    status,
                    body: result.body().to_string(),
                })
            }
        }
    }

    /// Extract error message from a failed response body.
    fn extract_error_message(body: &str, status: u16) -> String {
        if body.is_empty() {
            return format!("HTTP {status}");
        }

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(body) {
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        body.to_string()
    }
}

/// Pick the explicit key if given, else look up [`API_KEY_ENV`], then
/// [`LEGACY_API_KEY_ENV`].
///
/// Blank keys are treated as missing.
pub(crate) fn resolve_api_key<F>(explicit: Option<&str>, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = explicit.map(str::trim).filter(|k| !k.is_empty());
    if let Some(key) = explicit {
        return Ok(key.to_string());
    }

    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .into_iter()
        .filter_map(&lookup)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            FootballError::Configuration(format!(
                "no API key given and neither {API_KEY_ENV} nor {LEGACY_API_KEY_ENV} is set"
            ))
        })
}
