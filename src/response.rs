//! Last-response introspection.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use url::Url;

/// Header carrying the number of requests left in the current window.
const REQUESTS_AVAILABLE: &str = "x-requests-available";
/// Per-minute variant sent by newer deployments of the API.
const REQUESTS_AVAILABLE_MINUTE: &str = "x-requests-available-minute";
/// Seconds until the request counter resets.
const REQUEST_COUNTER_RESET: &str = "x-requestcounter-reset";

/// Raw outcome of the most recent request.
///
/// Recorded for every request, whether it succeeded, failed with an HTTP
/// status, or never got a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    url: Url,
    status: Option<u16>,
    headers: BTreeMap<String, String>,
    body: String,
}

impl RequestResult {
    pub(crate) fn new(
        url: Url,
        status: Option<u16>,
        headers: BTreeMap<String, String>,
        body: String,
    ) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    /// Outcome of a request that failed before any HTTP response arrived.
    pub(crate) fn transport_failure(url: Url) -> Self {
        Self::new(url, None, BTreeMap::new(), String::new())
    }

    /// The requested URL, including query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status code, or `None` if no response was received.
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| (200..300).contains(&s))
    }

    /// Response headers, keyed by lower-cased name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Requests left before upstream starts answering 429.
    pub fn requests_available(&self) -> Option<u32> {
        self.header(REQUESTS_AVAILABLE)
            .or_else(|| self.header(REQUESTS_AVAILABLE_MINUTE))
            .and_then(|v| v.trim().parse().ok())
    }

    /// Seconds until the rate-limit counter resets.
    pub fn request_counter_reset(&self) -> Option<u64> {
        self.header(REQUEST_COUNTER_RESET)
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Single-slot store for the most recent [`RequestResult`].
#[derive(Debug, Default)]
pub(crate) struct ResponseCache {
    slot: Mutex<Option<RequestResult>>,
}

impl ResponseCache {
    /// Replace whatever was stored with `result`.
    pub(crate) fn record(&self, result: RequestResult) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
    }

    /// Copy of the stored result, `None` before the first request.
    pub(crate) fn last(&self) -> Option<RequestResult> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
