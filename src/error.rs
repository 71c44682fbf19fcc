//! Error types for football-data API operations.

use thiserror::Error;

use crate::models::EntityKind;

/// Errors that can occur during football-data API operations.
#[derive(Debug, Error)]
pub enum FootballError {
    /// No usable API key was supplied.
    #[error("football-data configuration required: {0}")]
    Configuration(String),

    /// The API key was rejected (HTTP 401 or 403).
    #[error("API key rejected (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// The requested resource does not exist upstream.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Any other non-success HTTP status.
    #[error("football-data API error (HTTP {status}): {body}")]
    Request { status: u16, body: String },

    /// Network-level failure; no HTTP status is available.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Caller input rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FootballError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Request { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when upstream throttled the request (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Request { status: 429, .. })
    }

    /// Rewrite a path-level not-found into one naming the entity that was asked for.
    pub(crate) fn for_entity(self, kind: EntityKind, id: impl ToString) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: kind.as_str(),
                id: id.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for football-data operations.
pub type Result<T> = core::result::Result<T, FootballError>;
