//! Error types for the API client

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Fallback text when the backend flags `requiresKey` without a message
const REQUIRES_KEY_MESSAGE: &str = "This advert requires an access key";

/// Domain condition attached to a backend-reported failure
///
/// Callers branch on the kind instead of matching the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The advert is private and the request carried no valid access key
    RequiresKey,
    /// The caller tried to upvote a listing they own
    CannotUpvoteOwn,
    /// The caller hit the listing limit of their plan
    LimitReached,
    /// Any other backend failure
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RequiresKey => "requiresKey",
            Self::CannotUpvoteOwn => "cannotUpvoteOwn",
            Self::LimitReached => "limitReached",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Successful response did not have the expected structure
    #[error("{0}")]
    UnexpectedResponse(String),

    /// Token storage could not be read or written
    #[error("Token storage error: {0}")]
    Storage(String),

    /// Backend returned an error response
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the backend
        message: String,
        /// Domain marker carried by the error body
        kind: ErrorKind,
    },
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an unexpected-response error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Build an error from a non-success status and its raw body
    ///
    /// The body's `message` wins; otherwise the text mirrors what the
    /// transport would report for a bare status failure.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let kind = parsed.kind();

        let message = match parsed.message.filter(|m| !m.is_empty()) {
            Some(message) => message,
            None if kind == ErrorKind::RequiresKey => REQUIRES_KEY_MESSAGE.to_string(),
            None => format!("Request failed with status code {status}"),
        };

        Self::Api {
            status,
            message,
            kind,
        }
    }

    /// The domain marker, `Generic` for anything not reported by the backend
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { kind, .. } => *kind,
            _ => ErrorKind::Generic,
        }
    }

    /// Human-readable message for presentation
    ///
    /// Backend failures yield the backend's message; transport failures
    /// yield the transport's own text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Request(e) => e.to_string(),
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status when the backend answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Shorthand for `kind() == RequiresKey`
    #[must_use]
    pub fn requires_key(&self) -> bool {
        self.kind() == ErrorKind::RequiresKey
    }

    /// Shorthand for `kind() == CannotUpvoteOwn`
    #[must_use]
    pub fn cannot_upvote_own(&self) -> bool {
        self.kind() == ErrorKind::CannotUpvoteOwn
    }

    /// Shorthand for `kind() == LimitReached`
    #[must_use]
    pub fn limit_reached(&self) -> bool {
        self.kind() == ErrorKind::LimitReached
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

/// Error body as sent by the backend
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    requires_key: bool,
    #[serde(default)]
    cannot_upvote_own: bool,
    #[serde(default)]
    limit_reached: bool,
}

impl ErrorBody {
    fn kind(&self) -> ErrorKind {
        if self.requires_key {
            ErrorKind::RequiresKey
        } else if self.cannot_upvote_own {
            ErrorKind::CannotUpvoteOwn
        } else if self.limit_reached {
            ErrorKind::LimitReached
        } else {
            ErrorKind::Generic
        }
    }
}
