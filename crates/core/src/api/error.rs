use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failures of a call through the HTTP façade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    /// Request never produced a response (DNS, connect, TLS, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Server answered 401; the persisted session has already been cleared.
    #[error("not authorized: {}", message.as_deref().unwrap_or("session expired"))]
    Unauthorized {
        /// `message` field of the error body, if any.
        message: Option<String>,
    },
    /// Any other non-success status.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status.
        status: StatusCode,
        /// `message` field of the error body, if any.
        message: Option<String>,
    },
    /// Success status but the body did not match the expected shape.
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        /// URL or API path that produced the body.
        endpoint: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error cleared the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a transient notification: the server's message, else `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull `message` out of a JSON error body.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}
