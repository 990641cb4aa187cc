//! Error types for the StatusPage.io client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when using the StatusPage.io client
///
/// Every variant produced from an HTTP response keeps the status code and the
/// raw response body.
#[derive(Error, Debug)]
pub enum ClientError {
    /// API key missing, invalid or lacking access (401/403)
    #[error("unauthorized ({status}): {message}")]
    Unauthorized {
        status: u16,
        message: String,
        body: String,
    },

    /// Page or resource does not exist (404)
    #[error("not found: {message}")]
    NotFound { message: String, body: String },

    /// Service rejected the payload shape (400/422)
    #[error("validation failed ({status}): {message}")]
    Validation {
        status: u16,
        message: String,
        body: String,
    },

    /// Service rejected the request on a business rule (409)
    #[error("conflict: {message}")]
    Conflict { message: String, body: String },

    /// Any other non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    /// DNS, connection or IO failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Response body does not match the expected schema
    #[error("failed to deserialize response: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Invalid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Identifier that cannot be used as a path segment
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),

    /// Client could not be constructed from the given configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a non-2xx response
    #[must_use]
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let message = error_message(status, &body);
        match status.as_u16() {
            401 | 403 => Self::Unauthorized {
                status: status.as_u16(),
                message,
                body,
            },
            404 => Self::NotFound { message, body },
            409 => Self::Conflict { message, body },
            400 | 422 => Self::Validation {
                status: status.as_u16(),
                message,
                body,
            },
            status => Self::Api {
                status,
                message,
                body,
            },
        }
    }

    /// HTTP status of the failed response, when there was one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. }
            | Self::Validation { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when there was one
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body, .. }
            | Self::NotFound { body, .. }
            | Self::Validation { body, .. }
            | Self::Conflict { body, .. }
            | Self::Api { body, .. }
            | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Error payloads the service is known to return
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Single { error: String },
    Many { error: Vec<String> },
    Message { message: String },
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Single { error }) => error,
        Ok(ErrorBody::Many { error }) => error.join("; "),
        Ok(ErrorBody::Message { message }) => message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
