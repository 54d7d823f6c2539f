//! Unified SDK error types.

use crate::task::{TaskId, TaskStatus};
use serde::Deserialize;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The polled task reached a terminal status other than `Succeeded`.
    #[error("task {id} ended as {status}")]
    TaskFailed {
        id: TaskId,
        status: TaskStatus,
        /// Failure detail reported by the service, when present.
        message: Option<String>,
    },

    /// The poll attempt budget ran out before the task went terminal.
    #[error("task {id} still {last_status} after {attempts} poll attempts")]
    PollTimeout {
        id: TaskId,
        last_status: TaskStatus,
        attempts: u32,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors, one variant per classified kind.
///
/// Every status-derived variant keeps the parsed `message` and the raw
/// response `body` so callers can branch on kind without losing detail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("bad request: {message}")]
    BadRequest { message: String, body: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String, body: String },

    #[error("payment required: {message}")]
    PaymentRequired { message: String, body: String },

    #[error("forbidden: {message}")]
    Forbidden { message: String, body: String },

    #[error("not found: {message}")]
    NotFound { message: String, body: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String, body: String },

    #[error("server error {status}: {message}")]
    ServerError {
        status: u16,
        message: String,
        body: String,
    },

    /// A status code outside the documented API surface.
    #[error("unexpected status {status}: {message}")]
    Unexpected {
        status: u16,
        message: String,
        body: String,
    },

    /// No response was received (connect failure, reset, DNS, decode).
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,
}

/// Structured error body the API sends on failures: `{"code": .., "message": ..}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response into an error kind.
    ///
    /// Pure: the same `(status, body)` pair always yields the same value.
    /// The message is taken from the structured error body when parseable,
    /// falling back to the raw text, then to `"HTTP {status}"`.
    pub fn classify(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.message)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        let body = body.to_string();

        match status {
            400 => ApiError::BadRequest { message, body },
            401 => ApiError::Unauthorized { message, body },
            402 => ApiError::PaymentRequired { message, body },
            403 => ApiError::Forbidden { message, body },
            404 => ApiError::NotFound { message, body },
            429 => ApiError::RateLimited { message, body },
            500 | 502 | 503 | 504 => ApiError::ServerError {
                status,
                message,
                body,
            },
            _ => ApiError::Unexpected {
                status,
                message,
                body,
            },
        }
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::PaymentRequired { .. } => Some(402),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::ServerError { status, .. } | ApiError::Unexpected { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(_) | ApiError::Timeout => None,
        }
    }

    /// True when no HTTP response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_documented_statuses() {
        assert!(matches!(
            ApiError::classify(400, ""),
            ApiError::BadRequest { .. }
        ));
        assert!(matches!(
            ApiError::classify(401, ""),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::classify(402, ""),
            ApiError::PaymentRequired { .. }
        ));
        assert!(matches!(
            ApiError::classify(403, ""),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            ApiError::classify(404, ""),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::classify(429, ""),
            ApiError::RateLimited { .. }
        ));
        for status in [500u16, 502, 503, 504] {
            match ApiError::classify(status, "") {
                ApiError::ServerError { status: s, .. } => assert_eq!(s, status),
                other => panic!("expected ServerError, got {other:?}"),
            }
        }
        assert!(matches!(
            ApiError::classify(418, ""),
            ApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn classify_prefers_structured_message() {
        let e = ApiError::classify(400, r#"{"code": 2002, "message": "prompt is required"}"#);
        match e {
            ApiError::BadRequest { message, .. } => assert_eq!(message, "prompt is required"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn classify_falls_back_to_raw_text_then_status() {
        match ApiError::classify(503, "upstream unavailable") {
            ApiError::ServerError { message, .. } => assert_eq!(message, "upstream unavailable"),
            other => panic!("expected ServerError, got {other:?}"),
        }
        match ApiError::classify(500, "  ") {
            ApiError::ServerError { message, .. } => assert_eq!(message, "HTTP 500"),
            other => panic!("expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let body = r#"{"message": "busy"}"#;
        assert_eq!(ApiError::classify(429, body), ApiError::classify(429, body));
    }

    #[test]
    fn status_round_trips() {
        assert_eq!(ApiError::classify(402, "").status(), Some(402));
        assert_eq!(ApiError::classify(504, "").status(), Some(504));
        assert_eq!(ApiError::Timeout.status(), None);
        assert_eq!(ApiError::Transport("connection reset".into()).status(), None);
    }
}
