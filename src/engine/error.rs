// ABOUTME: Engine client error types with SNAFU pattern.
// ABOUTME: One closed taxonomy over transport, status, and decode failures.

use crate::http::HttpError;
use snafu::Snafu;

/// Failure of a single engine operation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EngineError {
    #[snafu(display("{source}"))]
    Http { source: HttpError },

    #[snafu(display("request failed: {message}"))]
    RequestFailed { status: u16, message: String },

    #[snafu(display("failed to decode {what}: {source}"))]
    Decode {
        what: &'static str,
        source: serde_json::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Socket could not be opened, or the engine hung up mid-exchange.
    Connection,
    /// Platform I/O failure while writing or reading.
    Io,
    /// Response bytes were not a valid HTTP response.
    MalformedResponse,
    /// Engine answered with a non-2xx status.
    RequestFailed,
    /// Deadline elapsed before the response was complete.
    TimedOut,
    /// A successful response did not match the expected JSON shape.
    Decode,
}

impl EngineError {
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::Http { source } => match source {
                HttpError::Connect { .. } | HttpError::Disconnected(_) => {
                    EngineErrorKind::Connection
                }
                HttpError::Io(_) => EngineErrorKind::Io,
                HttpError::MalformedResponse(_) => EngineErrorKind::MalformedResponse,
                HttpError::TimedOut(_) => EngineErrorKind::TimedOut,
            },
            EngineError::RequestFailed { .. } => EngineErrorKind::RequestFailed,
            EngineError::Decode { .. } => EngineErrorKind::Decode,
        }
    }

    /// HTTP status for engine rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            EngineError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, e.g. `{"message":"No such image"}`.
    pub fn engine_message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: String,
        }

        match self {
            EngineError::RequestFailed { message, .. } => {
                serde_json::from_str::<ErrorBody>(message)
                    .ok()
                    .map(|body| body.message)
            }
            _ => None,
        }
    }
}

impl From<HttpError> for EngineError {
    fn from(source: HttpError) -> Self {
        EngineError::Http { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn kinds_follow_transport_errors() {
        let timed_out: EngineError = HttpError::TimedOut(Duration::from_secs(3)).into();
        assert_eq!(timed_out.kind(), EngineErrorKind::TimedOut);
        assert_eq!(timed_out.to_string(), "request timed out after 3s");

        let gone: EngineError = HttpError::Disconnected("reset".to_string()).into();
        assert_eq!(gone.kind(), EngineErrorKind::Connection);

        let garbled: EngineError = HttpError::MalformedResponse("x".to_string()).into();
        assert_eq!(garbled.kind(), EngineErrorKind::MalformedResponse);
    }

    #[test]
    fn engine_message_reads_json_body() {
        let err = EngineError::RequestFailed {
            status: 404,
            message: r#"{"message":"No such image: nope"}"#.to_string(),
        };
        assert_eq!(err.kind(), EngineErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.engine_message().as_deref(), Some("No such image: nope"));
    }

    #[test]
    fn engine_message_absent_for_plain_text() {
        let err = EngineError::RequestFailed {
            status: 500,
            message: "HTTP 500".to_string(),
        };
        assert!(err.engine_message().is_none());
    }
}
