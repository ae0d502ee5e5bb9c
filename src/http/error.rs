// ABOUTME: Transport and framing errors for the socket HTTP client.
// ABOUTME: Covers connect, I/O, malformed response, and deadline failures.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("cannot connect to engine socket {path:?}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("engine closed the connection: {0}")]
    Disconnected(String),

    #[error("I/O error on engine socket: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
}

impl HttpError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        HttpError::MalformedResponse(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, HttpError>;
