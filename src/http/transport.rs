// ABOUTME: Single-use Unix domain socket transport for engine requests.
// ABOUTME: One connection per request, read until the engine closes it.

use super::error::{HttpError, Result};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::UnixStream;

const READ_CHUNK: usize = 16 * 1024;

/// Carries one framed request to the engine and returns the raw response.
///
/// Implementations must release their connection on every exit path,
/// including when the returned future is dropped before completion.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &[u8]) -> Result<Bytes>;
}

/// Transport over a Unix domain socket path.
#[derive(Debug, Clone)]
pub struct UnixTransport {
    path: PathBuf,
}

impl UnixTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Transport for UnixTransport {
    async fn send(&self, request: &[u8]) -> Result<Bytes> {
        tracing::debug!(socket = %self.path.display(), "connecting to engine");

        let stream = UnixStream::connect(&self.path)
            .await
            .map_err(|source| HttpError::Connect {
                path: self.path.clone(),
                source,
            })?;

        // The stream is owned by `exchange` and dropped (closed) on every path.
        exchange(stream, request).await
    }
}

/// Write `request` in one buffer, then read until end-of-stream.
pub async fn exchange<S>(mut stream: S, request: &[u8]) -> Result<Bytes>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await.map_err(classify)?;
    stream.flush().await.map_err(classify)?;
    tracing::trace!(bytes = request.len(), "request written");

    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    loop {
        buf.reserve(READ_CHUNK);
        let n = stream.read_buf(&mut buf).await.map_err(classify)?;
        if n == 0 {
            break;
        }
        tracing::trace!(bytes = n, total = buf.len(), "read from engine");
    }

    if buf.is_empty() {
        return Err(HttpError::Disconnected(
            "connection closed before any response bytes".to_string(),
        ));
    }

    // Best effort: the peer has already closed its side.
    let _ = stream.shutdown().await;

    Ok(buf.freeze())
}

fn classify(e: std::io::Error) -> HttpError {
    match e.kind() {
        ErrorKind::BrokenPipe
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotConnected => HttpError::Disconnected(e.to_string()),
        _ => HttpError::Io(e),
    }
}
