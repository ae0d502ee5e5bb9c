// ABOUTME: In-memory transports for driving the socket engine without a socket.
// ABOUTME: Canned responses, recorded requests, and close accounting.

use async_trait::async_trait;
use berth::http::{HttpError, Transport};
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every request with the same raw bytes and records what was sent.
#[derive(Debug, Clone, Default)]
pub struct CannedTransport {
    response: Vec<u8>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl CannedTransport {
    pub fn new(response: impl Into<Vec<u8>>) -> Self {
        Self {
            response: response.into(),
            sent: Arc::default(),
        }
    }

    /// `HTTP/1.1 <status>` with a Content-Length body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::new(format!(
            "HTTP/1.1 {status} Whatever\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
    }

    /// Requests sent so far, as text.
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .collect()
    }

    /// Request lines (`GET /path HTTP/1.1`) sent so far.
    pub fn request_lines(&self) -> Vec<String> {
        self.sent()
            .iter()
            .map(|raw| raw.lines().next().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, request: &[u8]) -> Result<Bytes, HttpError> {
        self.sent.lock().push(request.to_vec());
        Ok(Bytes::from(self.response.clone()))
    }
}

/// Fails every request with the error built by `make`.
pub struct FailingTransport {
    make: fn() -> HttpError,
}

impl FailingTransport {
    pub fn new(make: fn() -> HttpError) -> Self {
        Self { make }
    }
}

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: &[u8]) -> Result<Bytes, HttpError> {
        Err((self.make)())
    }
}

/// Opens a "connection" and never answers. Counts opens and closes.
#[derive(Debug, Clone, Default)]
pub struct HangingTransport {
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

struct Connection(Arc<AtomicUsize>);

impl Drop for Connection {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl HangingTransport {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for HangingTransport {
    async fn send(&self, _request: &[u8]) -> Result<Bytes, HttpError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let _connection = Connection(self.closed.clone());
        futures::future::pending::<()>().await;
        unreachable!()
    }
}
