// ABOUTME: Fake container engine served by hyper on a Unix socket.
// ABOUTME: Also a raw socket peer that answers with arbitrary bytes.

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Frame, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;

/// One canned answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    /// Split the body into this many chunked-encoding frames; 0 sends Content-Length.
    pub chunks: usize,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            chunks: 0,
            delay: None,
        }
    }

    pub fn chunked(mut self, chunks: usize) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A running fake engine. The socket lives as long as this value.
pub struct FakeEngine {
    _dir: TempDir,
    pub socket: PathBuf,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeEngine {
    /// Serve `routes`, keyed by `"METHOD /path?query"`. Unknown routes get 404.
    pub async fn start(routes: Vec<(&str, Reply)>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("engine.sock");
        let listener = UnixListener::bind(&socket).unwrap();

        let routes: Arc<HashMap<String, Reply>> = Arc::new(
            routes
                .into_iter()
                .map(|(key, reply)| (key.to_string(), reply))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: hyper::Request<Incoming>| {
                        let routes = routes.clone();
                        let seen = seen.clone();
                        async move { Ok::<_, Infallible>(respond(&routes, &seen, req).await) }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            _dir: dir,
            socket,
            requests,
        }
    }

    /// Requests seen so far, as `"METHOD /path?query"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

async fn respond(
    routes: &HashMap<String, Reply>,
    seen: &Mutex<Vec<String>>,
    req: hyper::Request<Incoming>,
) -> hyper::Response<BoxBody<Bytes, Infallible>> {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let key = format!("{} {}", req.method(), target);
    seen.lock().push(key.clone());

    let reply = routes
        .get(&key)
        .cloned()
        .unwrap_or_else(|| Reply::json(404, format!(r#"{{"message":"page not found: {key}"}}"#)));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let body = if reply.chunks == 0 {
        Full::new(Bytes::from(reply.body)).boxed()
    } else {
        let size = reply.body.len().div_ceil(reply.chunks).max(1);
        let frames: Vec<Result<Frame<Bytes>, Infallible>> = reply
            .body
            .chunks(size)
            .map(|piece| Ok(Frame::data(Bytes::copy_from_slice(piece))))
            .collect();
        StreamBody::new(futures::stream::iter(frames)).boxed()
    };

    hyper::Response::builder()
        .status(reply.status)
        .header("Content-Type", "application/json")
        .header("Api-Version", "1.45")
        .body(body)
        .unwrap()
}

/// A socket peer that reads one request head, writes `response` verbatim, and hangs up.
pub struct RawEngine {
    _dir: TempDir,
    pub socket: PathBuf,
}

impl RawEngine {
    pub async fn start(response: &'static [u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("raw.sock");
        let listener = UnixListener::bind(&socket).unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let _ = stream.write_all(response).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { _dir: dir, socket }
    }
}
