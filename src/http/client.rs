// ABOUTME: Deadline-bounded request/response cycle over a Transport.
// ABOUTME: Races connect+send+receive+parse against a fixed timeout.

use super::error::{HttpError, Result};
use super::request::Request;
use super::response::{HttpResponse, parse_response};
use super::transport::{Transport, UnixTransport};
use std::path::PathBuf;
use std::time::Duration;

/// Engine default deadline for one round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Sends requests through a transport, each bounded by `timeout`.
///
/// The client holds no per-request state, so concurrent calls are
/// independent and each owns its own connection.
#[derive(Debug, Clone)]
pub struct HttpClient<T = UnixTransport> {
    transport: T,
    timeout: Duration,
}

impl HttpClient<UnixTransport> {
    pub fn unix(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::new(UnixTransport::new(path), timeout)
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform one request.
    ///
    /// Whichever of the round trip and the timer finishes first decides the
    /// outcome; the other future is dropped, which closes any open socket.
    pub async fn send(&self, request: &Request) -> Result<HttpResponse> {
        let bytes = request.to_bytes();
        tracing::debug!(method = %request.method, path = %request.path, "engine request");

        let round_trip = async {
            let raw = self.transport.send(&bytes).await?;
            parse_response(&raw)
        };

        tokio::select! {
            biased;
            result = round_trip => {
                if let Ok(ref response) = result {
                    tracing::debug!(
                        status = response.status,
                        bytes = response.body.len(),
                        path = %request.path,
                        "engine response"
                    );
                }
                result
            }
            _ = tokio::time::sleep(self.timeout) => {
                tracing::warn!(
                    path = %request.path,
                    timeout = ?self.timeout,
                    "engine request timed out"
                );
                Err(HttpError::TimedOut(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;

    struct Delayed {
        delay: Duration,
        response: &'static [u8],
    }

    #[async_trait]
    impl Transport for Delayed {
        async fn send(&self, _request: &[u8]) -> Result<Bytes> {
            tokio::time::sleep(self.delay).await;
            Ok(Bytes::from_static(self.response))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn response_before_deadline_wins() {
        let client = HttpClient::new(
            Delayed {
                delay: Duration::from_millis(2_999),
                response: b"HTTP/1.1 204 No Content\r\n\r\n",
            },
            DEFAULT_TIMEOUT,
        );

        let response = client.send(&Request::delete("/containers/x")).await.unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_before_response_times_out() {
        let client = HttpClient::new(
            Delayed {
                delay: Duration::from_secs(10),
                response: b"HTTP/1.1 200 OK\r\n\r\n",
            },
            DEFAULT_TIMEOUT,
        );

        let err = client.send(&Request::get("/_ping")).await.unwrap_err();
        assert!(matches!(err, HttpError::TimedOut(d) if d == DEFAULT_TIMEOUT));
    }

    #[tokio::test]
    async fn parse_errors_are_not_timeouts() {
        let client = HttpClient::new(
            Delayed {
                delay: Duration::ZERO,
                response: b"garbage",
            },
            DEFAULT_TIMEOUT,
        );

        let err = client.send(&Request::get("/_ping")).await.unwrap_err();
        assert!(matches!(err, HttpError::MalformedResponse(_)));
    }
}
