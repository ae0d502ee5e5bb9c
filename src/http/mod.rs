// ABOUTME: Minimal HTTP/1.1 client for the engine's Unix control socket.
// ABOUTME: Request framing, response parsing, chunked decoding, deadlines.

mod chunked;
mod client;
mod error;
mod request;
mod response;
mod transport;

pub use chunked::decode_chunked;
pub use client::{DEFAULT_TIMEOUT, HttpClient};
pub use error::{HttpError, Result};
pub use request::{Method, Request};
pub use response::{HttpResponse, parse_response};
pub use transport::{Transport, UnixTransport, exchange};
