// ABOUTME: Parser for raw HTTP/1.1 responses read off the engine socket.
// ABOUTME: Splits status line, headers, and body; decodes chunked bodies.

use super::chunked::{decode_chunked, find};
use super::error::{HttpError, Result};
use bytes::Bytes;
use std::collections::HashMap;

/// A parsed engine response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are lowercased; values are trimmed.
    pub headers: HashMap<String, String>,
    /// Body with any transfer-encoding removed.
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Trimmed body text, if the body is valid UTF-8 and not blank.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body)
            .ok()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Parse a complete response buffer.
pub fn parse_response(raw: &[u8]) -> Result<HttpResponse> {
    let (head, body) = split_head(raw)?;

    let head = std::str::from_utf8(head)
        .map_err(|_| HttpError::malformed("response headers are not valid UTF-8"))?;

    let mut lines = head.split('\n').map(|line| line.trim_end_matches('\r'));
    let status_line = lines.next().unwrap_or_default();
    let status = parse_status_line(status_line)?;

    let mut headers = HashMap::new();
    for line in lines {
        // One bad header line does not sink the whole response.
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));

    let body = if chunked {
        Bytes::from(decode_chunked(body)?)
    } else {
        Bytes::copy_from_slice(body)
    };

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Split at the first blank line, tolerating peers that use bare LF.
fn split_head(raw: &[u8]) -> Result<(&[u8], &[u8])> {
    if let Some(i) = find(raw, b"\r\n\r\n") {
        return Ok((&raw[..i], &raw[i + 4..]));
    }
    if let Some(i) = find(raw, b"\n\n") {
        return Ok((&raw[..i], &raw[i + 2..]));
    }
    Err(HttpError::malformed("no header/body separator"))
}

fn parse_status_line(line: &str) -> Result<u16> {
    let mut parts = line.split(' ');
    let _version = parts.next();
    let code = parts
        .next()
        .ok_or_else(|| HttpError::malformed(format!("invalid status line: {:?}", line)))?;

    code.parse::<u16>()
        .map_err(|_| HttpError::malformed(format!("invalid status code: {:?}", code)))
}
