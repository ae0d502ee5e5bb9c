// ABOUTME: Decoder for HTTP/1.1 chunked transfer-encoding.
// ABOUTME: Reassembles chunk payloads into one contiguous buffer.

use super::error::{HttpError, Result};

const CRLF: &[u8] = b"\r\n";

/// Decode a chunked body.
///
/// Decoding stops at the zero-size chunk; trailer headers after it are
/// ignored. Broken framing (missing CRLF, bad size line, short data, no
/// terminal chunk) is reported as a malformed response rather than
/// returning a truncated body.
pub fn decode_chunked(body: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(body.len());
    let mut pos = 0;

    loop {
        let line_end = find(&body[pos..], CRLF)
            .map(|i| pos + i)
            .ok_or_else(|| HttpError::malformed("chunk size line not terminated"))?;

        let size = parse_chunk_size(&body[pos..line_end])?;
        pos = line_end + CRLF.len();

        if size == 0 {
            return Ok(out);
        }

        let data_end = pos
            .checked_add(size)
            .filter(|end| *end <= body.len())
            .ok_or_else(|| {
                HttpError::malformed(format!(
                    "chunk declares {} bytes but only {} remain",
                    size,
                    body.len() - pos
                ))
            })?;

        out.extend_from_slice(&body[pos..data_end]);
        pos = data_end;

        if !body[pos..].starts_with(CRLF) {
            return Err(HttpError::malformed("chunk data not followed by CRLF"));
        }
        pos += CRLF.len();
    }
}

fn parse_chunk_size(line: &[u8]) -> Result<usize> {
    let line = std::str::from_utf8(line)
        .map_err(|_| HttpError::malformed("chunk size line is not valid UTF-8"))?;

    // Chunk extensions (";name=value") carry nothing we use.
    let digits = line.split(';').next().unwrap_or_default().trim();

    usize::from_str_radix(digits, 16)
        .map_err(|_| HttpError::malformed(format!("invalid chunk size: {:?}", digits)))
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
