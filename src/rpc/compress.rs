//! gzip negotiation and framing.
//!
//! The client always advertises `Accept-Encoding: gzip`. The server
//! compresses responses when the request allows it and marks them with
//! `Content-Encoding: gzip`; the client inflates only when that header is
//! present.

use std::io::{self, Read, Write};

use axum::http::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use axum::http::HeaderMap;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

pub const GZIP: &str = "gzip";

/// True if the request's `Accept-Encoding` mentions gzip.
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
    header_mentions_gzip(headers, ACCEPT_ENCODING.as_str())
}

/// True if the response's `Content-Encoding` mentions gzip.
pub fn is_gzip_encoded(headers: &HeaderMap) -> bool {
    header_mentions_gzip(headers, CONTENT_ENCODING.as_str())
}

fn header_mentions_gzip(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(GZIP))
}

/// Compress `input` into a single gzip member.
pub fn gzip(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(input.len() / 2 + 32), Compression::default());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Inflate a gzip stream of one or more members. An empty body is an error:
/// a response that declares gzip must carry at least a header. Bytes after
/// the last member must form another valid member.
pub fn gunzip(input: &[u8]) -> io::Result<Vec<u8>> {
    if input.is_empty() {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "empty gzip stream"));
    }
    let mut out = Vec::with_capacity(input.len() * 2);
    MultiGzDecoder::new(input).read_to_end(&mut out)?;
    Ok(out)
}
