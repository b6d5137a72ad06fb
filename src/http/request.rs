use bytes::Bytes;

use crate::http::percent;
use crate::http::response::lines;

/// A request's header block as read off the wire.
///
/// Holds the request-line and every header field, and always ends in exactly
/// one CRLF: the second CRLF of the blank line, and anything after it, has
/// already been dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    bytes: Bytes,
}

impl RawRequest {
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The request-line, without its CRLF.
    pub fn request_line(&self) -> &[u8] {
        lines(&self.bytes).next().unwrap_or_default()
    }

    /// Header field lines, without their CRLFs.
    pub fn fields(&self) -> impl Iterator<Item = &[u8]> {
        lines(&self.bytes).skip(1)
    }
}

/// A validated GET request-line.
///
/// Only ever built by [`parse_request_line`](crate::http::parser::parse_request_line),
/// so `method` is always `GET`, `target` always starts with `/` and `version`
/// is always `HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Absolute-path part of the request target, still percent-encoded.
    pub target: String,
    /// Everything after the first `?`, passed on untouched. Empty if absent.
    pub query: String,
    pub version: String,
}

impl Request {
    /// The target with percent-escapes and `+` decoded.
    pub fn decoded_path(&self) -> Vec<u8> {
        percent::decode(&self.target)
    }

    /// Whether the undecoded target names a directory.
    pub fn has_trailing_slash(&self) -> bool {
        self.target.ends_with('/')
    }
}
