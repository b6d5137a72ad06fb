use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::StatusCode;

const METHOD: &[u8] = b"GET ";
const VERSION: &[u8] = b"HTTP/1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("request method is not GET")]
    InvalidMethod,

    #[error("request target contains a double quote")]
    QuoteInTarget,

    #[error("request-line is not valid UTF-8")]
    InvalidEncoding,

    #[error("request target is not an absolute path")]
    NotAbsolutePath,

    #[error("HTTP version is not HTTP/1.1")]
    UnsupportedVersion,
}

impl ParseError {
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::InvalidMethod => StatusCode::MethodNotAllowed,
            ParseError::QuoteInTarget | ParseError::InvalidEncoding => StatusCode::BadRequest,
            ParseError::NotAbsolutePath => StatusCode::NotImplemented,
            ParseError::UnsupportedVersion => StatusCode::HttpVersionNotSupported,
        }
    }
}

/// Parses a request-line (without its CRLF) into a [`Request`].
///
/// Checks run in a fixed order, and the first failure wins:
///
/// 1. the line starts with `GET ` (405)
/// 2. the target holds no `"` (400)
/// 3. the target splits at its first `?` into path and query
/// 4. the path starts with `/` (501)
/// 5. the 8 bytes after the separating space are `HTTP/1.1` (505)
///
/// A line with no space after the target has an empty version and fails
/// step 5.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let rest = line.strip_prefix(METHOD).ok_or(ParseError::InvalidMethod)?;

    let (target, version) = match rest.iter().position(|&b| b == b' ') {
        Some(space) => (&rest[..space], &rest[space + 1..]),
        None => (rest, &rest[rest.len()..]),
    };

    if target.contains(&b'"') {
        return Err(ParseError::QuoteInTarget);
    }

    let target = std::str::from_utf8(target).map_err(|_| ParseError::InvalidEncoding)?;
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    if !path.starts_with('/') {
        return Err(ParseError::NotAbsolutePath);
    }

    if version.get(..VERSION.len()) != Some(VERSION) {
        return Err(ParseError::UnsupportedVersion);
    }

    Ok(Request {
        method: "GET".to_string(),
        target: path.to_string(),
        query: query.to_string(),
        version: "HTTP/1.1".to_string(),
    })
}
