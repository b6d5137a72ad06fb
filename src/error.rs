//! Error types for the request pipeline.
//!
//! Three layers fail independently:
//!
//! - [`ReadError`]: the request never framed. No response is written.
//! - [`HttpError`]: a framed request failed somewhere between parsing and
//!   producing a body. Every variant maps to a [`StatusCode`] whose error page
//!   is sent back.
//! - [`GatewayError`]: the external interpreter misbehaved. Surfaces as
//!   [`HttpError::Gateway`] and therefore as a 500, except
//!   [`GatewayError::Exit`], which is only logged.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

use crate::http::parser::ParseError;
use crate::http::response::StatusCode;

/// Failures while accumulating a request's header block off the wire.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("peer closed the connection before the header block ended")]
    Closed,

    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("no header terminator within {limit} bytes")]
    TooLarge { limit: usize },

    #[error("request-line is {len} bytes, limit is {limit}")]
    RequestLineTooLong { len: usize, limit: usize },

    #[error("header field is {len} bytes, limit is {limit}")]
    FieldTooLong { len: usize, limit: usize },

    #[error("{count} header fields, limit is {limit}")]
    TooManyFields { count: usize, limit: usize },

    #[error("header block ends in a truncated field")]
    DanglingField,
}

/// A request-level failure that is answered with an error page.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("forbidden: {}", .0.display())]
    Forbidden(PathBuf),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("no content type for {}", .0.display())]
    UnsupportedType(PathBuf),

    #[error("interpreter failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl HttpError {
    /// Status code of the error page sent for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Parse(e) => e.status(),
            HttpError::Forbidden(_) => StatusCode::Forbidden,
            HttpError::NotFound(_) => StatusCode::NotFound,
            HttpError::UnsupportedType(_) => StatusCode::NotImplemented,
            HttpError::Gateway(_) | HttpError::Io(_) => StatusCode::InternalServerError,
        }
    }
}

/// Distinct ways the external interpreter can fail.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("interpreter did not finish within {0:?}")]
    Timeout(Duration),

    #[error("interpreter exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("interpreter output has no header/body separator")]
    MalformedOutput,

    #[error("reading interpreter output failed: {0}")]
    Io(#[from] io::Error),
}
