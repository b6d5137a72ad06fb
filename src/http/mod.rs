//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 server side: GET only, one request per
//! connection, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine, read → process → write → close
//! - **`reader`**: accumulates the header block and enforces the size limits
//! - **`parser`**: validates the request-line and splits path from query
//! - **`percent`**: percent-decoding of the request path
//! - **`request`**: raw header block and parsed request-line types
//! - **`response`**: status registry, response type and builder
//! - **`writer`**: serializes and writes a response to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← accumulate bytes until CRLF CRLF
//!        └──────┬──────┘
//!               │ header block framed      (framing failure → Closed, no response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← parse, resolve, dispatch
//!        └──────┬───────────┘
//!               │ response ready (error pages included)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← send response, shut down write half
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod percent;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
