use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::Limits;
use crate::error::ReadError;
use crate::http::request::RawRequest;
use crate::http::response::lines;

/// Bytes requested from the connection per read.
const READ_CHUNK: usize = 512;

/// Reads from `stream` until the header block is complete.
///
/// Stops at the first `\r\n\r\n` and keeps one CRLF of it; anything after
/// (a body, a pipelined request) is discarded. Gives up once the buffer
/// reaches [`Limits::ceiling`] without a terminator, or when the peer closes
/// or the read fails.
pub async fn read_request<S>(stream: &mut S, limits: &Limits) -> Result<RawRequest, ReadError>
where
    S: AsyncRead + Unpin,
{
    let ceiling = limits.ceiling();
    let mut buffer = BytesMut::with_capacity(READ_CHUNK);

    while buffer.len() < ceiling {
        let mut chunk = [0u8; READ_CHUNK];
        let n = stream.read(&mut chunk).await?;

        if n == 0 {
            return Err(ReadError::Closed);
        }

        // The terminator may straddle the previous chunk.
        let scan_from = buffer.len().saturating_sub(3);
        buffer.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_headers_end(&buffer[scan_from..]) {
            buffer.truncate(scan_from + end + 2);
            let raw = RawRequest::new(buffer.freeze());
            validate(&raw, limits)?;
            tracing::trace!(bytes = raw.len(), "header block complete");
            return Ok(raw);
        }
    }

    Err(ReadError::TooLarge { limit: ceiling })
}

/// Checks a framed header block against the request-line, field size and
/// field count limits.
pub fn validate(raw: &RawRequest, limits: &Limits) -> Result<(), ReadError> {
    let bytes = raw.as_bytes();
    if !bytes.ends_with(b"\r\n") {
        return Err(ReadError::DanglingField);
    }

    let line_len = raw.request_line().len() + 2;
    if line_len > limits.request_line {
        return Err(ReadError::RequestLineTooLong {
            len: line_len,
            limit: limits.request_line,
        });
    }

    let mut count = 0;
    for field in lines(&bytes[line_len..]) {
        let len = field.len() + 2;
        if len > limits.field_size {
            return Err(ReadError::FieldTooLong {
                len,
                limit: limits.field_size,
            });
        }
        count += 1;
    }

    if count > limits.field_count {
        return Err(ReadError::TooManyFields {
            count,
            limit: limits.field_count,
        });
    }

    Ok(())
}

/// Offset of the first `\r\n\r\n` in `buf`.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
