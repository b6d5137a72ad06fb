use crate::error::GatewayError;
use crate::http::reader::find_headers_end;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Interpreter output split into its header block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgiOutput {
    /// Everything before the first blank line, ending in one CRLF.
    pub headers: Vec<u8>,
    pub body: Vec<u8>,
}

impl CgiOutput {
    /// Splits `stdout` at its first `\r\n\r\n`.
    pub fn parse(mut stdout: Vec<u8>) -> Result<Self, GatewayError> {
        let end = find_headers_end(&stdout).ok_or(GatewayError::MalformedOutput)?;

        let body = stdout.split_off(end + 4);
        stdout.truncate(end + 2);

        Ok(Self {
            headers: stdout,
            body,
        })
    }

    /// Always 200: whatever status the script means is left to its own
    /// headers and body.
    pub fn into_response(self) -> Response {
        ResponseBuilder::new(StatusCode::Ok)
            .raw_headers(&self.headers)
            .body(self.body)
            .build()
    }
}
