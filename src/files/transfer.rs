use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::error::HttpError;
use crate::http::response::Response;

/// Reads the whole file at `path` into a 200 response.
///
/// A file that cannot be opened is a 403; a failure after opening is a 500.
pub async fn transfer(path: &Path, content_type: &str) -> Result<Response, HttpError> {
    let mut file = File::open(path)
        .await
        .map_err(|_| HttpError::Forbidden(path.to_path_buf()))?;

    let mut body = Vec::new();
    file.read_to_end(&mut body).await?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "transferring file");
    Ok(Response::ok(content_type, body))
}

/// Fails with 403 unless `path` can be opened for reading.
pub async fn ensure_readable(path: &Path) -> Result<(), HttpError> {
    File::open(path)
        .await
        .map(drop)
        .map_err(|_| HttpError::Forbidden(path.to_path_buf()))
}
