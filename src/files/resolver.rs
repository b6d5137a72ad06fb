use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::error::HttpError;
use crate::http::mime;

/// Default documents probed inside a directory, in order of precedence.
pub const INDEX_FILES: [&str; 2] = ["index.php", "index.html"];

/// A concrete file to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub content_type: &'static str,
}

/// What a request path resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    File(ResolvedTarget),
    /// The path names a directory but lacks its trailing slash.
    Redirect { location: String },
    /// A directory with no index file.
    Listing { dir: PathBuf, title: String },
}

/// Maps decoded request paths onto files under the server root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    listing: bool,
}

impl Resolver {
    /// `root` is expected to be canonical already.
    pub fn new(root: impl Into<PathBuf>, listing: bool) -> Self {
        Self {
            root: root.into(),
            listing,
        }
    }

    /// Resolves one request.
    ///
    /// `target` is the undecoded absolute-path (it decides redirects and is
    /// echoed in `Location`); `decoded` is the same path after percent
    /// decoding (it decides what is read from disk).
    pub async fn resolve(&self, target: &str, decoded: &[u8]) -> Result<Resolution, HttpError> {
        let candidate = self.candidate(decoded)?;

        let meta = fs::metadata(&candidate).await.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => HttpError::Forbidden(candidate.clone()),
            _ => HttpError::NotFound(candidate.clone()),
        })?;

        let path = if meta.is_dir() {
            if !target.ends_with('/') {
                return Ok(Resolution::Redirect {
                    location: format!("{target}/"),
                });
            }

            match index_file(&candidate).await {
                Some(index) => index,
                None if self.listing => {
                    return Ok(Resolution::Listing {
                        dir: candidate,
                        title: String::from_utf8_lossy(decoded).into_owned(),
                    });
                }
                None => return Err(HttpError::Forbidden(candidate)),
            }
        } else {
            candidate
        };

        let content_type =
            mime::mime_type(&path).ok_or_else(|| HttpError::UnsupportedType(path.clone()))?;

        tracing::debug!(path = %path.display(), content_type, "resolved");
        Ok(Resolution::File(ResolvedTarget { path, content_type }))
    }

    /// Root and decoded path concatenated.
    ///
    /// Paths with a `..` component or a NUL byte are refused before they
    /// reach the filesystem, so a candidate never leaves the root.
    fn candidate(&self, decoded: &[u8]) -> Result<PathBuf, HttpError> {
        let relative = Path::new(OsStr::from_bytes(decoded));

        let escapes = decoded.contains(&0)
            || relative.components().any(|c| c == Component::ParentDir);
        if escapes {
            return Err(HttpError::Forbidden(relative.to_path_buf()));
        }

        let mut joined = OsString::from(self.root.as_os_str());
        joined.push(relative.as_os_str());
        Ok(PathBuf::from(joined))
    }
}

async fn index_file(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let path = dir.join(name);
        if let Ok(true) = fs::try_exists(&path).await {
            return Some(path);
        }
    }
    None
}
