use std::path::Path;

/// Content type that routes a resource to the interpreter.
pub const PHP: &str = "text/x-php";

/// Maps the extension of `path`'s final component to a content type.
///
/// Matching ignores ASCII case. Returns `None` for unknown extensions and
/// for names without one.
///
/// # Example
///
/// ```
/// # use std::path::Path;
/// # use lampwick::http::mime::mime_type;
/// assert_eq!(mime_type(Path::new("/srv/style.CSS")), Some("text/css"));
/// assert_eq!(mime_type(Path::new("/srv/README")), None);
/// ```
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    match ext.as_str() {
        "css" => Some("text/css"),
        "htm" | "html" => Some("text/html"),
        "js" => Some("text/javascript"),
        "php" => Some(PHP),
        "gif" => Some("image/gif"),
        "ico" => Some("image/x-icon"),
        "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
