use std::path::Path;

use tokio::fs;

use crate::error::HttpError;
use crate::files::escape::HtmlEscaped;
use crate::http::response::Response;

/// Renders an HTML listing of `dir`.
///
/// Entries are sorted bytewise and include `..` but not `.`. `title` is the
/// directory's path relative to the server root. An unreadable directory is
/// a 403.
pub async fn list(dir: &Path, title: &str) -> Result<Response, HttpError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|_| HttpError::Forbidden(dir.to_path_buf()))?;

    // read_dir never yields the dot entries
    let mut names = vec!["..".to_string()];
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    tracing::debug!(dir = %dir.display(), entries = names.len(), "listing directory");
    Ok(Response::ok("text/html", render(title, &names)))
}

/// The listing page for `names`, in the order given.
pub fn render(title: &str, names: &[String]) -> String {
    let items: String = names
        .iter()
        .map(|name| {
            let name = HtmlEscaped(name);
            format!("<li><a href=\"{name}\">{name}</a></li>")
        })
        .collect();

    let title = HtmlEscaped(title);
    format!(
        "<html><head><title>{title}</title></head>\
         <body><h1>{title}</h1><ul>{items}</ul></body></html>"
    )
}
