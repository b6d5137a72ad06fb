use std::fmt;

use html_escape::encode_quoted_attribute;

/// Displays a string with `& " ' < >` replaced by HTML entities.
///
/// Safe both as element text and inside a quoted attribute.
pub struct HtmlEscaped<'a>(pub &'a str);

impl fmt::Display for HtmlEscaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_quoted_attribute(self.0))
    }
}

pub fn escape(text: &str) -> String {
    encode_quoted_attribute(text).into_owned()
}
