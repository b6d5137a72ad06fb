//! Percent-decoding of request paths.

use percent_encoding::percent_decode;

/// Decodes `%XX` escapes and `+` in `input`.
///
/// Total: a `%` that is not followed by two hex digits is kept as a literal
/// `%`. The result may not be UTF-8, so it comes back as bytes.
///
/// # Example
///
/// ```
/// # use lampwick::http::percent::decode;
/// assert_eq!(decode("a+b%20c"), b"a b c");
/// assert_eq!(decode("100%"), b"100%");
/// ```
pub fn decode(input: &str) -> Vec<u8> {
    // `+` first, so an escaped `%2B` still decodes to a literal plus.
    let spaced: Vec<u8> = input
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();

    percent_decode(&spaced).collect()
}
