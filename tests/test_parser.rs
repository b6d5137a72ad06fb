use lampwick::http::parser::{ParseError, parse_request_line};
use lampwick::http::response::StatusCode;

#[test]
fn test_parse_simple_get_request() {
    let req = parse_request_line(b"GET /foo.html HTTP/1.1").unwrap();

    assert_eq!(req.method, "GET");
    assert_eq!(req.target, "/foo.html");
    assert_eq!(req.query, "");
    assert_eq!(req.version, "HTTP/1.1");
}

#[test]
fn test_parse_request_with_query_string() {
    let req = parse_request_line(b"GET /search.php?q=rust&page=2 HTTP/1.1").unwrap();

    assert_eq!(req.target, "/search.php");
    assert_eq!(req.query, "q=rust&page=2");
}

#[test]
fn test_parse_empty_query_after_question_mark() {
    let req = parse_request_line(b"GET /a.php? HTTP/1.1").unwrap();

    assert_eq!(req.target, "/a.php");
    assert_eq!(req.query, "");
}

#[test]
fn test_parse_keeps_percent_escapes() {
    let req = parse_request_line(b"GET /my%20file.html HTTP/1.1").unwrap();

    assert_eq!(req.target, "/my%20file.html");
    assert_eq!(req.decoded_path(), b"/my file.html");
}

#[test]
fn test_parse_rejects_other_methods() {
    for line in [&b"POST / HTTP/1.1"[..], b"HEAD / HTTP/1.1", b"get / HTTP/1.1", b"GET", b""] {
        let err = parse_request_line(line).unwrap_err();
        assert_eq!(err, ParseError::InvalidMethod);
        assert_eq!(err.status(), StatusCode::MethodNotAllowed);
    }
}

#[test]
fn test_parse_rejects_quote_in_target() {
    let err = parse_request_line(b"GET /a\"b.html HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::QuoteInTarget);
    assert_eq!(err.status(), StatusCode::BadRequest);
}

#[test]
fn test_parse_rejects_quote_in_query() {
    let err = parse_request_line(b"GET /a.php?x=\"1\" HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::QuoteInTarget);
}

#[test]
fn test_parse_quote_checked_before_leading_slash() {
    let err = parse_request_line(b"GET a\"b HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::QuoteInTarget);
}

#[test]
fn test_parse_rejects_relative_target() {
    let err = parse_request_line(b"GET foo.html HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::NotAbsolutePath);
    assert_eq!(err.status(), StatusCode::NotImplemented);
}

#[test]
fn test_parse_rejects_absolute_uri() {
    let err = parse_request_line(b"GET http://example.com/ HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::NotAbsolutePath);
}

#[test]
fn test_parse_double_space_leaves_empty_target() {
    let err = parse_request_line(b"GET  /x HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::NotAbsolutePath);
}

#[test]
fn test_parse_rejects_other_versions() {
    for line in [
        &b"GET / HTTP/1.0"[..],
        b"GET / HTTP/2",
        b"GET / http/1.1",
        b"GET / ",
        b"GET /",
    ] {
        let err = parse_request_line(line).unwrap_err();
        assert_eq!(err, ParseError::UnsupportedVersion);
        assert_eq!(err.status(), StatusCode::HttpVersionNotSupported);
    }
}

#[test]
fn test_parse_rejects_non_utf8_target() {
    let err = parse_request_line(b"GET /\xff.html HTTP/1.1").unwrap_err();

    assert_eq!(err, ParseError::InvalidEncoding);
    assert_eq!(err.status(), StatusCode::BadRequest);
}
