//! One request through the full pipeline, over an in-memory stream

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use lampwick::config::Limits;
use lampwick::files::Resolver;
use lampwick::gateway::Interpreter;
use lampwick::http::connection::Connection;
use lampwick::http::response::StatusCode;
use lampwick::server::Dispatcher;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

const PEER: &str = "127.0.0.1:40000";

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(root.join("logo.gif"), b"GIF89a").unwrap();
    fs::write(root.join("notes.txt"), "plain").unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs/a.css"), "a{}").unwrap();
    fs::create_dir(root.join("app")).unwrap();
    fs::write(root.join("app/index.php"), "<?php echo 1;").unwrap();

    dir
}

fn dispatcher(root: &Path, listing: bool) -> Dispatcher {
    let interpreter = Interpreter::new(
        "/bin/sh",
        vec![
            "-c".to_string(),
            r#"printf 'Content-Type: text/plain\r\n\r\nq=%s' "$QUERY_STRING""#.to_string(),
        ],
        Duration::from_secs(5),
    );
    Dispatcher::new(Resolver::new(root.canonicalize().unwrap(), listing), interpreter)
}

/// Sends `request`, services the connection and returns all the client read.
async fn exchange(dispatcher: &Dispatcher, limits: Limits, request: &[u8]) -> (bool, Vec<u8>) {
    let (mut client, server) = duplex(64 * 1024);
    client.write_all(request).await.unwrap();

    let peer: SocketAddr = PEER.parse().unwrap();
    let mut conn = Connection::new(server, peer, limits, dispatcher);
    let served = conn.run().await.is_ok();
    drop(conn);

    let mut received = Vec::new();
    client.read_to_end(&mut received).await.unwrap();
    (served, received)
}

async fn get(dispatcher: &Dispatcher, request: &str) -> String {
    let (served, received) = exchange(dispatcher, Limits::default(), request.as_bytes()).await;
    assert!(served, "connection was abandoned for {request:?}");
    String::from_utf8(received).unwrap()
}

fn error_response(status: StatusCode) -> String {
    let page = status.error_page();
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        status.as_u16(),
        status.reason_phrase(),
        page.len(),
        page
    )
}

#[tokio::test]
async fn test_root_serves_index_html() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let response = get(&d, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\n\r\n<h1>home</h1>"
    );
}

#[tokio::test]
async fn test_static_file_with_query_ignored() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let response = get(&d, "GET /docs/a.css?v=3 HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 3\r\n\r\na{}"
    );
}

#[tokio::test]
async fn test_directory_redirect() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let response = get(&d, "GET /docs HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        response,
        "HTTP/1.1 301 Moved Permanently\r\nLocation: /docs/\r\nContent-Length: 0\r\n\r\n"
    );
}

#[tokio::test]
async fn test_directory_listing() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let response = get(&d, "GET /docs/ HTTP/1.1\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n"));
    assert!(response.contains("<title>/docs/</title>"));
    assert!(response.contains("<li><a href=\"..\">..</a></li><li><a href=\"a.css\">a.css</a></li>"));
}

#[tokio::test]
async fn test_listing_disabled() {
    let dir = site();
    let d = dispatcher(dir.path(), false);

    let response = get(&d, "GET /docs/ HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, error_response(StatusCode::Forbidden));
}

#[tokio::test]
async fn test_php_is_delegated_with_query() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let response = get(&d, "GET /app/?name=x%20y HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 12\r\n\r\nq=name=x%20y"
    );
}

#[tokio::test]
async fn test_error_statuses() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let cases = [
        ("POST / HTTP/1.1\r\n\r\n", StatusCode::MethodNotAllowed),
        ("get / HTTP/1.1\r\n\r\n", StatusCode::MethodNotAllowed),
        ("GET /missing.html HTTP/1.1\r\n\r\n", StatusCode::NotFound),
        ("GET /notes.txt HTTP/1.1\r\n\r\n", StatusCode::NotImplemented),
        ("GET http://x/ HTTP/1.1\r\n\r\n", StatusCode::NotImplemented),
        ("GET / HTTP/1.0\r\n\r\n", StatusCode::HttpVersionNotSupported),
        ("GET /\"x HTTP/1.1\r\n\r\n", StatusCode::BadRequest),
        ("GET /../etc/passwd HTTP/1.1\r\n\r\n", StatusCode::Forbidden),
    ];

    for (request, status) in cases {
        assert_eq!(get(&d, request).await, error_response(status), "{request:?}");
    }
}

#[tokio::test]
async fn test_binary_body_passes_through() {
    let dir = site();
    let d = dispatcher(dir.path(), true);

    let (_, received) = exchange(&d, Limits::default(), b"GET /logo.gif HTTP/1.1\r\n\r\n").await;

    assert!(received.starts_with(b"HTTP/1.1 200 OK\r\nContent-Type: image/gif\r\nContent-Length: 6\r\n\r\n"));
    assert!(received.ends_with(b"GIF89a"));
}

#[tokio::test]
async fn test_oversized_request_gets_no_response() {
    let dir = site();
    let d = dispatcher(dir.path(), true);
    let limits = Limits {
        request_line: 32,
        field_count: 2,
        field_size: 16,
    };

    let (served, received) = exchange(&d, limits, &[b'x'; 1024]).await;

    assert!(!served);
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_too_many_fields_gets_no_response() {
    let dir = site();
    let d = dispatcher(dir.path(), true);
    let limits = Limits {
        request_line: 32,
        field_count: 2,
        field_size: 16,
    };

    let (served, received) = exchange(&d, limits, b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\nC: 3\r\n\r\n").await;

    assert!(!served);
    assert!(received.is_empty());
}
