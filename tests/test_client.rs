//! End-to-end exchanges over a real Unix socket.
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use uds_http::Error;
use uds_http::client::{UdsClient, exchange};
use uds_http::http::reader::read_line;
use uds_http::http::request::{Method, Request, RequestBody};
use uds_http::http::response::StatusCode;

/// What the fake server saw on the wire.
#[derive(Debug)]
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn socket_path() -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    std::env::temp_dir().join(format!(
        "uds-http-test-{}-{}.sock",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ))
}

/// Accepts one connection, reads one request and answers with `reply`.
fn serve_once(path: &PathBuf, reply: &'static [u8]) -> tokio::task::JoinHandle<Received> {
    let _ = std::fs::remove_file(path);
    let listener = UnixListener::bind(path).unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);

        let request_line = read_line(&mut reader).await.unwrap().unwrap();
        let mut headers = Vec::new();
        while let Some(line) = read_line(&mut reader).await.unwrap() {
            if line.is_empty() {
                break;
            }
            let (name, value) = line.split_once(':').unwrap();
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        let length = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).await.unwrap();

        reader.get_mut().write_all(reply).await.unwrap();
        reader.get_mut().shutdown().await.unwrap();

        Received {
            request_line,
            headers,
            body,
        }
    })
}

fn client(path: &PathBuf) -> UdsClient {
    UdsClient::new(path.clone(), Duration::from_secs(1), Duration::from_secs(2))
}

#[tokio::test]
async fn test_round_trip_get() {
    let path = socket_path();
    let server = serve_once(&path, b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");

    let mut request = Request::builder()
        .method(Method::GET)
        .target("http://localhost/path")
        .header("X", "1")
        .build()
        .unwrap();

    let response = client(&path).send(&mut request).await.unwrap();
    let received = server.await.unwrap();

    assert_eq!(received.request_line, "GET /path HTTP/1.1");
    assert_eq!(received.header("X"), Some("1"));
    assert_eq!(received.header("Host"), Some("localhost:80"));
    assert_eq!(received.header("Connection"), Some("close"));

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(response.text(), "ok");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_round_trip_post_with_body() {
    let path = socket_path();
    let server = serve_once(
        &path,
        b"HTTP/1.1 201 Created\r\nLocation: /items/7\r\n\r\nstreamed until close",
    );

    let mut request = Request::builder()
        .method(Method::POST)
        .target("/items")
        .header("Host", "edge")
        .body(RequestBody::new("payload").content_type("text/plain"))
        .build()
        .unwrap();

    let response = client(&path).send(&mut request).await.unwrap();
    let received = server.await.unwrap();

    assert_eq!(received.request_line, "POST /items HTTP/1.1");
    assert_eq!(received.header("Host"), Some("edge"));
    assert_eq!(received.header("Content-Type"), Some("text/plain"));
    assert_eq!(received.body, b"payload");

    assert_eq!(response.status(), StatusCode::Created);
    assert_eq!(response.head.headers.get("Location"), Some("/items/7"));
    assert_eq!(response.text(), "streamed until close");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_server_closes_without_response() {
    let path = socket_path();
    let server = serve_once(&path, b"");

    let mut request = Request::builder()
        .method(Method::GET)
        .target("http://localhost/")
        .build()
        .unwrap();

    let result = client(&path).send(&mut request).await;
    server.await.unwrap();

    assert!(matches!(result, Err(Error::EmptyResponse)));
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_connect_to_missing_socket() {
    let path = socket_path();
    let mut request = Request::builder()
        .method(Method::GET)
        .target("http://localhost/")
        .build()
        .unwrap();

    let result = client(&path).send(&mut request).await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_exchange_over_duplex() {
    let (mut client_side, server_side) = tokio::io::duplex(1024);

    let server = tokio::spawn(async move {
        let mut reader = BufReader::new(server_side);
        let mut lines = Vec::new();
        while let Some(line) = read_line(&mut reader).await.unwrap() {
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }
        reader
            .get_mut()
            .write_all(b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n")
            .await
            .unwrap();
        lines
    });

    let mut request = Request::builder()
        .method(Method::DELETE)
        .target("http://localhost:9000/items/7")
        .build()
        .unwrap();

    let response = exchange(&mut client_side, &mut request).await.unwrap();
    let lines = server.await.unwrap();

    assert_eq!(lines[0], "DELETE /items/7 HTTP/1.1");
    assert!(lines.contains(&"Host: localhost:9000".to_string()));
    assert_eq!(response.status(), StatusCode::NoContent);
    assert!(response.body.is_empty());
    assert_eq!(request.header("Host"), Some("localhost:9000"));
}
