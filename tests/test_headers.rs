use uds_http::http::headers::{Headers, is_entity_header};

#[test]
fn test_entity_header_classification() {
    for name in [
        "Content-Length",
        "content-type",
        "CONTENT-ENCODING",
        "Content-Range",
        "Expires",
        "Last-Modified",
        "Allow",
    ] {
        assert!(is_entity_header(name), "{name}");
    }

    for name in ["Host", "Server", "Date", "Connection", "Set-Cookie", "X-Content"] {
        assert!(!is_entity_header(name), "{name}");
    }
}

#[test]
fn test_headers_preserve_insertion_order() {
    let mut headers = Headers::new();
    headers.append("B", "2");
    headers.append("A", "1");
    headers.append("C", "3");

    let names: Vec<&str> = headers.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["B", "A", "C"]);
}

#[test]
fn test_headers_trim_values() {
    let mut headers = Headers::new();
    headers.append("X-Padded", "   spaced out \t");
    assert_eq!(headers.get("x-padded"), Some("spaced out"));
}

#[test]
fn test_headers_append_merges_case_insensitively() {
    let mut headers = Headers::new();
    headers.append("Accept", "text/html");
    headers.append("ACCEPT", "*/*");

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("accept"), Some("text/html"));
    assert_eq!(headers.get_all("Accept"), ["text/html", "*/*"]);
    assert_eq!(headers.to_string(), "Accept: text/html, */*\r\n");
}

#[test]
fn test_headers_set_replaces_in_place() {
    let mut headers = Headers::new();
    headers.append("Host", "a");
    headers.append("X-Id", "1");
    headers.set("host", "b");

    assert_eq!(headers.to_string(), "Host: b\r\nX-Id: 1\r\n");
}

#[test]
fn test_headers_remove() {
    let mut headers: Headers = [("Upgrade", "websocket"), ("User-Agent", "test")]
        .into_iter()
        .collect();

    assert_eq!(headers.remove("upgrade"), Some(vec!["websocket".to_string()]));
    assert_eq!(headers.remove("upgrade"), None);
    assert!(!headers.contains("Upgrade"));
    assert!(headers.contains("user-agent"));
}

#[test]
fn test_headers_missing() {
    let headers = Headers::new();
    assert!(headers.is_empty());
    assert_eq!(headers.get("Host"), None);
    assert!(headers.get_all("Host").is_empty());
    assert_eq!(headers.joined("Host"), None);
}
