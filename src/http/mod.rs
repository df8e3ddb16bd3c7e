//! HTTP/1.1 wire format.
//!
//! This module turns requests into bytes and bytes into responses. It never
//! opens, closes or owns a transport: writers and readers are borrowed from
//! the caller.
//!
//! # Architecture
//!
//! - **`request`**: outgoing request, target and body types
//! - **`writer`**: serializes the request head and writes head + body
//! - **`reader`**: line reading over a buffered byte stream
//! - **`parser`**: status line, header block and body framing
//! - **`response`**: status codes, response head and body
//! - **`headers`**: ordered case-insensitive header bag
//! - **`version`**: `HTTP/x.y` parsing
//!
//! # Response Parsing
//!
//! ```text
//!        ┌──────────────────┐
//!        │   Status line    │ ← one line: version, code, reason
//!        └──────┬───────────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │ ReadingHeaders   │ ← lines until blank line or EOF
//!        └──────┬───────────┘
//!               │ Content-Length seen → body bytes read eagerly
//!               ▼
//!        ┌──────────────────┐
//!        │      Done        │
//!        └──────┬───────────┘
//!               ├─ length known → Body::Buffered
//!               └─ no length    → Body::Stream (read to EOF)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use uds_http::http::parser::read_response;
//! use uds_http::http::request::{Method, Request};
//! use uds_http::http::writer::RequestWriter;
//! use tokio::io::BufReader;
//! use tokio::net::UnixStream;
//!
//! # async fn run() -> uds_http::Result<()> {
//! let mut stream = UnixStream::connect("/var/run/app.sock").await?;
//! let mut request = Request::builder()
//!     .method(Method::GET)
//!     .target("http://localhost/health")
//!     .build()?;
//!
//! RequestWriter::new(&mut request)?.write_to_stream(&mut stream).await?;
//!
//! let mut reader = BufReader::new(stream);
//! let response = read_response(&mut reader).await?;
//! println!("{}", response.head.status);
//! # Ok(())
//! # }
//! ```

pub mod headers;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod version;
pub mod writer;

pub use headers::Headers;
pub use request::{Method, Request, RequestBody, RequestBuilder, Target};
pub use response::{Body, FullResponse, Response, ResponseHead, StatusCode};
pub use version::Version;
