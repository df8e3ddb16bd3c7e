//! Incremental HTTP/1.1 response parsing.
//!
//! The status line and header block are read line by line from an
//! `AsyncBufRead`. The body is either read eagerly (Content-Length present) or
//! left on the stream for the caller.

use bytes::Bytes;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::http::headers::{self, Headers, is_entity_header};
use crate::http::reader::read_line;
use crate::http::response::{Body, Response, ResponseHead, StatusCode};
use crate::http::version::Version;

const SP: char = ' ';
const HEADER_SEPARATOR: char = ':';

/// Reads a complete response head and sets up the body.
///
/// The reader is borrowed for as long as the returned response lives when the
/// body is streamed. It is never closed here.
pub async fn read_response<R>(reader: &mut R) -> Result<Response<'_, R>>
where
    R: AsyncBufRead + Unpin,
{
    let (version, status, reason) = parse_status_line(reader).await?;

    let mut head = ResponseHead {
        version,
        status,
        reason,
        headers: Headers::new(),
        content_headers: Headers::new(),
    };

    let buffered = parse_headers(reader, &mut head).await?;

    debug!(
        status = head.status.as_u16(),
        reason = %head.reason,
        headers = head.headers.len() + head.content_headers.len(),
        buffered = buffered.is_some(),
        "Parsed response head"
    );

    let body = match buffered {
        Some(bytes) => Body::Buffered(bytes),
        None => Body::Stream(reader),
    };

    Ok(Response { head, body })
}

/// Like [`read_response`], failing with [`Error::Timeout`] if the head (and a
/// length-delimited body) has not arrived within `limit`.
pub async fn read_response_with_timeout<R>(
    reader: &mut R,
    limit: Duration,
) -> Result<Response<'_, R>>
where
    R: AsyncBufRead + Unpin,
{
    tokio::time::timeout(limit, read_response(reader))
        .await
        .map_err(|_| Error::Timeout("reading response"))?
}

/// Reads and decodes the status line: `HTTP/<major>.<minor> SP code SP reason`.
pub async fn parse_status_line<R>(reader: &mut R) -> Result<(Version, StatusCode, String)>
where
    R: AsyncBufRead + Unpin,
{
    let line = match read_line(reader).await? {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyResponse),
    };

    trace!(status_line = %line, "Read status line");

    let parts: Vec<&str> = line.splitn(3, SP).collect();
    if parts.len() < 3 {
        return Err(Error::MalformedStatusLine(line));
    }

    let version: Version = parts[0]
        .parse()
        .map_err(|_| Error::InvalidVersion(parts[0].to_string()))?;

    let status = parse_status_code(parts[1])
        .ok_or_else(|| Error::InvalidStatusCode(parts[1].to_string()))?;

    Ok((version, status, parts[2].to_string()))
}

fn parse_status_code(s: &str) -> Option<StatusCode> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().and_then(StatusCode::from_u16)
}

/// Reads header lines until a blank line or end of stream and stores them on
/// `head`.
///
/// Entity headers go to `head.content_headers`, the rest to `head.headers`.
/// When a Content-Length header is met, that many body bytes are read from
/// the stream before the next header is handled, and returned.
pub async fn parse_headers<R>(reader: &mut R, head: &mut ResponseHead) -> Result<Option<Bytes>>
where
    R: AsyncBufRead + Unpin,
{
    // Collect the whole block first; body bytes follow the blank line.
    let mut lines = Vec::new();
    while let Some(line) = read_line(reader).await? {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    let mut body: Option<(u64, Bytes)> = None;

    for line in lines {
        let (name, value) = split_header(&line)?;

        if !is_entity_header(name) {
            head.headers.append(name, value);
            continue;
        }

        if name.eq_ignore_ascii_case(headers::CONTENT_LENGTH) {
            let length = parse_content_length(name, value)?;

            if let Some((seen, _)) = &body {
                if *seen != length {
                    return Err(Error::InvalidHeaderValue {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
                continue;
            }
            body = Some((length, read_body(reader, length).await?));
        }

        head.content_headers.append(name, value);
    }

    Ok(body.map(|(_, bytes)| bytes))
}

/// Splits on the first `:` only; values may contain more colons.
fn split_header(line: &str) -> Result<(&str, &str)> {
    match line.find(HEADER_SEPARATOR) {
        Some(pos) if pos > 0 => {
            let name = line[..pos].trim();
            if name.is_empty() {
                return Err(Error::InvalidHeader(line.to_string()));
            }
            Ok((name, line[pos + 1..].trim()))
        }
        _ => Err(Error::InvalidHeader(line.to_string())),
    }
}

fn parse_content_length(name: &str, value: &str) -> Result<u64> {
    let invalid = || Error::InvalidHeaderValue {
        name: name.to_string(),
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

async fn read_body<R>(reader: &mut R, length: u64) -> Result<Bytes>
where
    R: AsyncBufRead + Unpin,
{
    // Don't trust the declared length for the initial allocation.
    let mut buf = Vec::with_capacity(length.min(64 * 1024) as usize);
    (&mut *reader).take(length).read_to_end(&mut buf).await?;

    let received = buf.len() as u64;
    if received < length {
        return Err(Error::IncompleteBody {
            expected: length,
            received,
        });
    }

    trace!(len = received, "Buffered response body");
    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_simple_response() {
        let mut wire: &[u8] = b"HTTP/1.1 200 OK\r\nServer: edge\r\nContent-Length: 2\r\n\r\nhi";

        let response = read_response(&mut wire).await.unwrap();

        assert_eq!(response.head.status, StatusCode::Ok);
        assert_eq!(response.head.header("Server"), Some("edge"));
        assert!(response.body.is_buffered());
        assert_eq!(response.body.bytes().await.unwrap(), Bytes::from_static(b"hi"));
    }

    #[test]
    fn split_header_uses_first_colon() {
        assert_eq!(
            split_header("Date: Mon, 01 Jan 2024 10:00:00 GMT").unwrap(),
            ("Date", "Mon, 01 Jan 2024 10:00:00 GMT")
        );
        assert!(matches!(split_header(": value"), Err(Error::InvalidHeader(_))));
        assert!(matches!(split_header("  : value"), Err(Error::InvalidHeader(_))));
    }
}
