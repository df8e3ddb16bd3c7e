use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::http::headers::Headers;
use crate::http::request::{Request, Target, is_token};
use crate::http::version::Version;

const CRLF: &str = "\r\n";

/// Serializes the request line and header block of `request`.
///
/// The body bytes are not included; [`RequestWriter`] sends them after the
/// head.
///
/// Before serializing, the request is prepared in place: a `Host` header is
/// derived from the target if missing and `Connection: close` is forced. The
/// caller's `request.headers` reflect both changes afterwards.
pub fn serialize_request(request: &mut Request) -> Result<Vec<u8>> {
    if !is_token(request.method.as_str()) {
        return Err(Error::InvalidArgument(format!(
            "method {:?} is not a token",
            request.method.as_str()
        )));
    }

    request.prepare()?;

    let mut head = String::new();

    // request-line = method SP request-target SP HTTP-version CRLF
    let target = request_target(&request.target);
    head.push_str(&format!(
        "{} {} {}{}",
        request.method,
        target,
        Version::HTTP_11,
        CRLF
    ));

    write_headers(&mut head, &request.headers)?;

    if let Some(body) = &request.body {
        write_headers(&mut head, &body.headers)?;
    }

    head.push_str(CRLF);

    if !head.is_ascii() {
        return Err(Error::InvalidArgument(
            "request head contains non-ASCII characters".into(),
        ));
    }

    Ok(head.into_bytes())
}

fn request_target(target: &Target) -> String {
    match target {
        Target::Absolute(url) => {
            let mut path = match url.path() {
                "" => "/".to_string(),
                p => p.to_string(),
            };
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        Target::Relative(raw) => escape_uri(raw),
    }
}

fn write_headers(out: &mut String, headers: &Headers) -> Result<()> {
    for entry in headers.iter() {
        if !is_token(&entry.name) {
            return Err(Error::InvalidArgument(format!(
                "header name {:?} is not a token",
                entry.name
            )));
        }

        let value = entry.joined();
        if has_line_break(&value) {
            return Err(Error::InvalidArgument(format!(
                "header {} contains a line break",
                entry.name
            )));
        }
        out.push_str(&format!("{}: {}{}", entry.name, value, CRLF));
    }
    Ok(())
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

/// Percent-encodes every character that is neither a URI reserved or
/// unreserved character nor `%`. Existing escapes are left alone.
fn escape_uri(raw: &str) -> String {
    const KEEP: &[u8] = b"-._~:/?#[]@!$&'()*+,;=%";

    let mut escaped = String::with_capacity(raw.len());
    for &b in raw.as_bytes() {
        if b.is_ascii_alphanumeric() || KEEP.contains(&b) {
            escaped.push(b as char);
        } else {
            escaped.push_str(&format!("%{:02X}", b));
        }
    }
    escaped
}

/// Writes a serialized request head followed by the body bytes.
pub struct RequestWriter {
    head: Vec<u8>,
    body: Bytes,
    written: usize,
}

impl RequestWriter {
    /// Serializes `request`, applying the same in-place preparation as
    /// [`serialize_request`].
    pub fn new(request: &mut Request) -> Result<Self> {
        let head = serialize_request(request)?;
        let body = request
            .body
            .as_ref()
            .map(|b| b.data.clone())
            .unwrap_or_default();

        Ok(Self {
            head,
            body,
            written: 0,
        })
    }

    /// Serialized request line and headers.
    pub fn head(&self) -> &[u8] {
        &self.head
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let total = self.head.len() + self.body.len();

        while self.written < total {
            let chunk = if self.written < self.head.len() {
                &self.head[self.written..]
            } else {
                &self.body[self.written - self.head.len()..]
            };

            let n = stream.write(chunk).await?;

            if n == 0 {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                )));
            }

            self.written += n;
        }

        stream.flush().await?;
        tracing::trace!(bytes = total, "Request written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_keeps_reserved_characters() {
        assert_eq!(escape_uri("/a b?q=1&r=%20"), "/a%20b?q=1&r=%20");
        assert_eq!(escape_uri("/caf\u{e9}"), "/caf%C3%A9");
    }
}
