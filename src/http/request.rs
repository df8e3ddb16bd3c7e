use bytes::Bytes;
use std::fmt;
use url::Url;

use crate::error::{Error, Result};
use crate::http::headers::{self, Headers};
use crate::http::version::Version;

/// HTTP request methods.
///
/// The registered methods get their own variant. Anything else that is a
/// valid token is carried in `Extension` and emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    TRACE,
    CONNECT,
    Extension(String),
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive. Unknown tokens become `Extension`; strings
    /// that are not tokens return `None`.
    ///
    /// ```
    /// # use uds_http::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("PURGE"), Some(Method::Extension("PURGE".into())));
    /// assert_eq!(Method::from_str("GE T"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let method = match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            "TRACE" => Method::TRACE,
            "CONNECT" => Method::CONNECT,
            other if is_token(other) => Method::Extension(other.to_string()),
            _ => return None,
        };
        Some(method)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::TRACE => "TRACE",
            Method::CONNECT => "CONNECT",
            Method::Extension(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RFC 7230 `token`: non-empty, visible ASCII without separators.
pub(crate) fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

/// Where a request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Full URI with a host, e.g. `http://localhost:8080/api?x=1`.
    Absolute(Url),
    /// Anything else, e.g. `/api/users`. Written escaped, as given.
    Relative(String),
}

impl Target {
    /// Classifies `s` as an absolute URI (one that has a host) or a relative
    /// reference. Empty strings are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::InvalidArgument("request target is empty".into()));
        }

        match Url::parse(s) {
            Ok(url) if url.has_host() => Ok(Target::Absolute(url)),
            _ => Ok(Target::Relative(s.to_string())),
        }
    }

    /// `host:port` for the `Host` header, if the target carries enough to
    /// derive it.
    pub fn authority(&self) -> Option<String> {
        match self {
            Target::Absolute(url) => {
                let host = url.host_str()?;
                let port = url.port_or_known_default()?;
                Some(format!("{}:{}", host, port))
            }
            Target::Relative(_) => None,
        }
    }
}

impl From<Url> for Target {
    fn from(url: Url) -> Self {
        Target::Absolute(url)
    }
}

/// Body of an outgoing request with its entity headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub data: Bytes,
    /// Content-Length, Content-Type and the like.
    pub headers: Headers,
}

impl RequestBody {
    /// Body whose Content-Length is declared from its size.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let mut entity = Headers::new();
        entity.set(headers::CONTENT_LENGTH, data.len().to_string());
        Self {
            data,
            headers: entity,
        }
    }

    /// Body with no declared length. The receiver sees the end of the body
    /// when the connection closes.
    pub fn without_length(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            headers: Headers::new(),
        }
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.headers.set("Content-Type", value);
        self
    }

    /// Declared Content-Length, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(headers::CONTENT_LENGTH)
            .and_then(|v| v.parse().ok())
    }
}

/// An outgoing HTTP request.
///
/// Always sent as HTTP/1.1. `headers` holds the message headers; entity
/// headers travel with the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub target: Target,
    pub headers: Headers,
    pub body: Option<RequestBody>,
}

impl Request {
    pub fn new(method: Method, target: Target) -> Self {
        Self {
            method,
            target,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Shorthand for `RequestBuilder::new()`.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn version(&self) -> Version {
        Version::HTTP_11
    }

    /// Retrieves a message header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Fills in `Host` from the target when the caller has not set one and
    /// marks the connection for closure.
    ///
    /// This mutates `self.headers`; the changes stay visible to the caller.
    pub fn prepare(&mut self) -> Result<()> {
        if self.headers.get(headers::HOST).is_none_or(|h| h.is_empty()) {
            let authority = self.target.authority().ok_or_else(|| {
                Error::InvalidArgument(
                    "request target has no host and port to derive a Host header from".into(),
                )
            })?;
            self.headers.set(headers::HOST, authority);
        }

        self.headers.force_connection_close();
        Ok(())
    }
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    headers: Headers,
    body: Option<RequestBody>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Appends a message header. Repeated names accumulate values.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<Request> {
        let method = self
            .method
            .ok_or_else(|| Error::InvalidArgument("method missing".into()))?;
        let target = self
            .target
            .ok_or_else(|| Error::InvalidArgument("target missing".into()))?;

        Ok(Request {
            method,
            target: Target::parse(&target)?,
            headers: self.headers,
            body: self.body,
        })
    }
}
