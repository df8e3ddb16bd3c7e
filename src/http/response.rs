use bytes::Bytes;
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::Result;
use crate::http::headers::Headers;
use crate::http::version::Version;

macro_rules! status_codes {
    ($( $(#[$doc:meta])* $variant:ident = $code:literal, $reason:literal; )+) => {
        /// HTTP status codes recognised when parsing a status line.
        ///
        /// Covers the registered codes from 100 to 511. A status line carrying
        /// any other number is rejected by the parser.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StatusCode {
            $( $(#[$doc])* $variant, )+
        }

        impl StatusCode {
            /// Returns the numeric HTTP status code.
            ///
            /// ```
            /// # use uds_http::http::response::StatusCode;
            /// assert_eq!(StatusCode::Ok.as_u16(), 200);
            /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
            /// ```
            pub fn as_u16(&self) -> u16 {
                match self {
                    $( StatusCode::$variant => $code, )+
                }
            }

            /// Returns the standard reason phrase for this status code.
            pub fn reason_phrase(&self) -> &'static str {
                match self {
                    $( StatusCode::$variant => $reason, )+
                }
            }

            /// Looks up a registered code.
            ///
            /// ```
            /// # use uds_http::http::response::StatusCode;
            /// assert_eq!(StatusCode::from_u16(503), Some(StatusCode::ServiceUnavailable));
            /// assert_eq!(StatusCode::from_u16(299), None);
            /// ```
            pub fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(StatusCode::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

status_codes! {
    Continue = 100, "Continue";
    SwitchingProtocols = 101, "Switching Protocols";
    Processing = 102, "Processing";
    EarlyHints = 103, "Early Hints";

    /// 200 OK
    Ok = 200, "OK";
    Created = 201, "Created";
    Accepted = 202, "Accepted";
    NonAuthoritativeInformation = 203, "Non-Authoritative Information";
    /// 204 No Content
    NoContent = 204, "No Content";
    ResetContent = 205, "Reset Content";
    PartialContent = 206, "Partial Content";
    MultiStatus = 207, "Multi-Status";
    AlreadyReported = 208, "Already Reported";
    ImUsed = 226, "IM Used";

    MultipleChoices = 300, "Multiple Choices";
    MovedPermanently = 301, "Moved Permanently";
    Found = 302, "Found";
    SeeOther = 303, "See Other";
    NotModified = 304, "Not Modified";
    UseProxy = 305, "Use Proxy";
    Unused = 306, "Unused";
    TemporaryRedirect = 307, "Temporary Redirect";
    PermanentRedirect = 308, "Permanent Redirect";

    /// 400 Bad Request
    BadRequest = 400, "Bad Request";
    Unauthorized = 401, "Unauthorized";
    PaymentRequired = 402, "Payment Required";
    Forbidden = 403, "Forbidden";
    /// 404 Not Found
    NotFound = 404, "Not Found";
    MethodNotAllowed = 405, "Method Not Allowed";
    NotAcceptable = 406, "Not Acceptable";
    ProxyAuthenticationRequired = 407, "Proxy Authentication Required";
    RequestTimeout = 408, "Request Timeout";
    Conflict = 409, "Conflict";
    Gone = 410, "Gone";
    LengthRequired = 411, "Length Required";
    PreconditionFailed = 412, "Precondition Failed";
    PayloadTooLarge = 413, "Payload Too Large";
    UriTooLong = 414, "URI Too Long";
    UnsupportedMediaType = 415, "Unsupported Media Type";
    RangeNotSatisfiable = 416, "Range Not Satisfiable";
    ExpectationFailed = 417, "Expectation Failed";
    MisdirectedRequest = 421, "Misdirected Request";
    UnprocessableEntity = 422, "Unprocessable Entity";
    Locked = 423, "Locked";
    FailedDependency = 424, "Failed Dependency";
    UpgradeRequired = 426, "Upgrade Required";
    PreconditionRequired = 428, "Precondition Required";
    TooManyRequests = 429, "Too Many Requests";
    RequestHeaderFieldsTooLarge = 431, "Request Header Fields Too Large";
    UnavailableForLegalReasons = 451, "Unavailable For Legal Reasons";

    /// 500 Internal Server Error
    InternalServerError = 500, "Internal Server Error";
    NotImplemented = 501, "Not Implemented";
    BadGateway = 502, "Bad Gateway";
    ServiceUnavailable = 503, "Service Unavailable";
    GatewayTimeout = 504, "Gateway Timeout";
    HttpVersionNotSupported = 505, "HTTP Version Not Supported";
    VariantAlsoNegotiates = 506, "Variant Also Negotiates";
    InsufficientStorage = 507, "Insufficient Storage";
    LoopDetected = 508, "Loop Detected";
    NotExtended = 510, "Not Extended";
    NetworkAuthenticationRequired = 511, "Network Authentication Required";
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Everything in a response except the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase exactly as received; may be empty.
    pub reason: String,
    /// Message-level headers.
    pub headers: Headers,
    /// Entity headers describing the body (Content-Length, Content-Type, ...).
    pub content_headers: Headers,
}

impl ResponseHead {
    /// Looks a header up in both bags, message headers first.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| self.content_headers.get(name))
    }
}

/// Response body as left behind by the header parser.
pub enum Body<'a, R> {
    /// Content-Length was declared; exactly that many bytes were read.
    Buffered(Bytes),
    /// No length was declared; the body runs to the end of the stream.
    Stream(&'a mut R),
}

impl<R> Body<'_, R> {
    pub fn is_buffered(&self) -> bool {
        matches!(self, Body::Buffered(_))
    }
}

impl<R: AsyncRead + Unpin> Body<'_, R> {
    /// Returns the whole body, reading a streamed body until EOF.
    pub async fn bytes(self) -> Result<Bytes> {
        match self {
            Body::Buffered(bytes) => Ok(bytes),
            Body::Stream(reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                tracing::trace!(len = buf.len(), "Read streamed response body");
                Ok(Bytes::from(buf))
            }
        }
    }
}

impl<R> fmt::Debug for Body<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Buffered(bytes) => f.debug_tuple("Buffered").field(bytes).finish(),
            Body::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A parsed response whose body may still be on the wire.
///
/// A streamed body borrows the reader the response was parsed from, so the
/// transport cannot be closed until the response is dropped.
#[derive(Debug)]
pub struct Response<'a, R> {
    pub head: ResponseHead,
    pub body: Body<'a, R>,
}

impl<R: AsyncRead + Unpin> Response<'_, R> {
    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    /// Drains the body into memory.
    pub async fn into_full(self) -> Result<FullResponse> {
        Ok(FullResponse {
            head: self.head,
            body: self.body.bytes().await?,
        })
    }
}

/// A response with its body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullResponse {
    pub head: ResponseHead,
    pub body: Bytes,
}

impl FullResponse {
    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
