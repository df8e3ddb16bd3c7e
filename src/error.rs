//! Error type shared by the serializer, the response parser and the client.
//!
//! Every variant is terminal for the call that produced it. Nothing in this
//! crate retries; the caller decides whether to run the whole exchange again
//! over a fresh transport.

/// Errors produced while serializing a request or parsing a response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input is missing or unusable (no target, no host to derive
    /// `Host` from, non-ASCII header text).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport closed before a status line was received.
    #[error("no response received")]
    EmptyResponse,

    /// The status line did not contain version, code and reason.
    #[error("status line is not valid: {0:?}")]
    MalformedStatusLine(String),

    #[error("version is not valid: {0:?}")]
    InvalidVersion(String),

    /// The status code was not numeric or is not a registered code.
    #[error("status code is not valid: {0:?}")]
    InvalidStatusCode(String),

    /// A header line had no `:` or an empty name.
    #[error("header is invalid: {0:?}")]
    InvalidHeader(String),

    #[error("header value is invalid for {name}: {value:?}")]
    InvalidHeaderValue { name: String, value: String },

    /// The stream ended before the declared Content-Length was read.
    #[error("connection closed after {received} of {expected} body bytes")]
    IncompleteBody { expected: u64, received: u64 },

    /// A status or header line ran past the line length limit without a
    /// terminator.
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
