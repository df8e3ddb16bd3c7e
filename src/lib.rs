//! uds-http - HTTP/1.1 over raw byte transports
//!
//! Serializes requests to wire bytes and parses responses from a line-oriented
//! reader, for transports (Unix sockets, pipes) that carry plain bytes and
//! offer no HTTP handling of their own.

pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use error::{Error, Result};
