//! Single-exchange HTTP client over byte transports.
//!
//! Each exchange writes one request and reads one response. Connections are
//! never reused since every request carries `Connection: close`, and nothing
//! here retries a failed exchange.

pub mod exchange;
#[cfg(unix)]
pub mod uds;

pub use exchange::exchange;
#[cfg(unix)]
pub use uds::UdsClient;
