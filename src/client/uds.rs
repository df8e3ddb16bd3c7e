//! Unix domain socket client.
//!
//! Opens a fresh connection per request, runs one exchange and closes it.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::client::exchange::exchange;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::request::Request;
use crate::http::response::FullResponse;

/// Sends requests to an HTTP server listening on a Unix socket.
#[derive(Debug, Clone)]
pub struct UdsClient {
    socket_path: PathBuf,

    /// Connection timeout duration
    connect_timeout: Duration,

    /// Time allowed for writing the request and reading the whole response
    request_timeout: Duration,
}

impl UdsClient {
    pub fn new(
        socket_path: impl Into<PathBuf>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            socket_path: socket_path.into(),
            connect_timeout,
            request_timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.socket_path.clone(),
            cfg.connect_timeout(),
            cfg.request_timeout(),
        )
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Runs one exchange on a new connection.
    ///
    /// `request.headers` are updated in place (`Host`, `Connection: close`).
    /// Failures are returned as-is; the caller decides whether to retry.
    pub async fn send(&self, request: &mut Request) -> Result<FullResponse> {
        let mut stream = timeout(self.connect_timeout, UnixStream::connect(&self.socket_path))
            .await
            .map_err(|_| Error::Timeout("connecting"))??;

        tracing::trace!(socket = %self.socket_path.display(), "Connected");

        let result = timeout(self.request_timeout, exchange(&mut stream, request))
            .await
            .map_err(|_| Error::Timeout("request"))
            .and_then(|r| r);

        match &result {
            Ok(response) => tracing::info!(
                socket = %self.socket_path.display(),
                method = %request.method,
                status = response.status().as_u16(),
                body_len = response.body.len(),
                "Request completed"
            ),
            Err(e) => tracing::warn!(
                socket = %self.socket_path.display(),
                method = %request.method,
                error = %e,
                "Request failed"
            ),
        }

        result
    }
}
