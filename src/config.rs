use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Client settings.
///
/// Loaded from the YAML file named by `UDS_HTTP_CONFIG` when set, otherwise
/// defaults. `UDS_HTTP_SOCKET` overrides the socket path either way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub socket_path: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from("/var/run/uds-http.sock"),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("UDS_HTTP_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(socket) = std::env::var("UDS_HTTP_SOCKET") {
            cfg.socket_path = PathBuf::from(socket);
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path, e))?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
