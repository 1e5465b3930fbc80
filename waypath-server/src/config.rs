use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration, loaded from a TOML file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Requests slower than this are answered with 408
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// In-flight request ceiling
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
    pub data: DataConfig,
    /// Optional external routing provider; absent means the provider is
    /// disabled and the direct fallback takes its place
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// GeoJSON path survey
    pub paths: PathBuf,
    /// CSV location catalog
    pub locations: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of an OSRM-compatible routing service
    pub url: String,
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_request_timeout() -> u64 {
    30
}

fn default_concurrency_limit() -> usize {
    256
}

fn default_remote_timeout() -> u64 {
    5
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("cannot read config {}: {err}", path.display()))?;
        let config = toml::from_str(&raw)
            .map_err(|err| format!("cannot parse config {}: {err}", path.display()))?;
        Ok(config)
    }
}
