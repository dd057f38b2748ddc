//! Configuration loading and parsing.
//!
//! Defines the server config schema and resolves defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level server configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Bind address (host:port).
    pub bind: Option<String>,
    /// Shared secret required on command paths.
    pub auth_token: Option<String>,
    /// Optional dashboard directory served at `/`.
    pub dashboard_dir: Option<String>,
}

impl ServerConfig {
    /// Load configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg = toml::from_str::<ServerConfig>(&raw)
            .with_context(|| format!("parse config {:?}", path))?;
        Ok(cfg)
    }
}

/// Parse the configured bind address, if present.
pub fn bind_from_config(cfg: &ServerConfig) -> Result<Option<SocketAddr>> {
    match cfg.bind.as_ref() {
        Some(raw) => {
            let addr = raw
                .parse()
                .with_context(|| format!("parse bind address {raw}"))?;
            Ok(Some(addr))
        }
        None => Ok(None),
    }
}

/// Resolve the dashboard directory, if configured.
pub fn dashboard_dir_from_config(cfg: &ServerConfig) -> Option<PathBuf> {
    cfg.dashboard_dir.as_ref().map(PathBuf::from)
}
