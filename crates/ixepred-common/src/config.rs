//! Configuration loading for Ixepred.
//! Reads ixepred.toml from the current directory or the path in the IXEPRED_CONFIG env var.
//! Every section is optional; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{IxepredError, Result};

pub const CONFIG_ENV_VAR: &str = "IXEPRED_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "ixepred.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub alignment: AlignmentConfig,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| IxepredError::Config(format!("invalid bind address {}:{}: {e}", self.host, self.port)))
    }
}

// ── Models ────────────────────────────────────────────────────────────────────

/// Location of the serialized classifiers and their metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,
}

fn default_models_dir() -> PathBuf { PathBuf::from("models_ixe") }

impl Default for ModelsConfig {
    fn default() -> Self {
        Self { dir: default_models_dir() }
    }
}

// ── Feature alignment ─────────────────────────────────────────────────────────

/// How a patient record is reconciled with a model's expected columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Reject records lacking an expected column instead of passing a missing value.
    #[serde(default)]
    pub strict: bool,
}

impl AppConfig {
    /// Load configuration from ixepred.toml.
    /// Checks IXEPRED_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        Self::load_with(std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Resolve the config path from an IXEPRED_CONFIG value, falling back to ixepred.toml.
    pub fn load_with(env_value: Option<String>) -> Result<Self> {
        let path = env_value
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| IxepredError::Config(format!("{}: {e}", path.display())))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}
