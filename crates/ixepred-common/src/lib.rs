//! ixepred-common — Shared error type and configuration used across all Ixepred crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{AppConfig, ServerConfig, ModelsConfig, AlignmentConfig};
pub use error::{IxepredError, Result};
