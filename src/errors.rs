// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only the edges of the system can fail (chart loading, CLI wiring). The
//! propagation core itself never returns these; rejected completion
//! requests are reported through `engine::CompletionOutcome` instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarchartError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Cycle detected in chart: {0}")]
    GraphCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StarchartError>;
