// src/config/mod.rs

//! Chart loading and validation for starchart.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a chart file from disk (`loader.rs`).
//! - Validate ids, positions and edges (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_from_str};
pub use model::{ChartConfig, ConfigSection, NodeConfig, RawChartConfig, ViewportSection};
pub use validate::validate_config;
