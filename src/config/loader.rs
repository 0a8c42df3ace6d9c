// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ChartConfig, RawChartConfig};
use crate::errors::Result;

/// Load a chart file from a given path and return the raw `RawChartConfig`.
///
/// This only performs TOML deserialization; it does **not** check ids,
/// positions or edges. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawChartConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Deserialize a chart from TOML text.
pub fn load_from_str(contents: &str) -> Result<RawChartConfig> {
    let config: RawChartConfig = toml::from_str(contents)?;
    Ok(config)
}

/// Load a chart file from path and validate it.
///
/// This is the entry point the rest of the application uses:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for empty charts, duplicate ids, out-of-range positions,
///   dangling connections and (optionally) cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ChartConfig> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ChartConfig::try_from(raw_config)?;
    debug!(path = %path.display(), nodes = config.node.len(), "chart loaded");
    Ok(config)
}

/// Chart file used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Starchart.toml")
}
