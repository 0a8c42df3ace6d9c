// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::PropagationMode;

/// Command-line arguments for `starchart`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "starchart",
    version,
    about = "Explore an achievement star chart: complete nodes and watch unlocks propagate.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the chart file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Complete this node at startup. May be repeated; applied in order.
    #[arg(long, value_name = "ID")]
    pub complete: Vec<String>,

    /// Apply `--complete`, print the chart and exit instead of reading
    /// commands from stdin.
    #[arg(long)]
    pub once: bool,

    /// Override `[config].propagation` (single_pass, fixed_point).
    #[arg(long, value_name = "MODE")]
    pub propagation: Option<PropagationMode>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STARCHART_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the chart layout, but don't start the
    /// runtime.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_completions_and_overrides() {
        let args = CliArgs::try_parse_from([
            "starchart",
            "--config",
            "charts/achievements.toml",
            "--complete",
            "C1",
            "--complete",
            "C2",
            "--propagation",
            "fixed_point",
            "--once",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("charts/achievements.toml"));
        assert_eq!(args.complete, vec!["C1", "C2"]);
        assert_eq!(args.propagation, Some(PropagationMode::FixedPoint));
        assert!(args.once);
        assert!(!args.dry_run);
    }

    #[test]
    fn defaults_to_starchart_toml() {
        let args = CliArgs::try_parse_from(["starchart"]).unwrap();
        assert_eq!(args.config, PathBuf::from("Starchart.toml"));
        assert!(args.complete.is_empty());
        assert!(args.propagation.is_none());
    }
}
