// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::config::model::{ChartConfig, RawChartConfig};
use crate::errors::{Result, StarchartError};

impl TryFrom<RawChartConfig> for ChartConfig {
    type Error = crate::errors::StarchartError;

    fn try_from(raw: RawChartConfig) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ChartConfig::new_unchecked(raw.config, raw.viewport, raw.node))
    }
}

/// Run every chart check against a raw config.
pub fn validate_config(cfg: &RawChartConfig) -> Result<()> {
    ensure_has_nodes(cfg)?;
    validate_viewport(cfg)?;
    validate_node_ids(cfg)?;
    validate_positions(cfg)?;
    validate_connections(cfg)?;
    validate_topology(cfg)?;
    Ok(())
}

fn ensure_has_nodes(cfg: &RawChartConfig) -> Result<()> {
    if cfg.node.is_empty() {
        return Err(StarchartError::ConfigError(
            "chart must contain at least one [[node]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_viewport(cfg: &RawChartConfig) -> Result<()> {
    if cfg.viewport.width == 0 || cfg.viewport.height == 0 {
        return Err(StarchartError::ConfigError(format!(
            "[viewport] width and height must be >= 1 (got {}x{})",
            cfg.viewport.width, cfg.viewport.height
        )));
    }
    Ok(())
}

fn validate_node_ids(cfg: &RawChartConfig) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for node in cfg.node.iter() {
        if node.id.trim().is_empty() {
            return Err(StarchartError::ConfigError(
                "node id must not be empty".to_string(),
            ));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(StarchartError::DuplicateNode(node.id.clone()));
        }
    }
    Ok(())
}

fn validate_positions(cfg: &RawChartConfig) -> Result<()> {
    for node in cfg.node.iter() {
        for (axis, value) in [("x", node.x), ("y", node.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StarchartError::ConfigError(format!(
                    "node '{}' has {} = {} outside the normalized range [0, 1]",
                    node.id, axis, value
                )));
            }
        }
    }
    Ok(())
}

fn validate_connections(cfg: &RawChartConfig) -> Result<()> {
    let ids: HashSet<&str> = cfg.node.iter().map(|n| n.id.as_str()).collect();

    for node in cfg.node.iter() {
        for target in node.connections.iter() {
            if ids.contains(target.as_str()) {
                continue;
            }
            if cfg.config.strict_edges {
                return Err(StarchartError::ConfigError(format!(
                    "node '{}' connects to unknown node '{}'",
                    node.id, target
                )));
            }
            warn!(
                node = %node.id,
                target = %target,
                "connection to unknown node will be ignored"
            );
        }
    }
    Ok(())
}

fn validate_topology(cfg: &RawChartConfig) -> Result<()> {
    // Edge direction: prerequisite -> dependent, i.e. node -> each of its
    // `connections`. Dangling targets were dealt with above and are skipped.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for node in cfg.node.iter() {
        graph.add_node(node.id.as_str());
    }

    for node in cfg.node.iter() {
        for target in node.connections.iter() {
            if graph.contains_node(target.as_str()) {
                graph.add_edge(node.id.as_str(), target.as_str(), ());
            }
        }
    }

    if cfg.config.allow_cycles {
        if is_cyclic_directed(&graph) {
            debug!("chart contains at least one cycle; allowed by config");
        }
        return Ok(());
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(StarchartError::GraphCycle(format!(
            "cycle detected in chart involving node '{}'",
            cycle.node_id()
        ))),
    }
}
