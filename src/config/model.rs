// src/config/model.rs

use serde::Deserialize;

use crate::types::{NodeStatus, PropagationMode, UnlockRule};

/// Chart file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [config]
/// propagation = "single_pass"
/// unlock_rule = "any"
///
/// [viewport]
/// width = 1200
/// height = 700
///
/// [[node]]
/// id = "C1"
/// name = "Sketch Daily"
/// x = 0.15
/// y = 0.22
/// status = "unlocked"
/// connections = ["C2", "C3"]
/// ```
///
/// All sections are optional; validation rejects a chart without nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChartConfig {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub viewport: ViewportSection,

    /// Nodes from `[[node]]`, in declaration order.
    #[serde(default)]
    pub node: Vec<NodeConfig>,
}

/// A validated chart. Only obtainable through `TryFrom<RawChartConfig>`
/// (or [`ChartConfig::new_unchecked`] for callers that validated already).
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub config: ConfigSection,
    pub viewport: ViewportSection,
    pub node: Vec<NodeConfig>,
}

impl ChartConfig {
    pub fn new_unchecked(
        config: ConfigSection,
        viewport: ViewportSection,
        node: Vec<NodeConfig>,
    ) -> Self {
        Self {
            config,
            viewport,
            node,
        }
    }
}

/// `[config]` section: propagation behaviour and validation strictness.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    #[serde(default)]
    pub propagation: PropagationMode,

    #[serde(default)]
    pub unlock_rule: UnlockRule,

    /// When false, a chart containing a cycle is rejected at load time.
    #[serde(default = "default_allow_cycles")]
    pub allow_cycles: bool,

    /// When true, connections to unknown node ids are rejected instead of
    /// ignored.
    #[serde(default)]
    pub strict_edges: bool,
}

fn default_allow_cycles() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            propagation: PropagationMode::default(),
            unlock_rule: UnlockRule::default(),
            allow_cycles: default_allow_cycles(),
            strict_edges: false,
        }
    }
}

/// `[viewport]` section: the drawing surface normalized positions map onto.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    700
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// One `[[node]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub id: String,

    /// Display name; falls back to `id` when omitted.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Normalized horizontal position in `[0, 1]`.
    pub x: f64,

    /// Normalized vertical position in `[0, 1]`.
    pub y: f64,

    #[serde(default)]
    pub status: NodeStatus,

    /// Outgoing edges: ids of the nodes this one unlocks.
    #[serde(default)]
    pub connections: Vec<String>,
}

impl NodeConfig {
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
