#![allow(dead_code)]

use starchart::config::{ChartConfig, ConfigSection, NodeConfig, RawChartConfig, ViewportSection};
use starchart::engine::Chart;
use starchart::types::{NodeStatus, PropagationMode, UnlockRule};

/// Builder for `ChartConfig` to simplify test setup.
pub struct ChartConfigBuilder {
    config: RawChartConfig,
}

impl ChartConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawChartConfig {
                config: ConfigSection::default(),
                viewport: ViewportSection::default(),
                node: Vec::new(),
            },
        }
    }

    pub fn with_node(mut self, node: NodeConfig) -> Self {
        self.config.node.push(node);
        self
    }

    pub fn propagation(mut self, mode: PropagationMode) -> Self {
        self.config.config.propagation = mode;
        self
    }

    pub fn unlock_rule(mut self, rule: UnlockRule) -> Self {
        self.config.config.unlock_rule = rule;
        self
    }

    pub fn allow_cycles(mut self, val: bool) -> Self {
        self.config.config.allow_cycles = val;
        self
    }

    pub fn strict_edges(mut self, val: bool) -> Self {
        self.config.config.strict_edges = val;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport = ViewportSection { width, height };
        self
    }

    /// The unvalidated config, for exercising validation failures.
    pub fn build_raw(self) -> RawChartConfig {
        self.config
    }

    pub fn build(self) -> ChartConfig {
        ChartConfig::try_from(self.config).expect("Failed to build valid chart from builder")
    }

    pub fn build_chart(self) -> Chart {
        Chart::from_config(&self.build()).expect("Failed to build chart from builder")
    }
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeConfigBuilder {
    node: NodeConfig,
}

impl NodeConfigBuilder {
    /// A locked node at the origin named after its id.
    pub fn new(id: &str) -> Self {
        Self {
            node: NodeConfig {
                id: id.to_string(),
                name: None,
                description: String::new(),
                x: 0.0,
                y: 0.0,
                status: NodeStatus::Locked,
                connections: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.node.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.node.description = text.to_string();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.node.x = x;
        self.node.y = y;
        self
    }

    pub fn status(mut self, status: NodeStatus) -> Self {
        self.node.status = status;
        self
    }

    pub fn unlocked(self) -> Self {
        self.status(NodeStatus::Unlocked)
    }

    pub fn completed(self) -> Self {
        self.status(NodeStatus::Completed)
    }

    pub fn connects_to(mut self, target: &str) -> Self {
        self.node.connections.push(target.to_string());
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}
