// src/graph/node.rs

//! Node and edge types held by the [`GraphStore`](super::GraphStore).

use crate::config::model::NodeConfig;
use crate::types::NodeStatus;

/// Canonical node identifier type used throughout the crate.
pub type NodeId = String;

/// Normalized position of a node, both coordinates in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single achievement in the chart.
///
/// Everything except `status` is fixed at construction; the store only
/// hands out shared references, and status changes go through
/// [`GraphStore::set_status`](super::GraphStore::set_status).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub description: String,
    pub position: Position,
    pub status: NodeStatus,
    /// Outgoing edges (prerequisite -> dependent), in declaration order.
    /// May name ids that do not exist.
    pub connections: Vec<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, status: NodeStatus) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            position: Position::new(0.0, 0.0),
            status,
            connections: Vec::new(),
        }
    }

    pub fn with_connections<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.connections = targets.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_config(cfg: &NodeConfig) -> Self {
        Self {
            id: cfg.id.clone(),
            name: cfg.effective_name().to_string(),
            description: cfg.description.clone(),
            position: Position::new(cfg.x, cfg.y),
            status: cfg.status,
            connections: cfg.connections.clone(),
        }
    }
}

/// Borrowed view of one edge whose endpoints both exist.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub from: &'a Node,
    pub to: &'a Node,
}

impl Edge<'_> {
    /// An edge is highlighted when it leads from a completed node to a node
    /// the user can act on next.
    pub fn is_active(&self) -> bool {
        self.from.status == NodeStatus::Completed && self.to.status == NodeStatus::Unlocked
    }
}
