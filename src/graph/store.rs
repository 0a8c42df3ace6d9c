// src/graph/store.rs

use std::collections::HashMap;

use crate::config::model::ChartConfig;
use crate::errors::{Result, StarchartError};
use crate::graph::node::{Edge, Node, NodeId};
use crate::types::NodeStatus;

/// Number of nodes in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub locked: usize,
    pub unlocked: usize,
    pub completed: usize,
}

/// Canonical holder of the chart's nodes and their statuses.
///
/// Nodes are kept in declaration order. Topology never changes after
/// construction, so the reverse adjacency (who points at whom) is computed
/// once here instead of rescanning every node per lookup.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    /// Node id -> dense index into `nodes`.
    index: HashMap<NodeId, usize>,
    /// `incoming[i]` = indices of nodes listing `nodes[i]` as a connection,
    /// in declaration order, each predecessor at most once.
    incoming: Vec<Vec<usize>>,
}

impl GraphStore {
    /// Build a store from nodes in declaration order.
    ///
    /// Fails if two nodes share an id. Connections to unknown ids are kept on
    /// the node but never resolved.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(StarchartError::DuplicateNode(node.id.clone()));
            }
        }

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            for target in node.connections.iter() {
                if let Some(&t) = index.get(target) {
                    // All pushes for predecessor `i` happen in this
                    // iteration, so checking the tail is enough to dedupe.
                    if incoming[t].last() != Some(&i) {
                        incoming[t].push(i);
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            index,
            incoming,
        })
    }

    /// Build a store from a validated [`ChartConfig`].
    pub fn from_config(cfg: &ChartConfig) -> Result<Self> {
        Self::new(cfg.node.iter().map(Node::from_config).collect())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Constant-time lookup by id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// All nodes in declaration order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Nodes whose connections contain `id`, in declaration order.
    ///
    /// Unknown ids have no predecessors.
    pub fn incoming_edges(&self, id: &str) -> Vec<&Node> {
        match self.index.get(id) {
            Some(&i) => self.incoming[i].iter().map(|&p| &self.nodes[p]).collect(),
            None => Vec::new(),
        }
    }

    /// Set a node's status without any transition checks.
    ///
    /// Returns the previous status, or `None` if the id is unknown (in which
    /// case nothing changes).
    pub fn set_status(&mut self, id: &str, status: NodeStatus) -> Option<NodeStatus> {
        let &i = self.index.get(id)?;
        let previous = self.nodes[i].status;
        self.nodes[i].status = status;
        Some(previous)
    }

    /// Every edge whose endpoints both exist, grouped by source node in
    /// declaration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.nodes.iter().flat_map(move |from| {
            from.connections
                .iter()
                .filter_map(move |target| self.get_node(target).map(|to| Edge { from, to }))
        })
    }

    /// Edges currently highlighted (completed -> unlocked).
    pub fn active_edges(&self) -> Vec<Edge<'_>> {
        self.edges().filter(|e| e.is_active()).collect()
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for node in self.nodes.iter() {
            match node.status {
                NodeStatus::Locked => counts.locked += 1,
                NodeStatus::Unlocked => counts.unlocked += 1,
                NodeStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }
}
