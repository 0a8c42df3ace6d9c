// src/engine/chart.rs

use std::fmt;

use tracing::{debug, info};

use crate::config::model::ChartConfig;
use crate::engine::observer::StatusObserver;
use crate::engine::propagation::Propagator;
use crate::engine::{Activation, CompletionOutcome, IgnoreReason, StatusChange};
use crate::errors::Result;
use crate::graph::{GraphStore, Node, NodeId, Point, StatusCounts, Viewport};
use crate::types::{NodeStatus, PropagationMode, UnlockRule};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationOptions {
    pub mode: PropagationMode,
    pub rule: UnlockRule,
}

/// Per-node entry of a [`ChartSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub status: NodeStatus,
    /// Position projected onto the chart's viewport.
    pub point: Point,
}

/// Owned, read-only copy of what a renderer needs to redraw everything.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    /// Highlighted edges as `(from, to)`.
    pub active_edges: Vec<(NodeId, NodeId)>,
    pub counts: StatusCounts,
}

/// The achievement chart: the graph store plus the rules that change it.
///
/// This is the only place statuses are mutated. Every mutation goes through
/// [`Chart::complete_node`], which checks preconditions, runs propagation
/// and then notifies observers.
pub struct Chart {
    store: GraphStore,
    options: PropagationOptions,
    viewport: Viewport,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("store", &self.store)
            .field("options", &self.options)
            .field("viewport", &self.viewport)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Chart {
    pub fn new(store: GraphStore, options: PropagationOptions) -> Self {
        Self {
            store,
            options,
            viewport: Viewport::default(),
            observers: Vec::new(),
        }
    }

    /// Construct a chart from a validated [`ChartConfig`].
    pub fn from_config(cfg: &ChartConfig) -> Result<Self> {
        let store = GraphStore::from_config(cfg)?;
        let options = PropagationOptions {
            mode: cfg.config.propagation,
            rule: cfg.config.unlock_rule,
        };
        Ok(Self::new(store, options).with_viewport(cfg.viewport.into()))
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn options(&self) -> PropagationOptions {
        self.options
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.store.get_node(id)
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.store.all_nodes()
    }

    /// Register an observer for every future status change.
    pub fn subscribe(&mut self, observer: impl StatusObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Complete `id` if it is currently unlocked.
    ///
    /// In order: the node becomes `completed`, its locked direct dependents
    /// become `unlocked`, then the global propagation pass runs (once, or
    /// until stable under [`PropagationMode::FixedPoint`]). Unknown, locked
    /// and already completed nodes are ignored without touching anything.
    pub fn complete_node(&mut self, id: &str) -> CompletionOutcome {
        let status = match self.store.get_node(id) {
            Some(node) => node.status,
            None => return ignored(id, IgnoreReason::NotFound),
        };
        match status {
            NodeStatus::Unlocked => {}
            NodeStatus::Locked => return ignored(id, IgnoreReason::Locked),
            NodeStatus::Completed => return ignored(id, IgnoreReason::AlreadyCompleted),
        }

        let mut propagator = Propagator::new(&mut self.store, self.options.rule);
        let mut changes = propagator.complete(id);

        match self.options.mode {
            PropagationMode::SinglePass => {
                propagator.propagation_pass(&mut changes);
            }
            PropagationMode::FixedPoint => {
                // Each repeated pass unlocks at least one locked node, so this
                // runs at most once per node.
                let mut passes = 1;
                while propagator.propagation_pass(&mut changes) > 0 {
                    passes += 1;
                }
                debug!(node = %id, passes, "propagation reached a fixed point");
            }
        }

        info!(node = %id, changed = changes.len(), "node completed");
        self.notify(&changes);
        CompletionOutcome::Completed(changes)
    }

    /// React to a click on `id`: complete it when unlocked, pulse when
    /// already completed, ignore otherwise.
    pub fn activate(&mut self, id: &str) -> Activation {
        let Some(status) = self.store.get_node(id).map(|n| n.status) else {
            return Activation::Ignored(IgnoreReason::NotFound);
        };
        if !status.is_interactive() {
            debug!(node = %id, "click on locked node ignored");
            return Activation::Ignored(IgnoreReason::Locked);
        }
        if status == NodeStatus::Completed {
            debug!(node = %id, "pulse on completed node");
            return Activation::Pulse;
        }

        match self.complete_node(id) {
            CompletionOutcome::Completed(changes) => Activation::Completed(changes),
            CompletionOutcome::Ignored(reason) => Activation::Ignored(reason),
        }
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        let nodes = self
            .store
            .all_nodes()
            .map(|n| NodeSnapshot {
                id: n.id.clone(),
                name: n.name.clone(),
                status: n.status,
                point: self.viewport.project(n.position),
            })
            .collect();

        let active_edges = self
            .store
            .active_edges()
            .into_iter()
            .map(|e| (e.from.id.clone(), e.to.id.clone()))
            .collect();

        ChartSnapshot {
            nodes,
            active_edges,
            counts: self.store.status_counts(),
        }
    }

    fn notify(&mut self, changes: &[StatusChange]) {
        for observer in self.observers.iter_mut() {
            for change in changes {
                observer.status_changed(change);
            }
        }
    }
}

fn ignored(id: &str, reason: IgnoreReason) -> CompletionOutcome {
    debug!(node = %id, %reason, "completion request ignored");
    CompletionOutcome::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::engine::ChangeCause;

    fn chain(mode: PropagationMode) -> Chart {
        let store = GraphStore::new(vec![
            Node::new("A", NodeStatus::Unlocked).with_connections(["B"]),
            Node::new("B", NodeStatus::Locked).with_connections(["C"]),
            Node::new("C", NodeStatus::Locked),
        ])
        .unwrap();
        Chart::new(
            store,
            PropagationOptions {
                mode,
                rule: UnlockRule::Any,
            },
        )
    }

    fn status(chart: &Chart, id: &str) -> NodeStatus {
        chart.get_node(id).map(|n| n.status).unwrap()
    }

    #[test]
    fn observers_see_changes_in_emission_order() {
        let mut chart = chain(PropagationMode::SinglePass);
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = Arc::clone(&seen);
        chart.subscribe(move |c: &StatusChange| sink.lock().unwrap().push(c.id.clone()));

        chart.complete_node("A");
        assert_eq!(*seen.lock().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn activation_follows_status() {
        let mut chart = chain(PropagationMode::SinglePass);

        assert_eq!(chart.activate("B"), Activation::Ignored(IgnoreReason::Locked));
        assert_eq!(chart.activate("nope"), Activation::Ignored(IgnoreReason::NotFound));

        match chart.activate("A") {
            Activation::Completed(changes) => assert_eq!(changes[0].cause, ChangeCause::Completed),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(chart.activate("A"), Activation::Pulse);
        assert_eq!(status(&chart, "A"), NodeStatus::Completed);
    }

    #[test]
    fn only_interactive_nodes_respond_to_clicks() {
        for node in ["A", "B", "C"] {
            let mut chart = chain(PropagationMode::SinglePass);
            let interactive = status(&chart, node).is_interactive();
            let ignored = matches!(chart.activate(node), Activation::Ignored(_));
            assert_eq!(interactive, !ignored, "{node}");
        }
    }

    #[test]
    fn fixed_point_still_needs_one_completion_per_hop() {
        let mut chart = chain(PropagationMode::FixedPoint);
        chart.complete_node("A");
        assert_eq!(status(&chart, "B"), NodeStatus::Unlocked);
        assert_eq!(status(&chart, "C"), NodeStatus::Locked);
    }

    #[test]
    fn snapshot_projects_and_highlights() {
        let mut chart = chain(PropagationMode::SinglePass)
            .with_viewport(Viewport { width: 10, height: 10 });
        chart.complete_node("A");

        let snap = chart.snapshot();
        assert_eq!(snap.nodes.len(), 3);
        assert_eq!(snap.nodes[0].point, Point { x: 0, y: 0 });
        assert_eq!(snap.active_edges, vec![("A".to_string(), "B".to_string())]);
        assert_eq!(snap.counts.completed, 1);
        assert_eq!(snap.counts.unlocked, 1);
        assert_eq!(snap.counts.locked, 1);
    }
}
