// src/engine/propagation.rs

//! Status transitions applied by a single completion.

use tracing::{debug, trace};

use crate::engine::{ChangeCause, StatusChange};
use crate::graph::{GraphStore, NodeId};
use crate::types::{NodeStatus, UnlockRule};

/// Applies the unlock rules to a borrowed [`GraphStore`].
///
/// The propagator does not check completion preconditions; that is the
/// job of [`Chart::complete_node`](crate::engine::Chart::complete_node).
pub struct Propagator<'a> {
    store: &'a mut GraphStore,
    rule: UnlockRule,
}

impl<'a> Propagator<'a> {
    pub fn new(store: &'a mut GraphStore, rule: UnlockRule) -> Self {
        Self { store, rule }
    }

    /// Mark `id` completed and unlock its direct dependents.
    ///
    /// Returns the changes in the order they were applied: the completed
    /// node first, then its dependents in connection order.
    pub fn complete(&mut self, id: &str) -> Vec<StatusChange> {
        let mut changes = Vec::new();
        self.transition(id, NodeStatus::Completed, ChangeCause::Completed, &mut changes);
        self.direct_unlock(id, &mut changes);
        changes
    }

    /// Unlock every locked direct dependent of `id` that the unlock rule
    /// allows. Connections to unknown ids are skipped.
    pub fn direct_unlock(&mut self, id: &str, changes: &mut Vec<StatusChange>) {
        let targets: Vec<NodeId> = match self.store.get_node(id) {
            Some(node) => node.connections.clone(),
            None => return,
        };

        for target in targets {
            let Some(node) = self.store.get_node(&target) else {
                trace!(from = %id, target = %target, "skipping dangling connection");
                continue;
            };
            if node.status != NodeStatus::Locked {
                continue;
            }
            // Under `Any` the freshly completed `id` already satisfies the
            // rule; only `All` needs to look at the other predecessors.
            if self.rule == UnlockRule::All && !self.is_eligible(&target) {
                continue;
            }
            self.transition(
                &target,
                NodeStatus::Unlocked,
                ChangeCause::DirectUnlock { by: id.to_string() },
                changes,
            );
        }
    }

    /// One scan over all nodes in declaration order, unlocking each locked
    /// node whose predecessors satisfy the unlock rule.
    ///
    /// Returns how many nodes this pass unlocked.
    pub fn propagation_pass(&mut self, changes: &mut Vec<StatusChange>) -> usize {
        // Decide first, then mutate. Unlocking never completes anything, so
        // the decisions cannot influence each other within one pass.
        let eligible: Vec<NodeId> = self
            .store
            .all_nodes()
            .filter(|n| n.status == NodeStatus::Locked && self.is_eligible(&n.id))
            .map(|n| n.id.clone())
            .collect();

        for id in eligible.iter() {
            self.transition(id, NodeStatus::Unlocked, ChangeCause::Propagated, changes);
        }

        debug!(unlocked = eligible.len(), "propagation pass finished");
        eligible.len()
    }

    /// Whether the predecessors of `id` allow it to unlock.
    pub fn is_eligible(&self, id: &str) -> bool {
        let preds = self.store.incoming_edges(id);
        match self.rule {
            UnlockRule::Any => preds.iter().any(|p| p.status == NodeStatus::Completed),
            UnlockRule::All => {
                !preds.is_empty() && preds.iter().all(|p| p.status == NodeStatus::Completed)
            }
        }
    }

    fn transition(
        &mut self,
        id: &str,
        new: NodeStatus,
        cause: ChangeCause,
        changes: &mut Vec<StatusChange>,
    ) {
        match self.store.set_status(id, new) {
            Some(old) if old != new => {
                debug!(node = %id, %old, %new, %cause, "status transition");
                changes.push(StatusChange {
                    id: id.to_string(),
                    old,
                    new,
                    cause,
                });
            }
            _ => {}
        }
    }
}
