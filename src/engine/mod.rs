// src/engine/mod.rs

//! Unlock-propagation engine for starchart.
//!
//! This module ties together:
//! - the propagation rules ([`propagation`]) that move nodes from
//!   `locked` to `unlocked` to `completed`
//! - the [`Chart`] that owns the graph store, enforces the completion
//!   preconditions and notifies observers
//! - the runtime event loop that reacts to:
//!   - completion requests
//!   - node activations (clicks)
//!   - snapshot requests
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;
use crate::types::NodeStatus;

/// Why a node's status changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeCause {
    /// The node itself was completed by request.
    Completed,
    /// The node is a direct dependent of the node completed in this call.
    DirectUnlock { by: NodeId },
    /// The node was picked up by a global propagation pass.
    Propagated,
}

impl fmt::Display for ChangeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeCause::Completed => f.write_str("completed"),
            ChangeCause::DirectUnlock { by } => write!(f, "unlocked by {by}"),
            ChangeCause::Propagated => f.write_str("unlocked by propagation"),
        }
    }
}

/// One "node status changed" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: NodeId,
    pub old: NodeStatus,
    pub new: NodeStatus,
    pub cause: ChangeCause,
}

/// Why a completion request (or activation) did nothing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    #[error("no such node")]
    NotFound,
    #[error("node is still locked")]
    Locked,
    #[error("node is already completed")]
    AlreadyCompleted,
}

/// Result of [`Chart::complete_node`].
///
/// Ignored requests leave the chart untouched and emit nothing; callers that
/// want the permissive behaviour can simply drop the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed(Vec<StatusChange>),
    Ignored(IgnoreReason),
}

impl CompletionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CompletionOutcome::Completed(_))
    }

    /// Changes applied by the call; empty when ignored.
    pub fn changes(&self) -> &[StatusChange] {
        match self {
            CompletionOutcome::Completed(changes) => changes,
            CompletionOutcome::Ignored(_) => &[],
        }
    }

    pub fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            CompletionOutcome::Completed(_) => None,
            CompletionOutcome::Ignored(reason) => Some(*reason),
        }
    }
}

/// Result of [`Chart::activate`] (a click on a node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The node was unlocked and is now completed.
    Completed(Vec<StatusChange>),
    /// The node was already completed; acknowledge with a pulse.
    Pulse,
    Ignored(IgnoreReason),
}

/// Events flowing into the runtime from input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    /// Complete the node if it is unlocked.
    CompleteRequested { id: NodeId },
    /// The node was clicked.
    Activated { id: NodeId },
    /// Render the current state of the chart.
    SnapshotRequested,
    /// Graceful shutdown requested (e.g. Ctrl-C, `quit`, end of input).
    ShutdownRequested,
}

pub mod chart;
pub mod core;
pub mod event_handlers;
pub mod observer;
pub mod propagation;
pub mod runtime;

pub use chart::{Chart, ChartSnapshot, NodeSnapshot, PropagationOptions};
pub use self::core::CoreRuntime;
pub use event_handlers::{ChartUpdate, CoreCommand, CoreStep};
pub use observer::{StatusObserver, TracingObserver};
pub use propagation::Propagator;
pub use runtime::Runtime;
