// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use crate::engine::chart::{Chart, ChartSnapshot};
use crate::engine::{Activation, CompletionOutcome, IgnoreReason, StatusChange};
use crate::graph::NodeId;

/// Something the presentation side should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartUpdate {
    /// Statuses changed; redraw these nodes (and play unlock cues).
    Changes(Vec<StatusChange>),
    /// A completed node was clicked.
    Pulse(NodeId),
    /// A request was ignored; purely informational.
    Ignored { id: NodeId, reason: IgnoreReason },
    /// Full redraw.
    Snapshot(ChartSnapshot),
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreCommand {
    /// Hand this update to the sink.
    Emit(ChartUpdate),
    /// Request that the runtime stops.
    RequestExit,
}

/// Decision returned by the core after handling a single `ChartEvent`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn emit(update: ChartUpdate) -> Self {
        Self {
            commands: vec![CoreCommand::Emit(update)],
            keep_running: true,
        }
    }
}

/// Handle an explicit completion request.
pub fn handle_complete(chart: &mut Chart, id: NodeId) -> CoreStep {
    match chart.complete_node(&id) {
        CompletionOutcome::Completed(changes) => CoreStep::emit(ChartUpdate::Changes(changes)),
        CompletionOutcome::Ignored(reason) => CoreStep::emit(ChartUpdate::Ignored { id, reason }),
    }
}

/// Handle a click on a node.
pub fn handle_activate(chart: &mut Chart, id: NodeId) -> CoreStep {
    match chart.activate(&id) {
        Activation::Completed(changes) => CoreStep::emit(ChartUpdate::Changes(changes)),
        Activation::Pulse => CoreStep::emit(ChartUpdate::Pulse(id)),
        Activation::Ignored(reason) => CoreStep::emit(ChartUpdate::Ignored { id, reason }),
    }
}

pub fn handle_snapshot(chart: &Chart) -> CoreStep {
    CoreStep::emit(ChartUpdate::Snapshot(chart.snapshot()))
}

pub fn handle_shutdown() -> CoreStep {
    CoreStep {
        commands: vec![CoreCommand::RequestExit],
        keep_running: false,
    }
}
