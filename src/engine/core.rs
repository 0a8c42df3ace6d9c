// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`ChartEvent`]s and produces:
//! - an updated chart
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! events from channels and handing updates to a sink. The core can be
//! unit tested without any Tokio, channels or terminal.

use crate::engine::chart::Chart;
use crate::engine::event_handlers::{
    handle_activate, handle_complete, handle_shutdown, handle_snapshot, CoreStep,
};
use crate::engine::ChartEvent;

/// Pure core runtime state. Owns the chart; has no channels and performs
/// no IO.
#[derive(Debug)]
pub struct CoreRuntime {
    chart: Chart,
}

impl CoreRuntime {
    pub fn new(chart: Chart) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn into_chart(self) -> Chart {
        self.chart
    }

    /// Handle a single event, updating the chart and returning the resulting
    /// commands for the IO shell.
    pub fn step(&mut self, event: ChartEvent) -> CoreStep {
        match event {
            ChartEvent::CompleteRequested { id } => handle_complete(&mut self.chart, id),
            ChartEvent::Activated { id } => handle_activate(&mut self.chart, id),
            ChartEvent::SnapshotRequested => handle_snapshot(&self.chart),
            ChartEvent::ShutdownRequested => handle_shutdown(),
        }
    }
}
