// src/present/sink.rs

//! Pluggable destination for chart updates.
//!
//! The runtime talks to a `ChangeSink` instead of writing to the terminal
//! directly. Production uses [`ConsoleSink`]; tests provide a sink that
//! records updates.

use std::future::Future;
use std::pin::Pin;

use tokio::io::{AsyncWriteExt, Stdout};

use crate::engine::{ChartSnapshot, ChartUpdate};
use crate::errors::Result;
use crate::types::NodeStatus;

/// Trait abstracting where chart updates go.
pub trait ChangeSink: Send {
    fn deliver(
        &mut self,
        update: ChartUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Writes human-readable updates to stdout.
pub struct ConsoleSink {
    out: Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: tokio::io::stdout(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSink for ConsoleSink {
    fn deliver(
        &mut self,
        update: ChartUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let lines = format_update(&update);
        Box::pin(write_lines(&mut self.out, lines))
    }
}

async fn write_lines(out: &mut Stdout, lines: Vec<String>) -> Result<()> {
    for line in lines {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(())
}

/// Render an update as terminal lines.
pub fn format_update(update: &ChartUpdate) -> Vec<String> {
    match update {
        ChartUpdate::Changes(changes) => changes
            .iter()
            .map(|c| format!("* {}: {} -> {} ({})", c.id, c.old, c.new, c.cause))
            .collect(),
        ChartUpdate::Pulse(id) => vec![format!("~ {id} is already completed")],
        ChartUpdate::Ignored { id, reason } => vec![format!("! {id}: {reason}")],
        ChartUpdate::Snapshot(snapshot) => format_snapshot(snapshot),
    }
}

fn format_snapshot(snapshot: &ChartSnapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(snapshot.nodes.len() + snapshot.active_edges.len() + 1);

    lines.push(format!(
        "chart: {} completed, {} unlocked, {} locked",
        snapshot.counts.completed, snapshot.counts.unlocked, snapshot.counts.locked
    ));

    for node in snapshot.nodes.iter() {
        lines.push(format!(
            "  {} {:<6} {:<28} ({}, {})",
            status_marker(node.status),
            node.id,
            node.name,
            node.point.x,
            node.point.y
        ));
    }

    for (from, to) in snapshot.active_edges.iter() {
        lines.push(format!("  next: {from} -> {to}"));
    }

    lines
}

fn status_marker(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Locked => "[-]",
        NodeStatus::Unlocked => "[ ]",
        NodeStatus::Completed => "[x]",
    }
}
