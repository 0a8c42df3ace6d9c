// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod present;
pub mod types;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::ChartConfig;
use crate::engine::{Chart, ChartEvent, CoreRuntime, Runtime, TracingObserver};
use crate::graph::{GraphStore, Viewport};
use crate::present::{spawn_input, ConsoleSink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - chart loading
/// - the chart + core runtime
/// - the console sink and stdin reader
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_and_validate(&args.config)?;
    if let Some(mode) = args.propagation {
        cfg.config.propagation = mode;
    }

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let mut chart = Chart::from_config(&cfg)?;
    chart.subscribe(TracingObserver);
    info!(
        nodes = chart.store().len(),
        options = ?chart.options(),
        "chart ready"
    );

    for id in args.complete.iter() {
        if !chart.store().contains(id) {
            warn!(node = %id, "--complete names a node that is not in the chart");
        }
    }

    let (tx, rx) = mpsc::channel::<ChartEvent>(64);

    // Ctrl-C → graceful shutdown.
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(ChartEvent::ShutdownRequested).await;
        });
    }

    // Startup completions first, then a full render.
    let mut seed: Vec<ChartEvent> = args
        .complete
        .iter()
        .map(|id| ChartEvent::CompleteRequested { id: id.clone() })
        .collect();
    seed.push(ChartEvent::SnapshotRequested);

    let _input_handle = spawn_input(tx, seed, !args.once);

    let runtime = Runtime::new(CoreRuntime::new(chart), rx, ConsoleSink::new());
    let chart = runtime.run().await?;

    let counts = chart.store().status_counts();
    debug!(?counts, "final chart state");
    Ok(())
}

/// Dry-run output: print options, nodes with their viewport position, and
/// connections with their curve control points.
fn print_dry_run(cfg: &ChartConfig) -> Result<()> {
    let store = GraphStore::from_config(cfg)?;
    let viewport = Viewport::from(cfg.viewport);

    println!("starchart dry-run");
    println!("  config.propagation = {:?}", cfg.config.propagation);
    println!("  config.unlock_rule = {:?}", cfg.config.unlock_rule);
    println!("  viewport = {}x{}", viewport.width, viewport.height);
    println!();

    println!("nodes ({}):", store.len());
    for node in store.all_nodes() {
        let point = viewport.project(node.position);
        println!("  - {} \"{}\" [{}] at ({}, {})", node.id, node.name, node.status, point.x, point.y);
    }

    println!();
    println!("connections:");
    for edge in store.edges() {
        let cp = viewport.connection_control_point(edge.from.position, edge.to.position);
        println!("  - {} -> {} via ({:.1}, {:.1})", edge.from.id, edge.to.id, cp.x, cp.y);
    }

    let roots: Vec<&str> = store
        .all_nodes()
        .filter(|n| store.incoming_edges(&n.id).is_empty())
        .map(|n| n.id.as_str())
        .collect();
    println!();
    println!("entry points: {:?}", roots);

    debug!("dry-run complete (no runtime)");
    Ok(())
}
