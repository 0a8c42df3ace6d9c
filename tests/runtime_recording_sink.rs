// tests/runtime_recording_sink.rs
mod common;
use crate::common::builders::{ChartConfigBuilder, NodeConfigBuilder};
use crate::common::recording::RecordingSink;
use crate::common::{init_tracing, status_of, with_timeout};

use starchart::engine::{
    ChartEvent, ChartUpdate, CoreRuntime, IgnoreReason, Runtime,
};
use starchart::present::spawn_input;
use starchart::types::NodeStatus;
use tokio::sync::mpsc;

fn complete(id: &str) -> ChartEvent {
    ChartEvent::CompleteRequested { id: id.to_string() }
}

fn click(id: &str) -> ChartEvent {
    ChartEvent::Activated { id: id.to_string() }
}

fn runtime_for_chain(
    sink: RecordingSink,
) -> (mpsc::Sender<ChartEvent>, Runtime<RecordingSink>) {
    let chart = ChartConfigBuilder::new()
        .with_node(NodeConfigBuilder::new("A").unlocked().connects_to("B").build())
        .with_node(NodeConfigBuilder::new("B").connects_to("C").build())
        .with_node(NodeConfigBuilder::new("C").build())
        .build_chart();
    let (tx, rx) = mpsc::channel(16);
    (tx, Runtime::new(CoreRuntime::new(chart), rx, sink))
}

#[tokio::test]
async fn runtime_applies_events_in_order_and_stops_on_shutdown() {
    init_tracing();

    let sink = RecordingSink::new();
    let (tx, runtime) = runtime_for_chain(sink.clone());
    let handle = tokio::spawn(runtime.run());

    for event in [
        complete("B"),
        complete("A"),
        click("A"),
        click("B"),
        complete("ghost"),
        ChartEvent::ShutdownRequested,
        // Never processed.
        complete("C"),
    ] {
        tx.send(event).await.unwrap();
    }

    let chart = with_timeout(handle).await.unwrap().unwrap();

    assert_eq!(status_of(&chart, "A"), NodeStatus::Completed);
    assert_eq!(status_of(&chart, "B"), NodeStatus::Completed);
    assert_eq!(status_of(&chart, "C"), NodeStatus::Unlocked);

    let updates = sink.updates();
    assert_eq!(updates.len(), 5);
    assert_eq!(
        updates[0],
        ChartUpdate::Ignored {
            id: "B".into(),
            reason: IgnoreReason::Locked
        }
    );
    assert!(matches!(&updates[1], ChartUpdate::Changes(c) if c.len() == 2));
    assert_eq!(updates[2], ChartUpdate::Pulse("A".into()));
    assert!(matches!(&updates[3], ChartUpdate::Changes(c) if c.len() == 2));
    assert_eq!(
        updates[4],
        ChartUpdate::Ignored {
            id: "ghost".into(),
            reason: IgnoreReason::NotFound
        }
    );
}

#[tokio::test]
async fn runtime_exits_when_all_senders_are_dropped() {
    init_tracing();

    let sink = RecordingSink::new();
    let (tx, runtime) = runtime_for_chain(sink.clone());

    tx.send(complete("A")).await.unwrap();
    tx.send(ChartEvent::SnapshotRequested).await.unwrap();
    drop(tx);

    let chart = with_timeout(runtime.run()).await.unwrap();
    assert_eq!(status_of(&chart, "B"), NodeStatus::Unlocked);

    let updates = sink.updates();
    assert_eq!(updates.len(), 2);
    let ChartUpdate::Snapshot(snapshot) = &updates[1] else {
        panic!("expected a snapshot, got {:?}", updates[1]);
    };
    assert_eq!(snapshot.counts.completed, 1);
    assert_eq!(snapshot.counts.unlocked, 1);
    assert_eq!(snapshot.counts.locked, 1);
    assert_eq!(
        snapshot.active_edges,
        vec![("A".to_string(), "B".to_string())]
    );
}

#[tokio::test]
async fn seeded_input_without_stdin_shuts_the_runtime_down() {
    init_tracing();

    let sink = RecordingSink::new();
    let (tx, runtime) = runtime_for_chain(sink.clone());

    let input = spawn_input(tx, vec![complete("A"), complete("B")], false);
    let chart = with_timeout(runtime.run()).await.unwrap();
    with_timeout(input).await.unwrap();

    assert_eq!(status_of(&chart, "C"), NodeStatus::Unlocked);
    assert_eq!(sink.updates().len(), 2);
}
