// src/present/input.rs

//! Line-oriented console input.
//!
//! Commands, one per line:
//! - `complete <id>`: request completion of a node
//! - `click <id>` or a bare `<id>`: activate a node
//! - `show`: print the whole chart
//! - `quit` / `exit`: stop
//!
//! A node whose id is one of the command words can only be activated with
//! `click <id>`.

use std::io::BufRead;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::ChartEvent;

pub const USAGE: &str = "commands: complete <id> | click <id> | <id> | show | quit \
(use `click <id>` for ids named complete, click, show, quit or exit)";

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines and `Err(hint)` for lines that are not
/// a command.
pub fn parse_command(line: &str) -> Result<Option<ChartEvent>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments; {USAGE}"));
    }

    let event = match (head.to_lowercase().as_str(), arg) {
        ("complete", Some(id)) => ChartEvent::CompleteRequested { id: id.to_string() },
        ("click", Some(id)) => ChartEvent::Activated { id: id.to_string() },
        ("complete" | "click", None) => return Err(format!("missing node id; {USAGE}")),
        ("show", None) => ChartEvent::SnapshotRequested,
        ("quit" | "exit", None) => ChartEvent::ShutdownRequested,
        ("show" | "quit" | "exit", Some(_)) => {
            return Err(format!("'{head}' takes no argument; {USAGE}"));
        }
        (_, None) => ChartEvent::Activated { id: head.to_string() },
        _ => return Err(format!("unknown command '{head}'; {USAGE}")),
    };
    Ok(Some(event))
}

/// Feed `seed` events into the runtime, then either start reading commands
/// from stdin (`interactive`) or request shutdown.
///
/// A shutdown request is always sent last, including on end of input.
pub fn spawn_input(
    tx: mpsc::Sender<ChartEvent>,
    seed: Vec<ChartEvent>,
    interactive: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for event in seed {
            if tx.send(event).await.is_err() {
                return;
            }
        }

        if interactive {
            spawn_stdin_reader(tx);
        } else {
            let _ = tx.send(ChartEvent::ShutdownRequested).await;
        }
    })
}

/// Read stdin on a detached OS thread.
///
/// A blocked read there cannot hold up runtime shutdown; the thread ends
/// with the process.
fn spawn_stdin_reader(tx: mpsc::Sender<ChartEvent>) {
    let spawned = std::thread::Builder::new()
        .name("starchart-stdin".to_string())
        .spawn(move || {
            read_commands(std::io::stdin().lock(), &tx);
            let _ = tx.blocking_send(ChartEvent::ShutdownRequested);
        });

    if let Err(e) = spawned {
        warn!(error = %e, "failed to start stdin reader; only Ctrl-C will stop the chart");
    }
}

/// Forward parsed commands until end of input, `quit`, or a closed channel.
///
/// Must not be called from inside the async runtime.
fn read_commands(input: impl BufRead, tx: &mpsc::Sender<ChartEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                return;
            }
        };

        match parse_command(&line) {
            Ok(Some(ChartEvent::ShutdownRequested)) => return,
            Ok(Some(event)) => {
                if tx.blocking_send(event).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(hint) => eprintln!("{hint}"),
        }
    }
    debug!("stdin closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("complete C1"),
            Ok(Some(ChartEvent::CompleteRequested { id: "C1".into() }))
        );
        assert_eq!(
            parse_command("  CLICK   P2 "),
            Ok(Some(ChartEvent::Activated { id: "P2".into() }))
        );
        assert_eq!(
            parse_command("I1"),
            Ok(Some(ChartEvent::Activated { id: "I1".into() }))
        );
        assert_eq!(parse_command("show"), Ok(Some(ChartEvent::SnapshotRequested)));
        assert_eq!(parse_command("exit"), Ok(Some(ChartEvent::ShutdownRequested)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_command("complete").is_err());
        assert!(parse_command("complete A B").is_err());

        let unknown = parse_command("frobnicate A").unwrap_err();
        assert!(unknown.starts_with("unknown command 'frobnicate'"));
    }

    #[test]
    fn argument_free_commands_reject_arguments() {
        for line in ["show X", "quit now", "EXIT 1"] {
            let hint = parse_command(line).unwrap_err();
            assert!(hint.contains("takes no argument"), "{line}: {hint}");
        }
    }

    #[test]
    fn command_words_are_clickable_through_click() {
        assert_eq!(
            parse_command("click show"),
            Ok(Some(ChartEvent::Activated { id: "show".into() }))
        );
        assert!(USAGE.contains("click <id>"));
    }

    #[test]
    fn reader_forwards_commands_until_quit() {
        let (tx, mut rx) = mpsc::channel(8);
        let input = std::io::Cursor::new("complete A\n\nbogus x y\nshow\nquit\nclick B\n");

        read_commands(input, &tx);

        assert_eq!(
            rx.try_recv().ok(),
            Some(ChartEvent::CompleteRequested { id: "A".into() })
        );
        assert_eq!(rx.try_recv().ok(), Some(ChartEvent::SnapshotRequested));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn non_interactive_input_ends_with_shutdown() {
        let (tx, mut rx) = mpsc::channel(8);
        let seed = vec![ChartEvent::CompleteRequested { id: "A".into() }];
        spawn_input(tx, seed, false).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(ChartEvent::CompleteRequested { id: "A".into() })
        );
        assert_eq!(rx.recv().await, Some(ChartEvent::ShutdownRequested));
        assert_eq!(rx.recv().await, None);
    }
}
