// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::present::ChangeSink;

use super::chart::Chart;
use super::core::CoreRuntime;
use super::{ChartEvent, CoreCommand};

/// Drives the chart in response to `ChartEvent`s and hands the resulting
/// updates to a `ChangeSink`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// semantics. The single task running [`Runtime::run`] owns the chart, so
/// completions are applied strictly one at a time.
pub struct Runtime<S: ChangeSink> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<ChartEvent>,
    sink: S,
}

impl<S: ChangeSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<S: ChangeSink> Runtime<S> {
    pub fn new(core: CoreRuntime, event_rx: mpsc::Receiver<ChartEvent>, sink: S) -> Self {
        Self {
            core,
            event_rx,
            sink,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `ChartEvent`s from `event_rx`.
    /// - Feeds them into the core runtime.
    /// - Delivers updates returned by the core to the sink.
    ///
    /// Returns the chart in its final state once shutdown is requested or
    /// every sender is gone.
    pub async fn run(mut self) -> Result<Chart> {
        info!("starchart runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(self.core.into_chart())
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::Emit(update) => self.sink.deliver(update).await,
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
                Ok(())
            }
        }
    }
}
