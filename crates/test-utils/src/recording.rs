use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use starchart::engine::{ChartUpdate, StatusChange, StatusObserver};
use starchart::errors::Result;
use starchart::present::ChangeSink;

/// An observer that records every status change it is told about.
///
/// Clones share the same log, so keep one clone and subscribe the other.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    changes: Arc<Mutex<Vec<StatusChange>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<StatusChange> {
        self.changes.lock().unwrap().clone()
    }

    /// Ids of the changed nodes, in notification order.
    pub fn ids(&self) -> Vec<String> {
        self.changes.lock().unwrap().iter().map(|c| c.id.clone()).collect()
    }

    pub fn clear(&self) {
        self.changes.lock().unwrap().clear();
    }
}

impl StatusObserver for RecordingObserver {
    fn status_changed(&mut self, change: &StatusChange) {
        self.changes.lock().unwrap().push(change.clone());
    }
}

/// A sink that records every update delivered by the runtime.
#[derive(Clone, Default)]
pub struct RecordingSink {
    updates: Arc<Mutex<Vec<ChartUpdate>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ChartUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

impl ChangeSink for RecordingSink {
    fn deliver(
        &mut self,
        update: ChartUpdate,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        self.updates.lock().unwrap().push(update);
        let done: Result<()> = Ok(());
        Box::pin(std::future::ready(done))
    }
}
