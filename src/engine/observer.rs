// src/engine/observer.rs

//! Status-change subscribers.
//!
//! A [`Chart`](crate::engine::Chart) calls every subscribed observer once
//! per change, after all mutations of the completion have been applied.
//! Renderers, sound cues and animations hang off this contract instead of
//! reaching into the store.

use tracing::info;

use crate::engine::StatusChange;

pub trait StatusObserver: Send {
    fn status_changed(&mut self, change: &StatusChange);
}

impl<F> StatusObserver for F
where
    F: FnMut(&StatusChange) + Send,
{
    fn status_changed(&mut self, change: &StatusChange) {
        self(change)
    }
}

/// Logs every change at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn status_changed(&mut self, change: &StatusChange) {
        info!(
            node = %change.id,
            old = %change.old,
            new = %change.new,
            cause = %change.cause,
            "node status changed"
        );
    }
}
