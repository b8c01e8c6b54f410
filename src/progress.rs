//! Progress event stream
//!
//! Every stage reports human-readable status messages through a
//! [`ProgressSink`]. Emitting never blocks and never fails; a sink that
//! drops everything is a valid consumer.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One-way receiver of textual status messages
pub trait ProgressSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Forwards progress messages to the `progress` tracing target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&self, message: &str) {
        tracing::info!(target: "progress", "{}", message);
    }
}

/// Discards every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn emit(&self, _message: &str) {}
}

/// Sends progress messages over an unbounded Tokio channel
///
/// Messages emitted after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: UnboundedSender<String>,
}

impl ChannelProgress {
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn emit(&self, message: &str) {
        let _ = self.tx.send(message.to_string());
    }
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message)
    }
}
