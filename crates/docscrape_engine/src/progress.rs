use crate::EngineEvent;

/// Receives pipeline progress, decoupled from any presentation layer.
///
/// Reporting is infallible by construction: a sink that cannot deliver its
/// report drops it, it never aborts the run.
pub trait ProgressSink: Send + Sync {
    fn report(&self, fraction: f32, label: &str);
}

/// Sink that discards all reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn report(&self, _fraction: f32, _label: &str) {}
}

/// Sink that forwards reports as [`EngineEvent::Progress`] over a channel.
pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, fraction: f32, label: &str) {
        let _ = self.tx.send(EngineEvent::Progress {
            fraction,
            label: label.to_string(),
        });
    }
}
