//! Capture of emitted messages for test assertions.

use crate::config::RecordMode;
use crate::error::RecorderError;
use crate::tui::channel::{MessageRecord, OutputChannel};
use std::sync::Arc;
use tracing::debug;

/// Handle on the recording side of an [`OutputChannel`].
///
/// Only one recording session may be active per channel. Records survive
/// [`stop`](Self::stop) so assertions can run after the code under test
/// finishes.
#[derive(Debug, Clone)]
pub struct MessageRecorder {
    channel: Arc<OutputChannel>,
}

impl MessageRecorder {
    pub fn new(channel: Arc<OutputChannel>) -> Self {
        Self { channel }
    }

    /// Start intercepting messages. Earlier records are discarded.
    pub fn start(&self) -> Result<(), RecorderError> {
        self.start_with(RecordMode::Intercept)
    }

    /// Start recording with an explicit mode.
    pub fn start_with(&self, mode: RecordMode) -> Result<(), RecorderError> {
        self.channel.begin_recording(mode)?;
        debug!(?mode, "message recorder started");
        Ok(())
    }

    /// Stop recording. Stopping an inactive recorder is a no-op.
    pub fn stop(&self) {
        self.channel.end_recording();
        debug!("message recorder stopped");
    }

    /// Drop every record; an active session stays active.
    pub fn reset(&self) {
        self.channel.clear_records();
    }

    pub fn is_active(&self) -> bool {
        self.channel.is_recording()
    }

    /// Whether any recorded message contains `pattern` (case-sensitive).
    pub fn find(&self, pattern: &str) -> bool {
        self.find_message(pattern).is_some()
    }

    /// First recorded message containing `pattern`.
    pub fn find_message(&self, pattern: &str) -> Option<String> {
        self.channel.with_records(|records| {
            records
                .iter()
                .find(|record| record.rendered_text.contains(pattern))
                .map(|record| record.rendered_text.clone())
        })
    }

    /// Rendered text of every record, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.channel.with_records(|records| {
            records
                .iter()
                .map(|record| record.rendered_text.clone())
                .collect()
        })
    }

    pub fn records(&self) -> Vec<MessageRecord> {
        self.channel.with_records(<[MessageRecord]>::to_vec)
    }
}
