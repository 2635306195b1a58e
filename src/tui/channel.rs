//! Serialized output channel shared by every message producer.
//!
//! One mutex guards rendering, recording, and writing of a request, so each
//! request lands as one contiguous run on its destination. The lock is never
//! held while waiting for user input.

use crate::config::RecordMode;
use crate::error::{RecorderError, UiError};
use crate::tui::capability::{Capabilities, CapabilityProfile};
use crate::tui::style::{render_plain, render_with, Fragment, Layout};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Destination stream for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

/// Write-and-flush capability the channel depends on.
pub trait Sink: Send {
    /// Write `text` to `target` and flush it.
    fn write_text(&mut self, target: Target, text: &str) -> io::Result<()>;
}

/// The real process stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl Sink for TerminalSink {
    fn write_text(&mut self, target: Target, text: &str) -> io::Result<()> {
        match target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Target::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }
}

#[derive(Debug, Default)]
struct BufferContents {
    stdout: String,
    stderr: String,
}

/// Cloneable in-memory sink; clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    inner: Arc<Mutex<BufferContents>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the stdout side so far.
    pub fn stdout(&self) -> String {
        self.contents().stdout.clone()
    }

    /// Everything written to the stderr side so far.
    pub fn stderr(&self) -> String {
        self.contents().stderr.clone()
    }

    pub fn clear(&self) {
        let mut contents = self.contents();
        contents.stdout.clear();
        contents.stderr.clear();
    }

    fn contents(&self) -> MutexGuard<'_, BufferContents> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for BufferSink {
    fn write_text(&mut self, target: Target, text: &str) -> io::Result<()> {
        let mut contents = self.contents();
        match target {
            Target::Stdout => contents.stdout.push_str(text),
            Target::Stderr => contents.stderr.push_str(text),
        }
        Ok(())
    }
}

/// One print call: fragments plus layout and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRequest {
    pub fragments: Vec<Fragment>,
    pub layout: Layout,
    pub target: Target,
    /// Color-free text recorded in place of the fragments, for content that
    /// was laid out before reaching the channel.
    pub plain_text: Option<String>,
}

impl OutputRequest {
    /// A stdout line with default separator and terminator.
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            layout: Layout::default(),
            target: Target::Stdout,
            plain_text: None,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn to(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_plain_text(mut self, text: impl Into<String>) -> Self {
        self.plain_text = Some(text.into());
        self
    }
}

/// A message captured while recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Visible text of each fragment, in order.
    pub raw_fragments: Vec<String>,
    /// Full rendering without escape sequences.
    pub rendered_text: String,
}

struct ChannelState {
    sink: Box<dyn Sink>,
    recording: Option<RecordMode>,
    records: Vec<MessageRecord>,
}

/// Mutually-exclusive writer over a [`Sink`].
pub struct OutputChannel {
    capabilities: Capabilities,
    state: Mutex<ChannelState>,
}

impl std::fmt::Debug for OutputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputChannel")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl OutputChannel {
    /// Channel writing to the real process streams.
    pub fn terminal(capabilities: Capabilities) -> Self {
        Self::with_sink(capabilities, Box::new(TerminalSink))
    }

    pub fn with_sink(capabilities: Capabilities, sink: Box<dyn Sink>) -> Self {
        Self {
            capabilities,
            state: Mutex::new(ChannelState {
                sink,
                recording: None,
                records: Vec::new(),
            }),
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Profile of the stream behind `target`.
    pub fn profile(&self, target: Target) -> &CapabilityProfile {
        match target {
            Target::Stdout => &self.capabilities.stdout,
            Target::Stderr => &self.capabilities.stderr,
        }
    }

    /// Render and write one request atomically.
    ///
    /// While a recording session is active the plain rendering is appended to
    /// the recorder; in [`RecordMode::Intercept`] nothing reaches the sink.
    pub fn emit(&self, request: &OutputRequest) -> Result<(), UiError> {
        let profile = *self.profile(request.target);
        let mut state = self.lock();

        if let Some(mode) = state.recording {
            let record = match &request.plain_text {
                Some(plain) => MessageRecord {
                    raw_fragments: vec![plain.clone()],
                    rendered_text: render_plain(&[Fragment::plain(plain.clone())], &request.layout, &profile),
                },
                None => MessageRecord {
                    raw_fragments: request
                        .fragments
                        .iter()
                        .map(|fragment| fragment.text(&profile).to_string())
                        .collect(),
                    rendered_text: render_plain(&request.fragments, &request.layout, &profile),
                },
            };
            state.records.push(record);
            if mode == RecordMode::Intercept {
                return Ok(());
            }
        }

        let text = render_with(&request.fragments, &request.layout, &profile);
        trace!(target_stream = ?request.target, bytes = text.len(), "emit");
        state.sink.write_text(request.target, &text)?;
        Ok(())
    }

    pub(crate) fn begin_recording(&self, mode: RecordMode) -> Result<(), RecorderError> {
        let mut state = self.lock();
        if state.recording.is_some() {
            return Err(RecorderError::AlreadyActive);
        }
        state.records.clear();
        state.recording = Some(mode);
        Ok(())
    }

    pub(crate) fn end_recording(&self) {
        self.lock().recording = None;
    }

    pub(crate) fn clear_records(&self) {
        self.lock().records.clear();
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.lock().recording.is_some()
    }

    pub(crate) fn with_records<R>(&self, f: impl FnOnce(&[MessageRecord]) -> R) -> R {
        f(&self.lock().records)
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        // The guarded state is append-only text; a panicked writer leaves it usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
