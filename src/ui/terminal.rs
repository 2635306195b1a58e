//! Terminal primitives re-exported through the `ui` facade.
//!
//! The implementation lives in `crate::tui`; this shim keeps callers on a
//! stable `ui::terminal` namespace.

pub use crate::tui::{settings, symbols};
pub use crate::tui::{
    BufferSink, Cancellation, Capabilities, CapabilityProfile, Choice, Fragment, InputSource,
    Layout, MessageRecorder, OutputChannel, OutputRequest, PromptKind, PromptOutcome,
    PromptOutput, ReadOutcome, ScriptedInput, Sink, StdinSource, StyleToken, Target,
    TerminalSink, TokenKind,
};
