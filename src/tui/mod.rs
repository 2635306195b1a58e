//! Rendering and interaction core.
//!
//! Leaf-first: `capability` decides what a stream supports, `symbols` and
//! `style` turn fragments into text, `channel` serializes writes (with
//! `recorder` hooked into the same lock), and `prompt` runs question loops
//! over an `input` source.

pub mod capability;
pub mod channel;
pub mod input;
pub mod prompt;
pub mod recorder;
pub mod settings;
pub mod style;
pub mod symbols;

pub use capability::{Capabilities, CapabilityProfile, Overrides, StdStream, StreamHandle};
pub use channel::{
    BufferSink, MessageRecord, OutputChannel, OutputRequest, Sink, Target, TerminalSink,
};
pub use input::{InputSource, ReadOutcome, ScriptedInput, StdinSource};
pub use prompt::{Cancellation, Choice, PromptKind, PromptOutcome, PromptOutput};
pub use recorder::MessageRecorder;
pub use style::{render, render_plain, render_with, Fragment, Layout, StyleToken, TokenKind};
pub use symbols::{symbol, Symbol};
