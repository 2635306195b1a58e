//! Application-facing message and prompt facade.
//!
//! [`Ui`] owns the resolved configuration and capability profiles plus a
//! shared [`OutputChannel`]. Every message function builds fragments and hands
//! them to the channel, so the quiet/verbose/timestamp rules live in one place
//! and the recorder sees exactly what the terminal would.

pub mod table;
pub mod terminal;

use crate::config::UiConfig;
use crate::error::{LookupError, UiError};
use crate::timer::{format_duration, Timer};
use crate::tui::capability::{Capabilities, Overrides};
use crate::tui::channel::{OutputChannel, OutputRequest, Sink, Target};
use crate::tui::input::InputSource;
use crate::tui::prompt::{self, Choice, PromptOutcome, PromptOutput};
use crate::tui::recorder::MessageRecorder;
use crate::tui::settings;
use crate::tui::style::{render_plain, Fragment, Layout, StyleToken};
use crate::tui::symbols;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error as log_error};

/// Process-level output context. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct Ui {
    config: UiConfig,
    channel: Arc<OutputChannel>,
    started: Instant,
}

impl Ui {
    /// Validate `config` and bind to the real stdout/stderr.
    pub fn setup(config: UiConfig) -> Result<Self, UiError> {
        config.validate()?;
        let capabilities = Capabilities::detect(&Overrides::from_config(&config));
        debug!(?capabilities, quiet = config.quiet, verbose = config.verbose, "ui setup");
        Ok(Self::from_channel(config, OutputChannel::terminal(capabilities)))
    }

    /// Bind to a custom sink with explicit capability profiles.
    pub fn with_sink(
        config: UiConfig,
        capabilities: Capabilities,
        sink: impl Sink + 'static,
    ) -> Result<Self, UiError> {
        config.validate()?;
        Ok(Self::from_channel(
            config,
            OutputChannel::with_sink(capabilities, Box::new(sink)),
        ))
    }

    fn from_channel(config: UiConfig, channel: OutputChannel) -> Self {
        Self {
            config,
            channel: Arc::new(channel),
            started: Instant::now(),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.channel.capabilities()
    }

    pub fn channel(&self) -> &Arc<OutputChannel> {
        &self.channel
    }

    /// Recorder bound to this context's channel.
    pub fn recorder(&self) -> MessageRecorder {
        MessageRecorder::new(Arc::clone(&self.channel))
    }

    /// Start a recording session in the configured record mode.
    pub fn start_recording(&self) -> Result<MessageRecorder, UiError> {
        let recorder = self.recorder();
        recorder.start_with(self.config.record_mode)?;
        Ok(recorder)
    }

    /// Resolve a registered symbol for stdout.
    pub fn symbol(&self, name: &str) -> Result<&'static str, LookupError> {
        symbols::symbol(name, &self.capabilities().stdout)
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Emit fragments as-is. Not affected by `quiet`.
    pub fn message(&self, fragments: Vec<Fragment>, layout: Layout, target: Target) -> Result<(), UiError> {
        self.send(fragments, layout, target, true)
    }

    pub fn info(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        if self.config.quiet {
            return Ok(());
        }
        self.send(fragments, Layout::default(), Target::Stdout, true)
    }

    /// Top-level step, prefixed with `::`.
    pub fn info_1(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        self.info(prefixed(settings::PREFIX_INFO_1, &settings::STYLE_INFO_PREFIX, fragments))
    }

    /// Second-level step, prefixed with `=>`.
    pub fn info_2(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        self.info(prefixed(settings::PREFIX_INFO_2, &settings::STYLE_INFO_PREFIX, fragments))
    }

    /// Third-level step, prefixed with `*`.
    pub fn info_3(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        self.info(prefixed(settings::PREFIX_INFO_3, &settings::STYLE_INFO_PREFIX, fragments))
    }

    /// The line, a dash underline of its visible width, then a blank line.
    pub fn info_section(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        if self.config.quiet {
            return Ok(());
        }
        let plain = render_plain(&fragments, &Layout::inline(), &self.capabilities().stdout);
        let underline = settings::SECTION_UNDERLINE
            .to_string()
            .repeat(plain.chars().count());
        self.info(fragments)?;
        self.send(
            vec![Fragment::plain(underline)],
            Layout::new(settings::DEFAULT_SEP, "\n\n"),
            Target::Stdout,
            true,
        )
    }

    /// `* (i+1/n) ...`, with the counter padded to the width of `n`.
    pub fn info_count(&self, index: usize, count: usize, fragments: Vec<Fragment>) -> Result<(), UiError> {
        let counter = format_counter(index, count);
        let mut line = vec![
            Fragment::styled(settings::PREFIX_COUNT, &settings::STYLE_COUNT_PREFIX),
            Fragment::plain(counter),
        ];
        line.extend(fragments);
        self.info(line)
    }

    /// `prefix: NN%` followed by a carriage return. Only drawn on an
    /// interactive stdout.
    pub fn info_progress(&self, prefix: &str, value: f64, max_value: f64) -> Result<(), UiError> {
        if self.config.quiet || !self.capabilities().stdout.is_interactive || max_value <= 0.0 {
            return Ok(());
        }
        let percent = value / max_value * 100.0;
        self.send(
            vec![Fragment::plain(format!("{prefix}: {percent:.0}%"))],
            Layout::new(settings::DEFAULT_SEP, "\r"),
            Target::Stdout,
            false,
        )
    }

    /// A single `.`; the line is closed when `last`.
    pub fn dot(&self, last: bool) -> Result<(), UiError> {
        if self.config.quiet {
            return Ok(());
        }
        let end = if last { settings::DEFAULT_END } else { "" };
        self.send(
            vec![Fragment::plain(".")],
            Layout::new(settings::DEFAULT_SEP, end),
            Target::Stdout,
            false,
        )
    }

    /// Shown only in verbose mode.
    pub fn debug(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        if !self.config.verbose {
            return Ok(());
        }
        self.send(fragments, Layout::default(), Target::Stdout, true)
    }

    pub fn warning(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        let line = prefixed(settings::LABEL_WARNING, &settings::STYLE_WARNING, fragments);
        self.send(line, Layout::default(), Target::Stdout, true)
    }

    pub fn error(&self, fragments: Vec<Fragment>) -> Result<(), UiError> {
        let line = prefixed(settings::LABEL_ERROR, &settings::STYLE_ERROR, fragments);
        self.send(line, Layout::default(), Target::Stderr, true)
    }

    /// [`error`](Self::error), then exit with status 1.
    pub fn fatal(&self, fragments: Vec<Fragment>) -> ! {
        if let Err(err) = self.error(fragments) {
            log_error!(%err, "failed to write fatal message");
        }
        std::process::exit(1)
    }

    /// Run `f` and report how long it took as `<description> took <d>`.
    pub fn timed<R>(&self, description: &str, f: impl FnOnce() -> R) -> Result<R, UiError> {
        let mut timer = Timer::start();
        let result = f();
        let elapsed = timer.stop();
        self.info(vec![Fragment::plain(format!(
            "{description} took {}",
            format_duration(elapsed)
        ))])?;
        Ok(result)
    }

    fn send(&self, mut fragments: Vec<Fragment>, layout: Layout, target: Target, stamp: bool) -> Result<(), UiError> {
        if stamp && self.config.timestamp {
            let stamp = format!("[{}]", format_duration(self.started.elapsed()));
            fragments.insert(0, Fragment::styled(stamp, &settings::STYLE_TIMESTAMP));
        }
        self.channel
            .emit(&OutputRequest::new(fragments).with_layout(layout).to(target))
    }

    // -----------------------------------------------------------------------
    // Prompts
    // -----------------------------------------------------------------------

    pub fn ask_string(
        &self,
        input: &mut dyn InputSource,
        question: &[Fragment],
        default: Option<&str>,
    ) -> Result<PromptOutcome<String>, UiError> {
        prompt::ask_string(self, input, question, default)
    }

    pub fn ask_password(
        &self,
        input: &mut dyn InputSource,
        question: &[Fragment],
    ) -> Result<PromptOutcome<String>, UiError> {
        prompt::ask_password(self, input, question)
    }

    pub fn ask_yes_no(
        &self,
        input: &mut dyn InputSource,
        question: &[Fragment],
        default: Option<bool>,
    ) -> Result<PromptOutcome<bool>, UiError> {
        prompt::ask_yes_no(self, input, question, default)
    }

    pub fn ask_choice<T: Clone>(
        &self,
        input: &mut dyn InputSource,
        question: &[Fragment],
        choices: &[Choice<T>],
        default: Option<usize>,
    ) -> Result<PromptOutcome<T>, UiError> {
        prompt::ask_choice(self, input, question, choices, default)
    }

    pub fn select_choices<T: Clone>(
        &self,
        input: &mut dyn InputSource,
        question: &[Fragment],
        choices: &[Choice<T>],
    ) -> Result<PromptOutcome<Vec<T>>, UiError> {
        prompt::select_choices(self, input, question, choices)
    }
}

/// Prompt lines follow the timestamp setting like every other message. The
/// line closed after a cancelled read is left unstamped.
impl PromptOutput for Ui {
    fn prompt_line(&self, request: &OutputRequest) -> Result<(), UiError> {
        self.send(request.fragments.clone(), request.layout.clone(), request.target, true)
    }

    fn close_line(&self) -> Result<(), UiError> {
        self.channel.close_line()
    }
}

fn prefixed(label: &'static str, style: &[StyleToken], fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut line = Vec::with_capacity(fragments.len() + 1);
    line.push(Fragment::styled(label, style));
    line.extend(fragments);
    line
}

/// `(i+1/n)` with the index right-aligned to the digit width of `count`.
pub fn format_counter(index: usize, count: usize) -> String {
    let width = count.to_string().len();
    format!("({:>width$}/{count})", index + 1)
}

/// Fragments describing `err` and every error in its `source()` chain, one
/// cause per line.
pub fn error_chain(err: &(dyn Error + 'static), context: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    if !context.is_empty() {
        fragments.push(Fragment::plain(context.to_string()));
    }
    fragments.push(Fragment::styled(err.to_string(), &settings::STYLE_ERROR_DETAIL));

    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(last) = fragments.pop() {
            fragments.push(last.with(StyleToken::Newline));
        }
        fragments.push(Fragment::styled(settings::LABEL_CAUSED_BY, &[StyleToken::Indent(1)]));
        fragments.push(Fragment::plain(cause.to_string()));
        source = cause.source();
    }
    fragments
}
