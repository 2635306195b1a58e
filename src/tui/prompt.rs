//! Interactive prompts with validation and retry.
//!
//! Every prompt runs the same explicit state machine:
//!
//! ```text
//! Prompting -> Validating -> Done(Answered)
//!                  |
//!                  +-> Rejected -> Prompting
//! Prompting -> Done(Cancelled)   (end of input or interrupt)
//! ```
//!
//! Kind-specific rules (what counts as a valid answer, which default applies,
//! which tokens feed the "did you mean" hint) live in small validators. The
//! output lock is only taken per emitted line, never across a read.

use crate::error::UiError;
use crate::suggest;
use crate::textutil::truncate_chars;
use crate::tui::channel::{OutputChannel, OutputRequest};
use crate::tui::input::{InputSource, ReadOutcome};
use crate::tui::settings;
use crate::tui::style::{Fragment, Layout, StyleToken};
use tracing::debug;

/// What sort of answer a prompt collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    String,
    Password,
    YesNo,
    Choice,
    MultiChoice,
}

/// One selectable entry: what is shown and what is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Choice<String> {
    /// Choices whose value is their own label.
    pub fn from_labels<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                Self::new(label.clone(), label)
            })
            .collect()
    }
}

/// Why a prompt ended without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    /// The input source reached end of input.
    InputExhausted,
    /// The user aborted the read.
    Interrupted,
}

/// Terminal result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    Answered(T),
    Cancelled(Cancellation),
}

impl<T> PromptOutcome<T> {
    pub fn answered(self) -> Option<T> {
        match self {
            Self::Answered(value) => Some(value),
            Self::Cancelled(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptOutcome<U> {
        match self {
            Self::Answered(value) => PromptOutcome::Answered(f(value)),
            Self::Cancelled(reason) => PromptOutcome::Cancelled(reason),
        }
    }
}

/// A failed validation. Drives the retry loop and never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rejection {
    message: String,
    token: String,
    candidates: Vec<String>,
}

impl Rejection {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: String::new(),
            candidates: Vec::new(),
        }
    }

    fn suggesting(mut self, token: &str, candidates: Vec<String>) -> Self {
        self.token = token.to_string();
        self.candidates = candidates;
        self
    }

    fn text(&self) -> String {
        if self.token.is_empty() {
            self.message.clone()
        } else {
            suggest::did_you_mean(&self.message, &self.token, &self.candidates)
        }
    }

    fn request(&self) -> OutputRequest {
        OutputRequest::new(vec![
            Fragment::styled(settings::LABEL_WARNING, &settings::STYLE_WARNING),
            Fragment::plain(self.text()),
        ])
    }
}

/// Where prompt lines go. The [`Ui`](crate::ui::Ui) facade stamps them like
/// any other message; a bare [`OutputChannel`] writes them as-is.
pub trait PromptOutput {
    /// Write one prompt line: question, listing entry, input marker or warning.
    fn prompt_line(&self, request: &OutputRequest) -> Result<(), UiError>;

    /// Finish the line left open by the input marker.
    fn close_line(&self) -> Result<(), UiError>;
}

impl PromptOutput for OutputChannel {
    fn prompt_line(&self, request: &OutputRequest) -> Result<(), UiError> {
        self.emit(request)
    }

    fn close_line(&self) -> Result<(), UiError> {
        self.emit(&OutputRequest::new(Vec::new()))
    }
}

enum PromptState<T> {
    Prompting,
    Validating(String),
    Rejected(Rejection),
    Done(PromptOutcome<T>),
}

trait Validator {
    type Output;

    fn kind(&self) -> PromptKind;

    /// Trailing hint on the question line, e.g. `(Y/n)`.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Labels listed once under the question.
    fn listing(&self) -> Vec<&str> {
        Vec::new()
    }

    fn validate(&self, line: &str) -> Result<Self::Output, Rejection>;
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

struct TextRule<'a> {
    default: Option<&'a str>,
    secret: bool,
}

impl Validator for TextRule<'_> {
    type Output = String;

    fn kind(&self) -> PromptKind {
        if self.secret {
            PromptKind::Password
        } else {
            PromptKind::String
        }
    }

    fn hint(&self) -> Option<String> {
        self.default.map(|default| format!("({default})"))
    }

    fn validate(&self, line: &str) -> Result<String, Rejection> {
        if !line.trim().is_empty() {
            return Ok(line.to_string());
        }
        self.default
            .map(str::to_string)
            .ok_or_else(|| Rejection::new("Please enter a value"))
    }
}

struct YesNoRule {
    default: Option<bool>,
}

impl Validator for YesNoRule {
    type Output = bool;

    fn kind(&self) -> PromptKind {
        PromptKind::YesNo
    }

    fn hint(&self) -> Option<String> {
        Some(settings::yes_no_hint(self.default).to_string())
    }

    fn validate(&self, line: &str) -> Result<bool, Rejection> {
        let answer = line.trim().to_lowercase();
        if settings::ANSWERS_YES.contains(&answer.as_str()) {
            return Ok(true);
        }
        if settings::ANSWERS_NO.contains(&answer.as_str()) {
            return Ok(false);
        }
        let rejection = Rejection::new("Please answer by 'y' (yes) or 'n' (no)");
        if answer.is_empty() {
            return self.default.ok_or(rejection);
        }
        Err(rejection.suggesting(
            &answer,
            vec![settings::ANSWERS_YES[1].to_string(), settings::ANSWERS_NO[1].to_string()],
        ))
    }
}

struct ChoiceRule<'a, T> {
    choices: &'a [Choice<T>],
    default: Option<usize>,
}

impl<T> ChoiceRule<'_, T> {
    fn labels(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.label.clone()).collect()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.choices.iter().position(|choice| choice.label == label)
    }

    /// Resolve one token as an exact label or a 1-based index. Labels win,
    /// so numeric labels stay reachable.
    fn resolve(&self, token: &str) -> Result<usize, Rejection> {
        if let Some(index) = self.position(token) {
            return Ok(index);
        }
        if let Ok(index) = token.parse::<usize>() {
            if (1..=self.choices.len()).contains(&index) {
                return Ok(index - 1);
            }
            return Err(Rejection::new(format!(
                "{index} is out of range (1-{})",
                self.choices.len()
            )));
        }
        Err(Rejection::new(format!("Invalid choice: {}", echo(token)))
            .suggesting(token, self.labels()))
    }
}

impl<T: Clone> Validator for ChoiceRule<'_, T> {
    type Output = T;

    fn kind(&self) -> PromptKind {
        PromptKind::Choice
    }

    fn hint(&self) -> Option<String> {
        self.default
            .and_then(|idx| self.choices.get(idx))
            .map(|choice| format!("({})", choice.label))
    }

    fn listing(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    fn validate(&self, line: &str) -> Result<T, Rejection> {
        let token = line.trim();
        let index = if token.is_empty() {
            self.default
                .filter(|idx| *idx < self.choices.len())
                .ok_or_else(|| {
                    Rejection::new(format!(
                        "Please enter a number between 1 and {}",
                        self.choices.len()
                    ))
                })?
        } else {
            self.resolve(token)?
        };
        Ok(self.choices[index].value.clone())
    }
}

struct MultiChoiceRule<'a, T> {
    inner: ChoiceRule<'a, T>,
}

impl<T: Clone> Validator for MultiChoiceRule<'_, T> {
    type Output = Vec<T>;

    fn kind(&self) -> PromptKind {
        PromptKind::MultiChoice
    }

    fn hint(&self) -> Option<String> {
        Some(settings::PROMPT_MULTI_HINT.to_string())
    }

    fn listing(&self) -> Vec<&str> {
        self.inner.listing()
    }

    fn validate(&self, line: &str) -> Result<Vec<T>, Rejection> {
        let choices = self.inner.choices;
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();
        if settings::SELECT_ALL.contains(&lowered.as_str()) {
            return Ok(choices.iter().map(|c| c.value.clone()).collect());
        }
        if settings::SELECT_NONE.contains(&lowered.as_str()) {
            return Ok(Vec::new());
        }

        if let Some(index) = self.inner.position(trimmed) {
            return Ok(vec![choices[index].value.clone()]);
        }

        // A comma-separated segment may be a label with spaces in it.
        let mut picked: Vec<usize> = Vec::new();
        for segment in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let indices = match self.inner.position(segment) {
                Some(index) => vec![index],
                None => segment
                    .split_whitespace()
                    .map(|token| self.inner.resolve(token))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            for index in indices {
                if !picked.contains(&index) {
                    picked.push(index);
                }
            }
        }
        if picked.is_empty() {
            return Err(Rejection::new(
                "Please pick at least one entry, or answer 'none'",
            ));
        }
        Ok(picked.into_iter().map(|idx| choices[idx].value.clone()).collect())
    }
}

/// User input repeated back in a rejection, cut to a sane width.
fn echo(token: &str) -> String {
    truncate_chars(token, settings::ECHO_MAX_CHARS, settings::ECHO_ELLIPSIS)
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

fn question_request(question: &[Fragment], hint: Option<String>) -> OutputRequest {
    let mut fragments = Vec::with_capacity(question.len() + 2);
    fragments.push(Fragment::styled(settings::PREFIX_ASK, &settings::STYLE_ASK_PREFIX));
    fragments.extend_from_slice(question);
    if let Some(hint) = hint {
        fragments.push(Fragment::plain(hint));
    }
    OutputRequest::new(fragments)
}

fn listing_request(index: usize, label: &str) -> OutputRequest {
    let mut tokens = vec![StyleToken::Indent(1)];
    tokens.extend_from_slice(&settings::STYLE_CHOICE_INDEX);
    OutputRequest::new(vec![
        Fragment::styled((index + 1).to_string(), &tokens),
        Fragment::plain(label.to_string()),
    ])
}

fn marker_request() -> OutputRequest {
    OutputRequest::new(vec![Fragment::styled(
        settings::PROMPT_INPUT_MARKER,
        &settings::STYLE_INPUT_MARKER,
    )])
    .with_layout(Layout::inline())
}

fn run<V: Validator>(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
    validator: &V,
) -> Result<PromptOutcome<V::Output>, UiError> {
    let kind = validator.kind();
    out.prompt_line(&question_request(question, validator.hint()))?;
    for (index, label) in validator.listing().into_iter().enumerate() {
        out.prompt_line(&listing_request(index, label))?;
    }

    let mut attempts = 0usize;
    let mut state = PromptState::Prompting;
    loop {
        state = match state {
            PromptState::Prompting => {
                attempts += 1;
                out.prompt_line(&marker_request())?;
                let read = if kind == PromptKind::Password {
                    input.read_secret()?
                } else {
                    input.read_line()?
                };
                match read {
                    ReadOutcome::Line(line) => PromptState::Validating(line),
                    ReadOutcome::Eof => {
                        PromptState::Done(PromptOutcome::Cancelled(Cancellation::InputExhausted))
                    }
                    ReadOutcome::Interrupted => {
                        PromptState::Done(PromptOutcome::Cancelled(Cancellation::Interrupted))
                    }
                }
            }
            PromptState::Validating(line) => match validator.validate(&line) {
                Ok(value) => PromptState::Done(PromptOutcome::Answered(value)),
                Err(rejection) => PromptState::Rejected(rejection),
            },
            PromptState::Rejected(rejection) => {
                debug!(?kind, attempts, reason = %rejection.message, "prompt answer rejected");
                out.prompt_line(&rejection.request())?;
                out.prompt_line(&question_request(question, validator.hint()))?;
                PromptState::Prompting
            }
            PromptState::Done(outcome) => {
                if let PromptOutcome::Cancelled(reason) = &outcome {
                    debug!(?kind, attempts, ?reason, "prompt cancelled");
                    out.close_line()?;
                }
                return Ok(outcome);
            }
        };
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Free-form text. Blank input yields `default`, or is rejected without one.
pub fn ask_string(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
    default: Option<&str>,
) -> Result<PromptOutcome<String>, UiError> {
    run(out, input, question, &TextRule { default, secret: false })
}

/// Like [`ask_string`] but read without echo and with no default.
pub fn ask_password(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
) -> Result<PromptOutcome<String>, UiError> {
    run(out, input, question, &TextRule { default: None, secret: true })
}

/// `y`/`yes`/`n`/`no`, case-insensitive. Blank input yields `default`.
pub fn ask_yes_no(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
    default: Option<bool>,
) -> Result<PromptOutcome<bool>, UiError> {
    run(out, input, question, &YesNoRule { default })
}

/// One entry by exact label or 1-based index. `default` is a 0-based index.
pub fn ask_choice<T: Clone>(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
    choices: &[Choice<T>],
    default: Option<usize>,
) -> Result<PromptOutcome<T>, UiError> {
    run(out, input, question, &ChoiceRule { choices, default })
}

/// Any number of entries, separated by commas or spaces, in first-seen
/// order without duplicates. `all`/`*` and `none` are checked first, then
/// the whole line and each comma-separated segment as an exact label.
pub fn select_choices<T: Clone>(
    out: &dyn PromptOutput,
    input: &mut dyn InputSource,
    question: &[Fragment],
    choices: &[Choice<T>],
) -> Result<PromptOutcome<Vec<T>>, UiError> {
    let rule = MultiChoiceRule {
        inner: ChoiceRule {
            choices,
            default: None,
        },
    };
    run(out, input, question, &rule)
}
