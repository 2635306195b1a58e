//! Line input sources for interactive prompts.
//!
//! Prompts read through [`InputSource`] so the same validation loop runs
//! against the real terminal or against a scripted list of answers.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Result of reading one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A submitted line, without its terminator.
    Line(String),
    /// End of input (closed stdin, `Ctrl-D`).
    Eof,
    /// The read was interrupted (`Ctrl-C`).
    Interrupted,
}

/// Where prompt answers come from.
pub trait InputSource {
    /// Block until one line is available.
    fn read_line(&mut self) -> io::Result<ReadOutcome>;

    /// Read a line without echoing it. Defaults to [`read_line`](Self::read_line).
    fn read_secret(&mut self) -> io::Result<ReadOutcome> {
        self.read_line()
    }
}

/// Process stdin.
///
/// A terminal is read key by key in raw mode, so `Ctrl-C` and `Ctrl-D` end
/// the read instead of the process. Piped stdin is read line-buffered.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    fn read_interactive(secret: bool) -> io::Result<ReadOutcome> {
        let _guard = RawModeGuard::acquire()?;
        let mut echo = io::stderr();
        let mut editor = LineEditor::new(secret);
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                continue;
            }
            match editor.apply(key) {
                EditStep::Echo(text) => {
                    if !text.is_empty() {
                        echo.write_all(text.as_bytes())?;
                        echo.flush()?;
                    }
                }
                EditStep::Done(outcome) => {
                    // Raw mode swallows the Enter key's own newline.
                    if matches!(outcome, ReadOutcome::Line(_)) {
                        echo.write_all(b"\r\n")?;
                        echo.flush()?;
                    }
                    return Ok(outcome);
                }
            }
        }
    }

    fn read_buffered() -> io::Result<ReadOutcome> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        Ok(ReadOutcome::Line(strip_terminator(line)))
    }
}

impl InputSource for StdinSource {
    fn read_line(&mut self) -> io::Result<ReadOutcome> {
        if io::stdin().is_terminal() {
            Self::read_interactive(false)
        } else {
            Self::read_buffered()
        }
    }

    fn read_secret(&mut self) -> io::Result<ReadOutcome> {
        if io::stdin().is_terminal() {
            Self::read_interactive(true)
        } else {
            Self::read_buffered()
        }
    }
}

fn strip_terminator(line: String) -> String {
    line.trim_end_matches(['\n', '\r']).to_string()
}

/// What the raw-mode reader does after one key.
#[derive(Debug, PartialEq, Eq)]
enum EditStep {
    /// Keep reading; write this text to the terminal first.
    Echo(String),
    Done(ReadOutcome),
}

/// Single-line buffer driven by key events.
#[derive(Debug, Default)]
struct LineEditor {
    buffer: String,
    secret: bool,
}

impl LineEditor {
    fn new(secret: bool) -> Self {
        Self {
            buffer: String::new(),
            secret,
        }
    }

    fn apply(&mut self, key: KeyEvent) -> EditStep {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => EditStep::Done(ReadOutcome::Line(std::mem::take(&mut self.buffer))),
            KeyCode::Char('c') if control => {
                self.buffer.clear();
                EditStep::Done(ReadOutcome::Interrupted)
            }
            // Ctrl-D ends input only on an empty line.
            KeyCode::Char('d') if control && self.buffer.is_empty() => {
                EditStep::Done(ReadOutcome::Eof)
            }
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) if !self.secret => EditStep::Echo("\u{8} \u{8}".to_string()),
                _ => EditStep::Echo(String::new()),
            },
            KeyCode::Char(ch) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.buffer.push(ch);
                if self.secret {
                    EditStep::Echo(String::new())
                } else {
                    EditStep::Echo(ch.to_string())
                }
            }
            _ => EditStep::Echo(String::new()),
        }
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Pre-scripted answers, consumed in order. Exhausted scripts report EOF.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    queue: VecDeque<ReadOutcome>,
    reads: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: lines
                .into_iter()
                .map(|line| ReadOutcome::Line(line.into()))
                .collect(),
            reads: 0,
        }
    }

    pub fn push_line(mut self, line: impl Into<String>) -> Self {
        self.queue.push_back(ReadOutcome::Line(line.into()));
        self
    }

    pub fn push_eof(mut self) -> Self {
        self.queue.push_back(ReadOutcome::Eof);
        self
    }

    pub fn push_interrupt(mut self) -> Self {
        self.queue.push_back(ReadOutcome::Interrupted);
        self
    }

    /// Number of reads served so far, including EOFs.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> io::Result<ReadOutcome> {
        self.reads += 1;
        Ok(self.queue.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_in_order_then_eof() {
        let mut input = ScriptedInput::new(["a", "b"]);
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Line("a".into()));
        assert_eq!(input.read_secret().unwrap(), ReadOutcome::Line("b".into()));
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Eof);
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Eof);
        assert_eq!(input.read_count(), 4);
    }

    #[test]
    fn scripted_interrupt_and_eof_are_queued() {
        let mut input = ScriptedInput::default()
            .push_line("x")
            .push_interrupt()
            .push_eof()
            .push_line("never");
        assert_eq!(input.remaining(), 4);
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Line("x".into()));
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Interrupted);
        assert_eq!(input.read_line().unwrap(), ReadOutcome::Eof);
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(editor: &mut LineEditor, text: &str) {
        for ch in text.chars() {
            editor.apply(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn editor_submits_typed_line_on_enter() {
        let mut editor = LineEditor::new(false);
        assert_eq!(editor.apply(key(KeyCode::Char('y'))), EditStep::Echo("y".into()));
        type_text(&mut editor, "es");
        assert_eq!(
            editor.apply(key(KeyCode::Enter)),
            EditStep::Done(ReadOutcome::Line("yes".into()))
        );
    }

    #[test]
    fn editor_ctrl_c_interrupts_even_with_text() {
        let mut editor = LineEditor::new(false);
        type_text(&mut editor, "half");
        assert_eq!(editor.apply(ctrl('c')), EditStep::Done(ReadOutcome::Interrupted));
    }

    #[test]
    fn editor_ctrl_d_is_eof_only_on_empty_line() {
        let mut editor = LineEditor::new(false);
        type_text(&mut editor, "x");
        assert_eq!(editor.apply(ctrl('d')), EditStep::Echo(String::new()));
        editor.apply(key(KeyCode::Backspace));
        assert_eq!(editor.apply(ctrl('d')), EditStep::Done(ReadOutcome::Eof));
    }

    #[test]
    fn editor_backspace_erases_one_char() {
        let mut editor = LineEditor::new(false);
        type_text(&mut editor, "noo");
        assert_eq!(
            editor.apply(key(KeyCode::Backspace)),
            EditStep::Echo("\u{8} \u{8}".into())
        );
        assert_eq!(
            editor.apply(key(KeyCode::Enter)),
            EditStep::Done(ReadOutcome::Line("no".into()))
        );
        assert_eq!(editor.apply(key(KeyCode::Backspace)), EditStep::Echo(String::new()));
    }

    #[test]
    fn secret_editor_never_echoes() {
        let mut editor = LineEditor::new(true);
        assert_eq!(editor.apply(key(KeyCode::Char('p'))), EditStep::Echo(String::new()));
        type_text(&mut editor, "w");
        assert_eq!(editor.apply(key(KeyCode::Backspace)), EditStep::Echo(String::new()));
        assert_eq!(
            editor.apply(key(KeyCode::Enter)),
            EditStep::Done(ReadOutcome::Line("p".into()))
        );
    }

    #[test]
    fn terminators_are_stripped() {
        assert_eq!(strip_terminator("yes\r\n".into()), "yes");
        assert_eq!(strip_terminator("no\n".into()), "no");
        assert_eq!(strip_terminator("  spaced  \n".into()), "  spaced  ");
    }
}
