//! Centralized, hardcoded UI settings for message rendering.
//!
//! This is the single place to tweak prefixes, glyphs, labels, colors,
//! and indentation.

use crate::tui::style::StyleToken;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_UNIT: &str = "  ";
pub const DEFAULT_SEP: &str = " ";
pub const DEFAULT_END: &str = "\n";
pub const SECTION_UNDERLINE: char = '-';

// ---------------------------------------------------------------------------
// Message prefixes / labels
// ---------------------------------------------------------------------------

pub const PREFIX_INFO_1: &str = "::";
pub const PREFIX_INFO_2: &str = "=>";
pub const PREFIX_INFO_3: &str = "*";
pub const PREFIX_COUNT: &str = "*";
pub const PREFIX_ASK: &str = "::";

pub const LABEL_WARNING: &str = "Warning:";
pub const LABEL_ERROR: &str = "Error:";
pub const LABEL_CAUSED_BY: &str = "caused by:";
pub const LABEL_DID_YOU_MEAN: &str = "Did you mean:";

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_INPUT_MARKER: &str = "> ";
pub const PROMPT_YES_NO_DEFAULT_YES: &str = "(Y/n)";
pub const PROMPT_YES_NO_DEFAULT_NO: &str = "(y/N)";
pub const PROMPT_YES_NO_NO_DEFAULT: &str = "(y/n)";
pub const PROMPT_MULTI_HINT: &str = "(comma or space separated, `all` or `none`)";

/// Rejection messages repeat at most this much of the offending input.
pub const ECHO_MAX_CHARS: usize = 40;
pub const ECHO_ELLIPSIS: &str = "...";

pub const ANSWERS_YES: [&str; 2] = ["y", "yes"];
pub const ANSWERS_NO: [&str; 2] = ["n", "no"];
pub const SELECT_ALL: [&str; 2] = ["all", "*"];
pub const SELECT_NONE: [&str; 1] = ["none"];

// ---------------------------------------------------------------------------
// Glyphs (Unicode form, ASCII fallback)
// ---------------------------------------------------------------------------

pub const GLYPH_BULLET: (&str, &str) = ("\u{2022}", "*");
pub const GLYPH_CHECK: (&str, &str) = ("\u{2713}", "ok");
pub const GLYPH_CROSS: (&str, &str) = ("\u{274c}", "ko");
pub const GLYPH_ARROW: (&str, &str) = ("\u{2192}", "->");
pub const GLYPH_ELLIPSIS: (&str, &str) = ("\u{2026}", "...");
pub const GLYPH_WARNING: (&str, &str) = ("\u{26a0}", "!");
pub const GLYPH_INFO: (&str, &str) = ("\u{2139}", "i");
pub const GLYPH_UP: (&str, &str) = ("\u{1f44d}", "+1");

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const STYLE_INFO_PREFIX: [StyleToken; 2] = [StyleToken::Bold, StyleToken::Blue];
pub const STYLE_COUNT_PREFIX: [StyleToken; 1] = [StyleToken::Green];
pub const STYLE_ASK_PREFIX: [StyleToken; 1] = [StyleToken::Green];
pub const STYLE_INPUT_MARKER: [StyleToken; 1] = [StyleToken::Green];
pub const STYLE_CHOICE_INDEX: [StyleToken; 1] = [StyleToken::Blue];
pub const STYLE_WARNING: [StyleToken; 1] = [StyleToken::Yellow];
pub const STYLE_ERROR: [StyleToken; 2] = [StyleToken::Bold, StyleToken::Red];
pub const STYLE_ERROR_DETAIL: [StyleToken; 1] = [StyleToken::Red];
pub const STYLE_SUGGESTION: [StyleToken; 1] = [StyleToken::Bold];
pub const STYLE_TIMESTAMP: [StyleToken; 1] = [StyleToken::Faint];

pub const COLOR_CHECK: StyleToken = StyleToken::Green;
pub const COLOR_CROSS: StyleToken = StyleToken::Red;
pub const COLOR_WARNING_GLYPH: StyleToken = StyleToken::Yellow;
pub const COLOR_INFO_GLYPH: StyleToken = StyleToken::Blue;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

/// Hint appended to a yes/no question.
pub fn yes_no_hint(default: Option<bool>) -> &'static str {
    match default {
        Some(true) => PROMPT_YES_NO_DEFAULT_YES,
        Some(false) => PROMPT_YES_NO_DEFAULT_NO,
        None => PROMPT_YES_NO_NO_DEFAULT,
    }
}

/// Indentation string for `level` nesting steps.
pub fn indent(level: usize) -> String {
    INDENT_UNIT.repeat(level)
}
