//! Indentation and truncation helpers.

use crate::tui::settings;

/// Prefix each line of `text` with `num` spaces. Line terminators are
/// normalized to `\n` and a trailing newline is dropped.
pub fn indent(text: &str, num: usize) -> String {
    indent_lines(text.lines(), num).join("\n")
}

/// Prefix every element with `num` spaces.
pub fn indent_lines<I, S>(lines: I, num: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pad = " ".repeat(num);
    lines
        .into_iter()
        .map(|line| format!("{pad}{}", line.as_ref()))
        .collect()
}

/// Blank padding for `num` indentation steps.
pub fn tabs(num: usize) -> String {
    settings::indent(num)
}

/// Truncate by characters and append `suffix` when truncation occurs.
pub fn truncate_chars(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    format!("{prefix}{suffix}")
}
