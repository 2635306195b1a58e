//! Style tokens, message fragments, and the fragment renderer.
//!
//! A message is an ordered list of [`Fragment`]s. Each fragment carries its
//! own style tokens, so a styled run always ends with its own reset and no
//! color leaks into the separator or the next fragment.

use crate::error::LookupError;
use crate::tui::capability::CapabilityProfile;
use crate::tui::settings;
use crate::tui::symbols::Symbol;
use crossterm::style::{Attribute, Color, Colored, SetAttribute};
use crossterm::Command;
use std::borrow::Cow;

/// Abstract formatting directive, independent of escape-sequence syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Bold,
    Faint,
    Underline,
    Blink,
    Standout,
    /// Drop every style token seen so far in the same fragment.
    Reset,
    /// Break the line after this fragment instead of writing the separator.
    Newline,
    /// Indent this fragment by the given number of indentation steps.
    Indent(u8),
    /// Suppress the request's line terminator.
    NoCarriageReturn,
}

/// Broad category of a [`StyleToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Color,
    Attribute,
    Structural,
}

impl StyleToken {
    /// Every named (non-parameterized) token, in display order.
    pub const NAMED: [StyleToken; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Bold,
        Self::Faint,
        Self::Underline,
        Self::Blink,
        Self::Standout,
        Self::Reset,
        Self::Newline,
        Self::NoCarriageReturn,
    ];

    pub fn kind(self) -> TokenKind {
        match self {
            Self::Black
            | Self::Red
            | Self::Green
            | Self::Yellow
            | Self::Blue
            | Self::Magenta
            | Self::Cyan
            | Self::White => TokenKind::Color,
            Self::Bold
            | Self::Faint
            | Self::Underline
            | Self::Blink
            | Self::Standout
            | Self::Reset => TokenKind::Attribute,
            Self::Newline | Self::Indent(_) | Self::NoCarriageReturn => TokenKind::Structural,
        }
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Bold => "bold",
            Self::Faint => "faint",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Standout => "standout",
            Self::Reset => "reset",
            Self::Newline => "newline",
            Self::Indent(_) => "indent",
            Self::NoCarriageReturn => "no_cr",
        }
    }

    /// Look a token up by name, accepting the legacy color aliases.
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        let token = match name.trim().to_ascii_lowercase().as_str() {
            "black" | "darkgray" => Self::Black,
            "red" | "darkred" => Self::Red,
            "green" | "darkgreen" => Self::Green,
            "yellow" | "brown" | "darkyellow" => Self::Yellow,
            "blue" | "darkblue" => Self::Blue,
            "magenta" | "purple" | "fuchsia" => Self::Magenta,
            "cyan" | "turquoise" | "darkteal" => Self::Cyan,
            "white" | "lightgray" => Self::White,
            "bold" => Self::Bold,
            "faint" => Self::Faint,
            "underline" => Self::Underline,
            "blink" => Self::Blink,
            "standout" => Self::Standout,
            "reset" => Self::Reset,
            "newline" => Self::Newline,
            "indent" => Self::Indent(1),
            "no_cr" => Self::NoCarriageReturn,
            _ => return Err(LookupError::UnknownStyle(name.to_string())),
        };
        Ok(token)
    }

    /// SGR parameter for this token. Structural tokens have none.
    fn sgr_parameter(self) -> Option<String> {
        let color = match self {
            Self::Black => Some(Color::Black),
            Self::Red => Some(Color::DarkRed),
            Self::Green => Some(Color::DarkGreen),
            Self::Yellow => Some(Color::DarkYellow),
            Self::Blue => Some(Color::DarkBlue),
            Self::Magenta => Some(Color::DarkMagenta),
            Self::Cyan => Some(Color::DarkCyan),
            Self::White => Some(Color::Grey),
            _ => None,
        };
        if let Some(color) = color {
            return Some(Colored::ForegroundColor(color).to_string());
        }
        let attribute = match self {
            Self::Bold => Attribute::Bold,
            Self::Faint => Attribute::Dim,
            Self::Underline => Attribute::Underlined,
            Self::Blink => Attribute::SlowBlink,
            Self::Standout => Attribute::Italic,
            _ => return None,
        };
        Some(attribute.sgr())
    }
}

/// One escape sequence carrying every style in `styles`, in order.
fn style_sequence(styles: &[StyleToken]) -> String {
    let params: Vec<String> = styles
        .iter()
        .filter_map(|style| style.sgr_parameter())
        .filter(|param| !param.is_empty())
        .collect();
    if params.is_empty() {
        return String::new();
    }
    format!("\x1b[{}m", params.join(";"))
}

/// Escape sequence that clears every active style.
pub fn reset_sequence() -> String {
    let mut out = String::new();
    let _ = SetAttribute(Attribute::Reset).write_ansi(&mut out);
    out
}

/// Text payload of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(Cow<'static, str>),
    /// Resolved against the profile at render time.
    Symbol(&'static Symbol),
}

/// One piece of a message plus the tokens that style it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    content: Content,
    tokens: Vec<StyleToken>,
}

impl Fragment {
    /// Unstyled text.
    pub fn plain(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            content: Content::Text(text.into()),
            tokens: Vec::new(),
        }
    }

    /// Text with style tokens applied left-to-right.
    pub fn styled(text: impl Into<Cow<'static, str>>, tokens: &[StyleToken]) -> Self {
        Self {
            content: Content::Text(text.into()),
            tokens: tokens.to_vec(),
        }
    }

    /// A registered symbol, carrying the symbol's own color if it has one.
    pub fn symbol(symbol: &'static Symbol) -> Self {
        Self {
            content: Content::Symbol(symbol),
            tokens: symbol.color.into_iter().collect(),
        }
    }

    /// Append one more token.
    pub fn with(mut self, token: StyleToken) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn tokens(&self) -> &[StyleToken] {
        &self.tokens
    }

    /// Visible text for `profile`, with no styling.
    pub fn text(&self, profile: &CapabilityProfile) -> &str {
        match &self.content {
            Content::Text(text) => text.as_ref(),
            Content::Symbol(symbol) => symbol.resolve(profile),
        }
    }
}

impl From<&'static str> for Fragment {
    fn from(text: &'static str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&'static Symbol> for Fragment {
    fn from(symbol: &'static Symbol) -> Self {
        Self::symbol(symbol)
    }
}

/// Separator and terminator used when joining fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub sep: Cow<'static, str>,
    pub end: Cow<'static, str>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            sep: Cow::Borrowed(settings::DEFAULT_SEP),
            end: Cow::Borrowed(settings::DEFAULT_END),
        }
    }
}

impl Layout {
    /// Join with `sep` and terminate with `end`.
    pub fn new(sep: impl Into<Cow<'static, str>>, end: impl Into<Cow<'static, str>>) -> Self {
        Self {
            sep: sep.into(),
            end: end.into(),
        }
    }

    /// Default separator, no terminator.
    pub fn inline() -> Self {
        Self::new(settings::DEFAULT_SEP, "")
    }
}

/// Render fragments joined by spaces, with no terminator.
pub fn render(fragments: &[Fragment], profile: &CapabilityProfile) -> String {
    render_with(fragments, &Layout::inline(), profile)
}

/// Render fragments into one string.
///
/// Escape sequences appear only when `profile.color_enabled`; structural
/// tokens (indent, newline, no terminator) are honored either way.
pub fn render_with(fragments: &[Fragment], layout: &Layout, profile: &CapabilityProfile) -> String {
    let mut out = String::new();
    let mut suppress_end = false;
    let reset = reset_sequence();

    for (idx, fragment) in fragments.iter().enumerate() {
        let mut styles: Vec<StyleToken> = Vec::new();
        let mut indent = 0usize;
        let mut newline = false;
        for token in fragment.tokens() {
            match token {
                StyleToken::Reset => styles.clear(),
                StyleToken::Newline => newline = true,
                StyleToken::Indent(level) => indent += usize::from(*level),
                StyleToken::NoCarriageReturn => suppress_end = true,
                other => styles.push(*other),
            }
        }

        out.push_str(&settings::indent(indent));
        let text = fragment.text(profile);
        if profile.color_enabled && !styles.is_empty() && !text.is_empty() {
            out.push_str(&style_sequence(&styles));
            out.push_str(text);
            out.push_str(&reset);
        } else {
            out.push_str(text);
        }

        if newline {
            out.push('\n');
        } else if idx + 1 < fragments.len() {
            out.push_str(&layout.sep);
        }
    }

    if !suppress_end {
        out.push_str(&layout.end);
    }
    out
}

/// Plain-text rendering, regardless of color capability.
pub fn render_plain(fragments: &[Fragment], layout: &Layout, profile: &CapabilityProfile) -> String {
    let plain = CapabilityProfile {
        color_enabled: false,
        ..*profile
    };
    render_with(fragments, layout, &plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::symbols;

    const COLOR: CapabilityProfile = CapabilityProfile::new(true, true, true);
    const PLAIN: CapabilityProfile = CapabilityProfile::new(false, true, false);

    fn escape(token: StyleToken) -> String {
        style_sequence(&[token])
    }

    #[test]
    fn plain_profile_emits_no_escapes() {
        let fragments = vec![
            Fragment::styled("this is red", &[StyleToken::Red]),
            Fragment::styled("this is bold", &[StyleToken::Bold, StyleToken::Underline]),
            Fragment::plain("plain"),
        ];
        let out = render(&fragments, &PLAIN);
        assert_eq!(out, "this is red this is bold plain");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn styled_run_is_wrapped_and_reset() {
        let fragments = vec![
            Fragment::styled("this is red", &[StyleToken::Red]),
            Fragment::styled("this is green", &[StyleToken::Green]),
        ];
        let out = render(&fragments, &COLOR);
        let expected = format!(
            "{}this is red{} {}this is green{}",
            escape(StyleToken::Red),
            reset_sequence(),
            escape(StyleToken::Green),
            reset_sequence()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn one_reset_per_styled_run() {
        let fragments = vec![
            Fragment::styled("a", &[StyleToken::Bold, StyleToken::Blue]),
            Fragment::plain("b"),
            Fragment::styled("c", &[StyleToken::Faint]),
        ];
        let out = render(&fragments, &COLOR);
        assert_eq!(out.matches(&reset_sequence()).count(), 2);
        assert!(out.ends_with(&reset_sequence()));
    }

    #[test]
    fn tokens_compose_into_one_sequence() {
        let fragment = Fragment::styled("a", &[StyleToken::Bold, StyleToken::Blue]);
        let out = render(&[fragment], &COLOR);
        assert_eq!(out, format!("\x1b[1;38;5;4ma{}", reset_sequence()));
        assert_eq!(out.matches('\x1b').count(), 2);
    }

    #[test]
    fn reset_token_clears_earlier_styles() {
        let fragment = Fragment::styled("x", &[StyleToken::Red, StyleToken::Reset]);
        let out = render(&[fragment], &COLOR);
        assert_eq!(out, "x");

        let fragment = Fragment::styled("y", &[StyleToken::Red, StyleToken::Reset, StyleToken::Bold]);
        let out = render(&[fragment], &COLOR);
        assert_eq!(out, format!("{}y{}", escape(StyleToken::Bold), reset_sequence()));
    }

    #[test]
    fn structural_tokens_apply_without_color() {
        let fragments = vec![
            Fragment::styled("title", &[StyleToken::Newline]),
            Fragment::styled("nested", &[StyleToken::Indent(2)]),
        ];
        let layout = Layout::default();
        assert_eq!(render_with(&fragments, &layout, &PLAIN), "title\n    nested\n");
    }

    #[test]
    fn no_carriage_return_drops_the_terminator() {
        let fragments = vec![Fragment::styled("Done: 50%", &[StyleToken::NoCarriageReturn])];
        assert_eq!(render_with(&fragments, &Layout::default(), &PLAIN), "Done: 50%");
    }

    #[test]
    fn custom_separator_and_end() {
        let fragments = vec![Fragment::plain("a"), Fragment::plain("b")];
        let layout = Layout::new(", ", "!\n");
        assert_eq!(render_with(&fragments, &layout, &PLAIN), "a, b!\n");
    }

    #[test]
    fn symbols_resolve_per_profile() {
        let fragments = vec![Fragment::plain("done"), Fragment::symbol(&symbols::CHECK)];
        let ascii = CapabilityProfile::new(false, false, false);
        assert_eq!(render(&fragments, &ascii), "done ok");
        assert_eq!(render(&fragments, &PLAIN), "done \u{2713}");
        let colored = render(&fragments, &COLOR);
        assert!(colored.contains(&escape(StyleToken::Green)));
        assert!(colored.ends_with(&reset_sequence()));
    }

    #[test]
    fn empty_styled_text_emits_nothing() {
        let fragments = vec![Fragment::styled("", &[StyleToken::Red])];
        assert_eq!(render(&fragments, &COLOR), "");
    }

    #[test]
    fn render_plain_ignores_color_capability() {
        let fragments = vec![Fragment::styled("warn", &[StyleToken::Yellow])];
        assert_eq!(render_plain(&fragments, &Layout::inline(), &COLOR), "warn");
    }

    #[test]
    fn token_names_round_trip_and_aliases_resolve() {
        for token in StyleToken::NAMED {
            assert_eq!(StyleToken::from_name(token.name()).unwrap(), token);
        }
        assert_eq!(StyleToken::from_name("brown").unwrap(), StyleToken::Yellow);
        assert_eq!(StyleToken::from_name("LightGray").unwrap(), StyleToken::White);
        assert_eq!(
            StyleToken::from_name("mauve").unwrap_err(),
            LookupError::UnknownStyle("mauve".into())
        );
    }

    #[test]
    fn token_kinds() {
        assert_eq!(StyleToken::Red.kind(), TokenKind::Color);
        assert_eq!(StyleToken::Bold.kind(), TokenKind::Attribute);
        assert_eq!(StyleToken::Indent(3).kind(), TokenKind::Structural);
    }
}
