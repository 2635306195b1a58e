//! Capability detection for destination streams.
//!
//! Detection is conservative: anything that is not an interactive terminal
//! gets plain output, and only a declared UTF-8 encoding enables Unicode
//! glyphs.

use crate::config::{ColorChoice, UiConfig};
use std::io::IsTerminal;
use tracing::debug;

/// Facts a destination stream can report about itself.
pub trait StreamHandle {
    /// Whether the stream is attached to an interactive device.
    fn is_terminal(&self) -> bool;
    /// Declared character encoding, if any (`UTF-8`, `ascii`, ...).
    fn encoding(&self) -> Option<String>;
    /// Terminal type reported for the stream (`$TERM` for standard streams).
    fn term(&self) -> Option<String> {
        None
    }
}

/// The process standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdout,
    Stderr,
}

impl StreamHandle for StdStream {
    fn is_terminal(&self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::Stderr => std::io::stderr().is_terminal(),
        }
    }

    fn encoding(&self) -> Option<String> {
        // Locale variables are how POSIX streams declare their charset.
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .map(|locale| locale_charset(&locale))
    }

    fn term(&self) -> Option<String> {
        std::env::var("TERM").ok()
    }
}

/// Explicit per-axis overrides. A `disable` flag beats the matching `force`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub force_color: bool,
    pub disable_color: bool,
    pub force_unicode: bool,
    pub force_ascii: bool,
}

impl Overrides {
    /// Translate setup options into capability overrides.
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            force_color: config.color == ColorChoice::Always,
            disable_color: config.color == ColorChoice::Never,
            force_unicode: config.unicode == ColorChoice::Always,
            force_ascii: config.unicode == ColorChoice::Never,
        }
    }
}

/// Resolved facts about what a destination stream supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityProfile {
    pub color_enabled: bool,
    pub unicode_enabled: bool,
    pub is_interactive: bool,
}

impl CapabilityProfile {
    /// No color, ASCII only, non-interactive.
    pub const CONSERVATIVE: Self = Self {
        color_enabled: false,
        unicode_enabled: false,
        is_interactive: false,
    };

    /// Construct a profile directly (useful for tests and custom sinks).
    pub const fn new(color_enabled: bool, unicode_enabled: bool, is_interactive: bool) -> Self {
        Self {
            color_enabled,
            unicode_enabled,
            is_interactive,
        }
    }
}

impl Default for CapabilityProfile {
    fn default() -> Self {
        Self::CONSERVATIVE
    }
}

/// Profiles for both standard streams, resolved together at setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub stdout: CapabilityProfile,
    pub stderr: CapabilityProfile,
}

impl Capabilities {
    /// Resolve both process streams under the same overrides.
    pub fn detect(overrides: &Overrides) -> Self {
        Self {
            stdout: resolve(&StdStream::Stdout, overrides),
            stderr: resolve(&StdStream::Stderr, overrides),
        }
    }

    /// Use the same profile for both streams.
    pub const fn uniform(profile: CapabilityProfile) -> Self {
        Self {
            stdout: profile,
            stderr: profile,
        }
    }
}

/// Decide what `stream` supports under `overrides`.
pub fn resolve(stream: &dyn StreamHandle, overrides: &Overrides) -> CapabilityProfile {
    let is_interactive = stream.is_terminal();
    let term = stream.term();
    let dumb = is_dumb_terminal(term.as_deref());

    let color_enabled = if overrides.disable_color {
        false
    } else if overrides.force_color {
        true
    } else {
        is_interactive && !dumb
    };

    let encoding = stream.encoding();
    let unicode_enabled = if overrides.force_ascii {
        false
    } else if overrides.force_unicode {
        true
    } else {
        encoding.as_deref().is_some_and(encoding_supports_unicode)
    };

    let profile = CapabilityProfile {
        color_enabled,
        unicode_enabled,
        is_interactive,
    };
    debug!(
        is_interactive,
        dumb,
        encoding = encoding.as_deref().unwrap_or("unknown"),
        color_enabled,
        unicode_enabled,
        "resolved stream capabilities"
    );
    profile
}

/// Terminals known to mishandle escape sequences.
pub fn is_dumb_terminal(term: Option<&str>) -> bool {
    matches!(
        term.map(|t| t.trim().to_ascii_lowercase()).as_deref(),
        Some("dumb" | "unknown" | "emacs")
    )
}

/// Whether a declared encoding can carry the Unicode glyph set.
pub fn encoding_supports_unicode(encoding: &str) -> bool {
    let normalized: String = encoding
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    matches!(normalized.as_str(), "utf8" | "utf16" | "utf32")
}

/// Extract the charset from a locale such as `en_US.UTF-8@euro`.
fn locale_charset(locale: &str) -> String {
    let after_dot = locale.split_once('.').map_or(locale, |(_, rest)| rest);
    after_dot
        .split_once('@')
        .map_or(after_dot, |(charset, _)| charset)
        .to_string()
}
