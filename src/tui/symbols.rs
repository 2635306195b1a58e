//! Named glyphs with ASCII fallbacks.

use crate::error::LookupError;
use crate::tui::capability::CapabilityProfile;
use crate::tui::settings;
use crate::tui::style::StyleToken;

/// A named abstract glyph.
#[derive(Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: &'static str,
    pub unicode: &'static str,
    pub ascii: &'static str,
    /// Color applied whenever the symbol is rendered as a fragment.
    pub color: Option<StyleToken>,
}

impl Symbol {
    const fn new(name: &'static str, glyph: (&'static str, &'static str)) -> Self {
        Self {
            name,
            unicode: glyph.0,
            ascii: glyph.1,
            color: None,
        }
    }

    const fn colored(
        name: &'static str,
        glyph: (&'static str, &'static str),
        color: StyleToken,
    ) -> Self {
        Self {
            name,
            unicode: glyph.0,
            ascii: glyph.1,
            color: Some(color),
        }
    }

    /// Pick the glyph or its fallback for `profile`.
    pub fn resolve(&self, profile: &CapabilityProfile) -> &'static str {
        if profile.unicode_enabled {
            self.unicode
        } else {
            self.ascii
        }
    }
}

pub static BULLET: Symbol = Symbol::new("bullet", settings::GLYPH_BULLET);
pub static CHECK: Symbol = Symbol::colored("check", settings::GLYPH_CHECK, settings::COLOR_CHECK);
pub static CROSS: Symbol = Symbol::colored("cross", settings::GLYPH_CROSS, settings::COLOR_CROSS);
pub static ARROW: Symbol = Symbol::new("arrow", settings::GLYPH_ARROW);
pub static ELLIPSIS: Symbol = Symbol::new("ellipsis", settings::GLYPH_ELLIPSIS);
pub static WARNING: Symbol = Symbol::colored(
    "warning",
    settings::GLYPH_WARNING,
    settings::COLOR_WARNING_GLYPH,
);
pub static INFO: Symbol = Symbol::colored("info", settings::GLYPH_INFO, settings::COLOR_INFO_GLYPH);
pub static UP: Symbol = Symbol::new("up", settings::GLYPH_UP);

/// Every registered symbol.
pub static REGISTRY: [&Symbol; 8] = [
    &BULLET, &CHECK, &CROSS, &ARROW, &ELLIPSIS, &WARNING, &INFO, &UP,
];

/// Find a registered symbol by name.
pub fn lookup(name: &str) -> Result<&'static Symbol, LookupError> {
    REGISTRY
        .iter()
        .copied()
        .find(|symbol| symbol.name == name)
        .ok_or_else(|| LookupError::UnknownSymbol(name.to_string()))
}

/// Resolve a symbol name to the string to print under `profile`.
pub fn symbol(name: &str, profile: &CapabilityProfile) -> Result<&'static str, LookupError> {
    lookup(name).map(|symbol| symbol.resolve(profile))
}
