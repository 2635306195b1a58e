//! Setup configuration loading from TOML files and environment variables.
//!
//! Config is resolved in this order of precedence (highest wins):
//! 1. Explicit overrides (usually CLI flags)
//! 2. Environment variables (`LINEOUT_COLOR`, `LINEOUT_UNICODE`, `VERBOSE`,
//!    then `NO_COLOR` when color is still `auto`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./lineout.toml in the current directory
//! 5. $XDG_CONFIG_HOME/lineout/lineout.toml (or ~/.config/lineout/lineout.toml)
//! 6. Built-in defaults

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Tri-state switch for one capability axis (color or Unicode).
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Follow what the destination stream supports.
    #[default]
    Auto,
    /// Force the capability on.
    Always,
    /// Force the capability off.
    Never,
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(ConfigError::Invalid(format!(
                "`{other}` is not one of auto, always, never"
            ))),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        })
    }
}

/// What a running message recorder does with intercepted output.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordMode {
    /// Record instead of writing to the real stream.
    #[default]
    Intercept,
    /// Record and still write to the real stream.
    Tee,
}

/// Process-wide output settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Color axis override.
    pub color: ColorChoice,
    /// Unicode axis override.
    pub unicode: ColorChoice,
    /// Hide everything below warning severity.
    pub quiet: bool,
    /// Show debug-severity messages.
    pub verbose: bool,
    /// Prefix each line with the time elapsed since setup.
    pub timestamp: bool,
    /// Recorder behavior while a recording session is active.
    pub record_mode: RecordMode,
}

impl UiConfig {
    /// Reject contradictory option combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet && self.verbose {
            return Err(ConfigError::Invalid(
                "`quiet` and `verbose` cannot both be enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply explicit overrides on top of this config.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(color) = overrides.color {
            self.color = color;
        }
        if let Some(unicode) = overrides.unicode {
            self.unicode = unicode;
        }
        if let Some(quiet) = overrides.quiet {
            self.quiet = quiet;
        }
        if let Some(verbose) = overrides.verbose {
            self.verbose = verbose;
        }
        if let Some(timestamp) = overrides.timestamp {
            self.timestamp = timestamp;
        }
    }
}

/// Highest-precedence settings, typically parsed from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub color: Option<ColorChoice>,
    pub unicode: Option<ColorChoice>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub timestamp: Option<bool>,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(
    path_override: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<UiConfig, ConfigError> {
    let config_text = if let Some(p) = path_override {
        // An explicit path must exist.
        std::fs::read_to_string(p)?
    } else if let Ok(text) = std::fs::read_to_string("lineout.toml") {
        text
    } else if let Some(path) = default_global_config_path() {
        std::fs::read_to_string(path).unwrap_or_default()
    } else {
        String::new()
    };

    resolve_config_with(&config_text, overrides, |name| std::env::var(name).ok())
}

/// Return the default per-user config path (`~/.config/lineout/lineout.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("lineout").join("lineout.toml"))
}

/// Parse, layer, and validate config text against an environment lookup.
pub fn resolve_config_with<F>(
    config_text: &str,
    overrides: &ConfigOverrides,
    env_lookup: F,
) -> Result<UiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: UiConfig = toml::from_str(config_text)?;
    apply_env(&mut config, env_lookup)?;
    config.apply(overrides);
    config.validate()?;
    debug!(
        color = %config.color,
        unicode = %config.unicode,
        quiet = config.quiet,
        verbose = config.verbose,
        timestamp = config.timestamp,
        "resolved ui config"
    );
    Ok(config)
}

fn apply_env<F>(config: &mut UiConfig, env_lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env_lookup("LINEOUT_COLOR").and_then(|v| normalized_string(&v)) {
        config.color = value
            .parse::<ColorChoice>()
            .map_err(|_| invalid_choice("LINEOUT_COLOR", &value))?;
    }
    if let Some(value) = env_lookup("LINEOUT_UNICODE").and_then(|v| normalized_string(&v)) {
        config.unicode = value
            .parse::<ColorChoice>()
            .map_err(|_| invalid_choice("LINEOUT_UNICODE", &value))?;
    }
    // https://no-color.org: presence alone disables color.
    if config.color == ColorChoice::Auto && env_lookup("NO_COLOR").is_some() {
        config.color = ColorChoice::Never;
    }
    if env_lookup("VERBOSE").is_some_and(|v| !v.trim().is_empty()) {
        config.verbose = true;
    }
    Ok(())
}

fn invalid_choice(name: &str, value: &str) -> ConfigError {
    ConfigError::Invalid(format!(
        "{name}: `{value}` is not one of auto, always, never"
    ))
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use std::collections::BTreeMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_map(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_sensible() {
        let c = UiConfig::default();
        assert_eq!(c.color, ColorChoice::Auto);
        assert_eq!(c.unicode, ColorChoice::Auto);
        assert!(!c.quiet);
        assert!(!c.verbose);
        assert!(!c.timestamp);
        assert_eq!(c.record_mode, RecordMode::Intercept);
    }

    #[test]
    fn parse_partial_toml() {
        let toml = r#"
            color = "never"
            timestamp = true
            record_mode = "tee"
        "#;
        let c = resolve_config_with(toml, &ConfigOverrides::default(), no_env).unwrap();
        assert_eq!(c.color, ColorChoice::Never);
        assert_eq!(c.unicode, ColorChoice::Auto);
        assert!(c.timestamp);
        assert_eq!(c.record_mode, RecordMode::Tee);
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        let err = resolve_config_with("colour = \"never\"", &ConfigOverrides::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");

        let err = resolve_config_with("color = \"sometimes\"", &ConfigOverrides::default(), no_env)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let err = resolve_config_with(
            "quiet = true\nverbose = true",
            &ConfigOverrides::default(),
            no_env,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot both be enabled"), "got: {err}");
    }

    #[test]
    fn no_color_only_applies_when_auto() {
        let env = env_map(&[("NO_COLOR", "")]);
        let c = resolve_config_with("", &ConfigOverrides::default(), &env).unwrap();
        assert_eq!(c.color, ColorChoice::Never);

        let c = resolve_config_with("color = \"always\"", &ConfigOverrides::default(), &env)
            .unwrap();
        assert_eq!(c.color, ColorChoice::Always);
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let env = env_map(&[("LINEOUT_COLOR", "always"), ("LINEOUT_UNICODE", "never")]);
        let c = resolve_config_with("color = \"never\"", &ConfigOverrides::default(), &env)
            .unwrap();
        assert_eq!(c.color, ColorChoice::Always);
        assert_eq!(c.unicode, ColorChoice::Never);

        let cli = ConfigOverrides {
            color: Some(ColorChoice::Never),
            ..ConfigOverrides::default()
        };
        let c = resolve_config_with("", &cli, &env).unwrap();
        assert_eq!(c.color, ColorChoice::Never);
    }

    #[test]
    fn invalid_env_value_is_reported() {
        let env = env_map(&[("LINEOUT_COLOR", "rainbow")]);
        let err = resolve_config_with("", &ConfigOverrides::default(), env).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("LINEOUT_COLOR"), "got: {text}");
        assert!(text.contains("rainbow"), "got: {text}");
    }

    #[test]
    fn verbose_env_requires_a_value() {
        let c = resolve_config_with("", &ConfigOverrides::default(), env_map(&[("VERBOSE", "1")]))
            .unwrap();
        assert!(c.verbose);
        let c = resolve_config_with("", &ConfigOverrides::default(), env_map(&[("VERBOSE", " ")]))
            .unwrap();
        assert!(!c.verbose);
    }

    #[test]
    fn color_choice_parses_case_insensitively() {
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!(" never ".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("yes".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let fixture = TestTempDir::new("config-missing");
        let missing = fixture.child("nope.toml");
        let err = load_config(missing.to_str(), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn explicit_path_is_loaded() {
        let fixture = TestTempDir::new("config-load");
        let path = fixture.write_text("lineout.toml", "unicode = \"never\"\n");
        let cli = ConfigOverrides {
            timestamp: Some(true),
            ..ConfigOverrides::default()
        };
        let c = load_config(path.to_str(), &cli).unwrap();
        assert_eq!(c.unicode, ColorChoice::Never);
        assert!(c.timestamp);
    }
}
