//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use lineout::config::{ColorChoice, ConfigOverrides};

/// Showcase for the lineout console toolkit.
#[derive(Debug, Parser)]
#[command(name = "lineout", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (default: ./lineout.toml or ~/.config/lineout/lineout.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Color output: auto, always, never.
    #[arg(long = "color", value_name = "WHEN", global = true)]
    pub color: Option<ColorChoice>,

    /// Unicode glyphs: auto, always, never.
    #[arg(long = "unicode", value_name = "WHEN", global = true)]
    pub unicode: Option<ColorChoice>,

    /// Only show warnings and errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Show debug messages.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Prefix each line with the time elapsed since startup.
    #[arg(long = "timestamp", global = true)]
    pub timestamp: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Walk through every message kind and ask one question.
    #[default]
    Demo,
    /// Print every color and attribute in its own style.
    Colors,
}

impl Args {
    /// Flags that were actually given, as config overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            color: self.color,
            unicode: self.unicode,
            quiet: self.quiet.then_some(true),
            verbose: self.verbose.then_some(true),
            timestamp: self.timestamp.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_demo() {
        let args = Args::parse_from(["lineout"]);
        assert_eq!(args.command.unwrap_or_default(), Command::Demo);
        assert_eq!(args.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn color_flags_parse_choices() {
        let args = Args::parse_from(["lineout", "colors", "--color", "always", "--unicode", "never"]);
        assert_eq!(args.command, Some(Command::Colors));
        assert_eq!(args.color, Some(ColorChoice::Always));
        assert_eq!(args.unicode, Some(ColorChoice::Never));
    }

    #[test]
    fn invalid_color_is_rejected() {
        assert!(Args::try_parse_from(["lineout", "--color", "sometimes"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["lineout", "-q", "-v"]).is_err());
    }

    #[test]
    fn switches_become_overrides() {
        let args = Args::parse_from(["lineout", "--timestamp", "-v", "--config", "x.toml"]);
        let overrides = args.overrides();
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.timestamp, Some(true));
        assert_eq!(overrides.quiet, None);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
    }
}
