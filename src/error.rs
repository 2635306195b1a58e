//! Unified error types for the output and prompt layers.

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or validating setup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// LookupError
// ---------------------------------------------------------------------------

/// A symbol or style name that is not registered.
///
/// The registries are fixed at build time, so hitting this is a programming
/// error in the caller rather than a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("unknown style `{0}`")]
    UnknownStyle(String),
}

// ---------------------------------------------------------------------------
// RecorderError
// ---------------------------------------------------------------------------

/// Misuse of the message recorder lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecorderError {
    /// `start()` was called while a session was already running.
    #[error("message recorder is already active")]
    AlreadyActive,
}

// ---------------------------------------------------------------------------
// UiError
// ---------------------------------------------------------------------------

/// Top-level error type for output and prompt operations.
#[derive(Debug, Error)]
pub enum UiError {
    /// Writing to the destination stream or reading input failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("lookup: {0}")]
    Lookup(#[from] LookupError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("recorder: {0}")]
    Recorder(#[from] RecorderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_display() {
        assert_eq!(
            LookupError::UnknownSymbol("sparkle".into()).to_string(),
            "unknown symbol `sparkle`"
        );
        assert_eq!(
            LookupError::UnknownStyle("mauve".into()).to_string(),
            "unknown style `mauve`"
        );
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn config_error_invalid_message() {
        let e = ConfigError::Invalid("quiet and verbose are exclusive".into());
        assert_eq!(
            e.to_string(),
            "invalid config: quiet and verbose are exclusive"
        );
    }

    #[test]
    fn ui_error_wraps_every_kind() {
        let io = UiError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        ));
        assert!(io.to_string().starts_with("io:"), "got: {io}");

        let lookup = UiError::from(LookupError::UnknownSymbol("x".into()));
        assert!(lookup.to_string().starts_with("lookup:"));

        let recorder = UiError::from(RecorderError::AlreadyActive);
        assert_eq!(
            recorder.to_string(),
            "recorder: message recorder is already active"
        );
    }
}
