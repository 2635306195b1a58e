//! Shared test fixtures for config and capability tests.
//!
//! Keeping tiny reusable helpers here prevents each test module from
//! rebuilding ad-hoc temp dir and stream fakes.

use crate::tui::capability::StreamHandle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("lineout-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Stream handle with scripted answers for capability resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeStream {
    terminal: bool,
    encoding: Option<String>,
    term: Option<String>,
}

impl FakeStream {
    /// Interactive device declaring `encoding`.
    pub fn tty(encoding: &str) -> Self {
        Self {
            terminal: true,
            encoding: Some(encoding.to_string()),
            term: Some("xterm-256color".to_string()),
        }
    }

    /// Non-interactive stream (pipe or file).
    pub fn pipe(encoding: Option<&str>) -> Self {
        Self {
            terminal: false,
            encoding: encoding.map(str::to_string),
            term: None,
        }
    }

    pub fn with_term(mut self, term: &str) -> Self {
        self.term = Some(term.to_string());
        self
    }
}

impl StreamHandle for FakeStream {
    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn encoding(&self) -> Option<String> {
        self.encoding.clone()
    }

    fn term(&self) -> Option<String> {
        self.term.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
        assert!(fixture.path().exists());
    }

    #[test]
    fn fake_stream_reports_scripted_facts() {
        let stream = FakeStream::tty("UTF-8").with_term("dumb");
        assert!(stream.is_terminal());
        assert_eq!(stream.encoding().as_deref(), Some("UTF-8"));
        assert_eq!(stream.term().as_deref(), Some("dumb"));
        assert_eq!(FakeStream::pipe(None).encoding(), None);
    }
}
