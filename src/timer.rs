//! Wall-clock timer and compact duration formatting.

use std::fmt;
use std::time::{Duration, Instant};

/// Measures elapsed time from `start` until `stop` (or now, while running).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    started: Instant,
    stopped: Option<Instant>,
}

impl Timer {
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started: Instant) -> Self {
        Self {
            started,
            stopped: None,
        }
    }

    /// Freeze the elapsed duration. Later calls keep the first stop instant.
    pub fn stop(&mut self) -> Duration {
        let stopped = *self.stopped.get_or_insert_with(Instant::now);
        stopped.saturating_duration_since(self.started)
    }

    pub fn is_running(&self) -> bool {
        self.stopped.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        let end = self.stopped.unwrap_or_else(Instant::now);
        end.saturating_duration_since(self.started)
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.elapsed()))
    }
}

/// `430ms`, `3.2s`, or `3m` (minutes truncated).
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else if duration < Duration::from_secs(60) {
        // Tenths truncate, matching the minute form.
        let tenths = duration.as_millis() / 100;
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        format!("{}m", duration.as_secs() / 60)
    }
}
