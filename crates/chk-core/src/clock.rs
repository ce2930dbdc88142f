//! Clock sources used to time checks and stamp reports.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format used for report timestamps: ISO-8601 with a numeric offset and no
/// colon inside the offset (`2024-05-01T12:00:00+0200`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Source of wall-clock time for a run.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// ISO-8601 rendering of the current instant.
    fn timestamp(&self) -> String;
}

/// Clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Manually advanced clock for deterministic runs and tests.
///
/// Clones share the same instant, so a test can keep one handle and pass the
/// other to a harness.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn timestamp(&self) -> String {
        let millis = i64::try_from(self.now_ms()).unwrap_or(i64::MAX);
        let instant: DateTime<Utc> = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        instant.format(TIMESTAMP_FORMAT).to_string()
    }
}
