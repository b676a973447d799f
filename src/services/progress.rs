//! Progress reporting primitives for directory walks.

use crate::models::ProgressSnapshot;
use std::time::{Duration, Instant};

const FILE_TRIGGER: u64 = 500;
const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Counters a walk reports through the throttler.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkCounters {
    pub files_scanned: u64,
    pub lines_scanned: u64,
    pub directories_visited: u64,
}

/// Time/file-count throttler governing progress event emission.
#[derive(Debug)]
pub struct ProgressThrottler {
    interval: Duration,
    file_trigger: u64,
    started: Instant,
    last_emit: Option<Instant>,
    last_emit_files: u64,
}

impl ProgressThrottler {
    /// Throttler whose snapshot timestamps count from `started`.
    #[must_use]
    pub fn starting_at(interval: Duration, started: Instant) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            file_trigger: FILE_TRIGGER,
            started,
            last_emit: None,
            last_emit_files: 0,
        }
    }

    /// Consider emitting a snapshot using the current walk counters.
    ///
    /// The first call only arms the throttler.
    pub fn consider(&mut self, now: Instant, counters: WalkCounters) -> Option<ProgressSnapshot> {
        let Some(last_emit) = self.last_emit else {
            self.last_emit = Some(now);
            self.last_emit_files = counters.files_scanned;
            return None;
        };

        let elapsed = now.saturating_duration_since(last_emit);
        let files_delta = counters.files_scanned.saturating_sub(self.last_emit_files);

        if elapsed >= self.interval || files_delta >= self.file_trigger {
            self.last_emit = Some(now);
            self.last_emit_files = counters.files_scanned;
            return Some(self.snapshot(now, counters, None));
        }

        None
    }

    /// Emit a final snapshot regardless of thresholds.
    pub fn force_emit(&mut self, now: Instant, counters: WalkCounters) -> ProgressSnapshot {
        self.last_emit = Some(now);
        self.last_emit_files = counters.files_scanned;
        self.snapshot(now, counters, Some(1.0_f32))
    }

    fn snapshot(
        &self,
        now: Instant,
        counters: WalkCounters,
        completion_ratio: Option<f32>,
    ) -> ProgressSnapshot {
        let elapsed = now.saturating_duration_since(self.started);
        ProgressSnapshot {
            timestamp_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            files_scanned: counters.files_scanned,
            lines_scanned: counters.lines_scanned,
            directories_visited: counters.directories_visited,
            completion_ratio,
        }
    }
}
