//! Fixed-step logic timer
//!
//! Converts wall-clock time into whole logic steps. Leftover time carries
//! over to the next update, so a caller polling at an irregular rate still
//! gets one step per interval on average.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LogicTimer {
    interval: Duration,
    accumulated: Duration,
    paused: bool,
    steps: u64,
}

impl LogicTimer {
    /// A zero interval is bumped to one millisecond
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            paused: false,
            steps: 0,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Feed elapsed time and return how many steps are due.
    ///
    /// Saturates at `u32::MAX` steps per call; any backlog beyond that is
    /// dropped rather than carried over.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        let accumulated = self.accumulated.saturating_add(elapsed).as_nanos();
        let interval = self.interval.as_nanos();

        let due = u32::try_from(accumulated / interval).unwrap_or(u32::MAX);
        self.accumulated = nanos_to_duration(accumulated % interval);
        self.steps = self.steps.saturating_add(u64::from(due));
        due
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total steps yielded since creation or the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.steps = 0;
    }
}

/// Remainders are always below one interval, so they fit a `Duration`
fn nanos_to_duration(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / 1_000_000_000).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % 1_000_000_000) as u32)
}

impl Default for LogicTimer {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}
