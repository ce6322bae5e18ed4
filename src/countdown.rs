/// A countdown anchored on an absolute wall-clock end time.
///
/// Remaining time is always recomputed from `end_ms`, never accumulated from
/// ticks, so a late or missing tick cannot make it drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    end_ms: u64,
    duration_ms: u64,
}

impl Countdown {
    pub fn start(now_ms: u64, duration_ms: u64) -> Self {
        Self {
            end_ms: now_ms.saturating_add(duration_ms),
            duration_ms,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Never negative: clamps at zero once the end time has passed
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.end_ms.saturating_sub(now_ms)
    }

    pub fn has_elapsed(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) == 0
    }

    pub fn ring_progress(&self, remaining_ms: u64) -> f64 {
        ring_progress(remaining_ms, self.duration_ms)
    }
}

/// Whole seconds left, rounded up
pub fn remaining_secs(remaining_ms: u64) -> u64 {
    remaining_ms.div_ceil(1000)
}

/// `00:ss` under a minute, `mm:ss` otherwise
pub fn format_countdown(remaining_ms: u64) -> String {
    let seconds = remaining_secs(remaining_ms);
    if seconds < 60 {
        format!("00:{:02}", seconds)
    } else {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

/// The display blinks through the last three seconds
pub fn should_blink(remaining_ms: u64) -> bool {
    (1..=3).contains(&remaining_secs(remaining_ms))
}

/// Elapsed share of a step, clamped to [0, 1].
/// A zero-length step counts as fully elapsed.
pub fn ring_progress(remaining_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    (1.0 - remaining_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}
