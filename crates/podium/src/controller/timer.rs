use std::time::{Duration, Instant};

pub const ZERO_DISPLAY: &str = "00:00:00";

/// Source of the current instant and of deferred wake-ups.
///
/// A wake-up is one-shot: after `delay` the host calls
/// [`Controller::tick`](super::Controller::tick) once. Requesting a new wake-up
/// while one is pending replaces it.
pub trait Clock {
    fn now(&self) -> Instant;
    fn wake_after(&mut self, delay: Duration);
}

/// Elapsed-time tracking for the presenter view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    started_at: Option<Instant>,
}

/// What the timer shows at a given instant, and when the next whole second lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub text: String,
    pub next_tick: Duration,
}

impl Timer {
    #[cfg(test)]
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    /// Compute the display at `now`, or `None` when the timer was never started.
    ///
    /// The next tick is aligned on the next whole second since the start, not
    /// on `now + 1s`, so jitter in wake-ups does not accumulate.
    pub fn reading(&self, now: Instant) -> Option<Reading> {
        let started_at = self.started_at?;
        let total_ms = now.saturating_duration_since(started_at).as_millis() as u64;
        let total_secs = (total_ms + 500) / 1000;
        Some(Reading {
            text: format_hms(total_secs),
            next_tick: Duration::from_millis((total_secs + 1) * 1000 - total_ms),
        })
    }
}

/// Zero-padded `HH:MM:SS`; hours keep counting past 24.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Wall clock for hosts that only need `now`; wake-ups are recorded for polling.
#[derive(Debug, Default)]
pub struct SystemClock {
    deadline: Option<Instant>,
}

impl SystemClock {
    /// Take the pending wake-up if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wake_after(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }
}
