//! Fast/slow refresh cadences.
//!
//! The scheduler does no work itself: the run loop asks it which cadences are
//! due and when to wake next, which also lets tests single-step ticks with
//! hand-made instants.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Price jitter, index jitter, rebinding, live chart step.
    Fast,
    /// News rotation.
    Slow,
}

#[derive(Debug, Clone)]
struct Timer {
    period: Duration,
    next_due: Option<Instant>,
    fired: u64,
}

impl Timer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
            fired: 0,
        }
    }

    /// Fire if due. The next deadline counts from this fire, not from the
    /// missed deadline.
    fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                self.fired += 1;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    fast: Timer,
    slow: Timer,
}

impl Scheduler {
    pub fn new(fast: Duration, slow: Duration) -> Self {
        Self {
            fast: Timer::new(fast.max(Duration::from_millis(1))),
            slow: Timer::new(slow.max(Duration::from_millis(1))),
        }
    }

    /// Arm both cadences; the first fire is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.fast.next_due = Some(now + self.fast.period);
        self.slow.next_due = Some(now + self.slow.period);
        tracing::info!(
            fast_ms = self.fast.period.as_millis() as u64,
            slow_ms = self.slow.period.as_millis() as u64,
            "refresh scheduler started"
        );
    }

    pub fn stop(&mut self) {
        self.fast.next_due = None;
        self.slow.next_due = None;
        tracing::info!("refresh scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.fast.next_due.is_some() || self.slow.next_due.is_some()
    }

    /// Cadences due at `now`, fast first. Each fires at most once per call;
    /// missed periods are not replayed.
    pub fn due(&mut self, now: Instant) -> Vec<Cadence> {
        let mut fired = Vec::with_capacity(2);
        if self.fast.poll(now) {
            fired.push(Cadence::Fast);
        }
        if self.slow.poll(now) {
            fired.push(Cadence::Slow);
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.fast.next_due, self.slow.next_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn fired(&self, cadence: Cadence) -> u64 {
        match cadence {
            Cadence::Fast => self.fast.fired,
            Cadence::Slow => self.slow.fired,
        }
    }

    pub fn period(&self, cadence: Cadence) -> Duration {
        match cadence {
            Cadence::Fast => self.fast.period,
            Cadence::Slow => self.slow.period,
        }
    }
}
