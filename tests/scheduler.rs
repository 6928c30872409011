use std::time::{Duration, Instant};
use tickerboard::sched::{Cadence, Scheduler};

fn scheduler() -> Scheduler {
    Scheduler::new(Duration::from_millis(100), Duration::from_secs(1))
}

#[test]
fn test_nothing_due_before_start() {
    let mut sched = scheduler();
    let now = Instant::now();
    assert!(!sched.is_running());
    assert!(sched.due(now + Duration::from_secs(10)).is_empty());
    assert!(sched.next_deadline().is_none());
}

#[test]
fn test_fast_fires_after_one_period() {
    let mut sched = scheduler();
    let t0 = Instant::now();
    sched.start(t0);
    assert!(sched.due(t0 + Duration::from_millis(99)).is_empty());
    assert_eq!(sched.due(t0 + Duration::from_millis(100)), vec![Cadence::Fast]);
    assert_eq!(sched.fired(Cadence::Fast), 1);
    assert_eq!(sched.fired(Cadence::Slow), 0);
}

#[test]
fn test_next_deadline_counts_from_fire() {
    let mut sched = scheduler();
    let t0 = Instant::now();
    sched.start(t0);
    assert_eq!(sched.next_deadline(), Some(t0 + Duration::from_millis(100)));

    // Late by 50ms: no catch-up, next deadline is a full period later.
    let late = t0 + Duration::from_millis(150);
    assert_eq!(sched.due(late), vec![Cadence::Fast]);
    assert_eq!(sched.next_deadline(), Some(late + Duration::from_millis(100)));
    assert!(sched.due(late + Duration::from_millis(60)).is_empty());
}

#[test]
fn test_missed_periods_fire_once() {
    let mut sched = scheduler();
    let t0 = Instant::now();
    sched.start(t0);
    let fired = sched.due(t0 + Duration::from_millis(950));
    assert_eq!(fired, vec![Cadence::Fast]);
    assert_eq!(sched.fired(Cadence::Fast), 1);
}

#[test]
fn test_both_cadences_fast_first() {
    let mut sched = scheduler();
    let t0 = Instant::now();
    sched.start(t0);
    let fired = sched.due(t0 + Duration::from_secs(1));
    assert_eq!(fired, vec![Cadence::Fast, Cadence::Slow]);
}

#[test]
fn test_stop_halts_firing() {
    let mut sched = scheduler();
    let t0 = Instant::now();
    sched.start(t0);
    sched.stop();
    assert!(!sched.is_running());
    assert!(sched.due(t0 + Duration::from_secs(5)).is_empty());
    assert_eq!(sched.fired(Cadence::Fast), 0);
}

#[test]
fn test_zero_period_is_raised_to_minimum() {
    let sched = Scheduler::new(Duration::ZERO, Duration::ZERO);
    assert_eq!(sched.period(Cadence::Fast), Duration::from_millis(1));
    assert_eq!(sched.period(Cadence::Slow), Duration::from_millis(1));
}
