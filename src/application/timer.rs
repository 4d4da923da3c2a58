//! Clocks and cancellable single-shot timers.
//!
//! Nothing runs in the background: the event loop calls
//! [`crate::application::TableController::tick`] and each timer checks
//! whether its deadline has passed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// A deadline that fires at most once per schedule.
///
/// Scheduling again replaces the pending deadline, so of a burst of
/// schedules only the last one ever fires.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use usertable::application::SingleShotTimer;
///
/// let start = Instant::now();
/// let mut timer = SingleShotTimer::default();
/// timer.schedule(start, Duration::from_millis(300));
/// timer.schedule(start + Duration::from_millis(100), Duration::from_millis(300));
/// assert!(!timer.fire_if_due(start + Duration::from_millis(300)));
/// assert!(timer.fire_if_due(start + Duration::from_millis(400)));
/// assert!(!timer.fire_if_due(start + Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SingleShotTimer {
    deadline: Option<Instant>,
}

impl SingleShotTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when `now` has reached the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();
        other.advance(Duration::from_secs(2));
        assert_eq!(clock.now() - start, Duration::from_secs(2));
    }

    #[test]
    fn test_timer_fires_once_at_deadline() {
        let clock = ManualClock::new();
        let mut timer = SingleShotTimer::default();
        assert!(!timer.is_pending());

        timer.schedule(clock.now(), Duration::from_millis(300));
        clock.advance(Duration::from_millis(299));
        assert!(!timer.fire_if_due(clock.now()));
        clock.advance(Duration::from_millis(1));
        assert!(timer.fire_if_due(clock.now()));
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(clock.now()));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let clock = ManualClock::new();
        let mut timer = SingleShotTimer::default();
        timer.schedule(clock.now(), Duration::from_millis(10));
        timer.cancel();
        clock.advance(Duration::from_secs(1));
        assert!(!timer.fire_if_due(clock.now()));
    }
}
