// src/console/rate.rs
// Fixed-rate sleeper for the command loop tick.

use std::time::{Duration, Instant};

/// Sleeps until the next tick boundary.
///
/// Boundaries are spaced `period` apart from the first call. A tick that
/// overruns its boundary re-bases the schedule on the current time instead of
/// bursting to catch up.
#[derive(Debug, Clone)]
pub struct Rate {
    period: Duration,
    next_deadline: Instant,
}

impl Rate {
    /// Rate ticking `hz` times per second
    pub fn new(hz: f64) -> Self {
        let period = Duration::from_secs_f64(1.0 / hz);
        Rate {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    /// Tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next boundary, zero if it has passed
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_deadline.saturating_duration_since(now)
    }

    /// Block until the next boundary and schedule the one after it
    pub fn sleep(&mut self) {
        let now = Instant::now();
        let wait = self.remaining(now);
        if wait.is_zero() {
            log::debug!("Tick overran by {:?}", now - self.next_deadline);
            self.next_deadline = now + self.period;
            return;
        }
        std::thread::sleep(wait);
        self.next_deadline += self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_hz() {
        assert_eq!(Rate::new(10.0).period(), Duration::from_millis(100));
        assert_eq!(Rate::new(50.0).period(), Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_waits_for_boundary() {
        let mut rate = Rate::new(100.0);
        let start = Instant::now();

        rate.sleep();
        rate.sleep();

        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_overrun_rebases_schedule() {
        let mut rate = Rate::new(100.0);
        std::thread::sleep(Duration::from_millis(30));

        let before = Instant::now();
        rate.sleep();

        assert!(before.elapsed() < Duration::from_millis(10));
        assert!(rate.remaining(Instant::now()) <= rate.period());
    }
}
