use crate::types::{MAX_RECONNECT_ATTEMPTS, RECONNECT_DELAY};
use std::time::Duration;

/// Reconnect policy: a fixed delay and a hard cap on attempts
#[derive(Debug, Clone)]
pub struct ReconnectTimer {
    attempts: u32,
    max_attempts: u32,
    delay: Duration,
}

impl ReconnectTimer {
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            delay,
        }
    }

    /// Claim the next attempt. Returns `None` once the cap is reached.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.delay)
    }

    /// Reset the attempt counter
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

impl Default for ReconnectTimer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(RECONNECT_DELAY),
            MAX_RECONNECT_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_until_cap() {
        let mut timer = ReconnectTimer::default();
        for attempt in 1..=5 {
            assert_eq!(timer.next_delay(), Some(Duration::from_millis(3000)));
            assert_eq!(timer.attempts(), attempt);
        }
        assert!(timer.is_exhausted());
        assert_eq!(timer.next_delay(), None);
        assert_eq!(timer.attempts(), 5);
    }

    #[test]
    fn test_reset_restarts_budget() {
        let mut timer = ReconnectTimer::new(Duration::from_millis(10), 2);
        timer.next_delay();
        timer.next_delay();
        assert_eq!(timer.next_delay(), None);

        timer.reset();
        assert_eq!(timer.attempts(), 0);
        assert_eq!(timer.next_delay(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_cap_never_retries() {
        let mut timer = ReconnectTimer::new(Duration::from_millis(10), 0);
        assert!(timer.is_exhausted());
        assert_eq!(timer.next_delay(), None);
    }
}
