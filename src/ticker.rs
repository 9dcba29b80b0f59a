use std::time::{Duration, Instant};

/// UI tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Tracks when the next reminder poll is due
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl PollTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// True on the first call and then once every interval
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_poll_timer() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_secs(10));

        assert!(timer.due(start));
        assert!(!timer.due(start + Duration::from_secs(5)));
        assert!(timer.due(start + Duration::from_secs(10)));
        assert!(!timer.due(start + Duration::from_secs(19)));
        assert!(timer.due(start + Duration::from_secs(21)));
    }
}
