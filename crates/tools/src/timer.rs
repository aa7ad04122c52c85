use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of reconciliation pass durations.
#[derive(Debug, Clone)]
pub struct PassTimer {
    history: VecDeque<Duration>,
    capacity: usize,
}

impl PassTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one pass, evicting the oldest once the window is full.
    pub fn record(&mut self, dt: Duration) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(dt);
    }

    pub fn average(&self) -> Duration {
        if self.history.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.history.iter().sum();
        total / self.history.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.history.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.history.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = PassTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.max(), Duration::ZERO);
    }

    #[test]
    fn tracks_history() {
        let mut timer = PassTimer::new(3);
        timer.record(Duration::from_micros(10));
        timer.record(Duration::from_micros(20));
        timer.record(Duration::from_micros(30));

        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), Duration::from_micros(20));
        assert_eq!(timer.max(), Duration::from_micros(30));
        assert_eq!(timer.min(), Duration::from_micros(10));
    }

    #[test]
    fn evicts_oldest() {
        let mut timer = PassTimer::new(2);
        timer.record(Duration::from_micros(10));
        timer.record(Duration::from_micros(20));
        timer.record(Duration::from_micros(30));

        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_micros(25));
        assert_eq!(timer.min(), Duration::from_micros(20));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut timer = PassTimer::new(0);
        timer.record(Duration::from_micros(5));
        timer.record(Duration::from_micros(7));
        assert_eq!(timer.count(), 1);
        assert_eq!(timer.max(), Duration::from_micros(7));
    }
}
