//! Tunables for the timer driver.
use crate::Msec;

/// Rescheduling a registered timer closer than this to its old deadline is skipped.
pub const DEFAULT_LAZY_DELAY: Msec = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Minimum deadline shift (ms) that `add_timer` will actually move a registered timer for.
    pub lazy_delay: Msec,
}

impl TimerConfig {
    pub fn with_lazy_delay(mut self, lazy_delay: Msec) -> Self {
        self.lazy_delay = lazy_delay;
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            lazy_delay: DEFAULT_LAZY_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_override() {
        assert_eq!(TimerConfig::default().lazy_delay, 300);
        assert_eq!(TimerConfig::default().with_lazy_delay(0).lazy_delay, 0);
    }
}
