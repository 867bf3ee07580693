pub mod counter;
pub mod exit_intent;

pub use counter::{Counter, CounterTask};
pub use exit_intent::{ExitIntent, DEFAULT_EXIT_INTENT_DELAY};

use std::time::Duration;

/// The three hero-section counters: execution success, industry average, ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroCounters {
    pub execution: Counter,
    pub industry: Counter,
    pub roi: Counter,
}

impl Default for HeroCounters {
    fn default() -> Self {
        Self {
            execution: Counter::new(87, Duration::from_millis(2000)),
            industry: Counter::new(23, Duration::from_millis(2000)),
            roi: Counter::new(27_000, Duration::from_millis(2500)),
        }
    }
}
