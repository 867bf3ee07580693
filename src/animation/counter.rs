use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Roughly one display frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A number that counts up from zero to `end` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub end: u64,
    pub duration: Duration,
}

impl Counter {
    pub const fn new(end: u64, duration: Duration) -> Self {
        Self { end, duration }
    }

    /// Value shown after `elapsed`: linear and floored, exactly `end` once done.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.end;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.end as f64 * progress).floor() as u64
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// A running counter animation. Aborted on `cancel()` or drop.
pub struct CounterTask {
    value: watch::Receiver<u64>,
    handle: JoinHandle<()>,
}

impl CounterTask {
    /// Start animating on the current tokio runtime.
    pub fn spawn(counter: Counter) -> Self {
        Self::spawn_with_interval(counter, FRAME_INTERVAL)
    }

    pub fn spawn_with_interval(counter: Counter, frame: Duration) -> Self {
        let (tx, rx) = watch::channel(0);

        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let mut ticker = tokio::time::interval(frame);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let elapsed = start.elapsed();
                if tx.send(counter.value_at(elapsed)).is_err() {
                    break;
                }
                if counter.is_done(elapsed) {
                    break;
                }
            }
        });

        Self {
            value: rx,
            handle,
        }
    }

    /// Latest published value
    pub fn value(&self) -> u64 {
        *self.value.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for CounterTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
