use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_EXIT_INTENT_DELAY: Duration = Duration::from_secs(1);

/// Fires `message` once the user has been away for `delay`.
///
/// `pointer_left` arms the timer, `pointer_entered` disarms it. Any armed
/// timer is aborted on drop.
pub struct ExitIntent<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    message: T,
    pending: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + 'static> ExitIntent<T> {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<T>, message: T) -> Self {
        Self {
            delay,
            tx,
            message,
            pending: None,
        }
    }

    pub fn pointer_left(&mut self) {
        self.disarm();

        let delay = self.delay;
        let tx = self.tx.clone();
        let message = self.message.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        }));
    }

    pub fn pointer_entered(&mut self) {
        self.disarm();
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for ExitIntent<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut intent = ExitIntent::new(Duration::from_secs(1), tx, "exit");

        intent.pointer_left();
        assert!(intent.is_armed());
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().unwrap(), "exit");
        assert!(!intent.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_disarms() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut intent = ExitIntent::new(Duration::from_secs(1), tx, 1u8);

        intent.pointer_left();
        tokio::time::sleep(Duration::from_millis(500)).await;
        intent.pointer_entered();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(rx.try_recv().is_err());
        assert!(!intent.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_twice_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut intent = ExitIntent::new(Duration::from_secs(1), tx, ());

        intent.pointer_left();
        tokio::time::sleep(Duration::from_millis(500)).await;
        intent.pointer_left();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut intent = ExitIntent::new(Duration::from_secs(1), tx, ());
        intent.pointer_left();
        drop(intent);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
