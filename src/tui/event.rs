use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    FocusLost,
    FocusGained,
    ExitIntent, // Exit-intent timer fired
}

pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    reader: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task_tx = tx.clone();

        let reader = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next() => match maybe_event {
                        Some(Ok(crossterm::event::Event::Key(key))) => {
                            // Filter for Press only (Windows compatibility)
                            if key.kind != KeyEventKind::Press {
                                continue;
                            }
                            Event::Key(key)
                        }
                        Some(Ok(crossterm::event::Event::FocusLost)) => Event::FocusLost,
                        Some(Ok(crossterm::event::Event::FocusGained)) => Event::FocusGained,
                        Some(Ok(_)) => continue,
                        Some(Err(_)) | None => break,
                    },
                    _ = tick_interval.tick() => Event::Tick,
                };

                if task_tx.send(event).is_err() {
                    break;
                }
            }
        });

        EventHandler { tx, rx, reader }
    }

    /// Sender for timers that feed back into the event loop
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
