//! Terminal input and the render clock, merged into one channel by a
//! background task.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// New terminal size (columns, rows).
    Resize(u16, u16),
    /// Time to redraw.
    Render,
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    stop: CancellationToken,
}

impl EventReader {
    /// Start reading; `Event::Render` fires every `render_rate`.
    pub fn new(render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = CancellationToken::new();
        tokio::spawn(read_events(tx, render_rate, stop.clone()));
        Self { rx, stop }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.stop.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

async fn read_events(
    tx: mpsc::UnboundedSender<Event>,
    render_rate: Duration,
    stop: CancellationToken,
) {
    let mut input = EventStream::new();
    let mut clock = tokio::time::interval(render_rate);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            () = stop.cancelled() => return,
            _ = clock.tick() => Event::Render,
            next = input.next() => match next {
                None => return,
                Some(Err(e)) => {
                    warn!(error = %e, "terminal input error");
                    continue;
                }
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                Some(Ok(TermEvent::Resize(cols, rows))) => Event::Resize(cols, rows),
                Some(Ok(_)) => continue,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}
