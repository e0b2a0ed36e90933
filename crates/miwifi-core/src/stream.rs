// ── Latest-value channels ──
//
// Single-slot channels between pollers, the fan-out task and panels.
// A new value replaces any unread one, so publishing never blocks and a
// slow reader only ever sees the most recent sample.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

type Slot<T> = Option<Arc<T>>;

/// Create a connected sender/receiver pair with an empty slot.
pub fn latest_channel<T: Send + Sync + 'static>() -> (LatestSender<T>, LatestReceiver<T>) {
    let (tx, rx) = watch::channel(None);
    (
        LatestSender { inner: Arc::new(tx) },
        LatestReceiver { receiver: rx },
    )
}

/// Publishing half. Clones share the slot; the channel closes when the
/// last clone is dropped.
pub struct LatestSender<T> {
    inner: Arc<watch::Sender<Slot<T>>>,
}

impl<T> Clone for LatestSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> LatestSender<T> {
    /// Replace the slot contents with `value`.
    pub fn send(&self, value: T) {
        self.send_arc(Arc::new(value));
    }

    /// Replace the slot contents with an already shared value.
    pub fn send_arc(&self, value: Arc<T>) {
        self.inner.send_replace(Some(value));
    }

    /// A new receiver that sees only values published after this call.
    pub fn subscribe(&self) -> LatestReceiver<T> {
        LatestReceiver {
            receiver: self.inner.subscribe(),
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.inner.receiver_count()
    }
}

/// Reading half of a latest-value channel.
pub struct LatestReceiver<T> {
    receiver: watch::Receiver<Slot<T>>,
}

impl<T: Send + Sync + 'static> LatestReceiver<T> {
    /// Wait for the next unread value.
    /// Returns `None` once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<Arc<T>> {
        loop {
            self.receiver.changed().await.ok()?;
            if let Some(value) = self.receiver.borrow_and_update().clone() {
                return Some(value);
            }
        }
    }

    /// Take the unread value, if any, without waiting.
    pub fn try_recv(&mut self) -> Option<Arc<T>> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    /// The most recent value, read or not.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.receiver.borrow().clone()
    }

    /// `true` once every sender has been dropped.
    pub fn is_closed(&self) -> bool {
        self.receiver.has_changed().is_err()
    }

    /// Convert into a `Stream` of values published from now on.
    pub fn into_stream(self) -> LatestStream<T> {
        LatestStream {
            inner: WatchStream::from_changes(self.receiver),
        }
    }
}

/// Receive from an optional receiver; pending forever when it is `None`.
///
/// Lets a `select!` loop keep a branch for a stream that has already ended.
pub async fn recv_or_pending<T: Send + Sync + 'static>(
    rx: &mut Option<LatestReceiver<T>>,
) -> Option<Arc<T>> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields each newly published value; ends when the channel closes.
pub struct LatestStream<T> {
    inner: WatchStream<Slot<T>>,
}

impl<T: Send + Sync + 'static> Stream for LatestStream<T> {
    type Item = Arc<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Some(value))) => return Poll::Ready(Some(value)),
                Poll::Ready(Some(None)) => {}
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn newest_value_wins() {
        let (tx, mut rx) = latest_channel::<u32>();
        tx.send(1);
        tx.send(2);
        assert_eq!(*rx.recv().await.unwrap(), 2);
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test]
    async fn closes_when_last_sender_drops() {
        let (tx, mut rx) = latest_channel::<u32>();
        let other = tx.clone();
        drop(tx);
        assert!(!rx.is_closed());
        other.send(7);
        drop(other);
        // The final value is still delivered before end-of-stream.
        assert_eq!(*rx.recv().await.unwrap(), 7);
        assert!(rx.recv().await.is_none());
        assert!(rx.is_closed());
    }

    #[tokio::test]
    async fn subscribe_skips_earlier_values() {
        let (tx, _rx) = latest_channel::<&str>();
        tx.send("old");
        let mut late = tx.subscribe();
        assert!(late.try_recv().is_none());
        assert_eq!(*late.latest().unwrap(), "old");
        tx.send("new");
        assert_eq!(*late.try_recv().unwrap(), "new");
        assert_eq!(tx.receiver_count(), 2);
    }

    #[tokio::test]
    async fn stream_ends_on_close() {
        use tokio_stream::StreamExt;

        let (tx, rx) = latest_channel::<u32>();
        let reader = tokio::spawn(async move {
            rx.into_stream().map(|v| *v).collect::<Vec<_>>().await
        });
        tx.send(5);
        drop(tx);
        assert_eq!(reader.await.unwrap(), vec![5]);
    }
}
