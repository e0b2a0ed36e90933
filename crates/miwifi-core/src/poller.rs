// ── Poller ──
//
// Turns a fallible async fetch into a latest-value stream: one fetch right
// away, then one per interval tick until cancelled. Failures are logged
// and skipped; only the very first fetch publishes a zero value in their
// place so consumers always have something to render.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::stream::{LatestReceiver, LatestSender, latest_channel};
use crate::task::spawn_supervised;

/// Shortest accepted period; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawn a supervised polling task for `fetch`.
///
/// The receiver sees end-of-stream once the task stops, either on
/// `cancel` or because `fetch` panicked.
pub fn spawn_poller<T, E, F, Fut>(
    name: &'static str,
    period: Duration,
    cancel: CancellationToken,
    fetch: F,
) -> (LatestReceiver<T>, JoinHandle<()>)
where
    T: Default + Send + Sync + 'static,
    E: Display + Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = latest_channel();
    let handle = spawn_supervised(name, poll_task(name, tx, period, cancel, fetch));
    (rx, handle)
}

async fn poll_task<T, E, F, Fut>(
    name: &'static str,
    tx: LatestSender<T>,
    period: Duration,
    cancel: CancellationToken,
    mut fetch: F,
) where
    T: Default + Send + Sync + 'static,
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let first = tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        result = fetch() => result,
    };
    match first {
        Ok(value) => tx.send(value),
        Err(e) => {
            warn!(poller = name, error = %e, "initial fetch failed");
            tx.send(T::default());
        }
    }

    let mut interval = tokio::time::interval(period.max(MIN_PERIOD));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!(poller = name, "tick");
                let result = tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    result = fetch() => result,
                };
                match result {
                    Ok(value) => tx.send(value),
                    Err(e) => warn!(poller = name, error = %e, "fetch failed"),
                }
            }
        }
    }

    debug!(poller = name, "stopped");
}
