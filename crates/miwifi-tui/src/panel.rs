//! Panel trait, panel identifiers, and the per-panel data feed.
//!
//! Each panel owns a model that a background task keeps current from the
//! panel's status/bandwidth streams. The task publishes every update as an
//! immutable snapshot; `render` only ever reads the newest one, so drawing
//! never waits on data.

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use strum::{Display, EnumString, VariantNames};
use tokio::task::JoinHandle;
use tracing::debug;

use miwifi_core::{
    BandwidthResult, CancellationToken, LatestReceiver, LatestSender, StatusSnapshot,
    latest_channel, recv_or_pending, spawn_supervised,
};

/// Which panel (or combination) to run, chosen once at startup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PanelKind {
    #[default]
    #[strum(serialize = "dash")]
    Dashboard,
    Net,
    Cpu,
    Dev,
    Info,
    Mem,
}

/// A drawable unit driven by the render loop.
pub trait Panel: Send {
    /// Start the panel's background tasks. Returns their handles.
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>>;

    /// Recompute layout extents for `area`.
    fn resize(&mut self, area: Rect);

    /// Draw the most recent state into `area`.
    fn render(&self, frame: &mut Frame, area: Rect);
}

/// State a panel derives from incoming samples.
pub trait Model: Default + Clone + Send + Sync + 'static {
    fn on_status(&mut self, _status: &StatusSnapshot) {}

    fn on_bandwidth(&mut self, _band: &BandwidthResult) {}

    /// Resize rolling buffers to the plot width.
    fn set_capacity(&mut self, _capacity: usize) {}
}

/// Input streams for one panel.
#[derive(Default)]
pub struct Feeds {
    pub status: Option<LatestReceiver<StatusSnapshot>>,
    pub bandwidth: Option<LatestReceiver<BandwidthResult>>,
}

impl Feeds {
    pub fn status(rx: LatestReceiver<StatusSnapshot>) -> Self {
        Self {
            status: Some(rx),
            bandwidth: None,
        }
    }

    pub fn both(
        status: LatestReceiver<StatusSnapshot>,
        bandwidth: LatestReceiver<BandwidthResult>,
    ) -> Self {
        Self {
            status: Some(status),
            bandwidth: Some(bandwidth),
        }
    }
}

/// Keeps a model `M` current from its feeds on a supervised task.
pub struct Feed<M> {
    name: &'static str,
    pending: Option<(Feeds, LatestReceiver<usize>)>,
    view_tx: LatestSender<M>,
    view: LatestReceiver<M>,
    capacity: LatestSender<usize>,
}

impl<M: Model> Feed<M> {
    pub fn new(name: &'static str, feeds: Feeds) -> Self {
        let (view_tx, view) = latest_channel();
        let (capacity, capacity_rx) = latest_channel();
        Self {
            name,
            pending: Some((feeds, capacity_rx)),
            view_tx,
            view,
            capacity,
        }
    }

    /// Spawn the subscriber task. Subsequent calls do nothing.
    pub fn start(&mut self, cancel: CancellationToken) -> Option<JoinHandle<()>> {
        let (feeds, capacity) = self.pending.take()?;
        let task = feed_task(self.name, feeds, capacity, self.view_tx.clone(), cancel);
        Some(spawn_supervised(self.name, task))
    }

    /// The newest published model, or the default before the first sample.
    pub fn view(&self) -> Arc<M> {
        self.view.latest().unwrap_or_default()
    }

    /// Ask the task to resize the model's rolling buffers.
    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.send(capacity);
    }
}

async fn feed_task<M: Model>(
    name: &'static str,
    mut feeds: Feeds,
    capacity: LatestReceiver<usize>,
    view: LatestSender<M>,
    cancel: CancellationToken,
) {
    let mut model = M::default();
    if let Some(c) = capacity.latest() {
        model.set_capacity(*c);
    }
    let mut capacity = Some(capacity);

    while feeds.status.is_some() || feeds.bandwidth.is_some() {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = recv_or_pending(&mut capacity), if capacity.is_some() => {
                match next {
                    Some(c) => model.set_capacity(*c),
                    None => capacity = None,
                }
            }
            next = recv_or_pending(&mut feeds.bandwidth), if feeds.bandwidth.is_some() => {
                match next {
                    Some(band) => model.on_bandwidth(&band),
                    None => feeds.bandwidth = None,
                }
            }
            next = recv_or_pending(&mut feeds.status), if feeds.status.is_some() => {
                match next {
                    Some(status) => model.on_status(&status),
                    None => feeds.status = None,
                }
            }
        }
        view.send(model.clone());
    }

    debug!(panel = name, "feed stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        status: Vec<i32>,
        bandwidth: u32,
        capacity: usize,
    }

    impl Model for Counter {
        fn on_status(&mut self, status: &StatusSnapshot) {
            self.status.push(status.code);
        }

        fn on_bandwidth(&mut self, _band: &BandwidthResult) {
            self.bandwidth += 1;
        }

        fn set_capacity(&mut self, capacity: usize) {
            self.capacity = capacity;
        }
    }

    #[test]
    fn panel_kind_from_str() {
        assert_eq!(PanelKind::from_str("dash").unwrap(), PanelKind::Dashboard);
        assert_eq!(PanelKind::from_str("NET").unwrap(), PanelKind::Net);
        assert_eq!(PanelKind::Mem.to_string(), "mem");
        assert!(PanelKind::from_str("dashboard").is_err());
        assert_eq!(PanelKind::VARIANTS.len(), 6);
    }

    #[tokio::test]
    async fn feed_publishes_model_updates() {
        let (status_tx, status_rx) = latest_channel();
        let (band_tx, band_rx) = latest_channel();
        let mut feed = Feed::<Counter>::new("test", Feeds::both(status_rx, band_rx));
        assert_eq!(*feed.view(), Counter::default());

        let mut updates = feed.view_tx.subscribe();
        feed.set_capacity(40);
        let cancel = CancellationToken::new();
        let handle = feed.start(cancel.clone()).unwrap();
        assert!(feed.start(cancel.clone()).is_none());

        status_tx.send(StatusSnapshot {
            code: 3,
            ..StatusSnapshot::default()
        });
        loop {
            if updates.recv().await.unwrap().status == vec![3] {
                break;
            }
        }
        band_tx.send(BandwidthResult::default());
        loop {
            if updates.recv().await.unwrap().bandwidth == 1 {
                break;
            }
        }
        assert_eq!(feed.view().capacity, 40);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn feed_ends_when_inputs_close() {
        let (status_tx, status_rx) = latest_channel::<StatusSnapshot>();
        let mut feed = Feed::<Counter>::new("test", Feeds::status(status_rx));
        let handle = feed.start(CancellationToken::new()).unwrap();
        drop(status_tx);
        handle.await.unwrap();
    }
}
