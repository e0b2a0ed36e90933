// ── Fan-out distributor ──
//
// Republishes one status stream and one bandwidth stream to any number of
// per-panel channels. Values are forwarded as the same `Arc`, so panels
// share a snapshot without copying it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::stream::{LatestReceiver, LatestSender, recv_or_pending};
use crate::task::spawn_supervised;
use miwifi_api::{BandwidthResult, StatusSnapshot};

/// Forwards upstream values to registered downstream senders.
///
/// The caller creates each downstream channel and keeps its own sender
/// clone; the distributor only holds clones, so stopping it never closes
/// a downstream channel.
pub struct FanOut {
    status: Option<LatestReceiver<StatusSnapshot>>,
    bandwidth: Option<LatestReceiver<BandwidthResult>>,
    status_subscribers: Vec<LatestSender<StatusSnapshot>>,
    bandwidth_subscribers: Vec<LatestSender<BandwidthResult>>,
}

impl FanOut {
    pub fn new(
        status: Option<LatestReceiver<StatusSnapshot>>,
        bandwidth: Option<LatestReceiver<BandwidthResult>>,
    ) -> Self {
        Self {
            status,
            bandwidth,
            status_subscribers: Vec::new(),
            bandwidth_subscribers: Vec::new(),
        }
    }

    /// Register a downstream channel for status values.
    pub fn add_status(&mut self, tx: LatestSender<StatusSnapshot>) {
        self.status_subscribers.push(tx);
    }

    /// Register a downstream channel for bandwidth values.
    pub fn add_bandwidth(&mut self, tx: LatestSender<BandwidthResult>) {
        self.bandwidth_subscribers.push(tx);
    }

    /// Start forwarding until `cancel` fires or both upstreams close.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        spawn_supervised("fanout", fanout_task(self, cancel))
    }
}

async fn fanout_task(mut fanout: FanOut, cancel: CancellationToken) {
    debug!(
        status = fanout.status_subscribers.len(),
        bandwidth = fanout.bandwidth_subscribers.len(),
        "fan-out started"
    );

    while fanout.status.is_some() || fanout.bandwidth.is_some() {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = recv_or_pending(&mut fanout.status), if fanout.status.is_some() => {
                match next {
                    Some(stat) => {
                        trace!(subscribers = fanout.status_subscribers.len(), "forwarding status");
                        for tx in &fanout.status_subscribers {
                            tx.send_arc(Arc::clone(&stat));
                        }
                    }
                    None => {
                        debug!("status upstream closed");
                        fanout.status = None;
                    }
                }
            }
            next = recv_or_pending(&mut fanout.bandwidth), if fanout.bandwidth.is_some() => {
                match next {
                    Some(band) => {
                        trace!(subscribers = fanout.bandwidth_subscribers.len(), "forwarding bandwidth");
                        for tx in &fanout.bandwidth_subscribers {
                            tx.send_arc(Arc::clone(&band));
                        }
                    }
                    None => {
                        debug!("bandwidth upstream closed");
                        fanout.bandwidth = None;
                    }
                }
            }
        }
    }

    debug!("fan-out stopped");
}
