//! Dashboard: every panel at once, fed by one status poller and one
//! bandwidth poller through a fan-out.
//!
//! ```text
//! ┌──────────────────────── Info (10%) ────────────────────────┐
//! ├──────────── Net (50%) ───────┬──────────── Dev ────────────┤
//! ├──────────── CPU (40%) ───────┴──────────── Mem ────────────┤
//! └────────────────────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::task::JoinHandle;

use miwifi_core::{
    BandwidthResult, CancellationToken, FanOut, LatestReceiver, LatestSender, StatusSnapshot,
    latest_channel,
};

use super::{CpuPanel, DevPanel, InfoPanel, MemPanel, NetPanel};
use crate::panel::Panel;

pub struct DashboardPanel {
    fanout: Option<FanOut>,
    info: InfoPanel,
    net: NetPanel,
    dev: DevPanel,
    cpu: CpuPanel,
    mem: MemPanel,
    // Downstream channels stay open for as long as the dashboard lives.
    _status: Vec<LatestSender<StatusSnapshot>>,
    _bandwidth: Vec<LatestSender<BandwidthResult>>,
}

impl DashboardPanel {
    pub fn new(
        status: LatestReceiver<StatusSnapshot>,
        bandwidth: LatestReceiver<BandwidthResult>,
    ) -> Self {
        let mut fanout = FanOut::new(Some(status), Some(bandwidth));
        let mut status_senders = Vec::new();
        let mut bandwidth_senders = Vec::new();

        let mut status_feed = || {
            let (tx, rx) = latest_channel();
            fanout.add_status(tx.clone());
            status_senders.push(tx);
            rx
        };
        let info = InfoPanel::new(status_feed());
        let dev = DevPanel::new(status_feed());
        let cpu = CpuPanel::new(status_feed());
        let mem = MemPanel::new(status_feed());
        let net_status = status_feed();

        let (band_tx, band_rx) = latest_channel();
        fanout.add_bandwidth(band_tx.clone());
        bandwidth_senders.push(band_tx);
        let net = NetPanel::new(net_status, band_rx);

        Self {
            fanout: Some(fanout),
            info,
            net,
            dev,
            cpu,
            mem,
            _status: status_senders,
            _bandwidth: bandwidth_senders,
        }
    }

    fn children_mut(&mut self) -> [&mut dyn Panel; 5] {
        [
            &mut self.info,
            &mut self.net,
            &mut self.dev,
            &mut self.cpu,
            &mut self.mem,
        ]
    }
}

fn layout(area: Rect) -> [Rect; 5] {
    let [info, middle, bottom] = Layout::vertical([
        Constraint::Percentage(10),
        Constraint::Percentage(50),
        Constraint::Percentage(40),
    ])
    .areas(area);
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]);
    let [net, dev] = halves.areas(middle);
    let [cpu, mem] = halves.areas(bottom);
    [info, net, dev, cpu, mem]
}

impl Panel for DashboardPanel {
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        if let Some(fanout) = self.fanout.take() {
            handles.push(fanout.spawn(cancel.clone()));
        }
        for child in self.children_mut() {
            handles.extend(child.init(cancel.clone()));
        }
        handles
    }

    fn resize(&mut self, area: Rect) {
        for (child, rect) in self.children_mut().into_iter().zip(layout(area)) {
            child.resize(rect);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [info, net, dev, cpu, mem] = layout(area);
        self.info.render(frame, info);
        self.net.render(frame, net);
        self.dev.render(frame, dev);
        self.cpu.render(frame, cpu);
        self.mem.render(frame, mem);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::panel::Model;
    use crate::panels::{
        cpu::CpuModel, dev::DevModel, info::InfoModel, mem::MemModel, net::NetModel,
    };
    use miwifi_core::WanStat;
    use pretty_assertions::assert_eq;

    fn applied<M: Model>(status: &StatusSnapshot, band: Option<&BandwidthResult>) -> M {
        let mut model = M::default();
        model.on_status(status);
        if let Some(band) = band {
            model.on_bandwidth(band);
        }
        model
    }

    #[tokio::test]
    async fn one_upstream_sample_reaches_every_panel() {
        let (status_tx, status_rx) = latest_channel();
        let (band_tx, band_rx) = latest_channel();
        let mut dash = DashboardPanel::new(status_rx, band_rx);
        let cancel = CancellationToken::new();
        let handles = dash.init(cancel.clone());
        assert_eq!(handles.len(), 6);

        let status = StatusSnapshot {
            temperature: 47.0,
            up_time: "3600".into(),
            wan: WanStat {
                history: "10,20".into(),
                down_speed: 30,
                up_speed: 5,
                ..WanStat::default()
            },
            ..StatusSnapshot::default()
        };
        let band = BandwidthResult {
            bandwidth: 120.0,
            ..BandwidthResult::default()
        };
        status_tx.send(status.clone());
        band_tx.send(band);

        let expected = (
            applied::<InfoModel>(&status, None),
            applied::<NetModel>(&status, Some(&band)),
            applied::<DevModel>(&status, None),
            applied::<CpuModel>(&status, None),
            applied::<MemModel>(&status, None),
        );
        let current = |dash: &DashboardPanel| {
            (
                (*dash.info.feed.view()).clone(),
                (*dash.net.feed.view()).clone(),
                (*dash.dev.feed.view()).clone(),
                (*dash.cpu.feed.view()).clone(),
                (*dash.mem.feed.view()).clone(),
            )
        };
        tokio::time::timeout(Duration::from_secs(5), async {
            while current(&dash) != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(current(&dash), expected);

        cancel.cancel();
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[test]
    fn layout_splits_rows_and_columns() {
        let [info, net, dev, cpu, mem] = layout(Rect::new(0, 0, 100, 100));
        assert_eq!(info.height, 10);
        assert_eq!((net.height, dev.height), (50, 50));
        assert_eq!((cpu.height, mem.height), (40, 40));
        assert_eq!(net.width + dev.width, 100);
        assert_eq!(net.y, dev.y);
        assert_eq!(cpu.x, info.x);
    }
}
