//! WAN throughput panel: current speeds, a rolling down/up chart, and the
//! latest bandwidth measurement.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use tokio::task::JoinHandle;

use miwifi_core::{BandwidthResult, CancellationToken, LatestReceiver, StatusSnapshot};

use crate::panel::{Feed, Feeds, Model, Panel};
use crate::theme;
use crate::widgets::RingBuffer;
use crate::widgets::bytes_fmt::fmt_rate;
use crate::widgets::chart::{capacity_for, panel_block, render_rate_chart};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NetModel {
    down: RingBuffer<f64>,
    up: RingBuffer<f64>,
    seeded: bool,
    down_speed: u64,
    up_speed: u64,
    max_download_speed: u64,
    band: BandwidthResult,
}

impl NetModel {
    fn header(&self) -> String {
        format!(
            "Downstream speed: {} | Upstream speed: {}",
            fmt_rate(self.down_speed),
            fmt_rate(self.up_speed)
        )
    }

    fn footer(&self) -> String {
        format!(
            "Bandwidth: {:.2} m | Max download speed: {}",
            self.band.bandwidth,
            fmt_rate(self.max_download_speed)
        )
    }
}

impl Model for NetModel {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn on_status(&mut self, status: &StatusSnapshot) {
        let wan = &status.wan;
        if !self.seeded {
            let history = wan.history_samples();
            // Placeholder samples from a failed first poll are replaced.
            if !history.is_empty() {
                self.down.clear();
                self.down.extend(history.into_iter().map(|v| v as f64));
                self.seeded = true;
            }
        }
        self.down.push(wan.down_speed as f64);
        self.up.push(wan.up_speed as f64);
        self.down_speed = wan.down_speed;
        self.up_speed = wan.up_speed;
        self.max_download_speed = wan.max_download_speed;
    }

    fn on_bandwidth(&mut self, band: &BandwidthResult) {
        self.band = *band;
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.down.set_capacity(capacity);
        self.up.set_capacity(capacity);
    }
}

pub struct NetPanel {
    pub(super) feed: Feed<NetModel>,
}

impl NetPanel {
    pub fn new(
        status: LatestReceiver<StatusSnapshot>,
        bandwidth: LatestReceiver<BandwidthResult>,
    ) -> Self {
        Self {
            feed: Feed::new("net", Feeds::both(status, bandwidth)),
        }
    }
}

fn layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .areas(area)
}

impl Panel for NetPanel {
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>> {
        self.feed.start(cancel).into_iter().collect()
    }

    fn resize(&mut self, area: Rect) {
        let [_, plot, _] = layout(area);
        self.feed.set_capacity(capacity_for(plot));
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let model = self.feed.view();
        let [header, plot, footer] = layout(area);
        frame.render_widget(
            Paragraph::new(model.header())
                .style(theme::text())
                .block(panel_block("Real-time network status")),
            header,
        );
        render_rate_chart(frame, plot, &model.down, &model.up);
        frame.render_widget(Paragraph::new(model.footer()).style(theme::text()), footer);
    }
}
