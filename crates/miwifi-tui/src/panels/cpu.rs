//! CPU load panel: rolling load chart plus a summary footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use tokio::task::JoinHandle;

use miwifi_core::{CancellationToken, LatestReceiver, StatusSnapshot};

use crate::panel::{Feed, Feeds, Model, Panel};
use crate::theme;
use crate::widgets::RingBuffer;
use crate::widgets::bytes_fmt::fmt_percent;
use crate::widgets::chart::{capacity_for, render_percent_chart};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CpuModel {
    load: RingBuffer<f64>,
    cores: i64,
    hz: String,
}

impl CpuModel {
    fn footer(&self) -> String {
        let load = self.load.latest().copied().unwrap_or_default();
        format!(
            "CPU: {} | Load: {} | Core frequency: {}",
            self.cores,
            fmt_percent(load),
            self.hz
        )
    }
}

impl Model for CpuModel {
    fn on_status(&mut self, status: &StatusSnapshot) {
        self.load.push(status.cpu.load);
        self.cores = status.cpu.core;
        self.hz.clone_from(&status.cpu.hz);
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.load.set_capacity(capacity);
    }
}

pub struct CpuPanel {
    pub(super) feed: Feed<CpuModel>,
}

impl CpuPanel {
    pub fn new(status: LatestReceiver<StatusSnapshot>) -> Self {
        Self {
            feed: Feed::new("cpu", Feeds::status(status)),
        }
    }
}

fn layout(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Percentage(80), Constraint::Percentage(20)]).areas(area)
}

impl Panel for CpuPanel {
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>> {
        self.feed.start(cancel).into_iter().collect()
    }

    fn resize(&mut self, area: Rect) {
        let [plot, _] = layout(area);
        self.feed.set_capacity(capacity_for(plot));
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let model = self.feed.view();
        let [plot, footer] = layout(area);
        render_percent_chart(frame, plot, "CPU", &model.load, theme::CPU_LINE);
        frame.render_widget(Paragraph::new(model.footer()).style(theme::text()), footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miwifi_core::CpuStat;
    use pretty_assertions::assert_eq;

    fn status(load: f64) -> StatusSnapshot {
        StatusSnapshot {
            cpu: CpuStat {
                core: 4,
                hz: "880MHz".into(),
                load,
            },
            ..StatusSnapshot::default()
        }
    }

    #[test]
    fn footer_shows_latest_load() {
        let mut model = CpuModel::default();
        model.on_status(&status(0.1));
        model.on_status(&status(0.2575));
        assert_eq!(
            model.footer(),
            "CPU: 4 | Load: 25.75% | Core frequency: 880MHz"
        );
    }

    #[test]
    fn load_window_follows_capacity() {
        let mut model = CpuModel::default();
        model.set_capacity(2);
        for load in [0.1, 0.2, 0.3] {
            model.on_status(&status(load));
        }
        assert_eq!(model.load.iter().copied().collect::<Vec<_>>(), vec![0.2, 0.3]);
    }
}
