//! Memory usage panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use tokio::task::JoinHandle;

use miwifi_core::{CancellationToken, LatestReceiver, MemStat, StatusSnapshot};

use crate::panel::{Feed, Feeds, Model, Panel};
use crate::theme;
use crate::widgets::RingBuffer;
use crate::widgets::bytes_fmt::fmt_percent;
use crate::widgets::chart::{capacity_for, render_percent_chart};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemModel {
    usage: RingBuffer<f64>,
    mem: MemStat,
}

impl MemModel {
    fn footer(&self) -> String {
        format!(
            "Storage: {} | Usage: {} | Type: {} | Frequency: {}",
            self.mem.total,
            fmt_percent(self.mem.usage),
            self.mem.kind,
            self.mem.hz
        )
    }
}

impl Model for MemModel {
    fn on_status(&mut self, status: &StatusSnapshot) {
        self.usage.push(status.mem.usage);
        self.mem.clone_from(&status.mem);
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.usage.set_capacity(capacity);
    }
}

pub struct MemPanel {
    pub(super) feed: Feed<MemModel>,
}

impl MemPanel {
    pub fn new(status: LatestReceiver<StatusSnapshot>) -> Self {
        Self {
            feed: Feed::new("mem", Feeds::status(status)),
        }
    }
}

fn layout(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Percentage(80), Constraint::Percentage(20)]).areas(area)
}

impl Panel for MemPanel {
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
        render_percent_chart(frame, plot, "Storage", &model.usage, theme::MEM_LINE);
        frame.render_widget(Paragraph::new(model.footer()).style(theme::text()), footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn footer_describes_memory() {
        let mut model = MemModel::default();
        model.on_status(&StatusSnapshot {
            mem: MemStat {
                usage: 0.5,
                total: "256MB".into(),
                hz: "1200MHz".into(),
                kind: "DDR3".into(),
            },
            ..StatusSnapshot::default()
        });
        assert_eq!(
            model.footer(),
            "Storage: 256MB | Usage: 50.00% | Type: DDR3 | Frequency: 1200MHz"
        );
        assert_eq!(model.usage.len(), 1);
    }
}
