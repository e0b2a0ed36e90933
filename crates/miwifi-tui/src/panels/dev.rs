//! Connected devices panel: per-device download totals and their share.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use tokio::task::JoinHandle;

use miwifi_core::{CancellationToken, LatestReceiver, StatusSnapshot};

use crate::panel::{Feed, Feeds, Model, Panel};
use crate::theme;
use crate::widgets::bytes_fmt::{fmt_bytes, fmt_traffic_bar};
use crate::widgets::chart::panel_block;

/// Rows shown in the device table.
pub const MAX_DEVICES: usize = 16;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
struct DeviceRow {
    name: String,
    download: u64,
    /// Percent of the download total across all devices.
    share: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DevModel {
    rows: Vec<DeviceRow>,
    total_downloaded: u64,
    total_uploaded: u64,
    devices: usize,
}

impl DevModel {
    fn footer(&self) -> String {
        format!(
            "Total downloaded: {} | Total uploaded: {} | Devices: {}",
            fmt_bytes(self.total_downloaded),
            fmt_bytes(self.total_uploaded),
            self.devices
        )
    }
}

impl Model for DevModel {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn on_status(&mut self, status: &StatusSnapshot) {
        let total: u64 = status.devices.iter().map(|d| d.download).sum();
        self.rows = status
            .devices
            .iter()
            .take(MAX_DEVICES)
            .map(|d| DeviceRow {
                name: d.name.clone(),
                download: d.download,
                share: if total == 0 {
                    0.0
                } else {
                    d.download as f64 * 100.0 / total as f64
                },
            })
            .collect();
        self.total_downloaded = status.wan.download;
        self.total_uploaded = status.wan.upload;
        self.devices = status.devices.len();
    }
}

pub struct DevPanel {
    pub(super) feed: Feed<DevModel>,
}

impl DevPanel {
    pub fn new(status: LatestReceiver<StatusSnapshot>) -> Self {
        Self {
            feed: Feed::new("dev", Feeds::status(status)),
        }
    }
}

fn layout(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Percentage(80), Constraint::Percentage(20)]).areas(area)
}

impl Panel for DevPanel {
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>> {
        self.feed.start(cancel).into_iter().collect()
    }

    fn resize(&mut self, _area: Rect) {}

    fn render(&self, frame: &mut Frame, area: Rect) {
        let model = self.feed.view();
        let [body, footer] = layout(area);

        let header = Row::new(["Name", "Value", "Percent", ""]).style(theme::table_header());
        let rows = model.rows.iter().enumerate().map(|(i, row)| {
            Row::new([
                Cell::from(format!("[{}] {}", i + 1, row.name)),
                Cell::from(fmt_bytes(row.download)),
                Cell::from(format!("{:.2}%", row.share)),
                Cell::from(Line::from(Span::styled(
                    fmt_traffic_bar(row.share, BAR_WIDTH),
                    theme::bar(),
                ))),
            ])
            .style(theme::text())
        });

        let widths = [
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(u16::try_from(BAR_WIDTH).unwrap_or(u16::MAX)),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(panel_block("Connected devices bandwidth"));

        frame.render_widget(table, body);
        frame.render_widget(Paragraph::new(model.footer()).style(theme::text()), footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miwifi_core::{DeviceStat, WanStat};
    use pretty_assertions::assert_eq;

    fn device(name: &str, download: u64) -> DeviceStat {
        DeviceStat {
            name: name.into(),
            download,
            ..DeviceStat::default()
        }
    }

    #[test]
    fn shares_are_of_the_device_total() {
        let mut model = DevModel::default();
        model.on_status(&StatusSnapshot {
            devices: vec![device("laptop", 300), device("phone", 100)],
            wan: WanStat {
                download: 1_000_000,
                upload: 2_000,
                ..WanStat::default()
            },
            ..StatusSnapshot::default()
        });
        let shares: Vec<f64> = model.rows.iter().map(|r| r.share).collect();
        assert_eq!(shares, vec![75.0, 25.0]);
        assert_eq!(
            model.footer(),
            "Total downloaded: 1.0 MB | Total uploaded: 2.0 kB | Devices: 2"
        );
    }

    #[test]
    fn table_is_capped_and_zero_totals_are_safe() {
        let mut model = DevModel::default();
        let devices = (0..20).map(|i| device(&format!("d{i}"), 0)).collect();
        model.on_status(&StatusSnapshot {
            devices,
            ..StatusSnapshot::default()
        });
        assert_eq!(model.rows.len(), MAX_DEVICES);
        assert_eq!(model.devices, 20);
        assert!(model.rows.iter().all(|r| r.share.abs() < f64::EPSILON));
    }
}
