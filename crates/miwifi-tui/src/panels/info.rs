//! Router identity and health summary.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Row, Table};
use tokio::task::JoinHandle;

use miwifi_core::{CancellationToken, LatestReceiver, StatusSnapshot};

use crate::panel::{Feed, Feeds, Model, Panel};
use crate::theme;
use crate::widgets::bytes_fmt::fmt_uptime;
use crate::widgets::chart::panel_block;

const HEADERS: [&str; 7] = [
    "Platform",
    "System version",
    "MAC address",
    "SN",
    "Channel",
    "Uptime",
    "Temperature",
];

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InfoModel {
    values: Option<[String; 7]>,
}

impl Model for InfoModel {
    fn on_status(&mut self, status: &StatusSnapshot) {
        let hw = &status.hardware;
        self.values = Some([
            hw.platform.clone(),
            hw.version.clone(),
            hw.mac.clone(),
            hw.sn.clone(),
            hw.channel.clone(),
            fmt_uptime(&status.up_time),
            format!("{:.1}°C", status.temperature),
        ]);
    }
}

pub struct InfoPanel {
    pub(super) feed: Feed<InfoModel>,
}

impl InfoPanel {
    pub fn new(status: LatestReceiver<StatusSnapshot>) -> Self {
        Self {
            feed: Feed::new("info", Feeds::status(status)),
        }
    }
}

impl Panel for InfoPanel {
    fn init(&mut self, cancel: CancellationToken) -> Vec<JoinHandle<()>> {
        self.feed.start(cancel).into_iter().collect()
    }

    fn resize(&mut self, _area: Rect) {}

    fn render(&self, frame: &mut Frame, area: Rect) {
        let model = self.feed.view();
        let rows = model
            .values
            .iter()
            .map(|values| Row::new(values.clone()).style(theme::text()));
        let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
            .header(Row::new(HEADERS).style(theme::table_header()))
            .block(panel_block("Info"));
        frame.render_widget(table, area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use miwifi_core::HardwareStat;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_follow_header_order() {
        let mut model = InfoModel::default();
        assert!(model.values.is_none());
        model.on_status(&StatusSnapshot {
            hardware: HardwareStat {
                mac: "00:11:22:33:44:55".into(),
                platform: "R3600".into(),
                version: "1.0.17".into(),
                channel: "release".into(),
                sn: "12345/67890".into(),
            },
            up_time: "3661.5".into(),
            temperature: 48.0,
            ..StatusSnapshot::default()
        });
        assert_eq!(
            model.values.unwrap(),
            [
                "R3600".to_owned(),
                "1.0.17".into(),
                "00:11:22:33:44:55".into(),
                "12345/67890".into(),
                "release".into(),
                "1h 1m 1s".into(),
                "48.0°C".into(),
            ]
        );
    }
}
