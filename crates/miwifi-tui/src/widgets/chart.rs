//! Braille line charts for the rolling series panels.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use super::bytes_fmt::fmt_rate_axis;
use super::ring_buffer::RingBuffer;
use crate::theme;

/// Columns reserved for Y-axis labels.
const AXIS_LABEL_WIDTH: u16 = 6;

/// Number of samples a chart drawn in `area` can show.
pub fn capacity_for(area: Rect) -> usize {
    usize::from(area.width.saturating_sub(2 + AXIS_LABEL_WIDTH)).max(2)
}

/// Rounded, titled block used around every panel section.
pub fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_style())
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn x_axis(capacity: usize) -> Axis<'static> {
    Axis::default()
        .bounds([0.0, capacity.saturating_sub(1).max(1) as f64])
        .style(theme::axis_style())
}

fn axis_label(text: String) -> Span<'static> {
    Span::styled(text, theme::axis_style())
}

/// Plot a series of fractions in `[0, 1]` on a fixed 0–100% scale.
pub fn render_percent_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    samples: &RingBuffer<f64>,
    color: Color,
) {
    let points = samples.points();
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(panel_block(title))
        .x_axis(x_axis(samples.capacity()))
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(vec![
                    axis_label("0%".into()),
                    axis_label("50%".into()),
                    axis_label("100%".into()),
                ])
                .style(theme::axis_style()),
        );

    frame.render_widget(chart, area);
}

/// Plot download and upload byte rates on a shared, auto-scaled axis.
pub fn render_rate_chart(
    frame: &mut Frame,
    area: Rect,
    down: &RingBuffer<f64>,
    up: &RingBuffer<f64>,
) {
    let down_points = down.points();
    let up_points = up.points();

    let peak = down.max().max(up.max());
    let y_max = if peak < 1000.0 { 1000.0 } else { peak * 1.2 };

    let down_line = Dataset::default()
        .name("Down")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::DOWNLOAD))
        .data(&down_points);

    let up_line = Dataset::default()
        .name("Up")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::UPLOAD))
        .data(&up_points);

    let chart = Chart::new(vec![down_line, up_line])
        .block(panel_block("Traffic"))
        .x_axis(x_axis(down.capacity()))
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    axis_label("0".into()),
                    axis_label(fmt_rate_axis(y_max / 2.0)),
                    axis_label(fmt_rate_axis(y_max)),
                ])
                .style(theme::axis_style()),
        );

    frame.render_widget(chart, area);
}
