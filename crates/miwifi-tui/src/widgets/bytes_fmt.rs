//! Human-readable byte, rate and duration formatting helpers.

use std::time::Duration;

use bytesize::ByteSize;

/// Format a byte count with SI units (e.g. "1.9 GB").
pub fn fmt_bytes(bytes: u64) -> String {
    ByteSize::b(bytes).to_string_as(true)
}

/// Format a byte rate as "1.2 MB/s".
pub fn fmt_rate(bytes_per_sec: u64) -> String {
    format!("{}/s", fmt_bytes(bytes_per_sec))
}

/// Compact rate for chart Y-axis labels: "500K", "12M", "1.2G".
pub fn fmt_rate_axis(bytes_per_sec: f64) -> String {
    if bytes_per_sec >= 1_000_000_000.0 {
        format!("{:.1}G", bytes_per_sec / 1_000_000_000.0)
    } else if bytes_per_sec >= 1_000_000.0 {
        format!("{:.0}M", bytes_per_sec / 1_000_000.0)
    } else if bytes_per_sec >= 1_000.0 {
        format!("{:.0}K", bytes_per_sec / 1_000.0)
    } else {
        format!("{bytes_per_sec:.0}")
    }
}

/// Format the router's `upTime` (seconds, possibly fractional) as
/// "20h 43m 4s". Unparseable input is returned unchanged.
pub fn fmt_uptime(raw: &str) -> String {
    let whole = raw.trim().split('.').next().unwrap_or_default();
    match whole.parse::<u64>() {
        Ok(secs) => humantime::format_duration(Duration::from_secs(secs)).to_string(),
        Err(_) => raw.to_owned(),
    }
}

/// Fraction in `[0, 1]` as "12.34%".
pub fn fmt_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Horizontal bar `width` cells wide filled to `percent` (0–100).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn fmt_traffic_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bytes_use_si_units() {
        assert_eq!(fmt_bytes(0), "0 B");
        assert_eq!(fmt_rate(1_500_000), "1.5 MB/s");
    }

    #[test]
    fn axis_labels() {
        assert_eq!(fmt_rate_axis(0.0), "0");
        assert_eq!(fmt_rate_axis(500_000.0), "500K");
        assert_eq!(fmt_rate_axis(12_000_000.0), "12M");
        assert_eq!(fmt_rate_axis(1_200_000_000.0), "1.2G");
    }

    #[test]
    fn uptime_from_fractional_seconds() {
        assert_eq!(fmt_uptime("74584.99"), "20h 43m 4s");
        assert_eq!(fmt_uptime("59"), "59s");
        assert_eq!(fmt_uptime("unknown"), "unknown");
    }

    #[test]
    fn bar_fill() {
        assert_eq!(fmt_traffic_bar(50.0, 4), "██░░");
        assert_eq!(fmt_traffic_bar(0.0, 3), "░░░");
        assert_eq!(fmt_traffic_bar(150.0, 2), "██");
        assert_eq!(fmt_percent(0.1234), "12.34%");
    }
}
