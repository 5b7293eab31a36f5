//! Color tokens and semantic style helpers for the dashboard.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Red;
pub const WARNING: Color = Color::Yellow;
pub const NEUTRAL: Color = Color::Magenta;
pub const MUTED: Color = Color::DarkGray;

/// Rotating palette for multi-series charts (buckets, tranches).
pub const SERIES: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::LightRed,
];

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn series_color(i: usize) -> Color {
    SERIES[i % SERIES.len()]
}

/// Color for a signed value (returns, margins).
pub fn sign_color(value: f64) -> Color {
    if value >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

/// Color for a compliance flag value.
pub fn flag_color(label: &str) -> Color {
    match label.trim().to_ascii_uppercase().as_str() {
        "OK" => POSITIVE,
        "FLAG" => NEGATIVE,
        "N/A" | "NA" | "" => MUTED,
        _ => WARNING,
    }
}

/// Color for a subordination ratio against its contractual threshold:
/// breach is negative, a thin margin warns.
pub fn margin_color(ratio: f64, threshold: f64) -> Color {
    if ratio < threshold {
        NEGATIVE
    } else if ratio < threshold * 1.1 {
        WARNING
    } else {
        POSITIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_color_splits_on_zero() {
        assert_eq!(sign_color(0.01), POSITIVE);
        assert_eq!(sign_color(0.0), POSITIVE);
        assert_eq!(sign_color(-0.01), NEGATIVE);
    }

    #[test]
    fn flag_color_maps_known_labels() {
        assert_eq!(flag_color("OK"), POSITIVE);
        assert_eq!(flag_color("flag"), NEGATIVE);
        assert_eq!(flag_color("N/A"), MUTED);
        assert_eq!(flag_color("Watch"), WARNING);
    }

    #[test]
    fn margin_color_flags_breach_and_thin_margin() {
        assert_eq!(margin_color(0.20, 0.25), NEGATIVE);
        assert_eq!(margin_color(0.26, 0.25), WARNING);
        assert_eq!(margin_color(0.40, 0.25), POSITIVE);
    }

    #[test]
    fn series_palette_wraps() {
        assert_eq!(series_color(0), series_color(SERIES.len()));
    }
}
