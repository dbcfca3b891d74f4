use serde::{Deserialize, Serialize};

use crate::core::{Rect, ValueScale};

/// Horizontal grid line annotated with the value it represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueGridLine {
    pub y: f64,
    pub value: f64,
}

/// X positions of the category boundaries: `label_count - 1` divisions
/// spanning the full width of `area`.
#[must_use]
pub fn category_grid_xs(area: Rect, label_count: usize) -> Vec<f64> {
    if label_count < 2 {
        return Vec::new();
    }
    let divisions = (label_count - 1) as f64;
    (0..label_count)
        .map(|index| area.x + area.width * index as f64 / divisions)
        .collect()
}

/// X positions of the band edges for `label_count` equal-width category
/// bands, as used by grouped bars: `label_count + 1` dividers from the left
/// edge of `area` to its right edge.
#[must_use]
pub fn category_band_xs(area: Rect, label_count: usize) -> Vec<f64> {
    if label_count == 0 {
        return Vec::new();
    }
    let bands = label_count as f64;
    (0..=label_count)
        .map(|index| area.x + area.width * index as f64 / bands)
        .collect()
}

/// Horizontal grid lines from the top of `area` down to its bottom.
#[must_use]
pub fn value_grid_lines(area: Rect, scale: ValueScale, divisions: usize) -> Vec<ValueGridLine> {
    let ticks = scale.ticks_descending(divisions);
    let denominator = divisions.max(1) as f64;
    ticks
        .into_iter()
        .enumerate()
        .map(|(index, value)| ValueGridLine {
            y: area.y + area.height * index as f64 / denominator,
            value,
        })
        .collect()
}

/// Compact axis label: integers without decimals, fractions trimmed to two
/// places, thousands and millions abbreviated.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        return format!("{}M", trim_decimals(value / 1_000_000.0, 1));
    }
    if magnitude >= 1_000.0 {
        return format!("{}k", trim_decimals(value / 1_000.0, 1));
    }
    trim_decimals(value, 2)
}

fn trim_decimals(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    };
    // "-0" shows up for tiny negative values after rounding.
    if text == "-0" { "0".to_owned() } else { text }
}
