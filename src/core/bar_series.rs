use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Share of a group's width taken by its bars.
pub const BAR_GROUP_FILL_RATIO: f64 = 0.8;
/// Share of a group's width left before its first bar.
pub const BAR_GROUP_SPACING_RATIO: f64 = 0.1;

/// Deterministic bar geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub dataset: usize,
    pub category: usize,
    pub value: f64,
    pub x: f64,
    /// Top edge; bars grow upward from `area.bottom()`.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Projects grouped bars: one group per category, one bar per dataset.
///
/// Bar height is `value / max_value * area.height`. Negative values and a
/// non-positive `max_value` yield zero-height bars.
#[must_use]
pub fn project_bars(
    datasets: &[&[f64]],
    label_count: usize,
    area: Rect,
    max_value: f64,
) -> Vec<BarGeometry> {
    if label_count == 0 || datasets.is_empty() {
        return Vec::new();
    }

    let group_width = area.width / label_count as f64;
    let bar_width = group_width / datasets.len() as f64 * BAR_GROUP_FILL_RATIO;
    let spacing = group_width * BAR_GROUP_SPACING_RATIO;

    let mut bars = Vec::with_capacity(label_count * datasets.len());
    for (dataset, values) in datasets.iter().enumerate() {
        for (category, &value) in values.iter().take(label_count).enumerate() {
            let height = if max_value > 0.0 {
                (value.max(0.0) / max_value * area.height).min(area.height)
            } else {
                0.0
            };
            let x = area.x + group_width * category as f64 + spacing + bar_width * dataset as f64;
            bars.push(BarGeometry {
                dataset,
                category,
                value,
                x,
                y: area.bottom() - height,
                width: bar_width,
                height,
            });
        }
    }
    bars
}

/// Horizontal center of category group `index`.
#[must_use]
pub fn group_center_x(area: Rect, index: usize, label_count: usize) -> f64 {
    if label_count == 0 {
        return area.center().x;
    }
    let group_width = area.width / label_count as f64;
    area.x + group_width * (index as f64 + 0.5)
}
