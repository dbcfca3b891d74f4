use serde::{Deserialize, Serialize};

use crate::core::{Rect, Viewport};

/// Drawable rectangle inside `viewport` after `padding` on every side and an
/// optional legend strip reserved along the bottom edge.
#[must_use]
pub fn compute_chart_area(viewport: Viewport, padding: f64, legend_strip: Option<f64>) -> Rect {
    let padding = padding.max(0.0);
    let legend = legend_strip.unwrap_or(0.0).max(0.0);
    Rect::new(
        padding,
        padding,
        (viewport.width_px() - padding * 2.0).max(0.0),
        (viewport.height_px() - padding * 2.0 - legend).max(0.0),
    )
}

/// Sizing of one legend row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendMetrics {
    pub swatch_size: f64,
    /// Gap between a swatch and its label.
    pub label_gap: f64,
    /// Gap between consecutive entries.
    pub item_gap: f64,
}

impl Default for LegendMetrics {
    fn default() -> Self {
        Self {
            swatch_size: 12.0,
            label_gap: 6.0,
            item_gap: 16.0,
        }
    }
}

/// Placement of one legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendEntryLayout {
    pub index: usize,
    pub swatch: Rect,
    pub label_x: f64,
    /// Vertical center of the label text.
    pub label_y: f64,
}

/// Lays out a single horizontally centered row of `(swatch, label)` pairs in
/// the strip `[strip_top, strip_top + strip_height)`.
///
/// `label_widths[i]` is the measured width of entry `i`. Entries that would
/// overflow `surface_width` are dropped from the end.
#[must_use]
pub fn layout_legend(
    surface_width: f64,
    strip_top: f64,
    strip_height: f64,
    label_widths: &[f64],
    metrics: LegendMetrics,
) -> Vec<LegendEntryLayout> {
    let entry_width =
        |label_width: f64| metrics.swatch_size + metrics.label_gap + label_width.max(0.0);

    let mut total = 0.0;
    let mut fitting = 0;
    for &label_width in label_widths {
        let gap = if fitting == 0 { 0.0 } else { metrics.item_gap };
        let next = total + gap + entry_width(label_width);
        if next > surface_width {
            break;
        }
        total = next;
        fitting += 1;
    }

    let center_y = strip_top + strip_height / 2.0;
    let mut x = (surface_width - total) / 2.0;
    let mut entries = Vec::with_capacity(fitting);
    for (index, &label_width) in label_widths.iter().take(fitting).enumerate() {
        let swatch = Rect::new(
            x,
            center_y - metrics.swatch_size / 2.0,
            metrics.swatch_size,
            metrics.swatch_size,
        );
        entries.push(LegendEntryLayout {
            index,
            swatch,
            label_x: x + metrics.swatch_size + metrics.label_gap,
            label_y: center_y,
        });
        x += entry_width(label_width) + metrics.item_gap;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::{LegendMetrics, compute_chart_area, layout_legend};
    use crate::core::{Rect, Viewport};

    #[test]
    fn chart_area_reserves_legend_strip() {
        let area = compute_chart_area(Viewport::new(400, 300), 20.0, Some(40.0));
        assert_eq!(area, Rect::new(20.0, 20.0, 360.0, 220.0));

        let without = compute_chart_area(Viewport::new(400, 300), 20.0, None);
        assert_eq!(without.height, 260.0);
    }

    #[test]
    fn chart_area_never_goes_negative() {
        let area = compute_chart_area(Viewport::new(30, 30), 20.0, Some(40.0));
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 0.0);
        assert!(area.is_empty());
    }

    #[test]
    fn legend_row_is_centered() {
        let metrics = LegendMetrics::default();
        let entries = layout_legend(200.0, 100.0, 40.0, &[20.0, 20.0], metrics);
        assert_eq!(entries.len(), 2);
        // each entry is 12 + 6 + 20 = 38 wide, plus a 16px gap => 92 total.
        assert_eq!(entries[0].swatch.x, 54.0);
        assert_eq!(entries[1].swatch.x, 54.0 + 38.0 + 16.0);
        assert_eq!(entries[0].label_y, 120.0);
    }

    #[test]
    fn legend_drops_entries_that_overflow() {
        let entries = layout_legend(100.0, 0.0, 40.0, &[40.0, 40.0, 40.0], LegendMetrics::default());
        assert_eq!(entries.len(), 1);
    }
}
