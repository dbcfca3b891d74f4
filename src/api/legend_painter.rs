use crate::core::{Point, layout_legend};
use crate::error::ChartResult;
use crate::render::{Color, Paint, Surface, TextAlign, TextStyle};

use super::ChartKind;
use super::chart::RenderContext;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Datasets for line, bar and radar charts; slices of the first dataset for
/// pie and doughnut charts.
pub(super) fn legend_entries(kind: ChartKind, context: &RenderContext<'_>) -> Vec<LegendEntry> {
    let data = context.data;
    if kind.is_sliced() {
        let Some(dataset) = data.datasets.first() else {
            return Vec::new();
        };
        return data
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| LegendEntry {
                label: label.clone(),
                color: dataset.slice_color(context.palette, index),
            })
            .collect();
    }

    data.datasets
        .iter()
        .enumerate()
        .map(|(index, dataset)| LegendEntry {
            label: dataset.label.clone(),
            color: match kind {
                ChartKind::Bar => dataset.fill_color(context.palette, index),
                _ => dataset.series_color(context.palette, index),
            },
        })
        .collect()
}

/// Single centered row in the strip reserved at the bottom of the surface.
pub(super) fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
    entries: &[LegendEntry],
) -> ChartResult<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let config = context.config;
    let size = surface.size();
    let strip_height = config.legend_height_px;
    let strip_top = size.height_px() - strip_height;

    let widths: Vec<f64> = entries
        .iter()
        .map(|entry| surface.measure_text(&entry.label, config.font_size_px))
        .collect();
    let placed = layout_legend(size.width_px(), strip_top, strip_height, &widths, config.legend);

    let style = TextStyle::new(config.font_size_px, config.theme.legend_text, TextAlign::Left);
    for slot in placed {
        let entry = &entries[slot.index];
        surface.fill_rect(slot.swatch, &Paint::Solid(entry.color))?;
        if !entry.label.is_empty() {
            surface.fill_text(
                &entry.label,
                Point::new(slot.label_x, slot.label_y),
                &style,
            )?;
        }
    }
    Ok(())
}
