use tracing::debug;

use crate::core::{
    Point, ValueScale, category_band_xs, format_axis_value, group_center_x, project_bars,
};
use crate::error::ChartResult;
use crate::render::{Gradient, GradientStop, Paint, Surface, TextAlign, TextStyle, trace_polygon};

use super::chart::RenderContext;
use super::grid_painter;

/// How far the top of each bar gradient is mixed toward white.
const BAR_HIGHLIGHT_LIGHTEN: f64 = 0.3;
const BAR_HIGHLIGHT_ALPHA: f64 = 0.7;
/// Gap between a bar top and its value label.
const VALUE_LABEL_OFFSET: f64 = 8.0;

/// Grouped vertical bars growing from the plot bottom.
///
/// Heights are measured against the padded maximum of all values, and the
/// value grid is drawn over `[0, max]` so its labels line up with the bars.
pub(super) fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
) -> ChartResult<()> {
    let data = context.data;
    let area = context.area;
    let label_count = data.labels.len();

    let padded = ValueScale::from_values_tuned(data.values(), context.config.scale_tuning)?;
    let max_value = padded.max();
    let grid_scale = if max_value > 0.0 {
        ValueScale::new(0.0, max_value)?
    } else {
        debug!(max_value, "bar chart has no positive values");
        padded
    };

    if context.options.show_grid {
        let dividers = category_band_xs(area, label_count);
        grid_painter::paint_grid(surface, context, grid_scale, &dividers)?;
    }
    grid_painter::paint_category_labels(
        surface,
        context,
        (0..label_count).map(|index| group_center_x(area, index, label_count)),
    )?;

    let series: Vec<&[f64]> = data.datasets.iter().map(|d| d.data.as_slice()).collect();
    let value_style = TextStyle::new(
        context.config.font_size_px,
        context.config.theme.value_text,
        TextAlign::Center,
    );

    for bar in project_bars(&series, label_count, area, max_value) {
        let dataset = &data.datasets[bar.dataset];
        let base = dataset.fill_color(context.palette, bar.dataset);
        let highlight = base
            .lighten(BAR_HIGHLIGHT_LIGHTEN)
            .with_alpha(base.alpha * BAR_HIGHLIGHT_ALPHA);
        let gradient = Gradient::Linear {
            start: Point::new(bar.x, area.bottom()),
            end: Point::new(bar.x, bar.y),
            stops: [GradientStop::new(0.0, base), GradientStop::new(1.0, highlight)]
                .into_iter()
                .collect(),
        };
        surface.fill_rect(bar.rect(), &Paint::Gradient(gradient))?;

        if let (Some(border), Some(width)) = (dataset.border_color, dataset.border_width) {
            if width > 0.0 && bar.height > 0.0 {
                let rect = bar.rect();
                surface.begin_path();
                trace_polygon(
                    surface,
                    &[
                        Point::new(rect.x, rect.y),
                        Point::new(rect.right(), rect.y),
                        Point::new(rect.right(), rect.bottom()),
                        Point::new(rect.x, rect.bottom()),
                    ],
                );
                surface.stroke(&Paint::Solid(border), width)?;
            }
        }

        if context.options.show_values {
            surface.fill_text(
                &format_axis_value(bar.value),
                Point::new(bar.center_x(), bar.y - VALUE_LABEL_OFFSET),
                &value_style,
            )?;
        }
    }
    Ok(())
}
