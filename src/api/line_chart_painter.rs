use std::f64::consts::TAU;

use tracing::debug;

use crate::core::{
    ValueScale, baseline_polygon, category_grid_xs, category_x, project_line_points,
};
use crate::error::ChartResult;
use crate::render::{Paint, Surface, trace_polygon, trace_polyline};

use super::chart::RenderContext;
use super::grid_painter;

/// Alpha applied to area fills under lines and inside radar polygons.
pub(super) const AREA_FILL_ALPHA: f64 = 0.2;
pub(super) const DEFAULT_POINT_RADIUS: f64 = 4.0;
pub(super) const DEFAULT_LINE_WIDTH: f64 = 2.0;

pub(super) fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
) -> ChartResult<()> {
    let data = context.data;
    let area = context.area;
    let label_count = data.labels.len();

    let scale = ValueScale::from_values_tuned(data.values(), context.config.scale_tuning)?;
    if scale.is_degenerate() {
        debug!(min = scale.min(), max = scale.max(), "line chart values are constant");
    }

    if context.options.show_grid {
        let dividers = category_grid_xs(area, label_count);
        grid_painter::paint_grid(surface, context, scale, &dividers)?;
    }
    grid_painter::paint_category_labels(
        surface,
        context,
        (0..label_count).map(|index| category_x(area, index, label_count)),
    )?;

    for (index, dataset) in data.datasets.iter().enumerate() {
        let color = dataset.series_color(context.palette, index);
        let points = project_line_points(&dataset.data, label_count, area, scale);
        if points.is_empty() {
            continue;
        }

        if dataset.fill {
            let fill = dataset
                .background_color
                .as_ref()
                .and_then(|spec| spec.primary())
                .unwrap_or(color)
                .with_alpha(AREA_FILL_ALPHA);
            surface.begin_path();
            trace_polygon(surface, &baseline_polygon(&points, area));
            surface.fill(&Paint::Solid(fill))?;
        }

        let line_width = dataset.border_width.unwrap_or(DEFAULT_LINE_WIDTH);
        if points.len() > 1 && line_width > 0.0 {
            surface.begin_path();
            trace_polyline(surface, &points);
            surface.stroke(&Paint::Solid(color), line_width)?;
        }

        let radius = dataset.point_radius.unwrap_or(DEFAULT_POINT_RADIUS);
        if context.options.show_points && radius > 0.0 {
            for point in &points {
                surface.begin_path();
                surface.arc(*point, radius, 0.0, TAU, false);
                surface.fill(&Paint::Solid(color))?;
            }
        }
    }
    Ok(())
}
