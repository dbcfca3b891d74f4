use std::f64::consts::TAU;

use crate::core::{RadarLayout, project_radar_vertices, radar_max_value};
use crate::error::ChartResult;
use crate::render::{Paint, Surface, TextAlign, TextStyle, trace_polygon};

use super::chart::RenderContext;
use super::line_chart_painter::{AREA_FILL_ALPHA, DEFAULT_LINE_WIDTH, DEFAULT_POINT_RADIUS};

const GRID_LINE_WIDTH: f64 = 1.0;
/// Horizontal cosine band in which axis labels are centered instead of
/// aligned away from the center.
const LABEL_CENTER_BAND: f64 = 0.1;

pub(super) fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
) -> ChartResult<()> {
    let data = context.data;
    let axis_count = data.labels.len();
    if axis_count == 0 {
        return Ok(());
    }
    let layout = RadarLayout::new(context.area, axis_count);
    let max_value = radar_max_value(data.datasets.iter().map(|d| d.data.as_slice()));
    let theme = &context.config.theme;

    if context.options.show_grid {
        let grid = Paint::Solid(theme.grid);
        for radius in layout.ring_radii(context.config.radar_rings) {
            surface.begin_path();
            surface.arc(layout.center, radius, 0.0, TAU, false);
            surface.stroke(&grid, GRID_LINE_WIDTH)?;
        }
        for index in 0..axis_count {
            surface.begin_path();
            surface.move_to(layout.center);
            surface.line_to(layout.axis_end(index));
            surface.stroke(&grid, GRID_LINE_WIDTH)?;
        }
    }

    for (index, label) in data.labels.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        let cos = layout.axis_angle(index).cos();
        let align = if cos > LABEL_CENTER_BAND {
            TextAlign::Left
        } else if cos < -LABEL_CENTER_BAND {
            TextAlign::Right
        } else {
            TextAlign::Center
        };
        let style = TextStyle::new(context.config.font_size_px, theme.axis_text, align);
        surface.fill_text(label, layout.label_anchor(index), &style)?;
    }

    for (index, dataset) in data.datasets.iter().enumerate() {
        let color = dataset.series_color(context.palette, index);
        let vertices = project_radar_vertices(&dataset.data, &layout, max_value);
        if vertices.is_empty() {
            continue;
        }

        surface.begin_path();
        trace_polygon(surface, &vertices);
        if dataset.fill {
            let fill = dataset
                .background_color
                .as_ref()
                .and_then(|spec| spec.primary())
                .unwrap_or(color)
                .with_alpha(AREA_FILL_ALPHA);
            surface.fill(&Paint::Solid(fill))?;
        }
        let line_width = dataset.border_width.unwrap_or(DEFAULT_LINE_WIDTH);
        if line_width > 0.0 {
            surface.stroke(&Paint::Solid(color), line_width)?;
        }

        let radius = dataset.point_radius.unwrap_or(DEFAULT_POINT_RADIUS);
        if context.options.show_points && radius > 0.0 {
            for vertex in &vertices {
                surface.begin_path();
                surface.arc(*vertex, radius, 0.0, TAU, false);
                surface.fill(&Paint::Solid(color))?;
            }
        }
    }
    Ok(())
}
