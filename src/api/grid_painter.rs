use crate::core::{Point, ValueScale, format_axis_value, value_grid_lines};
use crate::error::ChartResult;
use crate::render::{Paint, Surface, TextAlign, TextStyle};

use super::chart::RenderContext;

const GRID_LINE_WIDTH: f64 = 1.0;
/// Gap between the plot's left edge and right-aligned value labels.
const VALUE_LABEL_GAP: f64 = 6.0;

/// Horizontal value grid with axis labels plus vertical category dividers at
/// `divider_xs`.
pub(super) fn paint_grid<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
    scale: ValueScale,
    divider_xs: &[f64],
) -> ChartResult<()> {
    let area = context.area;
    let theme = &context.config.theme;
    let paint = Paint::Solid(theme.grid);
    let label_style = TextStyle::new(context.config.font_size_px, theme.axis_text, TextAlign::Right);

    for line in value_grid_lines(area, scale, context.config.grid_divisions) {
        surface.begin_path();
        surface.move_to(Point::new(area.x, line.y));
        surface.line_to(Point::new(area.right(), line.y));
        surface.stroke(&paint, GRID_LINE_WIDTH)?;
        surface.fill_text(
            &format_axis_value(line.value),
            Point::new(area.x - VALUE_LABEL_GAP, line.y),
            &label_style,
        )?;
    }

    for &x in divider_xs {
        surface.begin_path();
        surface.move_to(Point::new(x, area.y));
        surface.line_to(Point::new(x, area.bottom()));
        surface.stroke(&paint, GRID_LINE_WIDTH)?;
    }
    Ok(())
}

/// Category names centered under the plot at the given X positions.
pub(super) fn paint_category_labels<S, I>(
    surface: &mut S,
    context: &RenderContext<'_>,
    xs: I,
) -> ChartResult<()>
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = f64>,
{
    let style = TextStyle::new(
        context.config.font_size_px,
        context.config.theme.axis_text,
        TextAlign::Center,
    );
    let y = context.area.bottom() + context.options.padding / 2.0;
    for (label, x) in context.data.labels.iter().zip(xs) {
        if label.is_empty() {
            continue;
        }
        surface.fill_text(label, Point::new(x, y), &style)?;
    }
    Ok(())
}
