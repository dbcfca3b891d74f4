use crate::core::{PIE_LABEL_RADIUS_RATIO, format_axis_value, project_slices, slice_label_anchor};
use crate::error::ChartResult;
use crate::render::{Gradient, GradientStop, Paint, Surface, TextAlign, TextStyle};

use super::chart::RenderContext;

/// Outer radius as a share of half the shorter plot side.
const PIE_RADIUS_RATIO: f64 = 0.9;
/// How far slice gradients are mixed toward white at the center.
const SLICE_CENTER_LIGHTEN: f64 = 0.3;
const SLICE_BORDER_WIDTH: f64 = 2.0;
const CENTER_TEXT_SCALE: f64 = 1.5;

/// Pie (`doughnut == false`) or doughnut slices for the first dataset.
pub(super) fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    context: &RenderContext<'_>,
    doughnut: bool,
) -> ChartResult<()> {
    let Some(dataset) = context.data.datasets.first() else {
        return Ok(());
    };
    let area = context.area;
    let theme = &context.config.theme;
    let center = area.center();
    let radius = area.width.min(area.height) / 2.0 * PIE_RADIUS_RATIO;
    let inner_radius = if doughnut {
        radius * context.options.cutout
    } else {
        0.0
    };

    let slices = project_slices(&dataset.data);
    let border = Paint::Solid(theme.slice_border);
    for slice in slices.iter().filter(|slice| slice.sweep() > 0.0) {
        let color = dataset.slice_color(context.palette, slice.index);
        let paint = Paint::Gradient(Gradient::Radial {
            center,
            inner_radius,
            outer_radius: radius,
            stops: [
                GradientStop::new(0.0, color.lighten(SLICE_CENTER_LIGHTEN)),
                GradientStop::new(1.0, color),
            ]
            .into_iter()
            .collect(),
        });

        surface.begin_path();
        if inner_radius > 0.0 {
            surface.arc(center, radius, slice.start_angle, slice.end_angle, false);
            surface.arc(center, inner_radius, slice.end_angle, slice.start_angle, true);
        } else {
            surface.move_to(center);
            surface.arc(center, radius, slice.start_angle, slice.end_angle, false);
        }
        surface.close_path();
        surface.fill(&paint)?;
        surface.stroke(&border, SLICE_BORDER_WIDTH)?;
    }

    if context.options.show_percentages {
        let label_radius = if doughnut {
            (radius + inner_radius) / 2.0
        } else {
            radius * PIE_LABEL_RADIUS_RATIO
        };
        let style = TextStyle::new(
            context.config.font_size_px,
            theme.percentage_text,
            TextAlign::Center,
        )
        .bold();
        for slice in slices.iter().filter(|slice| slice.fraction > 0.0) {
            let percentage = (slice.percentage() * 10.0).round() / 10.0;
            surface.fill_text(
                &format!("{}%", format_axis_value(percentage)),
                slice_label_anchor(center, slice, label_radius),
                &style,
            )?;
        }
    }

    if doughnut {
        if let Some(text) = context.options.center_text.as_deref() {
            let style = TextStyle::new(
                context.config.font_size_px * CENTER_TEXT_SCALE,
                theme.center_text,
                TextAlign::Center,
            )
            .bold();
            surface.fill_text(text, center, &style)?;
        }
    }
    Ok(())
}
