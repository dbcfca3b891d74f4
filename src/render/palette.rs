use serde::{Deserialize, Serialize};

use crate::core::{Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Gradient, GradientStop, GradientStops};

/// Base colors cycled by `get_color_palette`.
pub const BASE_PALETTE: [&str; 10] = [
    "#4e73df", "#1cc88a", "#36b9cc", "#f6c23e", "#e74a3b", "#858796", "#5a5c69", "#fd7e14",
    "#6f42c1", "#20c997",
];

/// Parsed `BASE_PALETTE`.
#[must_use]
pub fn base_palette() -> Vec<Color> {
    BASE_PALETTE
        .iter()
        .filter_map(|hex| Color::parse_css(hex).ok())
        .collect()
}

/// `n` colors cycling the built-in base palette: `palette[i] = base[i mod k]`.
#[must_use]
pub fn get_color_palette(n: usize) -> Vec<Color> {
    cycle_palette(&base_palette(), n)
}

/// `n` colors cycling `base`. An empty base yields black entries.
#[must_use]
pub fn cycle_palette(base: &[Color], n: usize) -> Vec<Color> {
    (0..n).map(|index| palette_color(base, index)).collect()
}

/// Color at `index` in the infinite cycle over `base`.
#[must_use]
pub fn palette_color(base: &[Color], index: usize) -> Color {
    if base.is_empty() {
        return Color::BLACK;
    }
    base[index % base.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GradientDirection {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Linear gradient across the full `extent`, stop `i` at `i / (len - 1)`.
///
/// A single color produces a flat two-stop gradient.
pub fn generate_gradient(
    extent: Viewport,
    colors: &[Color],
    direction: GradientDirection,
) -> ChartResult<Gradient> {
    let stops: GradientStops = match colors {
        [] => {
            return Err(ChartError::InvalidData(
                "gradient needs at least one color".to_owned(),
            ));
        }
        [only] => [GradientStop::new(0.0, *only), GradientStop::new(1.0, *only)]
            .into_iter()
            .collect(),
        many => {
            let last = (many.len() - 1) as f64;
            many.iter()
                .enumerate()
                .map(|(index, color)| GradientStop::new(index as f64 / last, *color))
                .collect()
        }
    };

    let end = match direction {
        GradientDirection::Vertical => Point::new(0.0, extent.height_px()),
        GradientDirection::Horizontal => Point::new(extent.width_px(), 0.0),
    };
    Ok(Gradient::Linear {
        start: Point::new(0.0, 0.0),
        end,
        stops,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        BASE_PALETTE, GradientDirection, base_palette, generate_gradient, get_color_palette,
    };
    use crate::core::{Point, Viewport};
    use crate::render::{Color, Gradient};

    #[test]
    fn base_palette_parses_completely() {
        assert_eq!(base_palette().len(), BASE_PALETTE.len());
    }

    #[test]
    fn palette_cycles_past_base_length() {
        let k = BASE_PALETTE.len();
        let palette = get_color_palette(k * 2 + 3);
        assert_eq!(palette.len(), k * 2 + 3);
        for (index, color) in palette.iter().enumerate() {
            assert_eq!(*color, palette[index % k]);
        }
        assert!(get_color_palette(0).is_empty());
    }

    #[test]
    fn gradient_stops_are_evenly_spaced() {
        let colors = [Color::WHITE, Color::BLACK, Color::WHITE];
        let gradient = generate_gradient(
            Viewport::new(200, 100),
            &colors,
            GradientDirection::Horizontal,
        )
        .expect("gradient");
        let offsets: Vec<f64> = gradient.stops().iter().map(|stop| stop.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
        match gradient {
            Gradient::Linear { end, .. } => assert_eq!(end, Point::new(200.0, 0.0)),
            Gradient::Radial { .. } => panic!("expected linear gradient"),
        }
    }

    #[test]
    fn single_color_gradient_is_flat() {
        let gradient =
            generate_gradient(Viewport::new(10, 10), &[Color::BLACK], GradientDirection::Vertical)
                .expect("gradient");
        assert_eq!(gradient.stops().len(), 2);
        assert!(generate_gradient(Viewport::new(10, 10), &[], GradientDirection::Vertical).is_err());
    }
}
