use std::f64::consts::{FRAC_PI_2, TAU};

use crate::core::{Point, Rect};

/// Room kept between the outer ring and the area edge for axis labels.
pub const RADAR_LABEL_MARGIN: f64 = 30.0;
/// Distance of axis labels beyond the outer ring.
pub const RADAR_LABEL_OFFSET: f64 = 15.0;

/// Polar frame shared by the radar grid and its dataset polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    pub center: Point,
    pub outer_radius: f64,
    pub axis_count: usize,
}

impl RadarLayout {
    #[must_use]
    pub fn new(area: Rect, axis_count: usize) -> Self {
        Self {
            center: area.center(),
            outer_radius: (area.width.min(area.height) / 2.0 - RADAR_LABEL_MARGIN).max(0.0),
            axis_count,
        }
    }

    /// Angle of axis `index`; axis 0 points straight up.
    #[must_use]
    pub fn axis_angle(&self, index: usize) -> f64 {
        if self.axis_count == 0 {
            return -FRAC_PI_2;
        }
        -FRAC_PI_2 + index as f64 * TAU / self.axis_count as f64
    }

    #[must_use]
    pub fn axis_end(&self, index: usize) -> Point {
        self.center
            .polar_offset(self.outer_radius, self.axis_angle(index))
    }

    #[must_use]
    pub fn label_anchor(&self, index: usize) -> Point {
        self.center.polar_offset(
            self.outer_radius + RADAR_LABEL_OFFSET,
            self.axis_angle(index),
        )
    }

    /// Radii of `rings` evenly spaced concentric grid circles, innermost first.
    #[must_use]
    pub fn ring_radii(&self, rings: usize) -> Vec<f64> {
        (1..=rings)
            .map(|ring| self.outer_radius * ring as f64 / rings as f64)
            .collect()
    }

    /// Vertex for `value` on axis `index`, scaled against `max_value`.
    #[must_use]
    pub fn vertex(&self, index: usize, value: f64, max_value: f64) -> Point {
        let ratio = if max_value > 0.0 && value.is_finite() {
            value.max(0.0) / max_value
        } else {
            0.0
        };
        self.center
            .polar_offset(ratio * self.outer_radius, self.axis_angle(index))
    }
}

/// Projects one dataset into closed-polygon vertices, one per axis.
#[must_use]
pub fn project_radar_vertices(values: &[f64], layout: &RadarLayout, max_value: f64) -> Vec<Point> {
    values
        .iter()
        .take(layout.axis_count)
        .enumerate()
        .map(|(index, &value)| layout.vertex(index, value, max_value))
        .collect()
}

/// Largest value across all datasets; non-positive maxima collapse to `1.0`.
#[must_use]
pub fn radar_max_value<'a, I>(datasets: I) -> f64
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let max = datasets
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .filter(|value| value.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 { max } else { 1.0 }
}
