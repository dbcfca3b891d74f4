use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// First slice starts at 12 o'clock.
pub const SLICE_START_ANGLE: f64 = -FRAC_PI_2;
/// Percentage labels on a full pie sit at this share of the outer radius.
pub const PIE_LABEL_RADIUS_RATIO: f64 = 0.7;

/// Angular extent of one pie/doughnut slice, radians, clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceGeometry {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Share of the total in `[0, 1]`.
    pub fraction: f64,
}

impl SliceGeometry {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep() / 2.0
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Lays slices out consecutively from `SLICE_START_ANGLE` in input order.
///
/// Negative and non-finite values count as zero. When the total is zero every
/// slice has zero sweep.
#[must_use]
pub fn project_slices(values: &[f64]) -> Vec<SliceGeometry> {
    let sanitized = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    // Shares are summed relative to the largest value so huge inputs cannot
    // overflow the total.
    let peak = values.iter().copied().map(sanitized).fold(0.0, f64::max);
    let share = |value: f64| if peak > 0.0 { sanitized(value) / peak } else { 0.0 };
    let total: f64 = values.iter().copied().map(share).sum();

    let mut start_angle = SLICE_START_ANGLE;
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let fraction = if total > 0.0 { share(value) / total } else { 0.0 };
            let end_angle = start_angle + fraction * TAU;
            let slice = SliceGeometry {
                index,
                value,
                start_angle,
                end_angle,
                fraction,
            };
            start_angle = end_angle;
            slice
        })
        .collect()
}

/// Anchor for a slice label at `radius` along the slice's mid-angle.
#[must_use]
pub fn slice_label_anchor(center: Point, slice: &SliceGeometry, radius: f64) -> Point {
    center.polar_offset(radius, slice.mid_angle())
}
