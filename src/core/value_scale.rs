use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// Tuning controls for value-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    /// Span substituted when every value is identical (split evenly around it).
    pub degenerate_span: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.10,
            bottom_padding_ratio: 0.10,
            degenerate_span: 2.0,
        }
    }
}

impl ValueScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "value scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }
        if !self.degenerate_span.is_finite() || self.degenerate_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale degenerate span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Vertical value axis shared by line and bar charts.
///
/// The domain is always finite with `min < max`, so pixel mapping never
/// divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    min: f64,
    max: f64,
    degenerate: bool,
}

impl ValueScale {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(
                "value scale domain must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            degenerate: false,
        })
    }

    /// Padded domain over `values` with default tuning.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        padded(values, ValueScaleTuning::default())
    }

    pub fn from_values_tuned<I>(values: I, tuning: ValueScaleTuning) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Ok(padded(values, tuning.validate()?))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    /// `max - min`; saturates to infinity for domains wider than `f64::MAX`.
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Half the domain width, finite for every finite domain.
    fn half_span(self) -> f64 {
        self.max * 0.5 - self.min * 0.5
    }

    /// `true` when the source values were all equal and a substitute span was used.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.degenerate
    }

    /// Normalized position of `value` in the domain, `0.0` at `min`.
    #[must_use]
    pub fn ratio(self, value: f64) -> f64 {
        (value * 0.5 - self.min * 0.5) / self.half_span()
    }

    /// Maps `value` to a Y pixel inside `area`, growing upward from `area.bottom()`.
    #[must_use]
    pub fn value_to_pixel(self, value: f64, area: Rect) -> f64 {
        area.bottom() - self.ratio(value) * area.height
    }

    /// Evenly spaced values from `max` down to `min`, one per horizontal grid line.
    #[must_use]
    pub fn ticks_descending(self, divisions: usize) -> Vec<f64> {
        if divisions == 0 {
            return vec![self.max];
        }
        let half_step = self.half_span() / divisions as f64;
        (0..=divisions)
            .map(|index| {
                let offset = half_step * index as f64;
                (self.max - offset - offset).max(self.min)
            })
            .collect()
    }
}

fn padded<I>(values: I, tuning: ValueScaleTuning) -> ValueScale
where
    I: IntoIterator<Item = f64>,
{
    let finite: Vec<OrderedFloat<f64>> = values
        .into_iter()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .collect();

    let (Some(min), Some(max)) = (finite.iter().min(), finite.iter().max()) else {
        return ValueScale {
            min: 0.0,
            max: 1.0,
            degenerate: false,
        };
    };
    let (min, max) = (min.0, max.0);

    let degenerate = min == max;
    let (base_min, base_max) = if degenerate {
        // Near f64::MAX a unit span vanishes in rounding; widen by a few ulps.
        let half = (tuning.degenerate_span / 2.0).max(min.abs() * f64::EPSILON * 4.0);
        (saturate(min - half), saturate(max + half))
    } else {
        (min, max)
    };

    let half_span = base_max * 0.5 - base_min * 0.5;
    ValueScale {
        min: saturate(base_min - half_span * tuning.bottom_padding_ratio * 2.0),
        max: saturate(base_max + half_span * tuning.top_padding_ratio * 2.0),
        degenerate,
    }
}

fn saturate(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{ValueScale, ValueScaleTuning};
    use crate::core::Rect;

    #[test]
    fn pads_ten_percent_each_side() {
        let scale = ValueScale::from_values([10.0, 30.0]);
        let (min, max) = scale.domain();
        assert!((min - 8.0).abs() <= 1e-12);
        assert!((max - 32.0).abs() <= 1e-12);
        assert!(!scale.is_degenerate());
    }

    #[test]
    fn constant_values_get_unit_half_span() {
        let scale = ValueScale::from_values([5.0, 5.0, 5.0]);
        assert!(scale.is_degenerate());
        assert!((scale.min() - 3.8).abs() <= 1e-12);
        assert!((scale.max() - 6.2).abs() <= 1e-12);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(scale.value_to_pixel(5.0, area).is_finite());
    }

    #[test]
    fn empty_values_fall_back_to_unit_domain() {
        let scale = ValueScale::from_values(std::iter::empty());
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn rejects_negative_padding() {
        let tuning = ValueScaleTuning {
            top_padding_ratio: -0.1,
            ..ValueScaleTuning::default()
        };
        assert!(ValueScale::from_values_tuned([1.0, 2.0], tuning).is_err());
    }

    #[test]
    fn extreme_values_keep_a_finite_domain() {
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        for values in [
            vec![-1e308, 1e308],
            vec![f64::MAX, f64::MAX],
            vec![-f64::MAX, f64::MAX, 0.0],
        ] {
            let scale = ValueScale::from_values(values.iter().copied());
            assert!(scale.min().is_finite() && scale.max().is_finite());
            assert!(scale.min() < scale.max());
            for value in values {
                let y = scale.value_to_pixel(value, area);
                assert!((0.0..=100.0).contains(&y), "{value} mapped to {y}");
            }
            assert!(scale.ticks_descending(5).iter().all(|tick| tick.is_finite()));
        }
    }

    #[test]
    fn ticks_run_from_max_to_min() {
        let scale = ValueScale::new(0.0, 100.0).expect("valid scale");
        assert_eq!(
            scale.ticks_descending(5),
            vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]
        );
    }
}
