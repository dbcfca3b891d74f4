use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, palette_color};

/// Dataset color: one color for the whole series, or one color per item
/// (used by pie and doughnut slices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(Color),
    PerItem(Vec<Color>),
}

impl ColorSpec {
    /// Color for item `index`; per-item lists cycle when shorter than the data.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<Color> {
        match self {
            Self::Single(color) => Some(*color),
            Self::PerItem(colors) if colors.is_empty() => None,
            Self::PerItem(colors) => Some(colors[index % colors.len()]),
        }
    }

    /// The series-level color: the single color or the first per-item entry.
    #[must_use]
    pub fn primary(&self) -> Option<Color> {
        self.color_at(0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Single(color) => color.validate(),
            Self::PerItem(colors) => colors.iter().try_for_each(|color| color.validate()),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Single(color)
    }
}

impl From<Vec<Color>> for ColorSpec {
    fn from(colors: Vec<Color>) -> Self {
        Self::PerItem(colors)
    }
}

/// One named series of values aligned with the chart labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(default)]
    pub fill: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            ..Self::default()
        }
    }

    /// Builds a dataset from exact decimal values such as stored grades.
    pub fn from_decimals(label: impl Into<String>, values: &[Decimal]) -> ChartResult<Self> {
        let data = values
            .iter()
            .map(|value| {
                value.to_f64().ok_or_else(|| {
                    ChartError::InvalidData(format!("decimal `{value}` is not representable"))
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self::new(label, data))
    }

    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = Some(width);
        self
    }

    /// Stroke/series color: explicit border color, then background color,
    /// then the palette entry for the dataset position.
    #[must_use]
    pub fn series_color(&self, palette: &[Color], dataset_index: usize) -> Color {
        self.border_color
            .or_else(|| self.background_color.as_ref().and_then(ColorSpec::primary))
            .unwrap_or_else(|| palette_color(palette, dataset_index))
    }

    /// Fill color for the series body (bars, areas): background color first.
    #[must_use]
    pub fn fill_color(&self, palette: &[Color], dataset_index: usize) -> Color {
        self.background_color
            .as_ref()
            .and_then(ColorSpec::primary)
            .or(self.border_color)
            .unwrap_or_else(|| palette_color(palette, dataset_index))
    }

    /// Color of pie/doughnut slice `slice_index`.
    #[must_use]
    pub fn slice_color(&self, palette: &[Color], slice_index: usize) -> Color {
        match &self.background_color {
            Some(spec @ ColorSpec::PerItem(_)) => spec
                .color_at(slice_index)
                .unwrap_or_else(|| palette_color(palette, slice_index)),
            _ => palette_color(palette, slice_index),
        }
    }

    fn validate(&self, dataset: usize, expected: usize) -> ChartResult<()> {
        if self.data.len() != expected {
            return Err(ChartError::DataShapeMismatch {
                dataset,
                expected,
                actual: self.data.len(),
            });
        }
        if let Some(position) = self.data.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "dataset {dataset} value at index {position} must be finite"
            )));
        }
        for (name, value) in [
            ("pointRadius", self.point_radius),
            ("borderWidth", self.border_width),
        ] {
            if value.is_some_and(|value| !value.is_finite() || value < 0.0) {
                return Err(ChartError::InvalidData(format!(
                    "dataset {dataset} `{name}` must be finite and >= 0"
                )));
            }
        }
        if let Some(color) = self.border_color {
            color.validate().map_err(|err| {
                ChartError::InvalidData(format!("dataset {dataset} `borderColor`: {err}"))
            })?;
        }
        if let Some(spec) = &self.background_color {
            spec.validate().map_err(|err| {
                ChartError::InvalidData(format!("dataset {dataset} `backgroundColor`: {err}"))
            })?;
        }
        Ok(())
    }
}

/// Category labels plus the datasets plotted against them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    #[must_use]
    pub fn new<L, S>(labels: L) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart data json: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart data json: {e}"))
        })
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.is_empty()
    }

    /// Every value across every dataset.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter().copied())
    }

    /// Checks that every dataset has one finite value per label.
    pub fn validate(&self) -> ChartResult<()> {
        let expected = self.labels.len();
        for (index, dataset) in self.datasets.iter().enumerate() {
            dataset.validate(index, expected)?;
        }
        Ok(())
    }
}
