use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};

use super::EngineConfig;

/// Upper bound for the doughnut hole as a share of the outer radius.
pub const MAX_CUTOUT_RATIO: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
}

impl ChartKind {
    pub const ALL: [Self; 5] = [
        Self::Line,
        Self::Bar,
        Self::Pie,
        Self::Doughnut,
        Self::Radar,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Radar => "radar",
        }
    }

    /// Pie and doughnut: one dataset split into angular slices.
    #[must_use]
    pub const fn is_sliced(self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ChartError::UnsupportedChartType(name.to_owned()))
    }
}

/// Options as supplied by the caller. Every field is optional and falls back
/// to the per-kind default on `resolve`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Doughnut hole size as a percentage string, e.g. `"60%"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_percentages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_points: Option<bool>,
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart options json: {e}"))
        })
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = Some(responsive);
        self
    }

    #[must_use]
    pub fn with_show_grid(mut self, show: bool) -> Self {
        self.show_grid = Some(show);
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = Some(show);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    #[must_use]
    pub fn with_cutout(mut self, cutout: impl Into<String>) -> Self {
        self.cutout = Some(cutout.into());
        self
    }

    #[must_use]
    pub fn with_center_text(mut self, text: impl Into<String>) -> Self {
        self.center_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_show_percentages(mut self, show: bool) -> Self {
        self.show_percentages = Some(show);
        self
    }

    #[must_use]
    pub fn with_show_values(mut self, show: bool) -> Self {
        self.show_values = Some(show);
        self
    }

    #[must_use]
    pub fn with_show_points(mut self, show: bool) -> Self {
        self.show_points = Some(show);
        self
    }

    /// Applies per-kind defaults and engine config to the caller's options.
    ///
    /// Line and bar charts default to grid plus legend, pie and doughnut to a
    /// legend only, radar to grid, legend and vertex markers.
    #[must_use]
    pub fn resolve(&self, kind: ChartKind, config: &EngineConfig) -> ResolvedOptions {
        let defaults = KindDefaults::for_kind(kind);
        let padding = match self.padding {
            Some(padding) if padding.is_finite() && padding >= 0.0 => padding,
            Some(padding) => {
                warn!(padding, kind = %kind, "ignoring invalid padding option");
                config.default_padding_px
            }
            None => config.default_padding_px,
        };
        let cutout = match self.cutout.as_deref() {
            Some(raw) => parse_cutout(raw).unwrap_or_else(|err| {
                warn!(cutout = raw, error = %err, "malformed cutout, using default");
                config.default_cutout_ratio
            }),
            None => config.default_cutout_ratio,
        };

        ResolvedOptions {
            responsive: self.responsive.unwrap_or(true),
            show_grid: self.show_grid.unwrap_or(defaults.show_grid),
            show_legend: self.show_legend.unwrap_or(defaults.show_legend),
            padding,
            cutout,
            center_text: self
                .center_text
                .clone()
                .filter(|text| !text.trim().is_empty()),
            show_percentages: self.show_percentages.unwrap_or(false),
            show_values: self.show_values.unwrap_or(false),
            show_points: self.show_points.unwrap_or(defaults.show_points),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct KindDefaults {
    show_grid: bool,
    show_legend: bool,
    show_points: bool,
}

impl KindDefaults {
    fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Line | ChartKind::Radar => Self {
                show_grid: true,
                show_legend: true,
                show_points: true,
            },
            ChartKind::Bar => Self {
                show_grid: true,
                show_legend: true,
                show_points: false,
            },
            ChartKind::Pie | ChartKind::Doughnut => Self {
                show_grid: false,
                show_legend: true,
                show_points: false,
            },
        }
    }
}

/// Options with every default applied, as consumed by the painters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    pub responsive: bool,
    pub show_grid: bool,
    pub show_legend: bool,
    pub padding: f64,
    /// Inner radius as a share of the outer radius, in `[0, MAX_CUTOUT_RATIO]`.
    pub cutout: f64,
    pub center_text: Option<String>,
    pub show_percentages: bool,
    pub show_values: bool,
    pub show_points: bool,
}

/// Parses a cutout into a ratio clamped to `[0, MAX_CUTOUT_RATIO]`.
///
/// `"NN%"` is a percentage of the outer radius; a bare number such as `"0.6"`
/// is the ratio itself.
pub fn parse_cutout(raw: &str) -> ChartResult<f64> {
    let invalid = || ChartError::InvalidData(format!("invalid cutout `{raw}`"));
    let text = raw.trim();
    let ratio = match text.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().map_err(|_| invalid())? / 100.0,
        None => text.parse::<f64>().map_err(|_| invalid())?,
    };
    if !ratio.is_finite() {
        return Err(invalid());
    }
    Ok(ratio.clamp(0.0, MAX_CUTOUT_RATIO))
}
