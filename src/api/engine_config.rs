use serde::{Deserialize, Serialize};

use crate::core::{LegendMetrics, ValueScaleTuning};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, base_palette};

/// Colors for chart furniture that is not tied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    /// Painted over the whole surface before each render; `None` leaves it transparent.
    pub background: Option<Color>,
    pub grid: Color,
    pub axis_text: Color,
    pub legend_text: Color,
    pub value_text: Color,
    pub percentage_text: Color,
    pub center_text: Color,
    pub slice_border: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: None,
            grid: Color::rgba(0.0, 0.0, 0.0, 0.1),
            axis_text: Color::rgb(0.4, 0.4, 0.4),
            legend_text: Color::rgb(0.2, 0.2, 0.2),
            value_text: Color::rgb(0.2, 0.2, 0.2),
            percentage_text: Color::WHITE,
            center_text: Color::rgb(0.2, 0.2, 0.2),
            slice_border: Color::WHITE,
        }
    }
}

impl ChartTheme {
    pub fn validate(&self) -> ChartResult<()> {
        if let Some(background) = self.background {
            background.validate()?;
        }
        for color in [
            self.grid,
            self.axis_text,
            self.legend_text,
            self.value_text,
            self.percentage_text,
            self.center_text,
            self.slice_border,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Engine-wide rendering configuration shared by every chart it creates.
///
/// Serializable so hosts can ship a JSON theme alongside their dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_legend_height_px")]
    pub legend_height_px: f64,
    #[serde(default = "default_padding_px")]
    pub default_padding_px: f64,
    /// Horizontal grid divisions on line and bar charts.
    #[serde(default = "default_grid_divisions")]
    pub grid_divisions: usize,
    #[serde(default = "default_radar_rings")]
    pub radar_rings: usize,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_cutout_ratio")]
    pub default_cutout_ratio: f64,
    #[serde(default)]
    pub legend: LegendMetrics,
    #[serde(default)]
    pub scale_tuning: ValueScaleTuning,
    #[serde(default)]
    pub theme: ChartTheme,
    /// Replaces the built-in base palette when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<Color>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            legend_height_px: default_legend_height_px(),
            default_padding_px: default_padding_px(),
            grid_divisions: default_grid_divisions(),
            radar_rings: default_radar_rings(),
            font_size_px: default_font_size_px(),
            default_cutout_ratio: default_cutout_ratio(),
            legend: LegendMetrics::default(),
            scale_tuning: ValueScaleTuning::default(),
            theme: ChartTheme::default(),
            palette: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_grid_divisions(mut self, divisions: usize) -> Self {
        self.grid_divisions = divisions;
        self
    }

    #[must_use]
    pub fn with_font_size_px(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    /// Base colors cycled across datasets and slices.
    #[must_use]
    pub fn palette_colors(&self) -> Vec<Color> {
        match &self.palette {
            Some(colors) if !colors.is_empty() => colors.clone(),
            _ => base_palette(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("legend_height_px", self.legend_height_px),
            ("default_padding_px", self.default_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "`font_size_px` must be finite and > 0".to_owned(),
            ));
        }
        if !(0.0..=0.95).contains(&self.default_cutout_ratio) {
            return Err(ChartError::InvalidData(
                "`default_cutout_ratio` must be in [0, 0.95]".to_owned(),
            ));
        }
        if self.grid_divisions == 0 || self.radar_rings == 0 {
            return Err(ChartError::InvalidData(
                "grid divisions and radar rings must be > 0".to_owned(),
            ));
        }
        let legend = self.legend;
        if [legend.swatch_size, legend.label_gap, legend.item_gap]
            .iter()
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(ChartError::InvalidData(
                "legend metrics must be finite and >= 0".to_owned(),
            ));
        }
        self.scale_tuning.validate()?;
        self.theme.validate()?;
        if let Some(palette) = &self.palette {
            for color in palette {
                color.validate()?;
            }
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse engine config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }
}

fn default_legend_height_px() -> f64 {
    40.0
}

fn default_padding_px() -> f64 {
    20.0
}

fn default_grid_divisions() -> usize {
    5
}

fn default_radar_rings() -> usize {
    5
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_cutout_ratio() -> f64 {
    0.6
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::render::{Color, base_palette};

    #[test]
    fn empty_json_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").expect("config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.legend_height_px, 40.0);
        assert_eq!(config.grid_divisions, 5);
    }

    #[test]
    fn palette_override_replaces_base() {
        let config = EngineConfig::from_json_str(r##"{"palette": ["#000", "#fff"]}"##)
            .expect("config");
        assert_eq!(config.palette_colors(), vec![Color::BLACK, Color::WHITE]);
        assert_eq!(EngineConfig::default().palette_colors(), base_palette());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(EngineConfig::from_json_str(r#"{"font_size_px": 0}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"radar_rings": 0}"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{"default_cutout_ratio": 1.5}"#).is_err());
    }
}
