use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string so chart payloads can carry
/// `"#4e73df"` or `"rgba(78, 115, 223, 0.5)"` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, `white`, `black` and `transparent`.
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let text = input.trim().to_ascii_lowercase();
        let invalid = || ChartError::InvalidData(format!("unrecognized color `{input}`"));

        match text.as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        if let Some(hex) = text.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let pair = |i: usize| digits[i] * 16 + digits[i + 1];
            return match digits.len() {
                3 => Ok(Self::from_rgb8(
                    digits[0] * 17,
                    digits[1] * 17,
                    digits[2] * 17,
                )),
                6 => Ok(Self::from_rgb8(pair(0), pair(2), pair(4))),
                8 => Ok(Self::from_rgb8(pair(0), pair(2), pair(4))
                    .with_alpha(f64::from(pair(6)) / 255.0)),
                _ => Err(invalid()),
            };
        }

        let (body, expects_alpha) = if let Some(rest) = text.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = text.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<f64> = body
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok())
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        if parts.iter().any(|part| !part.is_finite()) {
            return Err(invalid());
        }
        let channel = |value: f64| (value / 255.0).clamp(0.0, 1.0);
        match (parts.as_slice(), expects_alpha) {
            ([r, g, b], false) => Ok(Self::rgb(channel(*r), channel(*g), channel(*b))),
            ([r, g, b, a], true) => Ok(Self::rgba(
                channel(*r),
                channel(*g),
                channel(*b),
                a.clamp(0.0, 1.0),
            )),
            _ => Err(invalid()),
        }
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.alpha >= 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue)
            )
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                byte(self.red),
                byte(self.green),
                byte(self.blue),
                (self.alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
            )
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Mixes toward white by `amount` in `[0, 1]`, keeping alpha.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |channel: f64| channel + (1.0 - channel) * amount;
        Self::rgba(mix(self.red), mix(self.green), mix(self.blue), self.alpha)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

pub type GradientStops = SmallVec<[GradientStop; 4]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: GradientStops,
    },
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        stops: GradientStops,
    },
}

impl Gradient {
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Self::Linear { stops, .. } | Self::Radial { stops, .. } => stops,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let geometry_ok = match self {
            Self::Linear { start, end, .. } => start.is_finite() && end.is_finite(),
            Self::Radial {
                center,
                inner_radius,
                outer_radius,
                ..
            } => {
                center.is_finite()
                    && inner_radius.is_finite()
                    && outer_radius.is_finite()
                    && *inner_radius >= 0.0
                    && *outer_radius >= *inner_radius
            }
        };
        if !geometry_ok {
            return Err(ChartError::InvalidData(
                "gradient geometry must be finite".to_owned(),
            ));
        }
        if self.stops().is_empty() {
            return Err(ChartError::InvalidData(
                "gradient needs at least one stop".to_owned(),
            ));
        }
        for stop in self.stops() {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(ChartError::InvalidData(
                    "gradient stop offset must be in [0, 1]".to_owned(),
                ));
            }
            stop.color.validate()?;
        }
        Ok(())
    }
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Gradient(Gradient),
}

impl Paint {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::Gradient(gradient) => gradient.validate(),
        }
    }

    /// Representative color: the solid color or the first gradient stop.
    #[must_use]
    pub fn base_color(&self) -> Option<Color> {
        match self {
            Self::Solid(color) => Some(*color),
            Self::Gradient(gradient) => gradient.stops().first().map(|stop| stop.color),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Self::Gradient(gradient)
    }
}

/// Horizontal text alignment relative to the anchor X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_px: f64,
    pub color: Color,
    pub align: TextAlign,
    pub bold: bool,
}

impl TextStyle {
    #[must_use]
    pub const fn new(font_size_px: f64, color: Color, align: TextAlign) -> Self {
        Self {
            font_size_px,
            color,
            align,
            bold: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_css_forms() {
        assert_eq!(Color::parse_css("#fff").expect("short hex"), Color::WHITE);
        assert_eq!(
            Color::parse_css("#000000").expect("long hex"),
            Color::BLACK
        );
        let translucent = Color::parse_css("rgba(255, 0, 0, 0.5)").expect("rgba");
        assert_eq!(translucent, Color::rgba(1.0, 0.0, 0.0, 0.5));
        let with_alpha = Color::parse_css("#ff000080").expect("hex alpha");
        assert!((with_alpha.alpha - 128.0 / 255.0).abs() <= 1e-12);
        assert!(Color::parse_css("teal-ish").is_err());
        assert!(Color::parse_css("#12345").is_err());
        assert!(Color::parse_css("rgb(1, 2)").is_err());
    }

    #[test]
    fn rejects_non_finite_channels() {
        assert!(Color::parse_css("rgb(nan, 0, 0)").is_err());
        assert!(Color::parse_css("rgba(0, inf, 0, 1)").is_err());
        assert!(Color::parse_css("rgba(0, 0, 0, NaN)").is_err());
    }

    #[test]
    fn css_round_trip_for_opaque_colors() {
        let color = Color::parse_css("#4e73df").expect("hex");
        assert_eq!(color.to_css(), "#4e73df");
    }

    #[test]
    fn lighten_moves_toward_white() {
        let lighter = Color::BLACK.lighten(0.5);
        assert_eq!(lighter, Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(Color::WHITE.lighten(0.3), Color::WHITE);
    }
}
