use indexmap::IndexMap;
use serde::Serialize;

use crate::core::{Point, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Paint, Surface, SurfaceHost, TextStyle};

/// Rough advance width per character relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Close,
}

impl PathOp {
    fn is_finite(&self) -> bool {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => point.is_finite(),
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                center.is_finite()
                    && radius.is_finite()
                    && *radius >= 0.0
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            Self::Close => true,
        }
    }
}

/// One recorded paint operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Fill {
        path: Vec<PathOp>,
        paint: Paint,
    },
    Stroke {
        path: Vec<PathOp>,
        paint: Paint,
        width: f64,
    },
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    Text {
        text: String,
        anchor: Point,
        style: TextStyle,
    },
}

/// In-memory surface that records every paint operation.
///
/// Used by tests and headless hosts. It validates geometry as it records so
/// invalid coordinates (NaN, infinities, negative sizes) surface as errors
/// instead of silently producing a broken picture. `clear` drops everything
/// recorded so far, so `commands` always describes the latest frame.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    surface_id: String,
    size: Viewport,
    pixel_ratio: f64,
    path: Vec<PathOp>,
    commands: Vec<DrawCommand>,
    clear_count: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(surface_id: impl Into<String>, size: Viewport) -> Self {
        Self {
            surface_id: surface_id.into(),
            size,
            pixel_ratio: 1.0,
            path: Vec::new(),
            commands: Vec::new(),
            clear_count: 0,
        }
    }

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface has been cleared.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Backing-store size after the pixel ratio is applied.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        (
            scaled_dimension(self.size.width, self.pixel_ratio),
            scaled_dimension(self.size.height, self.pixel_ratio),
        )
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = (&Rect, &Paint)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { rect, paint } => Some((rect, paint)),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&[PathOp], &Paint)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Fill { path, paint } => Some((path.as_slice(), paint)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[PathOp], &Paint, f64)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Stroke { path, paint, width } => Some((path.as_slice(), paint, *width)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Every coordinate the surface has recorded for the current frame.
    #[must_use]
    pub fn recorded_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        let mut push_path = |path: &[PathOp]| {
            for op in path {
                match op {
                    PathOp::MoveTo(point) | PathOp::LineTo(point) => points.push(*point),
                    PathOp::Arc { center, .. } => points.push(*center),
                    PathOp::Close => {}
                }
            }
        };
        for command in &self.commands {
            match command {
                DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => {
                    push_path(path);
                }
                DrawCommand::FillRect { rect, .. } => {
                    push_path(&[
                        PathOp::MoveTo(Point::new(rect.x, rect.y)),
                        PathOp::LineTo(Point::new(rect.right(), rect.bottom())),
                    ]);
                }
                DrawCommand::Text { anchor, .. } => push_path(&[PathOp::MoveTo(*anchor)]),
                DrawCommand::Clear => {}
            }
        }
        points
    }

    fn validated_path(&self) -> ChartResult<Vec<PathOp>> {
        if let Some(op) = self.path.iter().find(|op| !op.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "surface `{}` received non-finite path geometry: {op:?}",
                self.surface_id
            )));
        }
        Ok(self.path.clone())
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn set_pixel_ratio(&mut self, ratio: f64) -> ChartResult<()> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        self.pixel_ratio = ratio;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.path.clear();
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clear_count += 1;
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.path.push(PathOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.path.push(PathOp::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.path.push(PathOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.path.push(PathOp::Close);
    }

    fn fill(&mut self, paint: &Paint) -> ChartResult<()> {
        paint.validate()?;
        let path = self.validated_path()?;
        self.commands.push(DrawCommand::Fill {
            path,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn stroke(&mut self, paint: &Paint, width: f64) -> ChartResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        paint.validate()?;
        let path = self.validated_path()?;
        self.commands.push(DrawCommand::Stroke {
            path,
            paint: paint.clone(),
            width,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> ChartResult<()> {
        if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "surface `{}` received an invalid rectangle: {rect:?}",
                self.surface_id
            )));
        }
        paint.validate()?;
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) -> ChartResult<()> {
        if text.is_empty() {
            return Err(ChartError::InvalidData(
                "text must not be empty".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "text anchor must be finite".to_owned(),
            ));
        }
        style.validate()?;
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            anchor,
            style: *style,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * font_size_px * GLYPH_WIDTH_RATIO
    }
}

/// Host that resolves surface ids against an in-memory table of extents and
/// binds each to a fresh `RecordingSurface`.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    surfaces: IndexMap<String, Viewport>,
    device_pixel_ratio: f64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            surfaces: IndexMap::new(),
            device_pixel_ratio: 1.0,
        }
    }
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_surface(mut self, surface_id: impl Into<String>, width: u32, height: u32) -> Self {
        self.register_surface(surface_id, Viewport::new(width, height));
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn register_surface(&mut self, surface_id: impl Into<String>, size: Viewport) {
        self.surfaces.insert(surface_id.into(), size);
    }

    /// Returns `true` when the id was registered.
    pub fn remove_surface(&mut self, surface_id: &str) -> bool {
        self.surfaces.shift_remove(surface_id).is_some()
    }

    #[must_use]
    pub fn contains(&self, surface_id: &str) -> bool {
        self.surfaces.contains_key(surface_id)
    }
}

impl SurfaceHost for MemoryHost {
    type Surface = RecordingSurface;

    fn acquire_surface(&mut self, surface_id: &str) -> ChartResult<Self::Surface> {
        let size = self
            .surfaces
            .get(surface_id)
            .copied()
            .ok_or_else(|| ChartError::SurfaceNotFound {
                surface_id: surface_id.to_owned(),
            })?;
        if !size.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: size.width,
                height: size.height,
            });
        }
        Ok(RecordingSurface::new(surface_id, size))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}

fn scaled_dimension(logical: u32, ratio: f64) -> u32 {
    (f64::from(logical) * ratio).round().max(1.0) as u32
}
