use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LinearGradient, Operator, RadialGradient};
use indexmap::IndexMap;
use pango::{FontDescription, Weight};

use crate::core::{Point, Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Gradient, Paint, Surface, SurfaceHost, TextAlign, TextStyle};

/// Cairo + Pango + PangoCairo raster surface.
///
/// Draws into an ARGB32 image surface sized `size * pixel_ratio`. The Cairo
/// context carries the current path, so `fill`/`stroke` preserve it the same
/// way a browser canvas does.
#[derive(Debug)]
pub struct CairoSurface {
    surface_id: String,
    size: Viewport,
    pixel_ratio: f64,
    surface: ImageSurface,
    context: Context,
}

impl CairoSurface {
    pub fn new(surface_id: impl Into<String>, size: Viewport) -> ChartResult<Self> {
        let (surface, context) = create_backing(size, 1.0)?;
        Ok(Self {
            surface_id: surface_id.into(),
            size,
            pixel_ratio: 1.0,
            surface,
            context,
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|err| {
            ChartError::Backend(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface.flush();
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to write png: {err}")))
    }

    pub fn png_bytes(&self) -> ChartResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.surface.flush();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))?;
        Ok(bytes)
    }

    fn apply_paint(&self, paint: &Paint) -> ChartResult<()> {
        paint.validate()?;
        match paint {
            Paint::Solid(color) => {
                apply_color(&self.context, *color);
                Ok(())
            }
            Paint::Gradient(Gradient::Linear { start, end, stops }) => {
                let pattern = LinearGradient::new(start.x, start.y, end.x, end.y);
                for stop in stops {
                    let c = stop.color;
                    pattern.add_color_stop_rgba(stop.offset, c.red, c.green, c.blue, c.alpha);
                }
                self.context
                    .set_source(&pattern)
                    .map_err(|err| map_backend_error("failed to set linear gradient", err))
            }
            Paint::Gradient(Gradient::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            }) => {
                let pattern = RadialGradient::new(
                    center.x,
                    center.y,
                    *inner_radius,
                    center.x,
                    center.y,
                    *outer_radius,
                );
                for stop in stops {
                    let c = stop.color;
                    pattern.add_color_stop_rgba(stop.offset, c.red, c.green, c.blue, c.alpha);
                }
                self.context
                    .set_source(&pattern)
                    .map_err(|err| map_backend_error("failed to set radial gradient", err))
            }
        }
    }

    fn text_layout(&self, text: &str, font_size_px: f64, bold: bool) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::from_string(&format!("Sans {font_size_px}"));
        if bold {
            font_description.set_weight(Weight::Bold);
        }
        layout.set_font_description(Some(&font_description));
        layout.set_text(text);
        layout
    }
}

impl Surface for CairoSurface {
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
        let (surface, context) = create_backing(self.size, ratio)?;
        self.surface = surface;
        self.context = context;
        self.pixel_ratio = ratio;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.context.new_path();
        self.context.save().map_err(|err| map_backend_error("failed to save state", err))?;
        self.context.set_operator(Operator::Clear);
        let painted = self.context.paint();
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))?;
        painted.map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, point: Point) {
        self.context.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.context.line_to(point.x, point.y);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        if anticlockwise {
            self.context
                .arc_negative(center.x, center.y, radius, start_angle, end_angle);
        } else {
            self.context.arc(center.x, center.y, radius, start_angle, end_angle);
        }
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self, paint: &Paint) -> ChartResult<()> {
        self.apply_paint(paint)?;
        self.context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn stroke(&mut self, paint: &Paint, width: f64) -> ChartResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.apply_paint(paint)?;
        self.context.set_line_width(width);
        self.context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> ChartResult<()> {
        if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "fill rectangle must be finite with non-negative size".to_owned(),
            ));
        }
        self.apply_paint(paint)?;
        self.context.new_path();
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        let filled = self.context.fill();
        filled.map_err(|err| map_backend_error("failed to fill rectangle", err))
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

        let layout = self.text_layout(text, style.font_size_px, style.bold);
        let (text_width, text_height) = layout.pixel_size();
        let x = match style.align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - f64::from(text_width) / 2.0,
            TextAlign::Right => anchor.x - f64::from(text_width),
        };
        let y = anchor.y - f64::from(text_height) / 2.0;

        self.context.new_path();
        apply_color(&self.context, style.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        Ok(())
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        let layout = self.text_layout(text, font_size_px, false);
        f64::from(layout.pixel_size().0)
    }
}

/// Host backed by offscreen Cairo image surfaces, one per registered id.
#[derive(Debug, Clone)]
pub struct CairoHost {
    surfaces: IndexMap<String, Viewport>,
    device_pixel_ratio: f64,
}

impl Default for CairoHost {
    fn default() -> Self {
        Self {
            surfaces: IndexMap::new(),
            device_pixel_ratio: 1.0,
        }
    }
}

impl CairoHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn register_surface(&mut self, surface_id: impl Into<String>, size: Viewport) {
        self.surfaces.insert(surface_id.into(), size);
    }
}

impl SurfaceHost for CairoHost {
    type Surface = CairoSurface;

    fn acquire_surface(&mut self, surface_id: &str) -> ChartResult<Self::Surface> {
        let size = self
            .surfaces
            .get(surface_id)
            .copied()
            .ok_or_else(|| ChartError::SurfaceNotFound {
                surface_id: surface_id.to_owned(),
            })?;
        CairoSurface::new(surface_id, size)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}

fn create_backing(size: Viewport, ratio: f64) -> ChartResult<(ImageSurface, Context)> {
    if !size.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: size.width,
            height: size.height,
        });
    }
    let backing = |logical: u32| (f64::from(logical) * ratio).round().max(1.0) as i32;
    let surface = ImageSurface::create(Format::ARgb32, backing(size.width), backing(size.height))
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    let context = Context::new(&surface)
        .map_err(|err| map_backend_error("failed to create cairo context", err))?;
    context.scale(ratio, ratio);
    Ok((surface, context))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
