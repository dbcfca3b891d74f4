mod palette;
mod primitives;
mod recording;

pub use palette::{
    BASE_PALETTE, GradientDirection, base_palette, cycle_palette, generate_gradient,
    get_color_palette, palette_color,
};
pub use primitives::{Color, Gradient, GradientStop, GradientStops, Paint, TextAlign, TextStyle};
pub use recording::{DrawCommand, MemoryHost, PathOp, RecordingSurface};

use crate::core::{Point, Rect, Viewport};
use crate::error::ChartResult;

/// Primitive 2D drawing operations against one bound drawing target.
///
/// Coordinates are logical pixels; backends apply the pixel ratio set through
/// `set_pixel_ratio`. Path construction mirrors a canvas context: the current
/// path survives `fill`/`stroke` until the next `begin_path`.
pub trait Surface {
    /// Logical extent of the target.
    fn size(&self) -> Viewport;

    fn pixel_ratio(&self) -> f64;

    /// Resizes the backing store to `size * ratio` and scales all drawing by
    /// `ratio`, keeping logical coordinates unchanged.
    fn set_pixel_ratio(&mut self, ratio: f64) -> ChartResult<()>;

    /// Erases the whole target to transparent.
    fn clear(&mut self) -> ChartResult<()>;

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Appends a circular arc; angles in radians, clockwise on screen unless
    /// `anticlockwise` is set.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool);

    fn close_path(&mut self);

    fn fill(&mut self, paint: &Paint) -> ChartResult<()>;

    fn stroke(&mut self, paint: &Paint, width: f64) -> ChartResult<()>;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> ChartResult<()>;

    /// Draws one line of text; `anchor.y` is the vertical center of the line.
    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) -> ChartResult<()>;

    /// Advance width of `text` in logical pixels.
    fn measure_text(&self, text: &str, font_size_px: f64) -> f64;
}

/// Resolves surface identifiers to drawing targets.
///
/// Every call to `acquire_surface` hands out a fresh, exclusively owned
/// binding; the engine keeps it for the lifetime of one chart.
pub trait SurfaceHost {
    type Surface: Surface;

    /// Fails with `ChartError::SurfaceNotFound` for unknown ids.
    fn acquire_surface(&mut self, surface_id: &str) -> ChartResult<Self::Surface>;

    /// Ratio between backing pixels and logical pixels on this host.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Linear gradient spanning the current extent of `surface`.
pub fn surface_gradient<S: Surface + ?Sized>(
    surface: &S,
    colors: &[Color],
    direction: GradientDirection,
) -> ChartResult<Gradient> {
    generate_gradient(surface.size(), colors, direction)
}

/// Appends `points` as one open polyline sub-path.
pub fn trace_polyline<S: Surface + ?Sized>(surface: &mut S, points: &[Point]) {
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        surface.move_to(*first);
        for point in iter {
            surface.line_to(*point);
        }
    }
}

/// Appends `points` as a closed polygon sub-path.
pub fn trace_polygon<S: Surface + ?Sized>(surface: &mut S, points: &[Point]) {
    if points.is_empty() {
        return;
    }
    trace_polyline(surface, points);
    surface.close_path();
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoHost, CairoSurface};
