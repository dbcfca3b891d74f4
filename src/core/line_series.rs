use crate::core::{Point, Rect, ValueScale};

/// X pixel of category `index` among `label_count` evenly spread categories.
///
/// A single category sits in the horizontal center of `area`.
#[must_use]
pub fn category_x(area: Rect, index: usize, label_count: usize) -> f64 {
    if label_count < 2 {
        return area.x + area.width / 2.0;
    }
    area.x + index as f64 / (label_count - 1) as f64 * area.width
}

/// Projects one dataset into line vertices.
///
/// The function is deterministic and side-effect free so both rendering and
/// tests can consume the exact same geometry output.
#[must_use]
pub fn project_line_points(
    values: &[f64],
    label_count: usize,
    area: Rect,
    scale: ValueScale,
) -> Vec<Point> {
    values
        .iter()
        .take(label_count)
        .enumerate()
        .map(|(index, &value)| {
            Point::new(
                category_x(area, index, label_count),
                scale.value_to_pixel(value, area),
            )
        })
        .collect()
}

/// Closes a polyline down to the bottom edge of `area`, yielding the polygon
/// used for area fills.
#[must_use]
pub fn baseline_polygon(points: &[Point], area: Rect) -> Vec<Point> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(points.len() + 2);
    polygon.extend_from_slice(points);
    polygon.push(Point::new(last.x, area.bottom()));
    polygon.push(Point::new(first.x, area.bottom()));
    polygon
}
