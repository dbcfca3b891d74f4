//! Backend-agnostic chart geometry: scales, grid placement, layout and the
//! per-type projections consumed by the painters in `api`.

pub mod bar_series;
pub mod grid;
pub mod layout;
pub mod line_series;
pub mod radar;
pub mod slices;
pub mod types;
pub mod value_scale;

pub use bar_series::{
    BAR_GROUP_FILL_RATIO, BAR_GROUP_SPACING_RATIO, BarGeometry, group_center_x, project_bars,
};
pub use grid::{
    ValueGridLine, category_band_xs, category_grid_xs, format_axis_value, value_grid_lines,
};
pub use layout::{LegendEntryLayout, LegendMetrics, compute_chart_area, layout_legend};
pub use line_series::{baseline_polygon, category_x, project_line_points};
pub use radar::{
    RADAR_LABEL_MARGIN, RADAR_LABEL_OFFSET, RadarLayout, project_radar_vertices, radar_max_value,
};
pub use slices::{
    PIE_LABEL_RADIUS_RATIO, SLICE_START_ANGLE, SliceGeometry, project_slices, slice_label_anchor,
};
pub use types::{Point, Rect, Viewport};
pub use value_scale::{ValueScale, ValueScaleTuning};
