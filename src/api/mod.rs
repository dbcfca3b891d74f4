//! Chart data model, options, the `Chart` type with its per-kind painters,
//! and the `ChartEngine` registry.

mod bar_chart_painter;
mod chart;
mod chart_data;
mod chart_options;
mod engine;
mod engine_config;
mod fail_soft;
mod grid_painter;
mod json_contract;
mod legend_painter;
mod line_chart_painter;
mod radar_chart_painter;
mod slice_chart_painter;

pub use chart::Chart;
pub use chart_data::{ChartData, ColorSpec, Dataset};
pub use chart_options::{ChartKind, ChartOptions, MAX_CUTOUT_RATIO, ResolvedOptions, parse_cutout};
pub use engine::{ChartEngine, ChartHandle};
pub use engine_config::{ChartTheme, EngineConfig};
pub use fail_soft::FailSoft;
pub use json_contract::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartRequest, ChartSnapshot, ChartSnapshotJsonContractV1,
};
