//! canvas-charts: line, bar, pie, doughnut and radar charts painted directly
//! onto raster drawing surfaces.
//!
//! The crate is split into three layers:
//! - `core`: pure geometry (scales, grid placement, layout, per-type projections)
//! - `render`: colors, paints, the `Surface`/`SurfaceHost` traits and backends
//! - `api`: chart data and options, the `Chart` type and the `ChartEngine` registry
//!
//! ```
//! use canvas_charts::api::{ChartData, ChartOptions, Dataset};
//! use canvas_charts::render::MemoryHost;
//! use canvas_charts::ChartEngine;
//!
//! let host = MemoryHost::new().with_surface("grades", 640, 360);
//! let mut engine = ChartEngine::new(host);
//! let data = ChartData::new(["Math", "Physics", "History"])
//!     .with_dataset(Dataset::new("Term 1", vec![72.0, 85.0, 64.0]));
//! engine
//!     .create_bar_chart("grades", data, ChartOptions::new().with_show_values(true))
//!     .expect("chart");
//! assert_eq!(engine.len(), 1);
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, EngineConfig};
pub use error::{ChartError, ChartResult};
pub use render::get_color_palette;
