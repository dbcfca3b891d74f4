use std::cell::Cell;
use std::rc::Rc;

use canvas_charts::api::{ChartData, ChartKind, ChartOptions, Dataset, FailSoft};
use canvas_charts::core::{Point, Rect, Viewport};
use canvas_charts::render::{
    Color, MemoryHost, Paint, RecordingSurface, Surface, SurfaceHost, TextStyle,
};
use canvas_charts::{ChartEngine, ChartError, ChartResult};

fn grades(values: Vec<f64>) -> ChartData {
    ChartData::new(["Q1", "Q2", "Q3"]).with_dataset(Dataset::new("Average", values))
}

fn engine() -> ChartEngine<MemoryHost> {
    let host = MemoryHost::new()
        .with_surface("overview", 480, 320)
        .with_surface("detail", 320, 240);
    ChartEngine::new(host)
}

#[test]
fn create_registers_chart_and_renders_once() {
    let mut engine = engine();
    let handle = engine
        .create_line_chart("overview", grades(vec![60.0, 70.0, 80.0]), ChartOptions::new())
        .expect("create");
    assert_eq!(handle.surface_id, "overview");
    assert_eq!(handle.kind, ChartKind::Line);
    assert_eq!(engine.len(), 1);

    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.render_count(), 1);
    assert_eq!(chart.surface().clear_count(), 1);
}

#[test]
fn unknown_surface_is_reported() {
    let mut engine = engine();
    let err = engine
        .create_bar_chart("missing", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect_err("missing surface");
    assert!(matches!(err, ChartError::SurfaceNotFound { ref surface_id } if surface_id == "missing"));
    assert!(engine.is_empty());
}

#[test]
fn unknown_type_name_is_unsupported() {
    let mut engine = engine();
    let err = engine
        .create_chart_named("scatter", "overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect_err("unsupported type");
    assert!(matches!(err, ChartError::UnsupportedChartType(ref name) if name == "scatter"));

    engine
        .create_chart_named("Doughnut", "overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("named doughnut");
    assert_eq!(engine.chart("overview").expect("chart").kind(), ChartKind::Doughnut);
}

#[test]
fn mismatched_dataset_length_is_rejected() {
    let mut engine = engine();
    let err = engine
        .create_line_chart("overview", grades(vec![1.0, 2.0]), ChartOptions::new())
        .expect_err("shape mismatch");
    assert!(matches!(
        err,
        ChartError::DataShapeMismatch {
            dataset: 0,
            expected: 3,
            actual: 2
        }
    ));
    assert!(engine.chart("overview").is_none());
}

#[test]
fn update_replaces_data_and_rerenders() {
    let mut engine = engine();
    engine
        .create_bar_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("create");

    let next = grades(vec![9.0, 8.0, 7.0]);
    assert!(engine.update_chart("overview", next.clone()).expect("update"));
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.data(), &next);
    assert_eq!(chart.render_count(), 2);
}

#[test]
fn invalid_update_keeps_previous_data() {
    let mut engine = engine();
    let original = grades(vec![1.0, 2.0, 3.0]);
    engine
        .create_bar_chart("overview", original.clone(), ChartOptions::new())
        .expect("create");

    let err = engine
        .update_chart("overview", grades(vec![1.0]))
        .expect_err("invalid update");
    assert!(matches!(err, ChartError::DataShapeMismatch { .. }));
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.data(), &original);
    assert_eq!(chart.render_count(), 1);
}

#[test]
fn unknown_ids_are_no_ops() {
    let mut engine = engine();
    assert!(!engine.update_chart("nowhere", grades(vec![1.0, 2.0, 3.0])).expect("no-op"));
    assert!(!engine.set_chart_kind("nowhere", ChartKind::Pie).expect("no-op"));
    assert!(!engine.render_chart("nowhere").expect("no-op"));
    assert!(!engine.destroy_chart("nowhere"));
}

#[test]
fn destroy_is_idempotent() {
    let mut engine = engine();
    engine
        .create_pie_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("create");
    assert!(engine.destroy_chart("overview"));
    assert!(!engine.destroy_chart("overview"));
    assert!(engine.chart("overview").is_none());
    assert!(engine.is_empty());
}

#[test]
fn recreating_on_same_surface_replaces_chart() {
    let mut engine = engine();
    engine
        .create_bar_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("bar");
    engine
        .create_radar_chart("overview", grades(vec![3.0, 2.0, 1.0]), ChartOptions::new())
        .expect("radar");
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.chart("overview").expect("chart").kind(), ChartKind::Radar);
}

#[test]
fn kind_toggle_reresolves_defaults() {
    let mut engine = engine();
    engine
        .create_bar_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("bar");
    assert!(!engine.chart("overview").expect("chart").resolved_options().show_points);

    assert!(engine.set_chart_kind("overview", ChartKind::Line).expect("toggle"));
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.kind(), ChartKind::Line);
    assert!(chart.resolved_options().show_points);
    assert_eq!(chart.render_count(), 2);
}

#[test]
fn options_can_be_replaced() {
    let mut engine = engine();
    engine
        .create_line_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("line");
    assert!(engine
        .set_chart_options("overview", ChartOptions::new().with_show_grid(false))
        .expect("options"));
    assert!(!engine.chart("overview").expect("chart").resolved_options().show_grid);
}

#[test]
fn registry_keeps_creation_order() {
    let mut engine = engine();
    engine
        .create_line_chart("detail", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("detail");
    engine
        .create_bar_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .expect("overview");
    assert_eq!(engine.chart_ids().collect::<Vec<_>>(), vec!["detail", "overview"]);

    assert_eq!(engine.destroy_all(), 2);
    assert!(engine.is_empty());
}

#[test]
fn fail_soft_policy_swallows_errors() {
    let mut engine = engine();
    let handle = engine
        .create_line_chart("missing", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .or_log("dashboard line chart");
    assert!(handle.is_none());

    let handle = engine
        .create_line_chart("overview", grades(vec![1.0, 2.0, 3.0]), ChartOptions::new())
        .or_log("dashboard line chart");
    assert!(handle.is_some());
}

fn nan_bordered(values: Vec<f64>) -> ChartData {
    ChartData::new(["Q1", "Q2", "Q3"]).with_dataset(
        Dataset::new("Average", values).with_border_color(Color::rgb(f64::NAN, 0.0, 0.0)),
    )
}

#[test]
fn update_with_non_finite_color_keeps_previous_data() {
    let mut engine = engine();
    let original = grades(vec![1.0, 2.0, 3.0]);
    engine
        .create_line_chart("overview", original.clone(), ChartOptions::new())
        .expect("create");

    let err = engine
        .update_chart("overview", nan_bordered(vec![3.0, 4.0, 5.0]))
        .expect_err("nan color");
    assert!(matches!(err, ChartError::InvalidData(_)));
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.data(), &original);
    assert_eq!(chart.render_count(), 1);
}

#[test]
fn failed_recreate_keeps_original_chart() {
    let mut engine = engine();
    let original = grades(vec![1.0, 2.0, 3.0]);
    engine
        .create_line_chart("overview", original.clone(), ChartOptions::new())
        .expect("create");
    engine
        .create_line_chart("detail", grades(vec![4.0, 5.0, 6.0]), ChartOptions::new())
        .expect("create");

    engine
        .create_bar_chart("overview", nan_bordered(vec![3.0, 4.0, 5.0]), ChartOptions::new())
        .expect_err("nan color");
    assert!(engine.host_mut().remove_surface("overview"));
    engine
        .create_bar_chart("overview", grades(vec![3.0, 4.0, 5.0]), ChartOptions::new())
        .expect_err("surface gone");

    assert_eq!(engine.chart_ids().collect::<Vec<_>>(), vec!["overview", "detail"]);
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.kind(), ChartKind::Line);
    assert_eq!(chart.data(), &original);
}

/// Recording surface whose `clear` fails while the shared switch is on.
#[derive(Debug)]
struct SwitchableSurface {
    inner: RecordingSurface,
    broken: Rc<Cell<bool>>,
}

impl Surface for SwitchableSurface {
    fn size(&self) -> Viewport {
        self.inner.size()
    }

    fn pixel_ratio(&self) -> f64 {
        self.inner.pixel_ratio()
    }

    fn set_pixel_ratio(&mut self, ratio: f64) -> ChartResult<()> {
        self.inner.set_pixel_ratio(ratio)
    }

    fn clear(&mut self) -> ChartResult<()> {
        if self.broken.get() {
            return Err(ChartError::Backend("surface lost".to_owned()));
        }
        self.inner.clear()
    }

    fn begin_path(&mut self) {
        self.inner.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.inner.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.inner.line_to(point);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.inner.arc(center, radius, start_angle, end_angle, anticlockwise);
    }

    fn close_path(&mut self) {
        self.inner.close_path();
    }

    fn fill(&mut self, paint: &Paint) -> ChartResult<()> {
        self.inner.fill(paint)
    }

    fn stroke(&mut self, paint: &Paint, width: f64) -> ChartResult<()> {
        self.inner.stroke(paint, width)
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> ChartResult<()> {
        self.inner.fill_rect(rect, paint)
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) -> ChartResult<()> {
        self.inner.fill_text(text, anchor, style)
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> f64 {
        self.inner.measure_text(text, font_size_px)
    }
}

#[derive(Debug)]
struct SwitchableHost {
    memory: MemoryHost,
    broken: Rc<Cell<bool>>,
}

impl SurfaceHost for SwitchableHost {
    type Surface = SwitchableSurface;

    fn acquire_surface(&mut self, surface_id: &str) -> ChartResult<Self::Surface> {
        Ok(SwitchableSurface {
            inner: self.memory.acquire_surface(surface_id)?,
            broken: Rc::clone(&self.broken),
        })
    }
}

fn switchable_engine() -> (ChartEngine<SwitchableHost>, Rc<Cell<bool>>) {
    let broken = Rc::new(Cell::new(false));
    let host = SwitchableHost {
        memory: MemoryHost::new().with_surface("overview", 480, 320),
        broken: Rc::clone(&broken),
    };
    (ChartEngine::new(host), broken)
}

#[test]
fn render_failure_during_recreate_restores_previous_chart() {
    let (mut engine, broken) = switchable_engine();
    let original = grades(vec![1.0, 2.0, 3.0]);
    engine
        .create_line_chart("overview", original.clone(), ChartOptions::new())
        .expect("create");

    broken.set(true);
    let err = engine
        .create_pie_chart("overview", grades(vec![3.0, 4.0, 5.0]), ChartOptions::new())
        .expect_err("backend failure");
    assert!(matches!(err, ChartError::Backend(_)));
    assert_eq!(engine.len(), 1);

    broken.set(false);
    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.kind(), ChartKind::Line);
    assert_eq!(chart.data(), &original);
    assert!(engine.render_chart("overview").expect("render"));
}

#[test]
fn render_failure_during_update_restores_previous_state() {
    let (mut engine, broken) = switchable_engine();
    let original = grades(vec![1.0, 2.0, 3.0]);
    engine
        .create_bar_chart("overview", original.clone(), ChartOptions::new())
        .expect("create");

    broken.set(true);
    engine
        .update_chart("overview", grades(vec![7.0, 8.0, 9.0]))
        .expect_err("backend failure");
    engine
        .set_chart_kind("overview", ChartKind::Radar)
        .expect_err("backend failure");
    engine
        .set_chart_options("overview", ChartOptions::new().with_show_grid(false))
        .expect_err("backend failure");

    let chart = engine.chart("overview").expect("chart");
    assert_eq!(chart.data(), &original);
    assert_eq!(chart.kind(), ChartKind::Bar);
    assert!(chart.resolved_options().show_grid);
    assert_eq!(chart.render_count(), 1);
}
