use canvas_charts::api::{ChartData, ChartKind, ChartOptions, ChartTheme, Dataset, EngineConfig};
use canvas_charts::core::Rect;
use canvas_charts::render::{Color, DrawCommand, MemoryHost, Paint, Surface};
use canvas_charts::ChartEngine;

fn sample_data() -> ChartData {
    ChartData::new(["Math", "Physics", "Chemistry", "History", "Art"])
        .with_dataset(Dataset::new("Term 1", vec![72.0, 85.0, 64.0, 90.0, 58.0]))
        .with_dataset(Dataset::new("Term 2", vec![78.0, 80.0, 70.0, 88.0, 66.0]).with_fill(true))
}

fn engine_with_surface(width: u32, height: u32) -> ChartEngine<MemoryHost> {
    ChartEngine::new(MemoryHost::new().with_surface("canvas", width, height))
}

#[test]
fn every_kind_renders_finite_geometry() {
    for kind in ChartKind::ALL {
        let mut engine = engine_with_surface(480, 320);
        let handle = engine
            .create_chart(kind, "canvas", sample_data(), ChartOptions::new())
            .expect("create chart");
        assert_eq!(handle.kind, kind);

        let surface = engine.chart("canvas").expect("registered chart").surface();
        assert!(matches!(surface.commands().first(), Some(DrawCommand::Clear)));
        assert!(surface.commands().len() > 1, "{kind} painted nothing");
        assert!(
            surface.recorded_points().iter().all(|point| point.is_finite()),
            "{kind} recorded a non-finite coordinate"
        );
    }
}

#[test]
fn tiny_surfaces_still_render() {
    for kind in ChartKind::ALL {
        let mut engine = engine_with_surface(24, 24);
        engine
            .create_chart(kind, "canvas", sample_data(), ChartOptions::new())
            .expect("create chart on tiny surface");
    }
}

#[test]
fn empty_data_renders_without_series() {
    for kind in ChartKind::ALL {
        let mut engine = engine_with_surface(320, 240);
        engine
            .create_chart(kind, "canvas", ChartData::default(), ChartOptions::new())
            .expect("create empty chart");
        let surface = engine.chart("canvas").expect("chart").surface();
        assert_eq!(surface.fills().count(), 0, "{kind} filled a path without data");
    }
}

#[test]
fn legend_lists_datasets_for_axis_charts() {
    let mut engine = engine_with_surface(480, 320);
    engine
        .create_line_chart("canvas", sample_data(), ChartOptions::new())
        .expect("line chart");
    let surface = engine.chart("canvas").expect("chart").surface();
    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"Term 1"));
    assert!(texts.contains(&"Term 2"));
    assert!(texts.contains(&"Math"));

    engine
        .create_line_chart(
            "canvas",
            sample_data(),
            ChartOptions::new().with_show_legend(false),
        )
        .expect("line chart without legend");
    let surface = engine.chart("canvas").expect("chart").surface();
    assert!(!surface.texts().any(|text| text == "Term 1"));
}

#[test]
fn legend_lists_slices_for_pie_charts() {
    let mut engine = engine_with_surface(480, 320);
    let data = ChartData::new(["Pass", "Fail", "Absent"])
        .with_dataset(Dataset::new("Results", vec![40.0, 8.0, 2.0]));
    engine
        .create_pie_chart("canvas", data, ChartOptions::new())
        .expect("pie chart");
    let surface = engine.chart("canvas").expect("chart").surface();
    let texts: Vec<&str> = surface.texts().collect();
    assert_eq!(texts, vec!["Pass", "Fail", "Absent"]);

    let swatches = surface
        .fill_rects()
        .filter(|(rect, _)| rect.width == 12.0 && rect.height == 12.0)
        .count();
    assert_eq!(swatches, 3);
}

#[test]
fn legend_strip_shrinks_chart_area() {
    let mut engine = engine_with_surface(400, 300);
    engine
        .create_bar_chart("canvas", sample_data(), ChartOptions::new())
        .expect("bar chart");
    let chart = engine.chart("canvas").expect("chart");
    assert_eq!(chart.chart_area(), Rect::new(20.0, 20.0, 360.0, 220.0));

    engine
        .create_bar_chart(
            "canvas",
            sample_data(),
            ChartOptions::new().with_show_legend(false).with_padding(10.0),
        )
        .expect("bar chart");
    let chart = engine.chart("canvas").expect("chart");
    assert_eq!(chart.chart_area(), Rect::new(10.0, 10.0, 380.0, 280.0));
}

#[test]
fn theme_background_is_painted_first() {
    let theme = ChartTheme {
        background: Some(Color::WHITE),
        ..ChartTheme::default()
    };
    let config = EngineConfig::default().with_theme(theme);
    let host = MemoryHost::new().with_surface("canvas", 300, 200);
    let mut engine = ChartEngine::with_config(host, config).expect("engine");
    engine
        .create_radar_chart("canvas", sample_data(), ChartOptions::new())
        .expect("radar chart");

    let surface = engine.chart("canvas").expect("chart").surface();
    match &surface.commands()[1] {
        DrawCommand::FillRect { rect, paint } => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 300.0, 200.0));
            assert_eq!(*paint, Paint::Solid(Color::WHITE));
        }
        other => panic!("expected background fill, got {other:?}"),
    }
}

#[test]
fn responsive_charts_follow_device_pixel_ratio() {
    let host = MemoryHost::new()
        .with_surface("canvas", 300, 200)
        .with_device_pixel_ratio(2.0);
    let mut engine = ChartEngine::new(host);
    engine
        .create_line_chart("canvas", sample_data(), ChartOptions::new())
        .expect("line chart");
    let surface = engine.chart("canvas").expect("chart").surface();
    assert_eq!(surface.pixel_ratio(), 2.0);
    assert_eq!(surface.backing_size(), (600, 400));

    engine
        .create_line_chart(
            "canvas",
            sample_data(),
            ChartOptions::new().with_responsive(false),
        )
        .expect("fixed line chart");
    let surface = engine.chart("canvas").expect("chart").surface();
    assert_eq!(surface.pixel_ratio(), 1.0);
    assert_eq!(surface.backing_size(), (300, 200));
}

#[test]
fn value_labels_follow_show_values() {
    let data = ChartData::new(["A", "B"]).with_dataset(Dataset::new("Count", vec![1500.0, 42.0]));
    let mut engine = engine_with_surface(400, 300);
    engine
        .create_bar_chart("canvas", data, ChartOptions::new().with_show_values(true))
        .expect("bar chart");
    let surface = engine.chart("canvas").expect("chart").surface();
    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"1.5k"));
    assert!(texts.contains(&"42"));
}
