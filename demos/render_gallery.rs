use canvas_charts::api::{ChartData, ChartKind, ChartOptions, ChartRequest, Dataset};
use canvas_charts::core::Viewport;
use canvas_charts::render::CairoHost;
use canvas_charts::{ChartEngine, telemetry};

const DISTRIBUTION_REQUEST: &str = r##"{
    "type": "doughnut",
    "data": {
        "labels": ["A", "B", "C", "D", "F"],
        "datasets": [{"label": "Grades", "data": [14, 31, 22, 9, 4]}]
    },
    "options": {"cutout": "65%", "centerText": "80 students", "showPercentages": true}
}"##;

fn term_scores() -> ChartData {
    ChartData::new(["Math", "Physics", "Chemistry", "Biology", "History", "Art"])
        .with_dataset(Dataset::new(
            "Term 1",
            vec![72.0, 85.0, 64.0, 78.0, 90.0, 58.0],
        ))
        .with_dataset(
            Dataset::new("Term 2", vec![78.0, 80.0, 70.0, 82.0, 88.0, 66.0]).with_fill(true),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = telemetry::init_default_tracing();

    let out_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/gallery".to_owned());
    std::fs::create_dir_all(&out_dir)?;

    let mut host = CairoHost::new().with_device_pixel_ratio(2.0);
    for kind in ChartKind::ALL {
        host.register_surface(kind.as_str(), Viewport::new(640, 400));
    }
    host.register_surface("distribution", Viewport::new(400, 400));
    let mut engine = ChartEngine::new(host);

    for kind in ChartKind::ALL {
        let options = match kind {
            ChartKind::Bar => ChartOptions::new().with_show_values(true),
            ChartKind::Pie | ChartKind::Doughnut => ChartOptions::new().with_show_percentages(true),
            _ => ChartOptions::new(),
        };
        engine.create_chart(kind, kind.as_str(), term_scores(), options)?;
    }
    engine.create_chart_from_request(
        "distribution",
        ChartRequest::from_json_str(DISTRIBUTION_REQUEST)?,
    )?;

    for surface_id in engine.chart_ids() {
        let Some(chart) = engine.chart(surface_id) else {
            continue;
        };
        let path = format!("{out_dir}/{surface_id}.png");
        chart.surface().write_png(&path)?;
        println!("wrote {path} ({})", chart.kind());
    }

    Ok(())
}
