use std::sync::Arc;

use tracing::trace;

use crate::core::{Rect, compute_chart_area};
use crate::error::ChartResult;
use crate::render::{Color, Paint, Surface};

use super::{
    ChartData, ChartKind, ChartOptions, EngineConfig, FailSoft, ResolvedOptions,
    bar_chart_painter, legend_painter, line_chart_painter, radar_chart_painter,
    slice_chart_painter,
};

/// Everything a painter needs besides the surface itself.
pub(super) struct RenderContext<'a> {
    pub data: &'a ChartData,
    pub options: &'a ResolvedOptions,
    pub config: &'a EngineConfig,
    pub palette: &'a [Color],
    /// Plot rectangle after padding and the legend strip.
    pub area: Rect,
}

/// One chart bound to one drawing surface.
///
/// The chart owns its surface, the current data snapshot and the options it
/// was created with. Every mutation validates first and re-renders on success,
/// so the surface always shows the current state.
#[derive(Debug)]
pub struct Chart<S: Surface> {
    surface_id: String,
    kind: ChartKind,
    surface: S,
    data: ChartData,
    options: ChartOptions,
    resolved: ResolvedOptions,
    config: Arc<EngineConfig>,
    palette: Vec<Color>,
    render_count: u64,
}

impl<S: Surface> Chart<S> {
    /// Binds a chart to `surface` without painting anything yet.
    pub fn new(
        surface_id: impl Into<String>,
        kind: ChartKind,
        surface: S,
        data: ChartData,
        options: ChartOptions,
        config: Arc<EngineConfig>,
    ) -> ChartResult<Self> {
        data.validate()?;
        let resolved = options.resolve(kind, &config);
        let palette = config.palette_colors();
        Ok(Self {
            surface_id: surface_id.into(),
            kind,
            surface,
            data,
            options,
            resolved,
            config,
            palette,
            render_count: 0,
        })
    }

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn resolved_options(&self) -> &ResolvedOptions {
        &self.resolved
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Number of completed renders since construction.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Current plot rectangle for the bound surface.
    #[must_use]
    pub fn chart_area(&self) -> Rect {
        let legend_strip = self
            .resolved
            .show_legend
            .then_some(self.config.legend_height_px);
        compute_chart_area(self.surface.size(), self.resolved.padding, legend_strip)
    }

    /// Clears the surface and paints the chart from the current state.
    pub fn render(&mut self) -> ChartResult<()> {
        let area = self.chart_area();
        self.surface.clear()?;

        if let Some(background) = self.config.theme.background {
            let size = self.surface.size();
            let full = Rect::new(0.0, 0.0, size.width_px(), size.height_px());
            self.surface.fill_rect(full, &Paint::Solid(background))?;
        }

        let context = RenderContext {
            data: &self.data,
            options: &self.resolved,
            config: &self.config,
            palette: &self.palette,
            area,
        };
        let surface = &mut self.surface;
        match self.kind {
            ChartKind::Line => line_chart_painter::paint(surface, &context)?,
            ChartKind::Bar => bar_chart_painter::paint(surface, &context)?,
            ChartKind::Pie => slice_chart_painter::paint(surface, &context, false)?,
            ChartKind::Doughnut => slice_chart_painter::paint(surface, &context, true)?,
            ChartKind::Radar => radar_chart_painter::paint(surface, &context)?,
        }
        if self.resolved.show_legend {
            let entries = legend_painter::legend_entries(self.kind, &context);
            legend_painter::paint(surface, &context, &entries)?;
        }

        self.render_count += 1;
        trace!(
            surface_id = %self.surface_id,
            kind = %self.kind,
            datasets = self.data.datasets.len(),
            labels = self.data.labels.len(),
            "chart rendered"
        );
        Ok(())
    }

    /// Erases the surface without touching chart state.
    pub fn clear(&mut self) -> ChartResult<()> {
        self.surface.clear()
    }

    /// Replaces the data snapshot and re-renders. On any error the previous
    /// data is restored and repainted.
    pub fn set_data(&mut self, data: ChartData) -> ChartResult<()> {
        data.validate()?;
        let previous = std::mem::replace(&mut self.data, data);
        self.render_or_restore(|chart| chart.data = previous)
    }

    /// Switches chart type, re-resolving per-kind option defaults.
    pub fn set_kind(&mut self, kind: ChartKind) -> ChartResult<()> {
        let previous_kind = std::mem::replace(&mut self.kind, kind);
        let previous_resolved =
            std::mem::replace(&mut self.resolved, self.options.resolve(kind, &self.config));
        self.render_or_restore(|chart| {
            chart.kind = previous_kind;
            chart.resolved = previous_resolved;
        })
    }

    pub fn set_options(&mut self, options: ChartOptions) -> ChartResult<()> {
        let previous_resolved =
            std::mem::replace(&mut self.resolved, options.resolve(self.kind, &self.config));
        let previous_options = std::mem::replace(&mut self.options, options);
        self.render_or_restore(|chart| {
            chart.options = previous_options;
            chart.resolved = previous_resolved;
        })
    }

    fn render_or_restore(&mut self, restore: impl FnOnce(&mut Self)) -> ChartResult<()> {
        let Err(err) = self.render() else {
            return Ok(());
        };
        restore(self);
        self.render().or_log("repaint restored chart");
        Err(err)
    }

    /// Applies responsive sizing: the backing store follows `ratio` when the
    /// chart is responsive and stays at 1:1 otherwise.
    pub fn apply_pixel_ratio(&mut self, ratio: f64) -> ChartResult<()> {
        let ratio = if self.resolved.responsive { ratio } else { 1.0 };
        self.surface.set_pixel_ratio(ratio)
    }
}
