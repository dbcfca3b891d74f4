use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::render::SurfaceHost;

use super::{Chart, ChartData, ChartKind, ChartOptions, EngineConfig, FailSoft};

/// Identifies a chart created by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartHandle {
    pub surface_id: String,
    pub kind: ChartKind,
}

/// Registry and factory for charts, keyed by surface id.
///
/// The engine is an ordinary value owned by the host application. It
/// resolves surface ids through its `SurfaceHost`, keeps at most one chart
/// per surface and releases the surface when a chart is destroyed.
pub struct ChartEngine<H: SurfaceHost> {
    host: H,
    config: Arc<EngineConfig>,
    charts: IndexMap<String, Chart<H::Surface>>,
}

impl<H: SurfaceHost> ChartEngine<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: Arc::new(EngineConfig::default()),
            charts: IndexMap::new(),
        }
    }

    pub fn with_config(host: H, config: EngineConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            host,
            config: Arc::new(config),
            charts: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Creates a chart of `kind` on `surface_id` and renders it once.
    ///
    /// Data is validated before the surface is bound. A chart already
    /// registered on the same id is cleared and replaced; if the new chart
    /// fails to render, the previous one is repainted and stays registered.
    pub fn create_chart(
        &mut self,
        kind: ChartKind,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        data.validate()?;
        let surface = self.host.acquire_surface(surface_id)?;
        let mut chart = Chart::new(
            surface_id,
            kind,
            surface,
            data,
            options,
            Arc::clone(&self.config),
        )?;
        chart.apply_pixel_ratio(self.host.device_pixel_ratio())?;

        let mut previous = self.charts.shift_remove_full(surface_id);
        if let Some((_, _, replaced)) = previous.as_mut() {
            debug!(surface_id, previous = %replaced.kind(), kind = %kind, "replacing chart");
            replaced.clear().or_log("clear replaced chart");
        }
        if let Err(err) = chart.render() {
            if let Some((index, id, mut replaced)) = previous {
                warn!(surface_id, error = %err, "chart replacement failed, keeping previous chart");
                replaced.render().or_log("repaint kept chart");
                self.charts.shift_insert(index, id, replaced);
            }
            return Err(err);
        }
        self.charts.insert(surface_id.to_owned(), chart);

        debug!(surface_id, kind = %kind, charts = self.charts.len(), "chart created");
        Ok(ChartHandle {
            surface_id: surface_id.to_owned(),
            kind,
        })
    }

    /// Like `create_chart` with the type given by name (`"line"`, `"bar"`, ...).
    pub fn create_chart_named(
        &mut self,
        type_name: &str,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        let kind = type_name.parse::<ChartKind>()?;
        self.create_chart(kind, surface_id, data, options)
    }

    pub fn create_line_chart(
        &mut self,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        self.create_chart(ChartKind::Line, surface_id, data, options)
    }

    pub fn create_bar_chart(
        &mut self,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        self.create_chart(ChartKind::Bar, surface_id, data, options)
    }

    pub fn create_pie_chart(
        &mut self,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        self.create_chart(ChartKind::Pie, surface_id, data, options)
    }

    pub fn create_doughnut_chart(
        &mut self,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        self.create_chart(ChartKind::Doughnut, surface_id, data, options)
    }

    pub fn create_radar_chart(
        &mut self,
        surface_id: &str,
        data: ChartData,
        options: ChartOptions,
    ) -> ChartResult<ChartHandle> {
        self.create_chart(ChartKind::Radar, surface_id, data, options)
    }

    /// Replaces the data of the chart on `surface_id` and re-renders.
    ///
    /// Returns `Ok(false)` when no chart is registered there. Invalid data is
    /// rejected and the chart keeps its previous snapshot.
    pub fn update_chart(&mut self, surface_id: &str, data: ChartData) -> ChartResult<bool> {
        let Some(chart) = self.charts.get_mut(surface_id) else {
            debug!(surface_id, "update ignored, no chart on surface");
            return Ok(false);
        };
        if let Err(err) = chart.set_data(data) {
            warn!(surface_id, error = %err, "chart update rejected");
            return Err(err);
        }
        debug!(surface_id, "chart updated");
        Ok(true)
    }

    /// Switches the chart on `surface_id` to another type and re-renders.
    pub fn set_chart_kind(&mut self, surface_id: &str, kind: ChartKind) -> ChartResult<bool> {
        let Some(chart) = self.charts.get_mut(surface_id) else {
            return Ok(false);
        };
        let previous = chart.kind();
        chart.set_kind(kind)?;
        debug!(surface_id, previous = %previous, kind = %kind, "chart kind changed");
        Ok(true)
    }

    pub fn set_chart_options(
        &mut self,
        surface_id: &str,
        options: ChartOptions,
    ) -> ChartResult<bool> {
        let Some(chart) = self.charts.get_mut(surface_id) else {
            return Ok(false);
        };
        chart.set_options(options)?;
        Ok(true)
    }

    /// Re-renders the chart on `surface_id`, e.g. after the host resized it.
    pub fn render_chart(&mut self, surface_id: &str) -> ChartResult<bool> {
        let Some(chart) = self.charts.get_mut(surface_id) else {
            return Ok(false);
        };
        chart.render()?;
        Ok(true)
    }

    /// Clears the surface and forgets the chart. Unknown ids are a no-op.
    pub fn destroy_chart(&mut self, surface_id: &str) -> bool {
        let Some(mut chart) = self.charts.shift_remove(surface_id) else {
            return false;
        };
        chart.clear().or_log("clear destroyed chart");
        debug!(surface_id, charts = self.charts.len(), "chart destroyed");
        true
    }

    /// Destroys every chart; returns how many were removed.
    pub fn destroy_all(&mut self) -> usize {
        let ids: Vec<String> = self.charts.keys().cloned().collect();
        ids.iter().filter(|id| self.destroy_chart(id)).count()
    }

    #[must_use]
    pub fn chart(&self, surface_id: &str) -> Option<&Chart<H::Surface>> {
        self.charts.get(surface_id)
    }

    pub fn chart_mut(&mut self, surface_id: &str) -> Option<&mut Chart<H::Surface>> {
        self.charts.get_mut(surface_id)
    }

    /// Surface ids with a live chart, in creation order.
    pub fn chart_ids(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}
