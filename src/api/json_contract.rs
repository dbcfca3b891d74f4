use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Surface, SurfaceHost};

use super::{Chart, ChartData, ChartEngine, ChartHandle, ChartKind, ChartOptions, ResolvedOptions};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// One chart definition as delivered by a dashboard payload:
/// `{"type": "bar", "data": {...}, "options": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartRequest {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart request json: {e}"))
        })
    }

    /// Parsed chart type; unknown names are `UnsupportedChartType`.
    pub fn kind(&self) -> ChartResult<ChartKind> {
        self.chart_type.parse()
    }
}

/// Serializable view of a live chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSnapshot {
    pub surface_id: String,
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ResolvedOptions,
    pub render_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<S: Surface> Chart<S> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            surface_id: self.surface_id().to_owned(),
            kind: self.kind(),
            data: self.data().clone(),
            options: self.resolved_options().clone(),
            render_count: self.render_count(),
        }
    }
}

impl<H: SurfaceHost> ChartEngine<H> {
    pub fn create_chart_from_request(
        &mut self,
        surface_id: &str,
        request: ChartRequest,
    ) -> ChartResult<ChartHandle> {
        let kind = request.kind()?;
        self.create_chart(kind, surface_id, request.data, request.options)
    }

    pub fn create_chart_from_json(
        &mut self,
        surface_id: &str,
        input: &str,
    ) -> ChartResult<ChartHandle> {
        self.create_chart_from_request(surface_id, ChartRequest::from_json_str(input)?)
    }

    pub fn chart_snapshot_json_contract_v1_pretty(
        &self,
        surface_id: &str,
    ) -> ChartResult<Option<String>> {
        self.chart(surface_id)
            .map(|chart| chart.snapshot().to_json_contract_v1_pretty())
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::ChartRequest;
    use crate::api::ChartKind;
    use crate::error::ChartError;

    #[test]
    fn request_carries_type_name() {
        let request = ChartRequest::from_json_str(
            r#"{"type": "Radar", "data": {"labels": ["a"], "datasets": []}}"#,
        )
        .expect("request");
        assert_eq!(request.kind().expect("kind"), ChartKind::Radar);
        assert!(request.options.show_legend.is_none());
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let request = ChartRequest::from_json_str(r#"{"type": "gauge"}"#).expect("request");
        assert!(matches!(request.kind(), Err(ChartError::UnsupportedChartType(_))));
    }
}
