use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::VersionTag;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub f1_macro: Option<f64>,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub flash_kb: Option<f64>,
    #[serde(default)]
    pub ram_kb: Option<f64>,
}

/// One model row of a baseline suite, or a flat single-model report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub version: Option<VersionTag>,
    #[serde(flatten)]
    pub metrics: ModelMetrics,
}

#[derive(Debug, Deserialize)]
struct ModelSuite {
    models: Vec<ModelEntry>,
}

/// Output of the advanced training pipeline: metrics nested under `results`.
#[derive(Debug, Deserialize)]
pub struct VersionedModel {
    #[serde(alias = "name")]
    model_name: String,
    #[serde(default)]
    version: Option<VersionTag>,
    results: ModelMetrics,
}

#[derive(Debug)]
pub enum PerformanceReport {
    Suite(Vec<ModelEntry>),
    Versioned(VersionedModel),
    Single(ModelEntry),
}

impl PerformanceReport {
    pub fn schema(&self) -> &'static str {
        match self {
            Self::Suite(_) => "suite",
            Self::Versioned(_) => "versioned",
            Self::Single(_) => "single",
        }
    }

    pub fn into_models(self) -> Vec<ModelEntry> {
        match self {
            Self::Suite(models) => models,
            Self::Versioned(model) => vec![ModelEntry {
                name: model.model_name,
                version: model.version,
                metrics: model.results,
            }],
            Self::Single(model) => vec![model],
        }
    }
}

/// Decodes the suite layout first, then the versioned single-model layout,
/// then the flat single-model layout.
pub fn decode_performance_report(value: serde_json::Value) -> Result<PerformanceReport> {
    let suite_error = match serde_json::from_value::<ModelSuite>(value.clone()) {
        Ok(suite) => return Ok(PerformanceReport::Suite(suite.models)),
        Err(error) => error,
    };
    debug!(error = %suite_error, "not a suite performance report");

    let versioned_error = match serde_json::from_value::<VersionedModel>(value.clone()) {
        Ok(model) => return Ok(PerformanceReport::Versioned(model)),
        Err(error) => error,
    };
    debug!(error = %versioned_error, "not a versioned performance report");

    match serde_json::from_value::<ModelEntry>(value) {
        Ok(model) => Ok(PerformanceReport::Single(model)),
        Err(single_error) => bail!(
            "no known layout matched (suite: {suite_error}; versioned: {versioned_error}; single: {single_error})"
        ),
    }
}
