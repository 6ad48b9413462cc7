use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::AuditArgs;
use crate::config::ValidationConfig;
use crate::manifest::load_manifest;
use crate::model::{
    AuditStatus, CompletenessResult, LabelCheckResult, LicenseResult, StatusSummary, VersionTag,
    summarize,
};
use crate::util::{emit_report, now_utc_string};

use super::completeness::validate_sources;
use super::enforce_attention_gate;
use super::labels::{LabelFileOverrides, check_label_files};
use super::licenses::{load_registry, validate_license_entries};

#[cfg(test)]
mod tests;

#[derive(Debug, Serialize)]
pub struct DatasetAuditReport {
    pub audited_at: String,
    pub manifest: String,
    pub manifest_version: Option<VersionTag>,
    pub manifest_sha256: String,
    pub registry: Option<String>,
    pub summary: AuditSummary,
    pub completeness: Vec<CompletenessResult>,
    pub labels: Vec<LabelCheckResult>,
    pub licenses: Vec<LicenseResult>,
}

#[derive(Debug, Serialize)]
pub struct AuditSummary {
    pub overall: AuditStatus,
    #[serde(flatten)]
    pub counts: StatusSummary,
}

pub fn run(args: AuditArgs, config: &ValidationConfig) -> Result<()> {
    info!(
        manifest = %args.manifest.display(),
        project_root = %args.project_root.display(),
        "dataset audit requested"
    );

    let report = build_report(&args, config)?;
    emit_report(args.output.report.as_deref(), &report)?;

    info!(
        overall = %report.summary.overall,
        total = report.summary.counts.total,
        attention = report.summary.counts.attention,
        missing = report.summary.counts.missing,
        pending = report.summary.counts.pending,
        "dataset audit completed"
    );

    enforce_attention_gate(
        args.output.fail_on_attention,
        "dataset audit",
        &report.summary.counts,
    )
}

/// Loads the manifest once and runs every checker against it.
pub fn build_report(args: &AuditArgs, config: &ValidationConfig) -> Result<DatasetAuditReport> {
    let loaded = load_manifest(&args.manifest)?;

    let completeness = validate_sources(&loaded, &args.project_root, config)?;

    let overrides = LabelFileOverrides {
        audio: args.audio_labels.as_deref(),
        sensor: args.sensor_labels.as_deref(),
    };
    let labels = check_label_files(&loaded, config, &args.project_root, overrides)?;

    let licenses = match args.registry.as_deref() {
        Some(registry) => {
            let registry_text = load_registry(registry)?;
            validate_license_entries(&loaded.manifest.sources, &registry_text)?
        }
        None => {
            info!("no license registry given, skipping license audit");
            Vec::new()
        }
    };

    let mut counts = summarize(&completeness);
    for status in labels
        .iter()
        .map(|result| result.status)
        .chain(licenses.iter().map(|result| result.status))
    {
        counts.record(status);
    }

    Ok(DatasetAuditReport {
        audited_at: now_utc_string(),
        manifest: loaded.path.display().to_string(),
        manifest_version: loaded.version(),
        manifest_sha256: loaded.sha256.clone(),
        registry: args
            .registry
            .as_ref()
            .map(|registry| registry.display().to_string()),
        summary: AuditSummary {
            overall: counts.overall(),
            counts,
        },
        completeness,
        labels,
        licenses,
    })
}
