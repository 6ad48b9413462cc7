use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::LabelsArgs;
use crate::config::ValidationConfig;
use crate::manifest::{LoadedManifest, load_manifest};
use crate::model::{AuditStatus, LabelCheckReport, LabelCheckResult, Modality, summarize};
use crate::util::{emit_report, now_utc_string};

use super::enforce_attention_gate;

mod audio;
mod schema;
mod sensor;
mod table;
mod taxonomy;

pub use self::audio::validate_audio;
pub use self::schema::validate_schema;
pub use self::sensor::validate_sensor;
pub use self::table::LabelTable;
pub use self::taxonomy::{AllowedLabels, resolve_allowed_labels};

/// Explicit label file locations; `None` falls back to the configured default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFileOverrides<'a> {
    pub audio: Option<&'a Path>,
    pub sensor: Option<&'a Path>,
}

impl<'a> LabelFileOverrides<'a> {
    fn for_modality(&self, modality: Modality) -> Option<&'a Path> {
        match modality {
            Modality::Audio => self.audio,
            Modality::Sensor => self.sensor,
        }
    }
}

pub fn run(args: LabelsArgs, config: &ValidationConfig) -> Result<()> {
    info!(
        manifest = %args.manifest.display(),
        project_root = %args.project_root.display(),
        "label consistency check requested"
    );

    let loaded = load_manifest(&args.manifest)?;
    let overrides = LabelFileOverrides {
        audio: args.audio_labels.as_deref(),
        sensor: args.sensor_labels.as_deref(),
    };
    let results = check_label_files(&loaded, config, &args.project_root, overrides)?;
    let summary = summarize(&results);

    let report = LabelCheckReport {
        checked_at: now_utc_string(),
        manifest_version: loaded.version(),
        manifest_sha256: loaded.sha256.clone(),
        results,
    };
    emit_report(args.output.report.as_deref(), &report)?;

    info!(
        total = summary.total,
        pass = summary.pass,
        attention = summary.attention,
        missing = summary.missing,
        "label consistency check completed"
    );

    enforce_attention_gate(args.output.fail_on_attention, "label consistency", &summary)
}

/// Checks every modality's annotation table. A missing table yields a
/// `missing` result; an unreadable one is an error.
pub fn check_label_files(
    loaded: &LoadedManifest,
    config: &ValidationConfig,
    project_root: &Path,
    overrides: LabelFileOverrides<'_>,
) -> Result<Vec<LabelCheckResult>> {
    let allowed = resolve_allowed_labels(&loaded.manifest, config);

    let mut results = Vec::with_capacity(Modality::ALL.len());
    for modality in Modality::ALL {
        let path = config.label_file(modality, project_root, overrides.for_modality(modality));
        let result = check_label_file(modality, &path, &allowed, config)?;
        if result.status != AuditStatus::Pass {
            warn!(
                modality = %modality,
                status = %result.status,
                issues = result.issues.len(),
                "label file needs attention"
            );
        }
        results.push(result);
    }

    Ok(results)
}

pub fn check_label_file(
    modality: Modality,
    path: &Path,
    allowed: &AllowedLabels,
    config: &ValidationConfig,
) -> Result<LabelCheckResult> {
    let label_file = path.display().to_string();

    if !path.exists() {
        return Ok(LabelCheckResult {
            modality,
            issues: vec![format!("Label file not found: {label_file}")],
            label_file,
            status: AuditStatus::Missing,
            records: None,
        });
    }

    let table = LabelTable::load(path)?;
    let issues = validate_table(modality, &table, allowed, config);

    Ok(LabelCheckResult {
        modality,
        label_file,
        status: AuditStatus::from_issues(&issues),
        issues,
        records: Some(table.len()),
    })
}

/// Schema issues short-circuit the record-level checks.
pub fn validate_table(
    modality: Modality,
    table: &LabelTable,
    allowed: &AllowedLabels,
    config: &ValidationConfig,
) -> Vec<String> {
    let schema_issues = validate_schema(table, config.required_columns(modality), modality);
    if !schema_issues.is_empty() {
        return schema_issues;
    }

    let allowed = allowed.for_modality(modality);
    match modality {
        Modality::Audio => validate_audio(table, allowed),
        Modality::Sensor => validate_sensor(table, allowed),
    }
}
