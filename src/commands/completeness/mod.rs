use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::cli::CompletenessArgs;
use crate::config::ValidationConfig;
use crate::manifest::{LoadedManifest, load_manifest};
use crate::model::{AuditStatus, CompletenessReport, CompletenessResult, DatasetSource, summarize};
use crate::util::{emit_report, now_utc_string};

use super::enforce_attention_gate;


pub fn run(args: CompletenessArgs, config: &ValidationConfig) -> Result<()> {
    info!(
        manifest = %args.manifest.display(),
        project_root = %args.project_root.display(),
        "dataset completeness check requested"
    );

    let loaded = load_manifest(&args.manifest)?;
    let results = validate_sources(&loaded, &args.project_root, config)?;
    let summary = summarize(&results);

    let report = CompletenessReport {
        validated_at: now_utc_string(),
        manifest_version: loaded.version(),
        manifest_sha256: loaded.sha256.clone(),
        results,
    };
    emit_report(args.output.report.as_deref(), &report)?;

    info!(
        total = summary.total,
        pass = summary.pass,
        attention = summary.attention,
        pending = summary.pending,
        "dataset completeness check completed"
    );

    enforce_attention_gate(args.output.fail_on_attention, "dataset completeness", &summary)
}

pub fn validate_sources(
    loaded: &LoadedManifest,
    project_root: &Path,
    config: &ValidationConfig,
) -> Result<Vec<CompletenessResult>> {
    loaded
        .manifest
        .sources
        .iter()
        .map(|source| validate_source(source, project_root, config))
        .collect()
}

pub fn validate_source(
    source: &DatasetSource,
    project_root: &Path,
    config: &ValidationConfig,
) -> Result<CompletenessResult> {
    let target_dir = project_root.join(&source.target_dir);
    let expected = source.expected_items;
    let observed = count_files(&target_dir, config)?;

    let mut issues = Vec::new();
    if !target_dir.exists() {
        issues.push(format!("Missing directory: {}", target_dir.display()));
    }
    if expected > 0 && observed < expected {
        issues.push(format!(
            "File shortfall: expected {expected}, found {observed}"
        ));
    }
    if expected == 0 {
        issues.push("Expected item count not defined in manifest.".to_string());
    }

    let status = if !issues.is_empty() {
        AuditStatus::Attention
    } else if expected > 0 && observed >= expected {
        AuditStatus::Pass
    } else {
        AuditStatus::Pending
    };

    if status != AuditStatus::Pass {
        warn!(
            source_id = %source.id,
            expected,
            observed,
            status = %status,
            "source incomplete"
        );
    }

    Ok(CompletenessResult {
        source_id: source.id.clone(),
        target_dir: target_dir.display().to_string(),
        expected_items: expected,
        observed_items: observed,
        status,
        issues,
    })
}

/// Regular files below `directory`, skipping placeholder files. A missing
/// directory counts as empty.
pub fn count_files(directory: &Path, config: &ValidationConfig) -> Result<u64> {
    if !directory.exists() {
        return Ok(0);
    }

    let mut count = 0_u64;
    for entry in WalkDir::new(directory).min_depth(1) {
        let entry = entry
            .with_context(|| format!("failed to walk directory: {}", directory.display()))?;

        if !entry.path().is_file() {
            continue;
        }

        let is_placeholder = entry
            .file_name()
            .to_str()
            .map(|name| config.is_placeholder(name))
            .unwrap_or(false);
        if !is_placeholder {
            count += 1;
        }
    }

    Ok(count)
}
