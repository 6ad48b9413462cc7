use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::RegexBuilder;
use tracing::{info, warn};

use crate::cli::LicensesArgs;
use crate::manifest::load_manifest;
use crate::model::{AuditStatus, DatasetSource, LicenseAuditReport, LicenseResult, summarize};
use crate::util::{emit_report, now_utc_string};

use super::enforce_attention_gate;

#[cfg(test)]
mod tests;

pub fn run(args: LicensesArgs) -> Result<()> {
    info!(
        manifest = %args.manifest.display(),
        registry = %args.registry.display(),
        "license audit requested"
    );

    let loaded = load_manifest(&args.manifest)?;
    let registry_text = load_registry(&args.registry)?;
    let results = validate_license_entries(&loaded.manifest.sources, &registry_text)?;
    let summary = summarize(&results);

    let report = LicenseAuditReport {
        audited_at: now_utc_string(),
        manifest_version: loaded.version(),
        manifest_sha256: loaded.sha256.clone(),
        registry: args.registry.display().to_string(),
        results,
    };
    emit_report(args.output.report.as_deref(), &report)?;

    info!(
        total = summary.total,
        pass = summary.pass,
        attention = summary.attention,
        "license audit completed"
    );

    enforce_attention_gate(args.output.fail_on_attention, "license audit", &summary)
}

pub fn load_registry(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read license registry: {}", path.display()))
}

/// Textual cross-reference against a free-form registry document. License
/// names match case-insensitively, source names match exactly.
pub fn validate_license_entries(
    sources: &[DatasetSource],
    registry_text: &str,
) -> Result<Vec<LicenseResult>> {
    let mut results = Vec::with_capacity(sources.len());

    for source in sources {
        let license = source.license.trim();
        let mut issues = Vec::new();

        if license.is_empty() {
            issues.push("License field missing in manifest.".to_string());
        } else if !license_documented(license, registry_text)? {
            issues.push(format!("License '{license}' not documented in registry."));
        }

        if !registry_text.contains(source.name.as_str()) {
            issues.push(format!(
                "Source '{}' missing from registry markdown.",
                source.name
            ));
        }

        let status = AuditStatus::from_issues(&issues);
        if status != AuditStatus::Pass {
            warn!(source_id = %source.id, issues = issues.len(), "license entry needs attention");
        }

        results.push(LicenseResult {
            source_id: source.id.clone(),
            license: if license.is_empty() {
                "UNSPECIFIED".to_string()
            } else {
                license.to_string()
            },
            status,
            issues,
        });
    }

    Ok(results)
}

fn license_documented(license: &str, registry_text: &str) -> Result<bool> {
    let pattern = RegexBuilder::new(&regex::escape(license))
        .case_insensitive(true)
        .build()
        .with_context(|| format!("failed to compile license pattern for '{license}'"))?;
    Ok(pattern.is_match(registry_text))
}
