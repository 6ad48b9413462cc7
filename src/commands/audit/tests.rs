use std::fs;
use std::path::Path;

use super::*;
use crate::cli::ReportArgs;
use crate::model::Modality;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("fixture directory should be created");
    }
    fs::write(&path, contents).expect("fixture file should be written");
}

fn audit_args(root: &Path, registry: Option<&str>) -> AuditArgs {
    AuditArgs {
        manifest: root.join("metadata/dataset_manifest.json"),
        project_root: root.to_path_buf(),
        registry: registry.map(|relative| root.join(relative)),
        audio_labels: None,
        sensor_labels: None,
        output: ReportArgs {
            report: None,
            fail_on_attention: false,
        },
    }
}

fn seed_project(root: &Path) {
    write(
        root,
        "metadata/dataset_manifest.json",
        r#"
        {
          "version": "1.0",
          "sources": [
            {
              "id": "audioset_fire",
              "name": "AudioSet Fire",
              "modality": "audio",
              "labels": ["fire"],
              "license": "CC BY 4.0",
              "target_dir": "raw/audio_fire",
              "expected_items": 2
            }
          ]
        }
        "#,
    );
    write(root, "raw/audio_fire/clip_001.wav", "RIFF");
    write(
        root,
        "02_dataset/processed/annotations.csv",
        "event_id,file_path,start_s,end_s,label\nevt-1,raw/audio_fire/clip_001.wav,0.0,10.0,fire\n",
    );
}

#[test]
fn audit_reports_shortfall_and_clean_audio_labels() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    seed_project(dir.path());

    let report = build_report(&audit_args(dir.path(), None), &ValidationConfig::default())
        .expect("audit should run");

    assert_eq!(report.completeness.len(), 1);
    let completeness = &report.completeness[0];
    assert_eq!(completeness.status, AuditStatus::Attention);
    assert_eq!(completeness.observed_items, 1);
    assert_eq!(
        completeness.issues,
        vec!["File shortfall: expected 2, found 1".to_string()]
    );

    let audio = report
        .labels
        .iter()
        .find(|result| result.modality == Modality::Audio)
        .expect("audio result should be present");
    assert_eq!(audio.status, AuditStatus::Pass);
    assert_eq!(audio.records, Some(1));
    assert!(audio.issues.is_empty());

    let sensor = report
        .labels
        .iter()
        .find(|result| result.modality == Modality::Sensor)
        .expect("sensor result should be present");
    assert_eq!(sensor.status, AuditStatus::Missing);

    assert!(report.licenses.is_empty());
    assert!(report.registry.is_none());
    assert_eq!(report.summary.overall, AuditStatus::Attention);
    assert_eq!(report.summary.counts.total, 3);
    assert_eq!(report.summary.counts.pass, 1);
}

#[test]
fn audit_includes_license_results_when_registry_given() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    seed_project(dir.path());
    write(
        dir.path(),
        "docs/licenses/dataset_licenses.md",
        "- AudioSet Fire: CC BY 4.0\n",
    );

    let args = audit_args(dir.path(), Some("docs/licenses/dataset_licenses.md"));
    let report = build_report(&args, &ValidationConfig::default()).expect("audit should run");

    assert_eq!(report.licenses.len(), 1);
    assert_eq!(report.licenses[0].status, AuditStatus::Pass);
    assert_eq!(report.summary.counts.total, 4);

    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["summary"]["overall"], "attention");
    assert_eq!(json["summary"]["pass"], 2);
    assert_eq!(json["manifest_version"], "1.0");
    assert!(
        json["audited_at"]
            .as_str()
            .is_some_and(|value| value.ends_with('Z'))
    );
}

#[test]
fn audit_fails_fast_on_missing_manifest() {
    let dir = tempfile::tempdir().expect("tempdir should be created");

    let error = build_report(&audit_args(dir.path(), None), &ValidationConfig::default())
        .expect_err("missing manifest should fail");
    assert!(
        error
            .downcast_ref::<crate::manifest::ManifestError>()
            .is_some_and(|kind| matches!(kind, crate::manifest::ManifestError::NotFound { .. })),
        "unexpected error: {error}"
    );
}

#[test]
fn attention_gate_only_fails_when_enabled() {
    let mut summary = StatusSummary::default();
    summary.record(AuditStatus::Pass);
    summary.record(AuditStatus::Pending);
    assert!(enforce_attention_gate(true, "dataset audit", &summary).is_ok());

    summary.record(AuditStatus::Missing);
    assert!(enforce_attention_gate(false, "dataset audit", &summary).is_ok());

    let error = enforce_attention_gate(true, "dataset audit", &summary)
        .expect_err("gate should fail with a missing result");
    assert_eq!(error.to_string(), "dataset audit: 1 of 3 results need attention");
}
