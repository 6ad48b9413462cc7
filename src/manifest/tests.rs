use std::fs;

use super::*;

#[test]
fn load_manifest_applies_field_defaults() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("dataset_manifest.json");
    fs::write(
        &path,
        r#"
        {
          "version": "0.2.0",
          "sources": [
            {
              "id": "audioset_fire",
              "name": "AudioSet Fire Crackle",
              "modality": "audio",
              "labels": ["fire", "crackle"],
              "license": "CC BY 4.0",
              "target_dir": "02_dataset/raw/audio_fire",
              "expected_items": 120
            },
            {
              "id": "nasa_power",
              "modality": "sensor",
              "target_dir": "02_dataset/raw/sensor_fire"
            }
          ]
        }
        "#,
    )
    .expect("manifest should be written");

    let loaded = load_manifest(&path).expect("manifest should load");
    assert_eq!(
        loaded.version(),
        Some(VersionTag::Text("0.2.0".to_string()))
    );
    assert_eq!(loaded.manifest.sources.len(), 2);
    assert_eq!(loaded.sha256.len(), 64);

    let sensor = &loaded.manifest.sources[1];
    assert_eq!(sensor.name, "UNKNOWN");
    assert!(sensor.labels.is_empty());
    assert!(sensor.license.is_empty());
    assert_eq!(sensor.expected_items, 0);
}

#[test]
fn load_manifest_accepts_numeric_version() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("manifest.json");
    fs::write(&path, r#"{"version": 3, "sources": []}"#).expect("manifest should be written");

    let loaded = load_manifest(&path).expect("manifest should load");
    assert!(matches!(loaded.version(), Some(VersionTag::Number(_))));
    assert!(loaded.manifest.sources.is_empty());
}

#[test]
fn load_manifest_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("absent.json");

    let error = load_manifest(&path).expect_err("missing manifest should fail");
    assert!(matches!(error, ManifestError::NotFound { .. }), "unexpected error: {error}");
}

#[test]
fn load_manifest_reports_invalid_json() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"sources\": [").expect("manifest should be written");

    let error = load_manifest(&path).expect_err("broken manifest should fail");
    assert!(matches!(error, ManifestError::Parse { .. }), "unexpected error: {error}");
}

#[test]
fn load_manifest_rejects_negative_expected_items() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("negative.json");
    fs::write(
        &path,
        r#"{"sources": [{"id": "a", "target_dir": "raw/a", "expected_items": -1}]}"#,
    )
    .expect("manifest should be written");

    let error = load_manifest(&path).expect_err("negative count should fail");
    assert!(matches!(error, ManifestError::Parse { .. }), "unexpected error: {error}");
}
