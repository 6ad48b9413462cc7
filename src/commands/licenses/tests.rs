use std::fs;

use super::*;

const REGISTRY: &str = "# Dataset Licenses\n\n\
| Source | License | Notes |\n\
|--------|---------|-------|\n\
| AudioSet Fire Crackle | **cc by 4.0** | attribution required |\n\
| NASA POWER | Public Domain (U.S. Gov) | |\n";

fn source(id: &str, name: &str, license: &str) -> DatasetSource {
    DatasetSource {
        id: id.to_string(),
        name: name.to_string(),
        modality: "audio".to_string(),
        labels: Vec::new(),
        license: license.to_string(),
        target_dir: format!("raw/{id}"),
        expected_items: 1,
    }
}

#[test]
fn documented_source_passes_with_case_insensitive_license() {
    let sources = vec![source("audioset", "AudioSet Fire Crackle", "CC BY 4.0")];
    let results = validate_license_entries(&sources, REGISTRY).expect("audit should run");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, AuditStatus::Pass);
    assert_eq!(results[0].license, "CC BY 4.0");
    assert!(results[0].issues.is_empty());
}

#[test]
fn license_with_regex_metacharacters_is_matched_literally() {
    let sources = vec![source("nasa", "NASA POWER", "public domain (u.s. gov)")];
    let results = validate_license_entries(&sources, REGISTRY).expect("audit should run");
    assert_eq!(results[0].status, AuditStatus::Pass);

    let sources = vec![source("nasa", "NASA POWER", "Public Domain (U.S.xGov)")];
    let results = validate_license_entries(&sources, REGISTRY).expect("audit should run");
    assert_eq!(
        results[0].issues,
        vec!["License 'Public Domain (U.S.xGov)' not documented in registry.".to_string()]
    );
}

#[test]
fn source_name_match_is_case_sensitive() {
    let sources = vec![source("audioset", "audioset fire crackle", "CC BY 4.0")];
    let results = validate_license_entries(&sources, REGISTRY).expect("audit should run");
    assert_eq!(results[0].status, AuditStatus::Attention);
    assert_eq!(
        results[0].issues,
        vec!["Source 'audioset fire crackle' missing from registry markdown.".to_string()]
    );
}

#[test]
fn empty_license_is_reported_as_unspecified() {
    let sources = vec![source("urban", "UrbanSound8K", "   ")];
    let results = validate_license_entries(&sources, REGISTRY).expect("audit should run");
    assert_eq!(results[0].license, "UNSPECIFIED");
    assert_eq!(
        results[0].issues,
        vec![
            "License field missing in manifest.".to_string(),
            "Source 'UrbanSound8K' missing from registry markdown.".to_string(),
        ]
    );
}

#[test]
fn missing_registry_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let error = load_registry(&dir.path().join("dataset_licenses.md"))
        .expect_err("missing registry should fail");
    assert!(
        error.to_string().contains("failed to read license registry"),
        "unexpected error: {error}"
    );

    let path = dir.path().join("registry.md");
    fs::write(&path, REGISTRY).expect("registry should be written");
    let text = load_registry(&path).expect("registry should load");
    assert!(text.contains("NASA POWER"));
}
