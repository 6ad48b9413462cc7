use std::collections::{BTreeSet, HashMap};

use super::table::LabelTable;
use super::taxonomy::{format_label_list, labels_outside_taxonomy};

/// Runs taxonomy, duration and duplicate checks over a schema-valid audio
/// table. Every check runs regardless of the others.
pub fn validate_audio(table: &LabelTable, allowed: &BTreeSet<String>) -> Vec<String> {
    let mut issues = Vec::new();

    let invalid_labels = labels_outside_taxonomy(table.column("label"), allowed);
    if !invalid_labels.is_empty() {
        issues.push(format!(
            "Audio labels outside taxonomy: {}",
            format_label_list(&invalid_labels)
        ));
    }

    let mut non_numeric = 0_usize;
    let mut non_positive = 0_usize;
    let mut groups = HashMap::<(&str, u64, u64, &str), usize>::new();

    for row in table.rows() {
        let (Some(start), Some(end)) = (
            parse_seconds(row.get("start_s")),
            parse_seconds(row.get("end_s")),
        ) else {
            non_numeric += 1;
            continue;
        };

        if end <= start {
            non_positive += 1;
        }

        // Rows with NaN bounds take no part in grouping.
        if start.is_nan() || end.is_nan() {
            continue;
        }

        let key = (
            row.get("file_path"),
            seconds_key(start),
            seconds_key(end),
            row.get("label"),
        );
        *groups.entry(key).or_insert(0) += 1;
    }

    if non_numeric > 0 {
        issues.push(format!(
            "{non_numeric} audio events have non-numeric start/end values."
        ));
    }

    if non_positive > 0 {
        issues.push(format!(
            "{non_positive} audio events have non-positive duration."
        ));
    }

    let duplicate_groups = groups.values().filter(|count| **count > 1).count();
    if duplicate_groups > 0 {
        issues.push(format!(
            "Duplicate audio annotations detected ({duplicate_groups} duplicate groups)."
        ));
    }

    issues
}

fn parse_seconds(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn seconds_key(value: f64) -> u64 {
    // -0.0 and 0.0 are the same instant.
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}
