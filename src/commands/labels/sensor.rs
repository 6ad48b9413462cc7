use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::table::LabelTable;
use super::taxonomy::{format_label_list, labels_outside_taxonomy};

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Runs taxonomy and ordering checks over a schema-valid sensor table.
pub fn validate_sensor(table: &LabelTable, allowed: &BTreeSet<String>) -> Vec<String> {
    let mut issues = Vec::new();

    let invalid_labels = labels_outside_taxonomy(table.column("label"), allowed);
    if !invalid_labels.is_empty() {
        issues.push(format!(
            "Sensor labels outside taxonomy: {}",
            format_label_list(&invalid_labels)
        ));
    }

    let mut blank = 0_usize;
    let mut misordered = 0_usize;
    for row in table.rows() {
        let (start, end) = (row.get("start_iso"), row.get("end_iso"));
        if start.trim().is_empty() || end.trim().is_empty() {
            blank += 1;
            continue;
        }
        if compare_timestamps(start, end) != Ordering::Less {
            misordered += 1;
        }
    }

    if blank > 0 {
        issues.push(format!("{blank} sensor segments have missing timestamps."));
    }

    if misordered > 0 {
        issues.push(format!(
            "{misordered} sensor segments have start >= end timestamps."
        ));
    }

    issues
}

/// Chronological when both sides parse as ISO-8601, lexicographic otherwise.
/// A timestamp without an offset is read as UTC when compared against one
/// that carries an offset.
pub fn compare_timestamps(start: &str, end: &str) -> Ordering {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => start.cmp(&end),
        _ => start.cmp(end),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
