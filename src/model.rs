use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    #[serde(default)]
    pub version: Option<VersionTag>,
    #[serde(default)]
    pub sources: Vec<DatasetSource>,
}

/// Opaque version value; both `"1.2"` and `3` appear in the wild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSource {
    pub id: String,
    #[serde(default = "unknown_source_name")]
    pub name: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub license: String,
    pub target_dir: String,
    #[serde(default)]
    pub expected_items: u64,
}

fn unknown_source_name() -> String {
    "UNKNOWN".to_string()
}

impl DatasetSource {
    pub fn has_modality(&self, modality: Modality) -> bool {
        self.modality == modality.as_str()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Audio,
    Sensor,
}

impl Modality {
    pub const ALL: [Modality; 2] = [Modality::Audio, Modality::Sensor];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Sensor => "sensor",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single check.
///
/// `Pass` means the check ran and found nothing. `Attention` means at least one
/// issue was recorded. `Missing` means the input the check needed does not
/// exist. `Pending` means the check could not reach a verdict because no
/// baseline was declared; it is not a failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pass,
    Attention,
    Missing,
    Pending,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Attention => "attention",
            Self::Missing => "missing",
            Self::Pending => "pending",
        }
    }

    pub fn from_issues(issues: &[String]) -> Self {
        if issues.is_empty() {
            Self::Pass
        } else {
            Self::Attention
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait AuditOutcome {
    fn status(&self) -> AuditStatus;
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelCheckResult {
    pub modality: Modality,
    pub label_file: String,
    pub status: AuditStatus,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletenessResult {
    pub source_id: String,
    pub target_dir: String,
    pub expected_items: u64,
    pub observed_items: u64,
    pub status: AuditStatus,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LicenseResult {
    pub source_id: String,
    pub license: String,
    pub status: AuditStatus,
    pub issues: Vec<String>,
}

impl AuditOutcome for LabelCheckResult {
    fn status(&self) -> AuditStatus {
        self.status
    }
}

impl AuditOutcome for CompletenessResult {
    fn status(&self) -> AuditStatus {
        self.status
    }
}

impl AuditOutcome for LicenseResult {
    fn status(&self) -> AuditStatus {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pass: usize,
    pub attention: usize,
    pub missing: usize,
    pub pending: usize,
}

impl StatusSummary {
    pub fn record(&mut self, status: AuditStatus) {
        self.total += 1;
        match status {
            AuditStatus::Pass => self.pass += 1,
            AuditStatus::Attention => self.attention += 1,
            AuditStatus::Missing => self.missing += 1,
            AuditStatus::Pending => self.pending += 1,
        }
    }

    pub fn overall(&self) -> AuditStatus {
        if self.attention > 0 {
            AuditStatus::Attention
        } else if self.missing > 0 {
            AuditStatus::Missing
        } else if self.pending > 0 {
            AuditStatus::Pending
        } else {
            AuditStatus::Pass
        }
    }
}

pub fn summarize<T: AuditOutcome>(results: &[T]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for result in results {
        summary.record(result.status());
    }
    summary
}

#[derive(Debug, Serialize)]
pub struct LabelCheckReport {
    pub checked_at: String,
    pub manifest_version: Option<VersionTag>,
    pub manifest_sha256: String,
    pub results: Vec<LabelCheckResult>,
}

#[derive(Debug, Serialize)]
pub struct CompletenessReport {
    pub validated_at: String,
    pub manifest_version: Option<VersionTag>,
    pub manifest_sha256: String,
    pub results: Vec<CompletenessResult>,
}

#[derive(Debug, Serialize)]
pub struct LicenseAuditReport {
    pub audited_at: String,
    pub manifest_version: Option<VersionTag>,
    pub manifest_sha256: String,
    pub registry: String,
    pub results: Vec<LicenseResult>,
}
