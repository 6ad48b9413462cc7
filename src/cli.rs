use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "embersense-validate",
    version,
    about = "Dataset manifest, label and license validation for EmberSense"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check annotation tables against the manifest-derived taxonomy.
    Labels(LabelsArgs),
    /// Compare on-disk file counts with manifest expectations.
    Completeness(CompletenessArgs),
    /// Cross-check manifest licenses against the license registry.
    Licenses(LicensesArgs),
    /// Run completeness, label and license checks into one report.
    Audit(AuditArgs),
    /// Gate on a minimum accuracy in a baseline performance report.
    Baseline(BaselineArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Write the JSON report here instead of printing it.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit non-zero when any result needs attention or is missing.
    #[arg(long, default_value_t = false)]
    pub fail_on_attention: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LabelsArgs {
    #[arg(long, default_value = "metadata/dataset_manifest.json")]
    pub manifest: PathBuf,

    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    #[arg(long)]
    pub audio_labels: Option<PathBuf>,

    #[arg(long)]
    pub sensor_labels: Option<PathBuf>,

    #[command(flatten)]
    pub output: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CompletenessArgs {
    #[arg(long, default_value = "metadata/dataset_manifest.json")]
    pub manifest: PathBuf,

    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    #[command(flatten)]
    pub output: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LicensesArgs {
    #[arg(long, default_value = "metadata/dataset_manifest.json")]
    pub manifest: PathBuf,

    #[arg(long, default_value = "docs/licenses/dataset_licenses.md")]
    pub registry: PathBuf,

    #[command(flatten)]
    pub output: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[arg(long, default_value = "metadata/dataset_manifest.json")]
    pub manifest: PathBuf,

    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    #[arg(long)]
    pub registry: Option<PathBuf>,

    #[arg(long)]
    pub audio_labels: Option<PathBuf>,

    #[arg(long)]
    pub sensor_labels: Option<PathBuf>,

    #[command(flatten)]
    pub output: ReportArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BaselineArgs {
    /// Baseline performance JSON produced by training.
    #[arg(long)]
    pub report_input: PathBuf,

    #[arg(long, default_value_t = 0.70)]
    pub threshold: f64,

    /// Optional JSON summary of the gate outcome.
    #[arg(long)]
    pub report: Option<PathBuf>,
}
