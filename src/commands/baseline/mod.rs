use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::BaselineArgs;
use crate::model::AuditStatus;
use crate::util::{now_utc_string, write_json_pretty};

mod performance;

use self::performance::{ModelEntry, decode_performance_report};

#[derive(Debug, Serialize)]
pub struct BaselineGateReport {
    pub checked_at: String,
    pub source: String,
    pub schema: &'static str,
    pub threshold: f64,
    pub status: AuditStatus,
    pub models: Vec<ModelGateResult>,
}

#[derive(Debug, Serialize)]
pub struct ModelGateResult {
    #[serde(flatten)]
    pub model: ModelEntry,
    pub status: AuditStatus,
    pub issues: Vec<String>,
}

impl ModelGateResult {
    fn passed(&self) -> bool {
        self.status == AuditStatus::Pass
    }
}

pub fn run(args: BaselineArgs) -> Result<()> {
    info!(
        input = %args.report_input.display(),
        threshold = args.threshold,
        "baseline accuracy gate requested"
    );

    let report = build_gate_report(&args.report_input, args.threshold)?;

    if let Some(path) = args.report.as_deref() {
        write_json_pretty(path, &report)?;
        info!(path = %path.display(), "gate report written");
    }

    let mut stdout = io::stdout().lock();
    write_gate_summary(&mut stdout, &report).context("failed to write gate summary")?;

    if report.status != AuditStatus::Pass {
        let failing = report.models.iter().filter(|model| !model.passed()).count();
        bail!(
            "{failing} model(s) below accuracy threshold {:.2}",
            report.threshold
        );
    }

    Ok(())
}

pub fn build_gate_report(input: &Path, threshold: f64) -> Result<BaselineGateReport> {
    if !(0.0..=1.0).contains(&threshold) {
        bail!("accuracy threshold must be within [0, 1], got {threshold}");
    }

    let raw =
        fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    let decoded = decode_performance_report(value)
        .with_context(|| format!("unrecognized performance report: {}", input.display()))?;

    let schema = decoded.schema();
    let models = decoded
        .into_models()
        .into_iter()
        .map(|model| evaluate_model(model, threshold))
        .collect::<Vec<ModelGateResult>>();

    if models.is_empty() {
        warn!(input = %input.display(), "performance report lists no models");
    }

    let status = if models.iter().all(ModelGateResult::passed) {
        AuditStatus::Pass
    } else {
        AuditStatus::Attention
    };

    Ok(BaselineGateReport {
        checked_at: now_utc_string(),
        source: input.display().to_string(),
        schema,
        threshold,
        status,
        models,
    })
}

fn evaluate_model(model: ModelEntry, threshold: f64) -> ModelGateResult {
    let mut issues = Vec::new();
    match model.metrics.accuracy {
        None => issues.push("Accuracy missing from performance report.".to_string()),
        Some(accuracy) if accuracy < threshold => issues.push(format!(
            "Accuracy {accuracy:.4} below threshold {threshold:.2}."
        )),
        Some(_) => {}
    }

    ModelGateResult {
        model,
        status: AuditStatus::from_issues(&issues),
        issues,
    }
}

pub fn write_gate_summary<W: Write>(out: &mut W, report: &BaselineGateReport) -> io::Result<()> {
    if report.status == AuditStatus::Pass {
        writeln!(out, "[baseline-check] PASS")?;
        for result in &report.models {
            writeln!(
                out,
                " - {}: {}",
                result.model.name,
                format_percent(result.model.metrics.accuracy.unwrap_or_default(), 2)
            )?;
        }
        return Ok(());
    }

    writeln!(out, "[baseline-check] FAIL")?;
    for result in report.models.iter().filter(|result| !result.passed()) {
        writeln!(
            out,
            " - {}: {} < {}",
            result.model.name,
            format_percent(result.model.metrics.accuracy.unwrap_or_default(), 2),
            format_percent(report.threshold, 0)
        )?;
    }

    Ok(())
}

fn format_percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}
