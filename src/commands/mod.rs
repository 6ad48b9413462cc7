use anyhow::{Result, bail};
use tracing::warn;

use crate::model::StatusSummary;

pub mod audit;
pub mod baseline;
pub mod completeness;
pub mod labels;
pub mod licenses;

/// Turns a summary with attention or missing results into an error when the
/// caller asked for CI gating. Runs after the report has been emitted.
fn enforce_attention_gate(enabled: bool, check: &str, summary: &StatusSummary) -> Result<()> {
    let failures = summary.attention + summary.missing;
    if failures == 0 {
        return Ok(());
    }

    warn!(
        check,
        attention = summary.attention,
        missing = summary.missing,
        "results need attention"
    );

    if enabled {
        bail!("{check}: {failures} of {} results need attention", summary.total);
    }

    Ok(())
}
