use std::collections::BTreeSet;

use crate::config::ValidationConfig;
use crate::model::{DatasetManifest, Modality};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedLabels {
    audio: BTreeSet<String>,
    sensor: BTreeSet<String>,
}

impl AllowedLabels {
    pub fn for_modality(&self, modality: Modality) -> &BTreeSet<String> {
        match modality {
            Modality::Audio => &self.audio,
            Modality::Sensor => &self.sensor,
        }
    }
}

/// Audio labels are the union of every audio source's labels plus the
/// baseline set. Sensor labels come from configuration only and never
/// from the manifest.
pub fn resolve_allowed_labels(
    manifest: &DatasetManifest,
    config: &ValidationConfig,
) -> AllowedLabels {
    let mut audio = config
        .audio_baseline_labels
        .iter()
        .map(|label| label.to_string())
        .collect::<BTreeSet<String>>();

    for source in manifest
        .sources
        .iter()
        .filter(|source| source.has_modality(Modality::Audio))
    {
        audio.extend(source.labels.iter().cloned());
    }

    let sensor = config
        .sensor_labels
        .iter()
        .map(|label| label.to_string())
        .collect::<BTreeSet<String>>();

    AllowedLabels { audio, sensor }
}

/// Distinct labels in `labels` that are outside `allowed`, sorted.
pub fn labels_outside_taxonomy<'a>(
    labels: impl Iterator<Item = &'a str>,
    allowed: &BTreeSet<String>,
) -> Vec<String> {
    labels
        .filter(|label| !allowed.contains(*label))
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Renders labels as `['a', 'b']` for issue text.
pub fn format_label_list(labels: &[String]) -> String {
    let quoted = labels
        .iter()
        .map(|label| format!("'{label}'"))
        .collect::<Vec<String>>();
    format!("[{}]", quoted.join(", "))
}
