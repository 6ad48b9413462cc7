use std::path::{Path, PathBuf};

use crate::model::Modality;

/// Fixed validation parameters, built once at process entry and passed by
/// reference into every checker.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub audio_required_columns: Vec<&'static str>,
    pub sensor_required_columns: Vec<&'static str>,
    pub audio_baseline_labels: Vec<&'static str>,
    pub sensor_labels: Vec<&'static str>,
    pub placeholder_file_names: Vec<&'static str>,
    pub audio_label_file: PathBuf,
    pub sensor_label_file: PathBuf,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            audio_required_columns: vec!["event_id", "file_path", "start_s", "end_s", "label"],
            sensor_required_columns: vec![
                "segment_id",
                "file_path",
                "start_iso",
                "end_iso",
                "label",
            ],
            audio_baseline_labels: vec!["rain", "wind", "vehicle", "nominal"],
            sensor_labels: vec!["pre_fire_alert", "nominal"],
            placeholder_file_names: vec![".gitkeep"],
            audio_label_file: PathBuf::from("02_dataset/processed/annotations.csv"),
            sensor_label_file: PathBuf::from(
                "02_dataset/processed/sensor_segment_annotations.csv",
            ),
        }
    }
}

impl ValidationConfig {
    pub fn required_columns(&self, modality: Modality) -> &[&'static str] {
        match modality {
            Modality::Audio => &self.audio_required_columns,
            Modality::Sensor => &self.sensor_required_columns,
        }
    }

    /// Label file for a modality, preferring an explicit override and
    /// otherwise resolving the default location under `project_root`.
    pub fn label_file(
        &self,
        modality: Modality,
        project_root: &Path,
        override_path: Option<&Path>,
    ) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }

        match modality {
            Modality::Audio => project_root.join(&self.audio_label_file),
            Modality::Sensor => project_root.join(&self.sensor_label_file),
        }
    }

    pub fn is_placeholder(&self, file_name: &str) -> bool {
        self.placeholder_file_names
            .iter()
            .any(|placeholder| *placeholder == file_name)
    }
}
