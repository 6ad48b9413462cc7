use crate::model::Modality;

use super::table::LabelTable;

pub fn validate_schema(
    table: &LabelTable,
    required_columns: &[&str],
    modality: Modality,
) -> Vec<String> {
    required_columns
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| format!("Missing column '{column}' in {modality} annotations."))
        .collect()
}
