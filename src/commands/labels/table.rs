use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};

/// Annotation table read as raw text cells. Short rows read as empty cells.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    columns: Vec<String>,
    rows: Vec<StringRecord>,
}

impl LabelTable {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()
            .context("failed to read annotation header row")?
            .iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<String>>();
        if columns.iter().all(|column| column.trim().is_empty()) {
            bail!("annotation header row is missing");
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("failed to read annotation row {}", index + 1))?;
            rows.push(record);
        }

        Ok(Self { columns, rows })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cells of `column` in row order. Yields nothing for an unknown column.
    pub fn column<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| index.map(|index| row.get(index).unwrap_or("")))
    }

    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> + '_ {
        self.rows.iter().map(move |record| TableRow {
            table: self,
            record,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    table: &'a LabelTable,
    record: &'a StringRecord,
}

impl<'a> TableRow<'a> {
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .column_index(column)
            .and_then(|index| self.record.get(index))
            .unwrap_or("")
    }
}
