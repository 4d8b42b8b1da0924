//! Delimiter-separated source loading for custom fields.
//!
//! A source file is read once, at field construction, into a column-oriented
//! view: positional columns in index mode, header-keyed columns in name mode
//! (first line = headers). Index mode keeps the first line as data.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// How a custom field addresses its source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    ByIndex,
    ByName,
}

impl FetchMode {
    /// Integer discriminant used in persisted configs (0 = index, 1 = name).
    pub fn as_i64(self) -> i64 {
        match self {
            FetchMode::ByIndex => 0,
            FetchMode::ByName => 1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(FetchMode::ByIndex),
            1 => Some(FetchMode::ByName),
            _ => None,
        }
    }
}

/// Immutable column-oriented view over a loaded source file.
#[derive(Debug, Clone)]
pub enum TableData {
    Columns(Vec<Vec<String>>),
    Named(HashMap<String, Vec<String>>),
}

impl TableData {
    pub fn column_by_index(&self, index: usize) -> Option<&[String]> {
        match self {
            TableData::Columns(columns) => columns.get(index).map(Vec::as_slice),
            TableData::Named(_) => None,
        }
    }

    pub fn column_by_name(&self, name: &str) -> Option<&[String]> {
        match self {
            TableData::Columns(_) => None,
            TableData::Named(columns) => columns.get(name).map(Vec::as_slice),
        }
    }
}

/// Load a delimited file into a column-oriented view.
///
/// Returns `Ok(None)` when the path fails the basic existence/extension
/// check; read and parse failures are real errors.
pub fn load_csv_table(
    path: &Path,
    delimiter: u8,
    mode: FetchMode,
) -> Result<Option<TableData>> {
    if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let data = match mode {
        FetchMode::ByIndex => TableData::Columns(transpose(&rows)),
        FetchMode::ByName => {
            let headers = rows.first().cloned().unwrap_or_default();
            let columns = transpose(&rows[rows.len().min(1)..]);
            TableData::Named(headers.into_iter().zip(columns).collect())
        }
    };
    Ok(Some(data))
}

/// Rows to columns, truncated to the shortest row like an iterator zip.
fn transpose(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).min().unwrap_or(0);
    (0..width)
        .map(|col| rows.iter().map(|row| row[col].clone()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_truncates_to_shortest_row() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string(), "e".to_string()],
        ];
        let columns = transpose(&rows);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1], vec!["b".to_string(), "e".to_string()]);
    }

    #[test]
    fn missing_file_yields_no_data() {
        let result = load_csv_table(Path::new("definitely/not/here.csv"), b',', FetchMode::ByIndex)
            .expect("no-data result");
        assert!(result.is_none());
    }

    #[test]
    fn wrong_extension_yields_no_data() {
        let path = std::env::temp_dir().join("rowgen_source_check.txt");
        std::fs::write(&path, "a,b\n1,2\n").expect("write fixture");
        let result =
            load_csv_table(&path, b',', FetchMode::ByIndex).expect("no-data result");
        assert!(result.is_none());
        let _ = std::fs::remove_file(&path);
    }
}
