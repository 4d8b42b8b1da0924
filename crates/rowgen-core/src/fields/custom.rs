use std::collections::HashSet;
use std::path::PathBuf;

use rand::RngCore;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fields::{Field, FieldBase, config_name};
use crate::params::{ParamKind, ParamSpec, validate_params};
use crate::source::{FetchMode, TableData, load_csv_table};
use crate::value::FieldValue;

const KIND: &str = "customfield";

const PARAMS: &[ParamSpec] = &[
    ParamSpec::new("name", ParamKind::Str, false),
    ParamSpec::new("filePath", ParamKind::Str, true),
    ParamSpec::new("columnIndex", ParamKind::Int, false),
    ParamSpec::new("columnName", ParamKind::Str, false),
    ParamSpec::new("fetchBy", ParamKind::Int, false),
    ParamSpec::new("unique", ParamKind::Bool, false),
    ParamSpec::new("delimiter", ParamKind::Str, false),
];

/// Values drawn from one column of a user-supplied delimited file.
///
/// The source is loaded once at construction. With `unique` set, the column
/// must hold at least `row_count` candidates before the first draw; each
/// draw then retries until an unseen value comes up. The retry loop is
/// unbounded on purpose: the precondition guards it, but a column dominated
/// by duplicates can still make it spin for a while.
#[derive(Debug, Clone)]
pub struct CustomField {
    base: FieldBase,
    file_path: PathBuf,
    column_index: usize,
    column_name: Option<String>,
    fetch_by: FetchMode,
    unique: bool,
    delimiter: u8,
    data: TableData,
    seen: HashSet<String>,
}

impl CustomField {
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        column_index: usize,
        column_name: Option<String>,
        fetch_by: FetchMode,
        unique: bool,
        delimiter: u8,
    ) -> Result<Self> {
        let file_path = file_path.into();
        let data = load_csv_table(&file_path, delimiter, fetch_by)?
            .ok_or_else(|| Error::SourceUnavailable(file_path.display().to_string()))?;
        Ok(Self {
            base: FieldBase::new(KIND, name.into()),
            file_path,
            column_index,
            column_name,
            fetch_by,
            unique,
            delimiter,
            data,
            seen: HashSet::new(),
        })
    }

    pub fn from_config(config: &Value) -> Result<Self> {
        let params = validate_params(config, PARAMS, KIND)?;
        let fetch_by = match params.get_i64("fetchBy") {
            None => FetchMode::ByIndex,
            Some(raw) => FetchMode::from_i64(raw)
                .ok_or_else(|| Error::InvalidConfig(format!("{KIND}: unknown fetch mode {raw}")))?,
        };
        let delimiter = parse_delimiter(params.get_str("delimiter").unwrap_or(","))?;
        Self::new(
            config_name(&params),
            params.get_str("filePath").unwrap_or_default(),
            params.get_u64("columnIndex").unwrap_or(0) as usize,
            params.get_str("columnName").map(str::to_string),
            fetch_by,
            params.get_bool("unique").unwrap_or(false),
            delimiter,
        )
    }

    pub fn unique(&self) -> bool {
        self.unique
    }
}

// Free function so the drawn column only borrows the table, leaving the
// dedup set free for mutation during unique draws.
fn column<'a>(
    data: &'a TableData,
    fetch_by: FetchMode,
    index: usize,
    name: Option<&str>,
) -> Option<&'a [String]> {
    match fetch_by {
        FetchMode::ByIndex => data.column_by_index(index),
        FetchMode::ByName => name.and_then(|name| data.column_by_name(name)),
    }
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    let bytes = raw.as_bytes();
    if bytes.len() == 1 {
        Ok(bytes[0])
    } else {
        Err(Error::InvalidConfig(format!(
            "{KIND}: delimiter must be a single character, got '{raw}'"
        )))
    }
}

impl Field for CustomField {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn set_name(&mut self, name: String) {
        self.base.name = name;
    }

    fn id(&self) -> &str {
        &self.base.id
    }

    fn row_count(&self) -> u64 {
        self.base.row_count
    }

    fn set_row_count(&mut self, rows: u64) {
        self.base.row_count = rows;
    }

    fn generate_value(&mut self, rng: &mut dyn RngCore) -> Result<FieldValue> {
        let Some(column) = column(
            &self.data,
            self.fetch_by,
            self.column_index,
            self.column_name.as_deref(),
        ) else {
            return Ok(FieldValue::Null);
        };
        if !self.unique {
            let value = column.choose(rng).cloned().unwrap_or_default();
            return Ok(FieldValue::Text(value));
        }

        // Fail-fast precondition: checked before the first draw of a pass,
        // so generation never emits a partial unique column.
        let available = column.len() as u64;
        if available < self.base.row_count {
            return Err(Error::UniquePoolExhausted {
                required: self.base.row_count,
                available,
            });
        }
        loop {
            let value = column.choose(rng).cloned().unwrap_or_default();
            if self.seen.insert(value.clone()) {
                return Ok(FieldValue::Text(value));
            }
        }
    }

    fn config(&self) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert("name".to_string(), Value::from(self.base.name.as_str()));
        config.insert(
            "filePath".to_string(),
            Value::from(self.file_path.display().to_string()),
        );
        config.insert(
            "columnIndex".to_string(),
            Value::from(self.column_index as u64),
        );
        config.insert(
            "columnName".to_string(),
            Value::from(self.column_name.clone()),
        );
        config.insert("fetchBy".to_string(), Value::from(self.fetch_by.as_i64()));
        config.insert("unique".to_string(), Value::from(self.unique));
        config.insert(
            "delimiter".to_string(),
            Value::from((self.delimiter as char).to_string()),
        );
        config
    }
}
