use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::error::{Error, Result};
use crate::factory;
use crate::fields::Field;
use crate::value::FieldValue;

/// Output format a dataset is intended to be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Xml,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

static DATASET_TOKEN: AtomicU64 = AtomicU64::new(1);

/// An ordered set of fields plus row-count and output metadata.
///
/// Field insertion order is column order, and also the order in which
/// fields consume random draws during a generation pass.
pub struct Dataset {
    token: u64,
    rows: u64,
    title: String,
    filename: String,
    path: String,
    format: ExportFormat,
    fields: Vec<Box<dyn Field>>,
}

impl Dataset {
    pub fn new(
        rows: u64,
        title: impl Into<String>,
        filename: impl Into<String>,
        path: impl Into<String>,
        format: ExportFormat,
    ) -> Self {
        Self {
            token: DATASET_TOKEN.fetch_add(1, Ordering::Relaxed),
            rows,
            title: title.into(),
            filename: filename.into(),
            path: path.into(),
            format,
            fields: Vec::new(),
        }
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    pub fn add_field(&mut self, field: Box<dyn Field>) {
        self.fields.push(field);
    }

    /// Remove a field by its identity token.
    pub fn remove_field(&mut self, id: &str) -> Option<Box<dyn Field>> {
        let index = self.fields.iter().position(|field| field.id() == id)?;
        Some(self.fields.remove(index))
    }

    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }

    /// Column headers, in field order.
    pub fn headers(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }

    /// Generate the full table: one header row followed by `rows` data rows,
    /// one cell per field. Any field failure aborts the pass; no partial
    /// table is returned.
    pub fn generate_values(&mut self, rng: &mut dyn RngCore) -> Result<Vec<Vec<FieldValue>>> {
        let mut columns = Vec::with_capacity(self.fields.len());
        for field in &mut self.fields {
            field.set_row_count(self.rows);
            columns.push(field.generate_column(rng)?);
        }

        let height = self.rows as usize + 1;
        let mut table = Vec::with_capacity(height);
        for row_index in 0..height {
            let row: Vec<FieldValue> = columns
                .iter()
                .map(|column| column[row_index].clone())
                .collect();
            table.push(row);
        }

        info!(
            title = %self.title,
            rows = self.rows,
            fields = self.fields.len(),
            "dataset generated"
        );
        Ok(table)
    }

    /// Configuration snapshot: the dataset's identity token plus a value
    /// holding its scalar metadata and one self-describing entry per field.
    pub fn snapshot(&self) -> (String, Value) {
        let datafields: Vec<Value> = self
            .fields
            .iter()
            .map(|field| {
                let mut entry = Map::new();
                entry.insert(field.id().to_string(), Value::Object(field.config()));
                Value::Object(entry)
            })
            .collect();
        let snapshot = json!({
            "info": {
                "n": self.rows,
                "title": self.title,
                "filename": self.filename,
                "path": self.path,
                "type": self.format.as_str(),
            },
            "datafields": datafields,
        });
        (format!("dataset_{}", self.token), snapshot)
    }

    /// Rebuild a dataset from one snapshot value. Field entries replay
    /// through the factory, with the variant discriminant taken from the
    /// first underscore-delimited segment of the entry key.
    pub fn from_snapshot(snapshot: &Value) -> Result<Self> {
        let info = snapshot
            .get("info")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::InvalidConfig("dataset snapshot missing 'info'".to_string()))?;
        let rows = info.get("n").and_then(Value::as_u64).ok_or_else(|| {
            Error::InvalidConfig("dataset snapshot missing row count 'n'".to_string())
        })?;
        let format = info
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidConfig("dataset snapshot missing 'type'".to_string()))?
            .parse()?;

        let mut dataset = Dataset::new(
            rows,
            info_str(info, "title"),
            info_str(info, "filename"),
            info_str(info, "path"),
            format,
        );

        let datafields = snapshot
            .get("datafields")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::InvalidConfig("dataset snapshot missing 'datafields'".to_string())
            })?;
        for entry in datafields {
            let entry = entry.as_object().ok_or_else(|| {
                Error::InvalidConfig("datafield entry must be an object".to_string())
            })?;
            for (id, config) in entry {
                let kind = id.split('_').next().unwrap_or_default();
                dataset.add_field(factory::create(kind, config)?);
            }
        }
        Ok(dataset)
    }
}

fn info_str(info: &Map<String, Value>, key: &str) -> String {
    info.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
