use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{Map, Value};

use rowgen_core::FieldValue;

use crate::error::Result;
use crate::sink::RowSink;

/// An array of objects, one per data row, each keyed by header name.
pub struct JsonSink;

impl RowSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, path: &Path, rows: &[Vec<FieldValue>], headers: &[String]) -> Result<()> {
        let entries: Vec<Value> = rows
            .iter()
            .skip(1)
            .map(|row| {
                let entry: Map<String, Value> = headers
                    .iter()
                    .zip(row)
                    .map(|(header, value)| (header.clone(), Value::from(value)))
                    .collect();
                Value::Object(entry)
            })
            .collect();

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &entries)?;
        Ok(())
    }
}
