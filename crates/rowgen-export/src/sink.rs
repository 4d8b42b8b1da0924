use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::info;

use rowgen_core::{Dataset, ExportFormat, FieldValue};

use crate::csv::CsvSink;
use crate::error::Result;
use crate::json::JsonSink;
use crate::xml::XmlSink;

/// A writer translating a generated table into one file format.
///
/// `rows` always starts with the header row; sinks carry no state beyond
/// formatting.
pub trait RowSink {
    /// File extension the sink appends to the dataset's output name.
    fn extension(&self) -> &'static str;

    fn write(&self, path: &Path, rows: &[Vec<FieldValue>], headers: &[String]) -> Result<()>;
}

/// Sink registry, keyed by the dataset's output format.
pub fn sink_for(format: ExportFormat) -> Box<dyn RowSink> {
    match format {
        ExportFormat::Csv => Box::new(CsvSink),
        ExportFormat::Json => Box::new(JsonSink),
        ExportFormat::Xml => Box::new(XmlSink),
    }
}

/// Generate a dataset's table and write it to its configured output
/// location, returning the written path.
pub fn export_dataset(dataset: &mut Dataset, rng: &mut dyn RngCore) -> Result<PathBuf> {
    let sink = sink_for(dataset.format());
    let rows = dataset.generate_values(rng)?;
    let headers = dataset.headers();
    let path = Path::new(dataset.path())
        .join(format!("{}.{}", dataset.filename(), sink.extension()));
    sink.write(&path, &rows, &headers)?;
    info!(path = %path.display(), rows = rows.len().saturating_sub(1), "dataset exported");
    Ok(path)
}
