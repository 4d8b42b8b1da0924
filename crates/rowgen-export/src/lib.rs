//! Row sinks: write a generated table to CSV, JSON, or XML.

pub mod csv;
pub mod error;
pub mod json;
pub mod sink;
pub mod xml;

pub use csv::CsvSink;
pub use error::{ExportError, Result};
pub use json::JsonSink;
pub use sink::{RowSink, export_dataset, sink_for};
pub use xml::XmlSink;
