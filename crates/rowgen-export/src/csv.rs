use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rowgen_core::FieldValue;

use crate::error::Result;
use crate::sink::RowSink;

/// Header line followed by one line per data row, `\n` terminated. Nulls
/// render as empty cells.
pub struct CsvSink;

impl RowSink for CsvSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, path: &Path, rows: &[Vec<FieldValue>], _headers: &[String]) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for row in rows {
            let record: Vec<String> = row.iter().map(FieldValue::to_string).collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
