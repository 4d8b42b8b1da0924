use std::fs;
use std::io::Cursor;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use rowgen_core::FieldValue;

use crate::error::{ExportError, Result};
use crate::sink::RowSink;

/// A `dataset` root with one `entry` child per data row; each entry's
/// sub-elements are named after the headers.
pub struct XmlSink;

impl RowSink for XmlSink {
    fn extension(&self) -> &'static str {
        "xml"
    }

    fn write(&self, path: &Path, rows: &[Vec<FieldValue>], headers: &[String]) -> Result<()> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        write_event(&mut writer, Event::Start(BytesStart::new("dataset")))?;
        for row in rows.iter().skip(1) {
            write_event(&mut writer, Event::Start(BytesStart::new("entry")))?;
            for (header, value) in headers.iter().zip(row) {
                write_event(&mut writer, Event::Start(BytesStart::new(header.as_str())))?;
                write_event(
                    &mut writer,
                    Event::Text(BytesText::new(&value.to_string())),
                )?;
                write_event(&mut writer, Event::End(BytesEnd::new(header.as_str())))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("entry")))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new("dataset")))?;

        fs::write(path, writer.into_inner().into_inner())?;
        Ok(())
    }
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|error| ExportError::Xml(error.to_string()))
}
