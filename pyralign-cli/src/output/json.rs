//! JSON output formatter

use super::{OutputFormatter, Record};
use anyhow::Result;
use pyralign_core::Diagnostics;
use serde_json::{json, Value};
use std::io::Write;

/// JSON formatter - outputs records as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    include_diagnostics: bool,
    records: Vec<Value>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool, include_diagnostics: bool) -> Self {
        Self {
            writer,
            pretty,
            include_diagnostics,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_record(
        &mut self,
        source: &str,
        record: Record<'_>,
        diagnostics: &Diagnostics,
    ) -> Result<()> {
        let value = match record {
            Record::Pyramid(pyramid) => serde_json::to_value(pyramid)?,
            Record::Annotation(annotation) => serde_json::to_value(annotation)?,
        };
        let mut entry = json!({
            "source": source,
            "kind": record.kind(),
            "record": value,
        });
        if self.include_diagnostics {
            entry["diagnostics"] = serde_json::to_value(diagnostics)?;
        }
        self.records.push(entry);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
