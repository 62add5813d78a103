//! Markdown output formatter

use super::{describe_parts, OutputFormatter, Record};
use anyhow::Result;
use pyralign_core::{Diagnostics, Pyramid, PyramidAnnotation};
use std::io::Write;

/// Markdown formatter - one section with an SCU table per record
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_diagnostics: bool,
    record_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, include_diagnostics: bool) -> Self {
        Self {
            writer,
            include_diagnostics,
            record_count: 0,
        }
    }

    fn write_pyramid(&mut self, pyramid: &Pyramid) -> Result<()> {
        writeln!(
            self.writer,
            "Pyramid `{}`: {} summaries, total weight {}",
            pyramid.instance_id(),
            pyramid.summary_count(),
            pyramid.total_weight()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| SCU | Weight | Label | Contributors |")?;
        writeln!(self.writer, "|---|---|---|---|")?;
        for scu in pyramid.scus() {
            let contributors = scu
                .contributors
                .iter()
                .map(|c| {
                    let id = &pyramid.summarizer_ids()[c.summary_index];
                    format!("{id}: {}", describe_parts(&c.parts))
                })
                .collect::<Vec<_>>()
                .join("<br>");
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                scu.id,
                scu.weight(),
                escape_cell(&scu.label),
                escape_cell(&contributors)
            )?;
        }
        Ok(())
    }

    fn write_annotation(&mut self, annotation: &PyramidAnnotation) -> Result<()> {
        writeln!(
            self.writer,
            "Annotation `{}/{}` ({})",
            annotation.instance_id(),
            annotation.summarizer_id(),
            annotation.summarizer_type()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "> {}", annotation.summary().replace('\n', " "))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| SCU | Label | Parts |")?;
        writeln!(self.writer, "|---|---|---|")?;
        for scu in annotation.scus() {
            let parts = scu
                .contributors
                .iter()
                .map(|c| describe_parts(&c.parts))
                .collect::<Vec<_>>()
                .join("<br>");
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                scu.scu_id,
                escape_cell(&scu.label),
                escape_cell(&parts)
            )?;
        }
        Ok(())
    }
}

/// Keep table cells on one row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_record(
        &mut self,
        source: &str,
        record: Record<'_>,
        diagnostics: &Diagnostics,
    ) -> Result<()> {
        self.record_count += 1;
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        match record {
            Record::Pyramid(pyramid) => self.write_pyramid(pyramid)?,
            Record::Annotation(annotation) => self.write_annotation(annotation)?,
        }
        if self.include_diagnostics && !diagnostics.is_empty() {
            writeln!(self.writer)?;
            for diagnostic in diagnostics {
                writeln!(self.writer, "- {diagnostic}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total records: {}*", self.record_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
