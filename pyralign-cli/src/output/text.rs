//! Plain text output formatter

use super::{describe_parts, OutputFormatter, Record};
use anyhow::Result;
use pyralign_core::{Diagnostics, Pyramid, PyramidAnnotation};
use std::io::Write;

/// Plain text formatter - one line per summary, SCU and contributor
pub struct TextFormatter<W: Write> {
    writer: W,
    include_diagnostics: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, include_diagnostics: bool) -> Self {
        Self {
            writer,
            include_diagnostics,
        }
    }

    fn write_pyramid(&mut self, pyramid: &Pyramid) -> Result<()> {
        writeln!(
            self.writer,
            "pyramid {}: {} summaries, {} SCUs, total weight {}",
            pyramid.instance_id(),
            pyramid.summary_count(),
            pyramid.scus().len(),
            pyramid.total_weight()
        )?;
        for (index, (summary, id)) in pyramid
            .summaries()
            .iter()
            .zip(pyramid.summarizer_ids())
            .enumerate()
        {
            writeln!(self.writer, "summary {index} ({id}): {summary:?}")?;
        }
        for scu in pyramid.scus() {
            writeln!(self.writer, "scu {} (weight {}): {}", scu.id, scu.weight(), scu.label)?;
            for contributor in &scu.contributors {
                writeln!(
                    self.writer,
                    "  summary {}: {}",
                    contributor.summary_index,
                    describe_parts(&contributor.parts)
                )?;
            }
        }
        Ok(())
    }

    fn write_annotation(&mut self, annotation: &PyramidAnnotation) -> Result<()> {
        writeln!(
            self.writer,
            "annotation {}/{} ({}): {} SCUs",
            annotation.instance_id(),
            annotation.summarizer_id(),
            annotation.summarizer_type(),
            annotation.scus().len()
        )?;
        writeln!(self.writer, "summary: {:?}", annotation.summary())?;
        for scu in annotation.scus() {
            writeln!(self.writer, "scu {}: {}", scu.scu_id, scu.label)?;
            for contributor in &scu.contributors {
                writeln!(self.writer, "  {}", describe_parts(&contributor.parts))?;
            }
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(
        &mut self,
        source: &str,
        record: Record<'_>,
        diagnostics: &Diagnostics,
    ) -> Result<()> {
        writeln!(self.writer, "# {source}")?;
        match record {
            Record::Pyramid(pyramid) => self.write_pyramid(pyramid)?,
            Record::Annotation(annotation) => self.write_annotation(annotation)?,
        }
        if self.include_diagnostics {
            for diagnostic in diagnostics {
                writeln!(self.writer, "! {diagnostic}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
