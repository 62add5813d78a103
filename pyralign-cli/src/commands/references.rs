//! References command implementation

use super::{load_pyramid, report_diagnostics, OutputArgs, RunArgs};
use crate::output::Record;
use anyhow::{Context, Result};
use clap::Args;
use pyralign_core::Diagnostics;
use std::path::PathBuf;

/// Arguments for the references command
#[derive(Debug, Args)]
pub struct ReferencesArgs {
    /// Reference pyramid file
    #[arg(short, long, value_name = "FILE")]
    pub pyramid: PathBuf,

    /// Emit the pyramid without this reference summary instead
    #[arg(long, value_name = "INDEX")]
    pub remove: Option<usize>,

    /// Topic identifier (default: file name up to its first '.')
    #[arg(long, value_name = "ID")]
    pub instance_id: Option<String>,

    /// Separator pattern for a pyramid without <startDocumentRegEx>
    #[arg(long, value_name = "REGEX")]
    pub document_regex: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

impl ReferencesArgs {
    /// Execute the references command
    pub fn execute(&self) -> Result<()> {
        let config = self.run.start()?;
        let source = self.pyramid.display().to_string();

        let (pyramid, diagnostics) = load_pyramid(
            &self.pyramid,
            self.instance_id.as_deref(),
            self.document_regex.as_deref(),
            &config,
        )?;
        report_diagnostics(&source, &diagnostics);

        let mut formatter = self.output.open_formatter(&config)?;
        match self.remove {
            Some(index) => {
                let reduced = pyramid
                    .remove_summary(index)
                    .with_context(|| format!("Cannot remove summary {index} from {source}"))?;
                log::info!(
                    "{source}: removed summary {index}, {} SCUs remain",
                    reduced.scus().len()
                );
                formatter.format_record(
                    &format!("{source} without [{index}]"),
                    Record::Pyramid(&reduced),
                    &Diagnostics::new(),
                )?;
            }
            None => {
                for index in 0..pyramid.summary_count() {
                    let annotation = pyramid.get_annotation(index)?;
                    formatter.format_record(
                        &format!("{source}[{index}]"),
                        Record::Annotation(&annotation),
                        &Diagnostics::new(),
                    )?;
                }
            }
        }

        formatter.finish()
    }
}
