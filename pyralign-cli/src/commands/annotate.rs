//! Annotate command implementation

use super::{load_pyramid, report_diagnostics, OutputArgs, RunArgs};
use crate::input::{resolve_patterns, summarizer_id_from_path, FileReader};
use crate::output::Record;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use pyralign_core::{PyramidAnnotation, SummarizerType};
use std::path::PathBuf;

/// Arguments for the annotate command
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Reference pyramid file
    #[arg(short, long, value_name = "FILE")]
    pub pyramid: PathBuf,

    /// Annotation files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Kind of summarizer that wrote the annotated summaries
    #[arg(long, value_name = "TYPE", default_value = "peer")]
    pub summarizer_type: SummarizerType,

    /// Topic identifier (default: pyramid file name up to its first '.')
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

impl AnnotateArgs {
    /// Execute the annotate command
    pub fn execute(&self) -> Result<()> {
        let config = self.run.start()?;

        let (pyramid, pyramid_diagnostics) = load_pyramid(
            &self.pyramid,
            self.instance_id.as_deref(),
            self.document_regex.as_deref(),
            &config,
        )?;
        report_diagnostics(&self.pyramid.display().to_string(), &pyramid_diagnostics);

        let files = resolve_patterns(&self.input)?;
        let mut formatter = self.output.open_formatter(&config)?;
        let mut progress = ProgressReporter::new(self.run.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let source = path.display().to_string();
            let xml = FileReader::read_text(path)?;
            let built = PyramidAnnotation::from_xml(
                pyramid.instance_id(),
                summarizer_id_from_path(path),
                self.summarizer_type,
                &xml,
                &pyramid,
            )
            .with_context(|| format!("Failed to build annotation from {source}"))?;

            match built {
                Some(built) => {
                    log::info!(
                        "{source}: {} SCUs, {} diagnostics",
                        built.value.scus().len(),
                        built.diagnostics.len()
                    );
                    report_diagnostics(&source, &built.diagnostics);
                    formatter.format_record(
                        &source,
                        Record::Annotation(&built.value),
                        &built.diagnostics,
                    )?;
                }
                None => log::warn!("{source}: no summary text, skipped"),
            }
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}
