//! Pyramid command implementation

use super::{load_pyramid, report_diagnostics, OutputArgs, RunArgs};
use crate::input::resolve_patterns;
use crate::output::Record;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;

/// Arguments for the pyramid command
#[derive(Debug, Args)]
pub struct PyramidArgs {
    /// Pyramid files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Topic identifier (default: file name up to its first '.')
    #[arg(long, value_name = "ID")]
    pub instance_id: Option<String>,

    /// Separator pattern for files without <startDocumentRegEx>
    #[arg(long, value_name = "REGEX")]
    pub document_regex: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub run: RunArgs,
}

impl PyramidArgs {
    /// Execute the pyramid command
    pub fn execute(&self) -> Result<()> {
        let config = self.run.start()?;
        log::info!("Building pyramids");

        let files = resolve_patterns(&self.input)?;
        let mut formatter = self.output.open_formatter(&config)?;
        let mut progress = ProgressReporter::new(self.run.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let source = path.display().to_string();
            let (pyramid, diagnostics) = load_pyramid(
                path,
                self.instance_id.as_deref(),
                self.document_regex.as_deref(),
                &config,
            )?;
            report_diagnostics(&source, &diagnostics);
            formatter.format_record(&source, Record::Pyramid(&pyramid), &diagnostics)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}
