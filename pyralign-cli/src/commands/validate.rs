//! Validate command implementation

use super::{load_pyramid, report_diagnostics, RunArgs};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, summarizer_id_from_path, FileReader};
use anyhow::Result;
use clap::Args;
use pyralign_core::{Diagnostics, Pyramid, PyramidAnnotation, SummarizerType};
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Files or patterns to check: pyramids, or annotations when --pyramid is given
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Reference pyramid to check annotations against
    #[arg(short, long, value_name = "FILE")]
    pub pyramid: Option<PathBuf>,

    /// Separator pattern for pyramids without <startDocumentRegEx>
    #[arg(long, value_name = "REGEX")]
    pub document_regex: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// What a single file produced
enum Outcome {
    Built(Diagnostics),
    Empty,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let config = self.run.start()?;
        let files = resolve_patterns(&self.input)?;

        let pyramid = match &self.pyramid {
            Some(path) => {
                let (pyramid, diagnostics) =
                    load_pyramid(path, None, self.document_regex.as_deref(), &config)?;
                println!(
                    "✓ {} (pyramid): {} diagnostics",
                    path.display(),
                    diagnostics.len()
                );
                Some(pyramid)
            }
            None => None,
        };

        let mut failed = 0;
        for path in &files {
            let source = path.display().to_string();
            match self.check(path, pyramid.as_ref(), &config) {
                Ok(Outcome::Built(diagnostics)) => {
                    report_diagnostics(&source, &diagnostics);
                    println!("✓ {source}: {} diagnostics", diagnostics.len());
                }
                Ok(Outcome::Empty) => println!("- {source}: no summary text"),
                Err(e) => {
                    failed += 1;
                    println!("✗ {source}: {e:#}");
                }
            }
        }

        if failed > 0 {
            return Err(CliError::ProcessingError(format!(
                "{failed} of {} files failed validation",
                files.len()
            ))
            .into());
        }
        Ok(())
    }

    fn check(&self, path: &Path, pyramid: Option<&Pyramid>, config: &CliConfig) -> Result<Outcome> {
        match pyramid {
            None => {
                let (_, diagnostics) =
                    load_pyramid(path, None, self.document_regex.as_deref(), config)?;
                Ok(Outcome::Built(diagnostics))
            }
            Some(pyramid) => {
                let xml = FileReader::read_text(path)?;
                let built = PyramidAnnotation::from_xml(
                    pyramid.instance_id(),
                    summarizer_id_from_path(path),
                    SummarizerType::Peer,
                    &xml,
                    pyramid,
                )?;
                Ok(built.map_or(Outcome::Empty, |built| Outcome::Built(built.diagnostics)))
            }
        }
    }
}
