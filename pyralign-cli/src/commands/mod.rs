//! CLI command implementations

use crate::config::CliConfig;
use crate::input::{instance_id_from_path, FileReader};
use crate::output::{create_formatter, FormatOptions, OutputFormat, OutputFormatter};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pyralign_core::{Diagnostics, Pyramid};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod annotate;
pub mod generate_config;
pub mod pyramid;
pub mod references;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build reference pyramids from pyramid files
    Pyramid(pyramid::PyramidArgs),

    /// Align peer annotations against a reference pyramid
    Annotate(annotate::AnnotateArgs),

    /// Derive per-summary views of a reference pyramid
    References(references::ReferencesArgs),

    /// Build without writing records and report diagnostics
    Validate(validate::ValidateArgs),

    /// Generate a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Pyramid(args) => args.execute(),
            Commands::Annotate(args) => args.execute(),
            Commands::References(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Options shared by every building command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress logging and progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl RunArgs {
    /// Initialize logging and load configuration
    pub fn start(&self) -> Result<CliConfig> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);
        CliConfig::load_or_default(self.config.as_deref())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Options shared by commands that emit records
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from configuration, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl OutputArgs {
    /// Open the configured formatter; flags take precedence over `config`
    pub fn open_formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let format = self.format.unwrap_or(config.output.default_format);
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };
        let options = FormatOptions {
            pretty_json: config.output.pretty_json,
            include_diagnostics: config.output.include_diagnostics,
        };
        Ok(create_formatter(format, writer, options))
    }
}

/// Build a pyramid from a file on disk
///
/// `instance_id` defaults to the file name up to its first `.`, the separator
/// fallback to `[alignment] default_document_regex`.
pub fn load_pyramid(
    path: &Path,
    instance_id: Option<&str>,
    document_regex: Option<&str>,
    config: &CliConfig,
) -> Result<(Pyramid, Diagnostics)> {
    let xml = FileReader::read_text(path)?;
    let instance_id = instance_id
        .map(str::to_string)
        .unwrap_or_else(|| instance_id_from_path(path));
    let default_regex = document_regex.or(config.alignment.default_document_regex.as_deref());

    let built = Pyramid::from_xml(instance_id, &xml, default_regex)
        .with_context(|| format!("Failed to build pyramid from {}", path.display()))?;
    log::info!(
        "{}: {} summaries, {} SCUs, {} diagnostics",
        path.display(),
        built.value.summary_count(),
        built.value.scus().len(),
        built.diagnostics.len()
    );
    Ok(built.into_parts())
}

/// Log every diagnostic at warn level, prefixed by its source
pub fn report_diagnostics(source: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        log::warn!("{source}: {diagnostic}");
    }
}
