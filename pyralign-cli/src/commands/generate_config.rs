//! Generate config command implementation

use crate::config::CONFIG_TEMPLATE;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to set a default separator or output format");
        println!("2. Use it for processing:");
        println!("   pyralign pyramid -i 'pyramids/*.pyr' -c {}", self.output.display());

        Ok(())
    }
}
