//! pyralign command-line entry point

use clap::Parser;
use pyralign_cli::commands::Commands;

/// Rebuild character-exact SCU spans from pyramid annotations
#[derive(Debug, Parser)]
#[command(name = "pyralign", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
