//! pyralign CLI library
//!
//! This library provides the command-line interface around `pyralign-core`:
//! it reads pyramid and annotation files, builds them, and writes the aligned
//! records.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
