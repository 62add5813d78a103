//! Output formatting module

use anyhow::Result;
use pyralign_core::{Diagnostics, Pyramid, PyramidAnnotation};
use serde::{Deserialize, Serialize};
use std::io::Write;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON array of records
    Json,
    /// Markdown tables
    Markdown,
}

/// One built value to emit
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    /// A reference pyramid
    Pyramid(&'a Pyramid),
    /// A peer or reference annotation
    Annotation(&'a PyramidAnnotation),
}

impl Record<'_> {
    /// Record kind as written in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Pyramid(_) => "pyramid",
            Record::Annotation(_) => "annotation",
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one record built from `source`
    fn format_record(
        &mut self,
        source: &str,
        record: Record<'_>,
        diagnostics: &Diagnostics,
    ) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Formatter settings taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Indent JSON output
    pub pretty_json: bool,
    /// Emit diagnostics next to each record
    pub include_diagnostics: bool,
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    options: FormatOptions,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, options.include_diagnostics)),
        OutputFormat::Json => Box::new(JsonFormatter::new(
            writer,
            options.pretty_json,
            options.include_diagnostics,
        )),
        OutputFormat::Markdown => {
            Box::new(MarkdownFormatter::new(writer, options.include_diagnostics))
        }
    }
}

/// Parts of one contributor as `"text" [start, end)`, joined by ` + `
pub(crate) fn describe_parts(parts: &[pyralign_core::Span]) -> String {
    parts
        .iter()
        .map(|part| format!("{:?} [{}, {})", part.text, part.start, part.end))
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyralign_core::Span;

    #[test]
    fn test_describe_parts() {
        let parts = [Span::new("Heavy rain", 0, 10), Span::new("caused", 11, 17)];
        assert_eq!(describe_parts(&parts), "\"Heavy rain\" [0, 10) + \"caused\" [11, 17)");
    }

    #[test]
    fn test_format_names_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            format: OutputFormat,
        }
        let holder: Holder = toml::from_str("format = \"markdown\"").unwrap();
        assert_eq!(holder.format, OutputFormat::Markdown);
    }
}
