//! File reading utilities

use anyhow::{Context, Result};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::fs;
use std::path::Path;

/// File reader with a legacy-encoding fallback
pub struct FileReader;

impl FileReader {
    /// Read a file as text
    ///
    /// Valid UTF-8 (with or without a byte-order mark) is used as is; anything
    /// else is decoded as windows-1252, the encoding of older corpora.
    pub fn read_text(path: &Path) -> Result<String> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let (text, had_errors) = UTF_8.decode_with_bom_removal(&bytes);
        if !had_errors {
            return Ok(text.into_owned());
        }

        log::debug!(
            "{} is not valid UTF-8, decoding as {}",
            path.display(),
            WINDOWS_1252.name()
        );
        let (text, _, _) = WINDOWS_1252.decode(&bytes);
        Ok(text.into_owned())
    }
}
