//! Identifiers derived from corpus file names
//!
//! Corpus files are named like `D0701.M.250.A.7.pan`: the topic comes first
//! and the summarizer last.

use std::path::Path;

/// Topic identifier: the file name up to its first `.`
pub fn instance_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}

/// Summarizer identifier: the last `.`-segment of the file stem
pub fn summarizer_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    stem.rsplit('.').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_names() {
        let path = Path::new("/data/peers/D0701.M.250.A.7.pan");
        assert_eq!(instance_id_from_path(path), "D0701");
        assert_eq!(summarizer_id_from_path(path), "7");

        let path = Path::new("pyramids/D0701.pyr");
        assert_eq!(instance_id_from_path(path), "D0701");
        assert_eq!(summarizer_id_from_path(path), "D0701");
    }

    #[test]
    fn test_names_without_dots() {
        let path = Path::new("summary");
        assert_eq!(instance_id_from_path(path), "summary");
        assert_eq!(summarizer_id_from_path(path), "summary");
    }
}
