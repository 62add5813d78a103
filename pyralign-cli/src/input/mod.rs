//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod naming;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
pub use naming::{instance_id_from_path, summarizer_id_from_path};
