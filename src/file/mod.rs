//! File I/O for compared documents.
//!
//! Documents can be loaded from disk (plain or gzipped) or from stdin.

pub mod loader;

pub use loader::{load_document, load_json_file, load_json_from_stdin};
