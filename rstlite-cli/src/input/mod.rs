//! Input handling module

pub mod discovery;
pub mod file_reader;

pub use discovery::{discover, resolve_patterns, InputDoc};
pub use file_reader::FileReader;
