//! Level persistence
//!
//! Features:
//! - Line-oriented text records, one entity per line
//! - Malformed records skipped and reported, never fatal
//! - Interpenetrating geometry reported at load time
//! - Writer emitting the same format for exported levels

pub mod records;

pub use records::{LevelLoad, ParseOptions, format_records, load_level_file, parse_level};
