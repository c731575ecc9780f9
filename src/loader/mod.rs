//! Streaming loader module
//!
//! Read large JSON array files one record at a time.
//!
//! # Overview
//!
//! The loader module provides:
//! - `JsonArrayReader` - Incremental scanner over a top-level JSON array
//! - `RecordStream` - Iterator of validated records from one file
//! - `load` / `load_with_config` - Open a file as a `RecordStream`
//!
//! Only one array element is buffered at a time, so input size is bounded by
//! disk rather than memory.

mod reader;
mod stream;
mod types;

pub use reader::{JsonArrayReader, ScanError};
pub use stream::{load, load_with_config, RecordStream};
pub use types::{LoadStats, LoaderConfig};

#[cfg(test)]
mod tests;
