//! CLI module
//!
//! Command-line interface for running the pipeline.
//!
//! # Arguments
//!
//! - `--student-file-path` / `--room-file-path` - Input JSON arrays
//! - `--output-format` - `json` (default) or `xml`
//! - `--output-destination` - Output file, must match the format's extension
//! - `--output-dir` - Where generated file names go when no destination is set

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::Runner;
