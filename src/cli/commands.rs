//! CLI arguments

use crate::output::ExportFormat;
use clap::Parser;
use std::path::PathBuf;

/// Join a student file into a room file and export the result
#[derive(Parser, Debug)]
#[command(name = "room-roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the students' JSON file
    #[arg(long)]
    pub student_file_path: PathBuf,

    /// Path to the rooms' JSON file
    #[arg(long)]
    pub room_file_path: PathBuf,

    /// Output file format
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file (must end with .json or .xml)
    #[arg(long)]
    pub output_destination: Option<PathBuf>,

    /// Directory for generated file names when no destination is given
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Largest accepted size of a single input record, in bytes
    #[arg(long)]
    pub max_record_bytes: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of rooms
    Json,
    /// XML document
    Xml,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Xml => ExportFormat::Xml,
        }
    }
}
