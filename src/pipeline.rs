//! Load → combine → export pipeline
//!
//! Wires two loaders, the combiner and the exporter for one run. Each stage
//! pulls from the one before it, so the only state held for the whole run is
//! the room index built from the student file.

use crate::combine::combine;
use crate::error::Result;
use crate::loader::{load_with_config, LoaderConfig};
use crate::output::{ExportConfig, ExportFormat, ExportSummary, Exporter};
use crate::types::RecordKind;
use std::path::{Path, PathBuf};

/// Inputs and output of one run, already resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// JSON array of `{id, name, room}` records
    pub students_path: PathBuf,
    /// JSON array of `{id, name}` records
    pub rooms_path: PathBuf,
    /// Output format
    pub format: ExportFormat,
    /// Requested output file; the exporter falls back to a generated name
    /// when this is absent or does not match `format`
    pub destination: Option<PathBuf>,
}

impl PipelineRequest {
    /// Create a request without an explicit destination
    pub fn new(
        students_path: impl Into<PathBuf>,
        rooms_path: impl Into<PathBuf>,
        format: ExportFormat,
    ) -> Self {
        Self {
            students_path: students_path.into(),
            rooms_path: rooms_path.into(),
            format,
            destination: None,
        }
    }

    /// Set the output file
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

/// Configured pipeline; owns the exporter (and its fallback counter)
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    loader: LoaderConfig,
    exporter: Exporter,
}

impl Pipeline {
    /// Create a pipeline
    pub fn new(loader: LoaderConfig, export: ExportConfig) -> Self {
        Self {
            loader,
            exporter: Exporter::new(export),
        }
    }

    /// Get the exporter
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Execute one run.
    ///
    /// Both input files are opened up front so a missing file fails before
    /// anything is written. The student file is read in full before the output
    /// file is created; the room file is streamed straight into the export.
    pub fn run(&mut self, request: &PipelineRequest) -> Result<ExportSummary> {
        tracing::debug!(
            students = %request.students_path.display(),
            rooms = %request.rooms_path.display(),
            format = %request.format,
            "starting pipeline"
        );

        let students = load_with_config(&request.students_path, RecordKind::Student, &self.loader)?;
        let rooms = load_with_config(&request.rooms_path, RecordKind::Room, &self.loader)?;

        let combined = combine(students, rooms)?;
        self.exporter
            .export(request.format, request.destination.as_deref(), combined)
    }
}

/// Run the pipeline once with default configuration
pub fn run(request: &PipelineRequest) -> Result<ExportSummary> {
    Pipeline::default().run(request)
}

/// Convenience wrapper taking the four resolved arguments directly
pub fn run_paths(
    students_path: &Path,
    rooms_path: &Path,
    format: ExportFormat,
    destination: Option<&Path>,
) -> Result<ExportSummary> {
    let mut request = PipelineRequest::new(students_path, rooms_path, format);
    request.destination = destination.map(Path::to_path_buf);
    run(&request)
}
