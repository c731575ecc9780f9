//! CLI runner - checks arguments and executes the pipeline

use crate::cli::commands::Cli;
use crate::error::{Error, Result, ResultExt};
use crate::loader::LoaderConfig;
use crate::output::{ExportConfig, ExportFormat, ExportSummary};
use crate::pipeline::{Pipeline, PipelineRequest};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the pipeline described by the command line
    pub fn run(&self) -> Result<ExportSummary> {
        let format = ExportFormat::from(self.cli.output_format);
        let destination = self.check_destination(format)?;
        self.prepare_directories(destination.as_deref())?;

        let mut request = PipelineRequest::new(
            &self.cli.student_file_path,
            &self.cli.room_file_path,
            format,
        );
        request.destination = destination;

        let mut pipeline = Pipeline::new(self.loader_config(), self.export_config());
        pipeline.run(&request)
    }

    /// Validate the requested destination against the output format.
    ///
    /// A custom destination must carry a `.json` or `.xml` extension, and that
    /// extension must agree with `format`.
    pub fn check_destination(&self, format: ExportFormat) -> Result<Option<PathBuf>> {
        let Some(destination) = &self.cli.output_destination else {
            return Ok(None);
        };

        match ExportFormat::from_path(destination) {
            None => Err(Error::config(format!(
                "Custom output path must end with .json or .xml, got: {}",
                destination.display()
            ))),
            Some(found) if found != format => Err(Error::config(format!(
                "Output format is {} but destination has .{} extension",
                format.label(),
                found.extension()
            ))),
            Some(_) => Ok(Some(destination.clone())),
        }
    }

    /// Create the directory the output file will land in
    fn prepare_directories(&self, destination: Option<&Path>) -> Result<()> {
        let dir = match destination {
            Some(path) => path.parent().filter(|p| !p.as_os_str().is_empty()),
            None => Some(self.cli.output_dir.as_path()),
        };

        if let Some(dir) = dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
        }
        Ok(())
    }

    fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::new();
        match self.cli.max_record_bytes {
            Some(bytes) => config.with_max_record_bytes(bytes),
            None => config,
        }
    }

    fn export_config(&self) -> ExportConfig {
        ExportConfig::new().with_output_dir(&self.cli.output_dir)
    }
}
