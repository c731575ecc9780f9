//! File exporter
//!
//! Resolves the destination path for an export and streams combined rooms
//! into it.

use super::types::{ExportConfig, ExportFormat, ExportSummary};
use super::writer::write_rooms;
use crate::error::{Error, Result};
use crate::types::CombinedRoom;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes combined rooms to files.
///
/// Holds the fallback counter used when a destination does not carry the
/// requested format's extension. One exporter serves one pipeline run; the
/// counter is shared by both formats so fallback names never collide within
/// the run.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
    fallback_counter: u32,
}

impl Exporter {
    /// Create an exporter
    pub fn new(config: ExportConfig) -> Self {
        let fallback_counter = config.counter_start();
        Self {
            config,
            fallback_counter,
        }
    }

    /// Get the exporter configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Current value of the fallback counter
    pub fn fallback_counter(&self) -> u32 {
        self.fallback_counter
    }

    /// Pick the file an export in `format` will be written to.
    ///
    /// `destination` is kept when its extension matches `format`. Otherwise
    /// (including no destination at all) the counter is bumped and
    /// `<output_dir>/<stem><n>.<ext>` is returned.
    pub fn resolve_path(&mut self, format: ExportFormat, destination: Option<&Path>) -> PathBuf {
        match destination {
            Some(path) if format.matches_path(path) => path.to_path_buf(),
            _ => {
                self.fallback_counter += 1;
                let file_name = format!(
                    "{}{}.{}",
                    self.config.file_stem(),
                    self.fallback_counter,
                    format.extension()
                );
                let fallback = self.config.output_dir().join(file_name);
                if let Some(requested) = destination {
                    tracing::debug!(
                        requested = %requested.display(),
                        fallback = %fallback.display(),
                        "destination does not match {} format, using fallback path",
                        format.label()
                    );
                }
                fallback
            }
        }
    }

    /// Stream `rooms` into a new file.
    ///
    /// The file is created before the first room is pulled. An upstream error
    /// aborts the export; content already written is left in place.
    pub fn export<I>(
        &mut self,
        format: ExportFormat,
        destination: Option<&Path>,
        rooms: I,
    ) -> Result<ExportSummary>
    where
        I: IntoIterator<Item = Result<CombinedRoom>>,
    {
        let path = self.resolve_path(format, destination);
        let file = File::create(&path).map_err(|e| Error::from_io(e, &path))?;

        let rooms_written = write_rooms(format, BufWriter::new(file), rooms)?;
        tracing::info!(
            rooms = rooms_written,
            "exported {} file at {}",
            format.label(),
            path.display()
        );

        Ok(ExportSummary {
            path,
            format,
            rooms_written,
        })
    }
}
