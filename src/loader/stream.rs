//! Validated record streams over input files

use super::reader::{JsonArrayReader, ScanError};
use super::types::{LoadStats, LoaderConfig};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, RecordKind};
use crate::validate::{check, ValidationIssue};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Open `path` and stream its valid `kind` records with default settings
///
/// # Examples
///
/// ```ignore
/// let rooms = load("rooms.json", RecordKind::Room)?;
/// for room in rooms {
///     let room = room?;
///     println!("{}", room["name"]);
/// }
/// ```
pub fn load(path: impl AsRef<Path>, kind: RecordKind) -> Result<RecordStream<BufReader<File>>> {
    load_with_config(path, kind, &LoaderConfig::default())
}

/// Open `path` and stream its valid `kind` records.
///
/// Fails immediately with `FileNotFound` or `PermissionDenied` when the file
/// cannot be opened. Parsing starts on the first call to `next`.
pub fn load_with_config(
    path: impl AsRef<Path>,
    kind: RecordKind,
    config: &LoaderConfig,
) -> Result<RecordStream<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    tracing::debug!(path = %path.display(), kind = %kind, "opened input file");

    let reader = BufReader::with_capacity(config.buffer_capacity(), file);
    Ok(RecordStream::new(path, reader, kind, config))
}

/// Single-pass iterator of validated records from one JSON array.
///
/// Invalid records are skipped with a warning. A syntax or read failure is
/// yielded once as an `Err`, after which the stream is exhausted; records
/// yielded before the failure are unaffected.
#[derive(Debug)]
pub struct RecordStream<R> {
    path: PathBuf,
    kind: RecordKind,
    reader: JsonArrayReader<R>,
    stats: LoadStats,
    done: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Stream records from an already opened reader.
    ///
    /// `path` is only used for diagnostics.
    pub fn new(path: impl AsRef<Path>, reader: R, kind: RecordKind, config: &LoaderConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            kind,
            reader: JsonArrayReader::new(reader, config.max_record_bytes()),
            stats: LoadStats::default(),
            done: false,
        }
    }

    /// Kind of record this stream validates against
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Source path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counts so far
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    fn skip(&mut self, issue: &ValidationIssue) {
        self.stats.skipped += 1;
        tracing::warn!(
            path = %self.path.display(),
            index = self.stats.total() - 1,
            "skipping record: {issue}"
        );
    }

    fn fail(&mut self, err: ScanError) -> Error {
        self.done = true;
        match err {
            ScanError::Syntax { .. } => Error::malformed_input(&self.path, err.to_string()),
            ScanError::Io(e) => Error::Io(e),
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<JsonObject>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let value = match self.reader.next_value() {
                Ok(Some(value)) => value,
                Ok(None) => {
                    self.done = true;
                    tracing::debug!(
                        path = %self.path.display(),
                        yielded = self.stats.yielded,
                        skipped = self.stats.skipped,
                        "finished reading input file"
                    );
                    return None;
                }
                Err(err) => return Some(Err(self.fail(err))),
            };

            let record = match value {
                JsonValue::Object(record) => record,
                _ => {
                    self.skip(&ValidationIssue::NotAnObject { kind: self.kind });
                    continue;
                }
            };

            match check(&record, self.kind) {
                Ok(()) => {
                    self.stats.yielded += 1;
                    return Some(Ok(record));
                }
                Err(issue) => self.skip(&issue),
            }
        }
    }
}

impl<R: BufRead> FusedIterator for RecordStream<R> {}
