//! Loader configuration and counters

/// Configuration for streaming input files
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    max_record_bytes: usize,
    buffer_capacity: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_record_bytes: 16 * 1024 * 1024, // 16 MiB
            buffer_capacity: 64 * 1024,
        }
    }
}

impl LoaderConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the size of a single array element
    #[must_use]
    pub fn with_max_record_bytes(mut self, bytes: usize) -> Self {
        self.max_record_bytes = bytes;
        self
    }

    /// Set the read buffer size
    #[must_use]
    pub fn with_buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Get the per-record size cap
    #[must_use]
    pub fn max_record_bytes(&self) -> usize {
        self.max_record_bytes
    }

    /// Get the read buffer size
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

/// Counts kept by a `RecordStream` while it is drained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records that passed validation and were yielded
    pub yielded: u64,
    /// Records dropped by validation
    pub skipped: u64,
}

impl LoadStats {
    /// Total array elements seen
    pub fn total(&self) -> u64 {
        self.yielded + self.skipped
    }
}
