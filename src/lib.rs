//! # room-roster
//!
//! Stream two large JSON arrays (students and rooms), validate every record,
//! join students into their rooms and write the result as JSON or XML.
//!
//! ## Features
//!
//! - **Streaming Input**: Array elements are parsed one at a time, never the whole file
//! - **Tolerant Validation**: Bad records are skipped with a warning, not fatal
//! - **Hash Join**: Students are indexed by room id, rooms are joined lazily
//! - **Incremental Output**: JSON and XML writers emit one room at a time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use room_roster::output::ExportFormat;
//! use room_roster::pipeline::{run, PipelineRequest};
//!
//! fn main() -> room_roster::Result<()> {
//!     let request = PipelineRequest::new("students.json", "rooms.json", ExportFormat::Xml)
//!         .with_destination("output/rooms.xml");
//!     let summary = run(&request)?;
//!     println!("wrote {} rooms to {}", summary.rooms_written, summary.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │ Loader(students) │      │  Loader(rooms)   │
//! │ scan → validate  │      │ scan → validate  │
//! └────────┬─────────┘      └────────┬─────────┘
//!          │ drained                 │ pulled lazily
//!          ▼                         ▼
//!    ┌───────────┐  lookup   ┌───────────────┐
//!    │ RoomIndex │ ────────▶ │ CombinedRooms │
//!    └───────────┘           └───────┬───────┘
//!                                    ▼
//!                        ┌──────────────────────┐
//!                        │ Exporter (JSON / XML) │
//!                        └──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Record model and type aliases
pub mod types;

/// Per-kind record validation
pub mod validate;

/// Streaming JSON array loader
pub mod loader;

/// Student/room join
pub mod combine;

/// JSON and XML exporters
pub mod output;

/// End-to-end run
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used items
pub use combine::combine;
pub use loader::load;
pub use output::{ExportFormat, Exporter};
pub use validate::validate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
