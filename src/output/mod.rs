//! Output module
//!
//! Streams combined rooms to JSON or XML files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Selecting an output format (`ExportFormat`)
//! - Writing rooms incrementally (`RoomWriter`, JSON and XML implementations)
//! - Resolving destination paths and exporting to files (`Exporter`)

mod exporter;
mod types;
mod writer;

pub use exporter::Exporter;
pub use types::{ExportConfig, ExportFormat, ExportSummary};
pub use writer::{create_writer, write_rooms, JsonRoomWriter, RoomWriter, XmlRoomWriter};
