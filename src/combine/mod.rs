//! Combiner module
//!
//! Joins students to rooms by room id.
//!
//! # Overview
//!
//! The student stream is drained into a `RoomIndex` first, because rooms may
//! arrive in any order relative to the students that reference them. Rooms are
//! then pulled one at a time and joined against the index, so only the index
//! (O(students)) is held in memory.

mod index;

pub use index::{combine, group_by_room, CombinedRooms, RoomIndex, StudentsByRoom};
