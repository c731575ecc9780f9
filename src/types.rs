//! Common types used throughout room-roster
//!
//! This module contains the record model shared by the loader, combiner and
//! exporters, plus the JSON type aliases used for untyped records.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, the shape of one raw input record
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Field Names
// ============================================================================

/// Identifier field shared by rooms and students
pub const ID_FIELD: &str = "id";

/// Name field shared by rooms and students
pub const NAME_FIELD: &str = "name";

/// Room reference on a student record
pub const ROOM_FIELD: &str = "room";

/// Alternative spelling of the room reference accepted on input
pub const ROOM_ID_FIELD: &str = "roomId";

/// Look up a student's room reference under either accepted key
pub(crate) fn room_reference(record: &JsonObject) -> Option<&JsonValue> {
    record
        .get(ROOM_FIELD)
        .or_else(|| record.get(ROOM_ID_FIELD))
}

// ============================================================================
// Record Kind
// ============================================================================

/// Kind of record held by an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// `{id, name}`
    Room,
    /// `{id, name, room}`
    Student,
}

impl RecordKind {
    /// Lowercase name used in diagnostics and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Room => "room",
            RecordKind::Student => "student",
        }
    }

    /// Capitalised label used in error messages
    fn label(self) -> &'static str {
        match self {
            RecordKind::Room => "Room",
            RecordKind::Student => "Student",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "room" => Ok(RecordKind::Room),
            "student" => Ok(RecordKind::Student),
            _ => Err(Error::UnknownRecordKind {
                kind: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Typed Records
// ============================================================================

/// Conversion from a validated raw record into a typed one
pub trait FromRecord: Sized {
    /// Kind this type is read from
    const KIND: RecordKind;

    /// Extract the typed record, failing with `MalformedRecord` on a missing
    /// or mistyped key
    fn from_record(record: &JsonObject) -> Result<Self>;
}

fn require_u64(record: &JsonObject, kind: RecordKind, field: &str) -> Result<u64> {
    record
        .get(field)
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| Error::malformed_record(kind.label(), field))
}

fn require_str(record: &JsonObject, kind: RecordKind, field: &str) -> Result<String> {
    record
        .get(field)
        .and_then(JsonValue::as_str)
        .map(String::from)
        .ok_or_else(|| Error::malformed_record(kind.label(), field))
}

/// A room read from the room file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub name: String,
}

impl FromRecord for Room {
    const KIND: RecordKind = RecordKind::Room;

    fn from_record(record: &JsonObject) -> Result<Self> {
        Ok(Self {
            id: require_u64(record, Self::KIND, ID_FIELD)?,
            name: require_str(record, Self::KIND, NAME_FIELD)?,
        })
    }
}

/// A student read from the student file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[serde(rename = "room", alias = "roomId")]
    pub room_id: u64,
}

impl Student {
    /// Projection kept in the room index and written to output
    pub fn entry(&self) -> StudentEntry {
        StudentEntry {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl FromRecord for Student {
    const KIND: RecordKind = RecordKind::Student;

    fn from_record(record: &JsonObject) -> Result<Self> {
        let room_id = room_reference(record)
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| Error::malformed_record(Self::KIND.label(), ROOM_FIELD))?;

        Ok(Self {
            id: require_u64(record, Self::KIND, ID_FIELD)?,
            name: require_str(record, Self::KIND, NAME_FIELD)?,
            room_id,
        })
    }
}

/// Student as it appears inside a combined room (no room back-reference)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEntry {
    pub id: u64,
    pub name: String,
}

/// A room joined with the students assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedRoom {
    pub id: u64,
    pub name: String,
    pub students: Vec<StudentEntry>,
}

impl CombinedRoom {
    /// Join a room with its matched students
    pub fn new(room: Room, students: Vec<StudentEntry>) -> Self {
        Self {
            id: room.id,
            name: room.name,
            students,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("room".parse::<RecordKind>().unwrap(), RecordKind::Room);
        assert_eq!(
            " Student ".parse::<RecordKind>().unwrap(),
            RecordKind::Student
        );

        let err = "lecturer".parse::<RecordKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownRecordKind { ref kind } if kind == "lecturer"));
    }

    #[test]
    fn test_room_from_record() {
        let room = Room::from_record(&object(json!({"id": 7, "name": "Lab"}))).unwrap();
        assert_eq!(
            room,
            Room {
                id: 7,
                name: "Lab".to_string()
            }
        );
    }

    #[test]
    fn test_room_from_record_missing_name() {
        let err = Room::from_record(&object(json!({"id": 7}))).unwrap_err();
        assert_eq!(err.to_string(), "Room record missing required key: name");
    }

    #[test]
    fn test_student_from_record_accepts_both_room_keys() {
        let a = Student::from_record(&object(json!({"id": 1, "name": "Ann", "room": 3}))).unwrap();
        let b =
            Student::from_record(&object(json!({"id": 1, "name": "Ann", "roomId": 3}))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.room_id, 3);
    }

    #[test]
    fn test_student_from_record_missing_room() {
        let err = Student::from_record(&object(json!({"id": 1, "name": "Ann"}))).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord { ref kind, ref field } if kind == "Student" && field == "room"
        ));
    }

    #[test]
    fn test_combined_room_field_order() {
        let combined = CombinedRoom::new(
            Room {
                id: 1,
                name: "Lab".to_string(),
            },
            vec![StudentEntry {
                id: 2,
                name: "Bo".to_string(),
            }],
        );
        assert_eq!(
            serde_json::to_string(&combined).unwrap(),
            r#"{"id":1,"name":"Lab","students":[{"id":2,"name":"Bo"}]}"#
        );
    }
}
