//! Validation rules per record kind

use crate::types::{
    room_reference, JsonObject, JsonValue, RecordKind, ID_FIELD, NAME_FIELD, ROOM_FIELD,
};
use thiserror::Error;

/// Why a record was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("{kind} record is not a JSON object")]
    NotAnObject { kind: RecordKind },

    #[error("{kind} data is incomplete, missing '{field}'")]
    Incomplete {
        kind: RecordKind,
        field: &'static str,
    },

    #[error("{kind} '{field}' must be a non-negative integer, got: {value}")]
    InvalidId {
        kind: RecordKind,
        field: &'static str,
        value: String,
    },

    #[error("{kind} name must be non-empty string, got: {value}")]
    InvalidName { kind: RecordKind, value: String },
}

/// Check a record against the rules for `kind`, returning the first issue
pub fn check(record: &JsonObject, kind: RecordKind) -> Result<(), ValidationIssue> {
    match kind {
        RecordKind::Room => check_room(record),
        RecordKind::Student => check_student(record),
    }
}

/// Same as [`check`] for an arbitrary JSON value
pub fn check_value(value: &JsonValue, kind: RecordKind) -> Result<(), ValidationIssue> {
    match value {
        JsonValue::Object(record) => check(record, kind),
        _ => Err(ValidationIssue::NotAnObject { kind }),
    }
}

/// Whether `record` is an acceptable `kind` record.
///
/// Logs the reason at warn level when it is not.
pub fn validate(record: &JsonObject, kind: RecordKind) -> bool {
    match check(record, kind) {
        Ok(()) => true,
        Err(issue) => {
            tracing::warn!(kind = %kind, "{issue}");
            false
        }
    }
}

fn check_room(record: &JsonObject) -> Result<(), ValidationIssue> {
    let kind = RecordKind::Room;
    let id = required(record.get(ID_FIELD), kind, ID_FIELD)?;
    let name = required(record.get(NAME_FIELD), kind, NAME_FIELD)?;

    check_id(id, kind, ID_FIELD)?;
    check_name(name, kind)
}

fn check_student(record: &JsonObject) -> Result<(), ValidationIssue> {
    let kind = RecordKind::Student;
    let id = required(record.get(ID_FIELD), kind, ID_FIELD)?;
    let name = required(record.get(NAME_FIELD), kind, NAME_FIELD)?;
    let room = required(room_reference(record), kind, ROOM_FIELD)?;

    check_id(id, kind, ID_FIELD)?;
    check_name(name, kind)?;
    check_id(room, kind, ROOM_FIELD)
}

fn required<'a>(
    value: Option<&'a JsonValue>,
    kind: RecordKind,
    field: &'static str,
) -> Result<&'a JsonValue, ValidationIssue> {
    value.ok_or(ValidationIssue::Incomplete { kind, field })
}

// Zero is a valid identifier; only negatives and non-integers are rejected.
fn check_id(value: &JsonValue, kind: RecordKind, field: &'static str) -> Result<(), ValidationIssue> {
    match value.as_u64() {
        Some(_) => Ok(()),
        None => Err(ValidationIssue::InvalidId {
            kind,
            field,
            value: value.to_string(),
        }),
    }
}

fn check_name(value: &JsonValue, kind: RecordKind) -> Result<(), ValidationIssue> {
    match value.as_str() {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(ValidationIssue::InvalidName {
            kind,
            value: value.to_string(),
        }),
    }
}
