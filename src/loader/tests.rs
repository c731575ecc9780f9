//! Tests for loader module

use super::*;
use crate::error::Error;
use crate::types::RecordKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::{self, BufReader, Cursor, Read};
use tempfile::{tempdir, NamedTempFile};

fn stream(body: &str, kind: RecordKind) -> RecordStream<Cursor<Vec<u8>>> {
    RecordStream::new(
        "inline.json",
        Cursor::new(body.as_bytes().to_vec()),
        kind,
        &LoaderConfig::default(),
    )
}

fn scan(body: &str) -> Vec<Result<serde_json::Value, String>> {
    let mut reader = JsonArrayReader::new(body.as_bytes(), 1024);
    let mut out = Vec::new();
    loop {
        match reader.next_value() {
            Ok(Some(value)) => out.push(Ok(value)),
            Ok(None) => break,
            Err(e) => {
                out.push(Err(e.to_string()));
                break;
            }
        }
    }
    out
}

// ============================================================================
// Array Scanner Tests
// ============================================================================

#[test]
fn test_scan_empty_array() {
    assert!(scan("[]").is_empty());
    assert!(scan("  [ \n ]\n").is_empty());
}

#[test]
fn test_scan_objects_in_order() {
    let values: Vec<_> = scan(r#"[{"id": 1}, {"id": 2} ,{"id":3}]"#)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(values, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[test]
fn test_scan_nested_and_escaped_content() {
    let body = r#"[{"name": "a]}\"{[", "tags": [1, {"x": [2]}]}, "plain", 42, true, null]"#;
    let values: Vec<_> = scan(body).into_iter().map(Result::unwrap).collect();
    assert_eq!(
        values,
        vec![
            json!({"name": "a]}\"{[", "tags": [1, {"x": [2]}]}),
            json!("plain"),
            json!(42),
            json!(true),
            json!(null),
        ]
    );
}

#[test]
fn test_scan_unicode_names() {
    let values: Vec<_> = scan(r#"[{"name": "Zoë é 日本"}]"#)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(values, vec![json!({"name": "Zoë é 日本"})]);
}

#[test]
fn test_scan_yields_before_bad_token() {
    let results = scan(r#"[{"id":1,"name":"A"},{bad]"#);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(json!({"id": 1, "name": "A"})));
    assert!(results[1].as_ref().unwrap_err().contains("mismatched"));
}

#[test]
fn test_scan_rejects_non_array_document() {
    let results = scan(r#"{"id": 1}"#);
    assert_eq!(results.len(), 1);
    assert!(results[0]
        .as_ref()
        .unwrap_err()
        .contains("expected '[' at start of document"));
}

#[test]
fn test_scan_rejects_empty_document() {
    let results = scan("   ");
    assert!(results[0].as_ref().unwrap_err().contains("empty document"));
}

#[test]
fn test_scan_rejects_trailing_comma() {
    let results = scan(r#"[{"id": 1},]"#);
    assert_eq!(results.len(), 2);
    assert!(results[1].as_ref().unwrap_err().contains("expected a value"));
}

#[test]
fn test_scan_rejects_missing_comma() {
    let results = scan(r#"[{"id": 1} {"id": 2}]"#);
    assert_eq!(results.len(), 2);
    assert!(results[1]
        .as_ref()
        .unwrap_err()
        .contains("expected ',' or ']'"));
}

#[test]
fn test_scan_rejects_unclosed_array() {
    let results = scan(r#"[{"id": 1}"#);
    assert_eq!(results.len(), 2);
    assert!(results[1].as_ref().unwrap_err().contains("not closed"));
}

#[test]
fn test_scan_rejects_truncated_element() {
    let results = scan(r#"[{"id": 1, "name": "A"#);
    assert_eq!(results.len(), 1);
    assert!(results[0]
        .as_ref()
        .unwrap_err()
        .contains("unexpected end of input"));
}

#[test]
fn test_scan_rejects_trailing_garbage() {
    let results = scan(r#"[{"id": 1}] x"#);
    assert_eq!(results.len(), 2);
    assert!(results[1]
        .as_ref()
        .unwrap_err()
        .contains("trailing characters"));
}

#[test]
fn test_scan_reports_invalid_element_syntax() {
    let results = scan(r#"[{"id": 1}, {id: 2}]"#);
    assert_eq!(results.len(), 2);
    assert!(results[1]
        .as_ref()
        .unwrap_err()
        .contains("invalid array element"));
}

#[test]
fn test_scan_rejects_bad_scalar() {
    let results = scan("[tru]");
    assert!(results[0]
        .as_ref()
        .unwrap_err()
        .contains("invalid array element"));
}

#[test]
fn test_scan_enforces_record_size_cap() {
    let mut reader = JsonArrayReader::new(r#"[{"name": "a long name"}]"#.as_bytes(), 8);
    let err = reader.next_value().unwrap_err();
    assert!(err.to_string().contains("exceeds 8 bytes"));
    assert!(reader.is_finished());
}

#[test]
fn test_scan_is_fused_after_error() {
    let mut reader = JsonArrayReader::new("[}".as_bytes(), 1024);
    assert!(reader.next_value().is_err());
    assert!(reader.next_value().unwrap().is_none());
}

#[test]
fn test_scan_tracks_offset() {
    let mut reader = JsonArrayReader::new(r#"[{"a":1}, {"b":2}]"#.as_bytes(), 1024);
    reader.next_value().unwrap();
    assert_eq!(reader.offset(), 8);
}

#[test]
fn test_scan_small_buffer() {
    // One-byte reads exercise element boundaries spanning buffer refills
    let body = r#"[{"id": 10, "name": "Hall"}, {"id": 11, "name": "Lab"}]"#;
    let reader = BufReader::with_capacity(1, body.as_bytes());
    let mut scanner = JsonArrayReader::new(reader, 1024);
    assert_eq!(
        scanner.next_value().unwrap(),
        Some(json!({"id": 10, "name": "Hall"}))
    );
    assert_eq!(
        scanner.next_value().unwrap(),
        Some(json!({"id": 11, "name": "Lab"}))
    );
    assert_eq!(scanner.next_value().unwrap(), None);
}

// ============================================================================
// Record Stream Tests
// ============================================================================

#[test]
fn test_stream_yields_valid_records() {
    let records: Vec<_> = stream(
        r#"[{"id": 1, "name": "Test"}, {"id": 2, "name": "Test2"}]"#,
        RecordKind::Room,
    )
    .collect::<crate::Result<_>>()
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[1]["name"], "Test2");
}

#[test]
fn test_stream_skips_invalid_records() {
    let mut records = stream(
        r#"[{"id": 1, "name": "A", "room": 1},
            {"id": -1, "name": "B", "room": 1},
            {"id": 3, "name": "C"},
            7,
            {"id": 4, "name": "D", "room": 2}]"#,
        RecordKind::Student,
    );

    let ids: Vec<_> = records
        .by_ref()
        .map(|r| r.unwrap()["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(
        records.stats(),
        LoadStats {
            yielded: 2,
            skipped: 3
        }
    );
    assert_eq!(records.stats().total(), 5);
}

#[test]
fn test_stream_malformed_after_valid_record() {
    let mut records = stream(r#"[{"id":1,"name":"A"},{bad]"#, RecordKind::Room);

    let first = records.next().unwrap().unwrap();
    assert_eq!(first["name"], "A");

    let err = records.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::MalformedInput { ref path, .. } if path == "inline.json"));

    assert!(records.next().is_none());
    assert!(records.next().is_none());
}

#[test]
fn test_stream_skips_then_fails() {
    let mut records = stream(r#"[{"id": -5, "name": "A"}, oops]"#, RecordKind::Room);
    assert!(matches!(
        records.next(),
        Some(Err(Error::MalformedInput { .. }))
    ));
    assert_eq!(records.stats().skipped, 1);
}

#[test]
fn test_stream_reports_kind_and_path() {
    let records = stream("[]", RecordKind::Student);
    assert_eq!(records.kind(), RecordKind::Student);
    assert_eq!(records.path(), std::path::Path::new("inline.json"));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device error"))
    }
}

#[test]
fn test_stream_surfaces_io_failure() {
    let mut records = RecordStream::new(
        "dev.json",
        BufReader::new(FailingReader),
        RecordKind::Room,
        &LoaderConfig::default(),
    );
    assert!(matches!(records.next(), Some(Err(Error::Io(_)))));
    assert!(records.next().is_none());
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_file_data() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        json!([{"id": 1, "name": "Test"}, {"id": 2, "name": "Test2"}]).to_string(),
    )
    .unwrap();

    let loaded: Vec<_> = load(file.path(), RecordKind::Room)
        .unwrap()
        .collect::<crate::Result<_>>()
        .unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0]["id"], 1);
    assert_eq!(loaded[1]["name"], "Test2");
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let err = load(&missing, RecordKind::Room).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_load_is_single_pass() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"[{"id": 1, "name": "A"}]"#).unwrap();

    let mut rooms = load(file.path(), RecordKind::Room).unwrap();
    assert_eq!(rooms.by_ref().count(), 1);
    assert_eq!(rooms.count(), 0);

    // Re-opening starts over
    assert_eq!(load(file.path(), RecordKind::Room).unwrap().count(), 1);
}

#[test]
fn test_load_with_config_record_cap() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"[{"id": 1, "name": "A fairly long room name"}]"#).unwrap();

    let config = LoaderConfig::new().with_max_record_bytes(16);
    let mut rooms = load_with_config(file.path(), RecordKind::Room, &config).unwrap();
    assert!(matches!(
        rooms.next(),
        Some(Err(Error::MalformedInput { .. }))
    ));
}

#[test]
fn test_loader_config_builder() {
    let config = LoaderConfig::new()
        .with_max_record_bytes(1024)
        .with_buffer_capacity(512);
    assert_eq!(config.max_record_bytes(), 1024);
    assert_eq!(config.buffer_capacity(), 512);

    let default = LoaderConfig::default();
    assert_eq!(default.max_record_bytes(), 16 * 1024 * 1024);
}
