//! Output writer tests.
//!
//! Tables are read back with the `csv` crate and `serde_json` rather than
//! compared as raw text, so quoting details do not leak into the assertions.

#![cfg(all(feature = "csv-output", feature = "json-output"))]

use std::fs;

use tempfile::tempdir;

use threadpack::core::{HEADERS, to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use threadpack::format::{OutputFormat, write_to_format};
use threadpack::{Record, ThreadpackError};

fn sample_records() -> Vec<Record> {
    vec![
        Record::new()
            .with_shift_id(42)
            .with_email("a@b.com")
            .with_reaction("check", Some("u1;u2"))
            .with_bot_msg_ts("2022-05-01 10:13:20")
            .with_reply("ok, thanks", "u3", "2022-05-01 10:15:00"),
        Record::new(),
        Record::new()
            .with_reaction("eyes", None::<String>)
            .with_reply("multi\nline \"quoted\"", "u4", "2022-05-02 08:00:00"),
    ]
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("threads.csv");
    let records = sample_records();
    write_csv(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, Record::headers());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        let expected = record.to_row();
        assert_eq!(row.iter().collect::<Vec<_>>(), expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn test_csv_nulls_read_back_empty() {
    let csv = to_csv(&[Record::new()]).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let row = reader.records().next().unwrap().unwrap();

    assert_eq!(row.len(), HEADERS.len());
    assert!(row.iter().all(str::is_empty));
}

#[test]
fn test_csv_special_characters_survive() {
    let csv = to_csv(&sample_records()).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(&rows[0][5], "ok, thanks");
    assert_eq!(&rows[2][5], "multi\nline \"quoted\"");
    assert_eq!(&rows[2][3], "");
}

#[test]
fn test_csv_empty_batch_has_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    write_csv(&[], &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), HEADERS.join(","));
}

#[test]
fn test_csv_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("threads.csv");
    fs::write(&path, "stale content that is much longer than the new table\n".repeat(50)).unwrap();

    write_csv(&[Record::new().with_shift_id(1)], &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_unwritable_destination() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.csv");

    for format in OutputFormat::all() {
        let err = write_to_format(&sample_records(), &path, *format).unwrap_err();
        assert!(matches!(err, ThreadpackError::Destination { .. }), "{format}: {err}");
    }
}

// ============================================================================
// JSON / JSONL
// ============================================================================

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("threads.json");
    let records = sample_records();
    write_json(&records, &path).unwrap();

    let back: Vec<Record> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_json_field_order_matches_headers() {
    let json = to_json(&sample_records()[..1]).unwrap();
    let positions: Vec<usize> = HEADERS
        .iter()
        .map(|h| json.find(&format!("\"{h}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_jsonl_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("threads.jsonl");
    let records = sample_records();
    write_jsonl(&records, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let back: Vec<Record> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(back, records);
    assert_eq!(content, to_jsonl(&records).unwrap());
}

#[test]
fn test_formats_agree_on_values() {
    let records = sample_records();
    let json: serde_json::Value = serde_json::from_str(&to_json(&records).unwrap()).unwrap();
    let csv = to_csv(&records).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    for (i, row) in rows.iter().enumerate() {
        for (j, header) in HEADERS.iter().enumerate() {
            let cell = match &json[i][header] {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            assert_eq!(cell, &row[j], "row {i} column {header}");
        }
    }
}
