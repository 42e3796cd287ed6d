use std::fs;

use mapscout_core::ListingRecord;
use mapscout_engine::{ensure_output_dir, render_csv, write_records, ExportError, PersistError};
use pretty_assertions::assert_eq;

fn record(name: &str, address: Option<&str>, hours: Option<&str>) -> ListingRecord {
    ListingRecord {
        category: "кафе".to_string(),
        city: "Казань".to_string(),
        name: Some(name.to_string()),
        address: address.map(str::to_string),
        phone: None,
        website: None,
        working_hours: hours.map(str::to_string),
        source_url: format!("https://maps.test/maps/org/{name}/1/"),
    }
}

#[test]
fn renders_header_then_rows_in_order() {
    let csv = render_csv(&[
        record("first", Some("ул. Баумана, 12"), Some("24/7")),
        record("say \"hi\"", None, None),
    ]);

    let expected = "\u{FEFF}Category,City,Name,Address,Phone,Website,Working Hours,URL\r\n\
        кафе,Казань,first,\"ул. Баумана, 12\",,,24/7,https://maps.test/maps/org/first/1/\r\n\
        кафе,Казань,\"say \"\"hi\"\"\",,,,,\"https://maps.test/maps/org/say \"\"hi\"\"/1/\"\r\n";
    assert_eq!(csv, expected);
}

#[test]
fn writes_into_a_fresh_directory() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("yandex_result");

    let path = write_records(&dir, "kazan_27.12.2025.csv", &[record("first", None, None)]).unwrap();

    assert_eq!(path, dir.join("kazan_27.12.2025.csv"));
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
}

#[test]
fn rewriting_replaces_the_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    write_records(dir.path(), "out.csv", &[record("old", None, None)]).unwrap();

    let path = write_records(dir.path(), "out.csv", &[record("new", None, None)]).unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("new"));
    assert!(!content.contains("old"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn empty_export_is_refused() {
    let dir = tempfile::tempdir().unwrap();

    let err = write_records(dir.path(), "out.csv", &[]).unwrap_err();

    assert!(matches!(err, ExportError::Empty));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn output_dir_that_is_a_file_is_unusable() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("taken");
    fs::write(&file, b"x").unwrap();

    let err = ensure_output_dir(&file).unwrap_err();

    assert!(matches!(err, PersistError::OutputDir { .. }), "{err}");
    let err = write_records(&file, "out.csv", &[record("first", None, None)]).unwrap_err();
    assert!(matches!(err, ExportError::Persist(_)));
}
