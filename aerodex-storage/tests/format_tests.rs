//! Flat text format tests through files on disk

use std::io::BufReader;

use aerodex_core::{Code, Error, Record};
use aerodex_storage::{read_file, read_records, write_file};

const SAMPLE: &str = "\
SFO San Francisco;   37.62 -122.38
lax\tLos Angeles;\t33.94\t-118.41

ORD Chicago O'Hare;  41.98  -87.90
";

#[test]
fn test_read_sample_source() {
    let records = read_records(BufReader::new(SAMPLE.as_bytes())).unwrap();
    let codes: Vec<&str> = records.iter().map(|r| r.code().as_str()).collect();
    assert_eq!(codes, vec!["SFO", "LAX", "ORD"]);
    assert_eq!(records[2].city(), "Chicago O'Hare");
    assert_eq!(records[2].longitude(), -87.9);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let records = read_records(SAMPLE.as_bytes()).unwrap();
    assert_eq!(write_file(&path, &records).unwrap(), 3);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().next().unwrap(), "SFO\tSan Francisco;\t37.62\t-122.38");

    let reread = read_file(&path).unwrap();
    assert_eq!(reread, records);
}

#[test]
fn test_city_with_spaces_and_tabs_is_trimmed() {
    let records = read_records("JFK \t New York City \t;\t40.64 -73.78".as_bytes()).unwrap();
    assert_eq!(records[0].city(), "New York City");
}

#[test]
fn test_coordinates_are_rounded_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let record = Record::new(Code::new("SEA").unwrap(), "Seattle", 47.4489, -122.3094);
    write_file(&path, [&record]).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "SEA\tSeattle;\t47.45\t-122.31\n"
    );
}

#[test]
fn test_bad_code_is_malformed_input() {
    match read_records("S3A Nowhere; 0 0\n".as_bytes()) {
        Err(Error::MalformedInput { line, message }) => {
            assert_eq!(line, 1);
            assert!(message.contains("S3A"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");
    let err = write_file(&path, std::iter::empty::<&Record>()).unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}
