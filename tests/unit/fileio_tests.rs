use marketpipe_rs::events::EventType;
use marketpipe_rs::fileio::{FileIoError, load_events, read_csv_records};
use std::io::Write;
use tempfile::NamedTempFile;

fn message_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn parses_the_six_column_message_format() {
    let file = message_file(
        "34200.01399412,3,16085616,100,310400,-1\n\
         34200.01399412,1,16116348,100,310500,-1\n\
         34200.015247805,1,16116658,100,310400,-1\n\
         34200.015442111,1,16116704,100,310500,1\n",
    );

    let records = read_csv_records(file.path()).unwrap();
    assert_eq!(4, records.len());

    assert!((records[0].time - 34200.01399412).abs() < 1e-9);
    assert!((records[3].time - 34200.015442111).abs() < 1e-9);

    let kinds: Vec<u8> = records.iter().map(|record| record.kind).collect();
    assert_eq!(vec![3, 1, 1, 1], kinds);

    assert_eq!(16_085_616, records[0].order_id);
    assert_eq!(100, records[0].size);
    assert_eq!(310_400, records[0].price);
    assert_eq!(-1, records[0].side);
    assert_eq!(1, records[3].side);
}

#[test]
fn loads_events_straight_from_disk() {
    let file = message_file("34200.5,1,42,100,310400,-1\n34201.0,4,42,100,310400,-1\n");

    let events = load_events(file.path()).unwrap();

    assert_eq!(2, events.len());
    assert_eq!(EventType::Submission, events[0].kind);
    assert_eq!(-100, events[0].size);
    assert_eq!(34_200, events[0].time);
    assert_eq!(EventType::ExecutionVisible, events[1].kind);
}

#[test]
fn missing_file_surfaces_an_io_error() {
    match load_events("./does-not-exist.csv") {
        Err(FileIoError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn short_rows_are_rejected_with_their_line() {
    let file = message_file("34200.5,1,42,100,310400,-1\n34201.0,1,42\n");

    match read_csv_records(file.path()) {
        Err(FileIoError::MissingColumn { line }) => assert_eq!(2, line),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn malformed_numerics_are_rejected_with_their_column() {
    let file = message_file("34200.5,1,42,banana,310400,-1\n");

    match read_csv_records(file.path()) {
        Err(FileIoError::InvalidColumn { line, column }) => {
            assert_eq!(1, line);
            assert_eq!("size", column);
        }
        other => panic!("expected InvalidColumn, got {other:?}"),
    }
}

#[test]
fn unknown_event_types_fail_at_conversion() {
    let file = message_file("34200.5,7,42,100,310400,-1\n");

    match load_events(file.path()) {
        Err(FileIoError::UnknownEventType { line, code }) => {
            assert_eq!(1, line);
            assert_eq!(7, code);
        }
        other => panic!("expected UnknownEventType, got {other:?}"),
    }
}
