//! LOBSTER message-file ingestion.
//!
//! Reading and parsing happen once, before the pipeline starts; nothing in
//! this module is ever called from the hot path. The column split is
//! hand-rolled; for one fixed six-column format a library would be more
//! machinery than the parsing.

mod error;

pub use error::FileIoError;

use crate::events::{self, Event};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// One parsed row of the six-column LOBSTER message format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvRecord {
    /// Decimal seconds past midnight.
    pub time: f64,
    /// Raw event-type code (`1..=5`).
    pub kind: u8,
    /// Venue-assigned order identifier.
    pub order_id: u32,
    /// Share magnitude; always positive, side carried separately.
    pub size: u16,
    /// Dollar price times 10,000.
    pub price: u32,
    /// `+1` for buy, `-1` for sell.
    pub side: i8,
}

/// Read a message file and parse every line into a [`CsvRecord`].
///
/// # Errors
/// Fails on I/O errors, rows with fewer than six columns, and columns that
/// do not parse as their expected numeric type. The format is trusted
/// beyond that; out-of-range values are the caller's problem.
pub fn read_csv_records(path: impl AsRef<Path>) -> Result<Vec<CsvRecord>, FileIoError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let mut records = Vec::new();

    for (i, line) in contents.lines().enumerate() {
        records.push(parse_record(line, i + 1)?);
    }

    debug!(records = records.len(), "parsed message file");

    Ok(records)
}

/// Read a message file straight through to [`Event`]s.
///
/// # Errors
/// Propagates every [`read_csv_records`] failure, plus unknown event-type
/// codes from the record conversion.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<Event>, FileIoError> {
    let records = read_csv_records(path)?;
    events::events_from_records(&records)
}

fn parse_record(line: &str, line_number: usize) -> Result<CsvRecord, FileIoError> {
    let mut columns = line.split(',');

    Ok(CsvRecord {
        time: parse_column(&mut columns, line_number, "time")?,
        kind: parse_column(&mut columns, line_number, "type")?,
        order_id: parse_column(&mut columns, line_number, "order_id")?,
        size: parse_column(&mut columns, line_number, "size")?,
        price: parse_column(&mut columns, line_number, "price")?,
        side: parse_column(&mut columns, line_number, "side")?,
    })
}

fn parse_column<'a, T: FromStr>(
    columns: &mut impl Iterator<Item = &'a str>,
    line: usize,
    column: &'static str,
) -> Result<T, FileIoError> {
    let raw = columns.next().ok_or(FileIoError::MissingColumn { line })?;

    raw.trim()
        .parse()
        .map_err(|_| FileIoError::InvalidColumn { line, column })
}
