//! The event record every stage of the pipeline trades in.

use crate::fileio::{CsvRecord, FileIoError};
use std::fmt;

/// What happened to a limit order.
///
/// Discriminants match the type column of the LOBSTER message format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventType {
    /// Submission of a new limit order.
    Submission = 1,
    /// Partial deletion of a limit order (reduce quantity).
    Cancellation = 2,
    /// Total deletion of a limit order.
    Deletion = 3,
    /// Execution of a visible limit order.
    ExecutionVisible = 4,
    /// Execution of a hidden limit order (the original order was never
    /// present in the book).
    ExecutionHidden = 5,
}

impl EventType {
    /// Map a raw LOBSTER type code to an event type.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Submission),
            2 => Some(Self::Cancellation),
            3 => Some(Self::Deletion),
            4 => Some(Self::ExecutionVisible),
            5 => Some(Self::ExecutionHidden),
            _ => None,
        }
    }

    /// The raw LOBSTER type code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Default for EventType {
    fn default() -> Self {
        Self::Submission
    }
}

/// A single market event.
///
/// Kept small and field-ordered so that four events fit in a 64-byte cache
/// line; the ring buffer and the consumer batch both copy these by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Event {
    /// Dollar price times 10,000.
    pub price: u32,
    /// Whole seconds after midnight the event happened.
    pub time: u32,
    /// Venue-assigned order identifier.
    pub order_id: u32,
    /// Number of shares. Negative means this is a sell order.
    pub size: i16,
    /// What happened to the order.
    pub kind: EventType,
}

const _: () = assert!(size_of::<Event>() == 16);

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order_id={} time={} price={} size={} type={}",
            self.order_id,
            self.time,
            self.price,
            self.size,
            self.kind.code()
        )
    }
}

/// Convert parsed message rows into events.
///
/// The fractional part of the time column is truncated; the size magnitude
/// is multiplied by the side column to produce the signed share count.
///
/// # Errors
/// Returns [`FileIoError::UnknownEventType`] when a row carries a type code
/// outside `1..=5`.
pub fn events_from_records(records: &[CsvRecord]) -> Result<Vec<Event>, FileIoError> {
    let mut events = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let kind = EventType::from_code(record.kind).ok_or(FileIoError::UnknownEventType {
            line: i + 1,
            code: record.kind,
        })?;

        events.push(Event {
            price: record.price,
            time: record.time as u32,
            order_id: record.order_id,
            size: (i32::from(record.size) * i32::from(record.side)) as i16,
            kind,
        });
    }

    Ok(events)
}
