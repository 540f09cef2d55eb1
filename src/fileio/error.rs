//! Ingestion error taxonomy.

use std::io;
use thiserror::Error;

/// Errors raised while loading and parsing a LOBSTER message file.
///
/// All of these are fatal at startup; none of them can occur once the
/// pipeline is running.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FileIoError {
    /// The input file could not be opened or read.
    #[error("could not read input file: {0}")]
    Io(#[from] io::Error),

    /// A row had fewer than six columns.
    #[error("line {line}: not enough columns in the provided CSV data")]
    MissingColumn {
        /// One-based line number of the offending row.
        line: usize,
    },

    /// A column failed to parse as its expected numeric type.
    #[error("line {line}: malformed {column} column")]
    InvalidColumn {
        /// One-based line number of the offending row.
        line: usize,
        /// Name of the offending column.
        column: &'static str,
    },

    /// The type column held a code outside `1..=5`.
    #[error("line {line}: unknown event type code {code}")]
    UnknownEventType {
        /// One-based line number of the offending row.
        line: usize,
        /// The unrecognised code.
        code: u8,
    },
}
