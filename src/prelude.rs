//! Prelude module that re-exports commonly used types and functions.
//!
//! Instead of importing each item individually, you can use:
//!
//! ```rust
//! use marketpipe_rs::prelude::*;
//! ```

// Core pipeline types
pub use crate::concurrency::{Consumer, Producer, SpscRingBuffer};
pub use crate::engine::TradingEngine;
pub use crate::events::{Event, EventType, events_from_records};
pub use crate::orderbook::{OrderBook, OrderBookEntry};
pub use crate::pipeline::{LatencyLog, run};

// Ingestion and reporting
pub use crate::fileio::{CsvRecord, FileIoError, load_events, read_csv_records};
pub use crate::report::{LatencySummary, render_latency_report};

// Tunables
pub use crate::consts::{
    BOOK_PRICE_LEVELS, CONSUMER_BATCH, DEFAULT_PRICE_SPREAD, EVENT_RING_CAPACITY,
};
