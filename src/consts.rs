//! Compile-time tunables shared across the pipeline.

/// Number of addressable price levels in the order book. Prices are integer
/// ten-thousandths of a dollar, so this covers $0.0000 to $49.9999.
pub const BOOK_PRICE_LEVELS: usize = 500_000;

/// Initial capacity reserved for each per-price order vector. Levels rarely
/// hold more than a few tens of live orders, so this keeps reallocation off
/// the hot path.
pub const LEVEL_RESERVE: usize = 50;

/// Capacity of the ring buffer between the ingest and processing threads.
/// Must be a power of two.
pub const EVENT_RING_CAPACITY: usize = 1024;

/// Maximum number of events the consumer drains from the ring per batch.
/// Timing still wraps individual events, not batches.
pub const CONSUMER_BATCH: usize = 8;

/// Default distance from the running average share price at which the
/// trading engine places its buy/sell targets, in ten-thousandths of a
/// dollar ($1.00).
pub const DEFAULT_PRICE_SPREAD: u32 = 10_000;

/// Number of equal-width bands in the latency distribution chart.
pub const CHART_BANDS: usize = 15;

/// Maximum bar length of the latency distribution chart, in characters.
pub const CHART_BAR_WIDTH: usize = 60;

/// Width of the right-aligned nanosecond labels in the chart.
pub const CHART_LABEL_WIDTH: usize = 8;
