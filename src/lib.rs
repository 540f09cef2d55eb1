//! # Nanosecond-Latency Market-Event Processing Pipeline
//!
//! A benchmark-grade pipeline that replays LOBSTER-style limit-order-book
//! message data for a single instrument through a lock-free queue into an
//! order book and a trivial market-making engine, measuring the wall-clock
//! cost of every event as it goes.
//!
//! ## Architecture
//!
//! Two OS threads, one happens-before edge:
//!
//! - The **producer** walks the pre-parsed event batch and spins each event
//!   into a bounded single-producer / single-consumer ring buffer
//!   ([`concurrency::SpscRingBuffer`]). No locks, no syscalls, no backoff.
//! - The **consumer** drains the ring in small batches, feeds each event to
//!   the [`orderbook::OrderBook`] and, when the book accepted it, to the
//!   [`engine::TradingEngine`], and records the elapsed nanoseconds of each
//!   event in a pre-sized [`pipeline::LatencyLog`].
//!
//! The ring buffer's acquire/release index protocol is the only
//! synchronisation in the system; the book, the engine, and the latency log
//! are all owned by the consumer thread outright.
//!
//! ## Components
//!
//! - [`events`]: the 16-byte [`Event`](events::Event) record and the
//!   LOBSTER type-code mapping.
//! - [`concurrency`]: the SPSC ring buffer with split producer/consumer
//!   endpoints and a two-segment bulk drain.
//! - [`orderbook`]: per-price-level state in three parallel dense arrays
//!   (500 000 levels, one per integer ten-thousandth of a dollar), with the
//!   five-way event dispatch.
//! - [`engine`]: incremental volume-weighted average price and the
//!   buy/sell target prices derived from it. Integer arithmetic only.
//! - [`pipeline`]: thread wiring, batch draining, latency capture.
//! - [`fileio`] and [`report`]: the cold ends of the program, message-file
//!   ingestion before the run and the percentile summary and distribution
//!   chart after it.
//!
//! ## Hot-path discipline
//!
//! Between the producer's first push and the consumer's last pop, the
//! pipeline never allocates, logs, blocks, or touches a non-monotonic
//! clock. Buffers are sized at startup: the ring is fixed, the per-level
//! order vectors are pre-reserved, and the latency log has capacity for
//! every event before the threads start.
//!
//! ## Example
//!
//! ```
//! use marketpipe_rs::engine::TradingEngine;
//! use marketpipe_rs::events::{Event, EventType};
//! use marketpipe_rs::orderbook::OrderBook;
//!
//! let mut book = OrderBook::new();
//! let mut engine = TradingEngine::new(20);
//!
//! let submission = Event {
//!     price: 250_000,
//!     time: 34_200,
//!     order_id: 9_001,
//!     size: 100,
//!     kind: EventType::Submission,
//! };
//!
//! assert!(book.process_event(submission));
//! engine.process_event(submission);
//!
//! assert_eq!(100, book.total_order_size_for_price(250_000));
//! assert_eq!(250_000, engine.average_share_price());
//! assert_eq!(250_020, engine.target_sell_price());
//! ```
//!
//! Processing a full session is one call: [`pipeline::run`] takes the
//! parsed events, a book, and an engine, and returns the latency log that
//! [`report::render_latency_report`] turns into the terminal summary.
//!
//! ## Scope
//!
//! One instrument, one producer, one consumer. The dense-array book and
//! the SPSC queue are both deliberate single-instrument, single-stream
//! choices; widening either means different data structures, not more of
//! these.

pub mod concurrency;
pub mod consts;
pub mod engine;
pub mod events;
pub mod fileio;
pub mod orderbook;
pub mod pipeline;
pub mod prelude;
pub mod report;

pub use concurrency::SpscRingBuffer;
pub use engine::TradingEngine;
pub use events::{Event, EventType};
pub use fileio::FileIoError;
pub use orderbook::{OrderBook, OrderBookEntry};
pub use pipeline::LatencyLog;
pub use report::LatencySummary;
