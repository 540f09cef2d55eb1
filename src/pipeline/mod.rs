//! Producer/consumer wiring: replays a batch of events through the ring
//! buffer into the book and engine, timing each event as it is processed.

use crate::concurrency::{Consumer, Producer, SpscRingBuffer};
use crate::consts::{CONSUMER_BATCH, EVENT_RING_CAPACITY};
use crate::engine::TradingEngine;
use crate::events::Event;
use crate::orderbook::OrderBook;
use std::hint;
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Pre-sized append-only log of per-event processing latencies, in
/// nanoseconds.
///
/// Owned by the consumer thread for the duration of a run; the backing
/// storage is reserved up front so recording never allocates.
pub struct LatencyLog {
    samples: Vec<u64>,
}

impl LatencyLog {
    /// Create a log with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append one latency sample.
    #[inline]
    pub fn record(&mut self, nanos: u64) {
        self.samples.push(nanos);
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The recorded samples, in processing order.
    pub fn as_slice(&self) -> &[u64] {
        &self.samples
    }

    /// Consume the log, yielding the raw samples.
    pub fn into_samples(self) -> Vec<u64> {
        self.samples
    }
}

/// Replay `events` through the SPSC ring buffer into the book and engine.
///
/// Spawns the producer and consumer threads, blocks until every event has
/// been processed, and returns one latency sample per event, in processing
/// order. The book and engine are mutated in event order by the consumer
/// thread alone.
pub fn run(events: &[Event], book: &mut OrderBook, engine: &mut TradingEngine) -> LatencyLog {
    let (producer, consumer) = SpscRingBuffer::<Event, EVENT_RING_CAPACITY>::new().split();
    let mut log = LatencyLog::with_capacity(events.len());

    debug!(events = events.len(), "starting event pipeline");

    thread::scope(|scope| {
        scope.spawn(|| produce_events(producer, events));
        scope.spawn(|| consume_events(consumer, events.len(), book, engine, &mut log));
    });

    debug!(samples = log.len(), "event pipeline drained");

    log
}

/// Push every event into the ring in order, spinning while it is full.
///
/// No backoff and no sleep: the queue drains in nanoseconds and any
/// introduced latency would dominate the numbers being measured downstream.
/// Events arrive one by one deliberately; batching the pushes would not
/// resemble a live feed.
fn produce_events<const N: usize>(mut producer: Producer<Event, N>, events: &[Event]) {
    for event in events {
        while !producer.push(*event) {
            hint::spin_loop();
        }
    }
}

/// Drain the ring in small batches until the pre-known event count has been
/// processed, timing each event individually.
///
/// Nothing in the per-event body logs, allocates, or blocks. Timing wraps
/// one event at a time; the batch only amortises the ring's index traffic.
fn consume_events<const N: usize>(
    mut consumer: Consumer<Event, N>,
    total: usize,
    book: &mut OrderBook,
    engine: &mut TradingEngine,
    log: &mut LatencyLog,
) {
    let mut batch = [Event::default(); CONSUMER_BATCH];
    let mut events_consumed = 0;

    while events_consumed < total {
        let drained = consumer.pop_many(&mut batch);

        for event in &batch[..drained] {
            let clock_start = Instant::now();

            // An event the book rejected describes an order we never held;
            // the engine must not count it either.
            if book.process_event(*event) {
                engine.process_event(*event);
            }

            log.record(clock_start.elapsed().as_nanos() as u64);
        }

        events_consumed += drained;
    }
}
