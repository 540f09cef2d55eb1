use marketpipe_rs::engine::TradingEngine;
use marketpipe_rs::events::{Event, EventType};
use marketpipe_rs::orderbook::OrderBook;
use marketpipe_rs::pipeline;

fn event(kind: EventType, price: u32, time: u32, order_id: u32, size: i16) -> Event {
    Event {
        price,
        time,
        order_id,
        size,
        kind,
    }
}

/// A session exercising every event kind, including events the book must
/// reject.
fn session() -> Vec<Event> {
    vec![
        event(EventType::Submission, 100, 10, 1, 50),
        event(EventType::Submission, 101, 11, 2, -30),
        event(EventType::Submission, 100, 12, 3, 20),
        event(EventType::Cancellation, 100, 13, 1, 10),
        event(EventType::Cancellation, 100, 14, 999, 10), // unknown: rejected
        event(EventType::ExecutionVisible, 101, 15, 2, -30),
        event(EventType::ExecutionHidden, 100, 16, 888, 5), // never in book
        event(EventType::Deletion, 100, 17, 3, 20),
        event(EventType::Deletion, 100, 18, 3, 20), // already gone: rejected
        event(EventType::Submission, 102, 19, 4, 40),
    ]
}

/// Book and engine state captured after processing `events` serially. The
/// book itself is dropped inside; its full-depth allocation is too big to
/// keep two of alive at once.
fn reference_state(events: &[Event], prices: &[u32]) -> (Vec<LevelState>, TradingEngine) {
    let mut book = OrderBook::new();
    let mut engine = TradingEngine::new(20);

    for &step in events {
        if book.process_event(step) {
            engine.process_event(step);
        }
    }

    let levels = prices.iter().map(|&price| level_state(&book, price)).collect();

    (levels, engine)
}

type LevelState = (u32, u32, Vec<marketpipe_rs::orderbook::OrderBookEntry>);

fn level_state(book: &OrderBook, price: u32) -> LevelState {
    (
        book.last_modified_for_price(price),
        book.total_order_size_for_price(price),
        book.orders_for_price(price).to_vec(),
    )
}

#[test]
fn pipeline_matches_serial_processing() {
    let events = session();
    let prices = [100, 101, 102];
    let (reference_levels, reference_engine) = reference_state(&events, &prices);

    let mut book = OrderBook::new();
    let mut engine = TradingEngine::new(20);
    let latencies = pipeline::run(&events, &mut book, &mut engine);

    // One latency sample per event, rejected ones included.
    assert_eq!(events.len(), latencies.len());

    for (&price, expected) in prices.iter().zip(&reference_levels) {
        assert_eq!(*expected, level_state(&book, price));
    }

    assert_eq!(reference_engine.total_market_price(), engine.total_market_price());
    assert_eq!(reference_engine.market_shares(), engine.market_shares());
    assert_eq!(reference_engine.average_share_price(), engine.average_share_price());
    assert_eq!(reference_engine.target_buy_price(), engine.target_buy_price());
    assert_eq!(reference_engine.target_sell_price(), engine.target_sell_price());
    assert_eq!(
        reference_engine.last_execution_order(),
        engine.last_execution_order()
    );
}

#[test]
fn pipeline_processes_events_in_fifo_order() {
    // Strictly increasing submission times and ids at one price; the final
    // book state pins down both the event count and their arrival order.
    let events: Vec<Event> = (0..5_000)
        .map(|i| event(EventType::Submission, 200, i, i, 1))
        .collect();

    let mut book = OrderBook::new();
    let mut engine = TradingEngine::new(20);
    let latencies = pipeline::run(&events, &mut book, &mut engine);

    assert_eq!(5_000, latencies.len());
    assert_eq!(4_999, book.last_modified_for_price(200));
    assert_eq!(5_000, book.total_order_size_for_price(200));
    assert_eq!(5_000, book.orders_for_price(200).len());
    assert_eq!(5_000, engine.market_shares());

    // Orders arrived in submission order.
    for (i, entry) in book.orders_for_price(200).iter().enumerate() {
        assert_eq!(i as u32, entry.order_id);
    }
}

#[test]
fn rejected_events_are_timed_but_not_forwarded() {
    let events = vec![
        event(EventType::Cancellation, 50, 10, 1, 5),
        event(EventType::ExecutionHidden, 50, 11, 2, 5),
    ];

    let mut book = OrderBook::new();
    let mut engine = TradingEngine::new(20);
    let latencies = pipeline::run(&events, &mut book, &mut engine);

    assert_eq!(2, latencies.len());
    assert_eq!(0, engine.total_market_price());
    assert_eq!(0, engine.market_shares());
    assert_eq!(None, engine.last_execution_order());
    assert!(book.orders_for_price(50).is_empty());
}

#[test]
fn latency_log_reserves_and_reports() {
    let mut log = pipeline::LatencyLog::with_capacity(4);
    assert!(log.is_empty());

    log.record(10);
    log.record(20);

    assert_eq!(2, log.len());
    assert_eq!(&[10, 20], log.as_slice());
    assert_eq!(vec![10, 20], log.into_samples());
}
