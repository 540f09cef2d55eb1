//! Core order book implementation: dense per-price arrays and the
//! event-driven state machine over them.

use crate::consts::{BOOK_PRICE_LEVELS, LEVEL_RESERVE};
use crate::events::{Event, EventType};

/// A live order resting at one price level: the numeric fields of the
/// [`Event`] that created it, without the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBookEntry {
    /// Dollar price times 10,000.
    pub price: u32,
    /// Seconds after midnight of the submission that created this entry.
    pub time: u32,
    /// Venue-assigned order identifier.
    pub order_id: u32,
    /// Remaining shares. Negative means this is a sell order.
    pub size: i16,
}

impl From<Event> for OrderBookEntry {
    fn from(event: Event) -> Self {
        Self {
            price: event.price,
            time: event.time,
            order_id: event.order_id,
            size: event.size,
        }
    }
}

/// Per-price-level order book for a single instrument.
///
/// Level data lives in three parallel dense arrays indexed by price rather
/// than an array of per-level structs: the hot consumer path touches the
/// last-modified time, the level total, and the order vector of one price,
/// and keeping each property in its own array lets a read-only scan of one
/// of them (say, the level totals) run without dragging the order vectors
/// into cache.
///
/// Every price in `[0, BOOK_PRICE_LEVELS)` is addressable from
/// construction; the book supports exactly one instrument. Duplicate order
/// ids within a level are tolerated, with lookups resolving to the first
/// match. Removal swaps the last entry into the vacated slot, so the order
/// of entries within a level carries no meaning.
pub struct OrderBook {
    /// The time of the last accepted event on each level.
    levels_last_modified: Vec<u32>,
    /// Sum of the absolute share counts resting on each level.
    levels_size: Vec<u32>,
    /// The orders resting on each level.
    levels_orders: Vec<Vec<OrderBookEntry>>,
}

impl OrderBook {
    /// Create an empty book with every price level allocated up front.
    ///
    /// Each level's order vector is pre-reserved so that submissions on the
    /// hot path do not trigger reallocation storms.
    pub fn new() -> Self {
        let mut levels_orders = Vec::with_capacity(BOOK_PRICE_LEVELS);
        levels_orders.resize_with(BOOK_PRICE_LEVELS, || Vec::with_capacity(LEVEL_RESERVE));

        Self {
            levels_last_modified: vec![0; BOOK_PRICE_LEVELS],
            levels_size: vec![0; BOOK_PRICE_LEVELS],
            levels_orders,
        }
    }

    /// Apply one event to the book. Returns `true` iff the event changed
    /// book state.
    ///
    /// Cancellations, deletions, and visible executions referencing an
    /// `(order_id, price)` pair the book does not hold are rejected and
    /// leave the book untouched. Hidden executions never change state: the
    /// executed order was never in public book data to begin with.
    #[inline]
    pub fn process_event(&mut self, event: Event) -> bool {
        // Arms ordered from most to least common in LOBSTER flow.
        match event.kind {
            EventType::Submission => {
                self.insert_order(event);
                true
            }
            EventType::Cancellation => self.process_cancellation_event(event),
            EventType::ExecutionVisible => self.remove_order(event),
            EventType::Deletion => self.remove_order(event),
            EventType::ExecutionHidden => false,
        }
    }

    /// Time of the last accepted event that touched `price`.
    #[inline]
    pub fn last_modified_for_price(&self, price: u32) -> u32 {
        self.levels_last_modified[price as usize]
    }

    /// Total shares (absolute, both sides) resting at `price`.
    #[inline]
    pub fn total_order_size_for_price(&self, price: u32) -> u32 {
        self.levels_size[price as usize]
    }

    /// The orders resting at `price`, in no particular order.
    #[inline]
    pub fn orders_for_price(&self, price: u32) -> &[OrderBookEntry] {
        &self.levels_orders[price as usize]
    }

    fn insert_order(&mut self, event: Event) {
        let price = event.price as usize;

        self.levels_last_modified[price] = event.time;
        self.levels_size[price] += u32::from(event.size.unsigned_abs());
        self.levels_orders[price].push(OrderBookEntry::from(event));
    }

    /// An order has had its quantity decreased (partial cancellation).
    /// Returns `true` if actioned.
    fn process_cancellation_event(&mut self, event: Event) -> bool {
        let price = event.price as usize;

        let Some(index) = self.order_index_by_price_and_id(event.price, event.order_id) else {
            return false;
        };

        // Cancellations carry the side sign of the submission; shrink the
        // stored magnitude toward zero, keeping the entry's own sign and
        // submission time.
        let magnitude = event.size.unsigned_abs();
        let entry = &mut self.levels_orders[price][index];

        if entry.size < 0 {
            entry.size += magnitude as i16;
        } else {
            entry.size -= magnitude as i16;
        }

        self.levels_size[price] -= u32::from(magnitude);
        self.levels_last_modified[price] = event.time;

        true
    }

    /// Remove an order from the book entirely. Returns `true` if an order
    /// was removed.
    fn remove_order(&mut self, event: Event) -> bool {
        let price = event.price as usize;

        let Some(index) = self.order_index_by_price_and_id(event.price, event.order_id) else {
            return false;
        };

        // The stored entry's size is authoritative for the level total, not
        // the event's: a partially cancelled order executes at its remaining
        // magnitude.
        let removed = self.levels_orders[price].swap_remove(index);
        self.levels_size[price] -= u32::from(removed.size.unsigned_abs());
        self.levels_last_modified[price] = event.time;

        true
    }

    /// Index of the first order at `price` with the given id.
    ///
    /// Levels hold tens of entries at most, so a linear scan stays in cache
    /// and beats any indexed structure at this size.
    fn order_index_by_price_and_id(&self, price: u32, order_id: u32) -> Option<usize> {
        self.levels_orders[price as usize]
            .iter()
            .position(|entry| entry.order_id == order_id)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
