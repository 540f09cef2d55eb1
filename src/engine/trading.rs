//! The trading engine proper. Mostly a placeholder for real business
//! logic: it tracks a volume-weighted average price over every live order
//! it has seen and derives a buy/sell target either side of it.

use crate::events::{Event, EventType};

/// Trivial market-making engine for a single instrument.
///
/// All state is integer arithmetic over running sums; nothing here divides
/// by a value that can be zero, and nothing allocates. The engine is fed
/// only events the order book accepted, so it never sees a removal for an
/// order it has not counted.
pub struct TradingEngine {
    /// Sum of the value of all live orders in ten-thousandths of a dollar,
    /// across both sides. A $100 sell and a $100 buy contribute $200.
    total_market_price: u64,
    /// Number of shares wanting to be bought or sold.
    market_shares: u64,
    /// Current average share price in ten-thousandths of a dollar, or zero
    /// while no shares are live.
    average_share_price: u32,
    /// The last execution event seen, visible or hidden.
    last_execution_order: Option<Event>,
    /// The price the engine wants to buy at.
    target_buy_price: u32,
    /// The price the engine wants to sell at.
    target_sell_price: u32,
    /// The distance from the average share price that we are willing to
    /// buy or sell at.
    price_spread: u32,
}

impl TradingEngine {
    /// Create an engine that quotes `price_spread` ten-thousandths of a
    /// dollar either side of the running average.
    pub fn new(price_spread: u32) -> Self {
        Self {
            total_market_price: 0,
            market_shares: 0,
            average_share_price: 0,
            last_execution_order: None,
            target_buy_price: 0,
            target_sell_price: 0,
            price_spread,
        }
    }

    /// Fold one accepted event into the running sums and refresh the
    /// target prices.
    #[inline]
    pub fn process_event(&mut self, event: Event) {
        match event.kind {
            EventType::Submission => self.process_order_added_event(event),
            EventType::Cancellation | EventType::Deletion | EventType::ExecutionVisible => {
                self.process_order_removed_event(event);
            }
            // The executed order was never recorded, so folding it in would
            // corrupt the sums.
            EventType::ExecutionHidden => return,
        }

        self.update_position();
    }

    /// Sum of the value of all live orders, in ten-thousandths of a dollar.
    pub fn total_market_price(&self) -> u64 {
        self.total_market_price
    }

    /// Number of shares wanting to be bought or sold.
    pub fn market_shares(&self) -> u64 {
        self.market_shares
    }

    /// Volume-weighted average share price, or zero while no shares are
    /// live.
    pub fn average_share_price(&self) -> u32 {
        self.average_share_price
    }

    /// The most recent execution event seen, if any.
    pub fn last_execution_order(&self) -> Option<Event> {
        self.last_execution_order
    }

    /// The price the engine currently wants to buy at.
    pub fn target_buy_price(&self) -> u32 {
        self.target_buy_price
    }

    /// The price the engine currently wants to sell at.
    pub fn target_sell_price(&self) -> u32 {
        self.target_sell_price
    }

    fn process_order_added_event(&mut self, event: Event) {
        let shares = u64::from(event.size.unsigned_abs());

        self.total_market_price += shares * u64::from(event.price);
        self.market_shares += shares;
        self.recompute_average();
    }

    fn process_order_removed_event(&mut self, event: Event) {
        let shares = u64::from(event.size.unsigned_abs());

        self.total_market_price -= shares * u64::from(event.price);
        self.market_shares -= shares;
        self.recompute_average();

        // Hidden executions currently return early in `process_event`, but
        // this path stays correct for them should the dispatch ever change.
        if matches!(
            event.kind,
            EventType::ExecutionVisible | EventType::ExecutionHidden
        ) {
            self.last_execution_order = Some(event);
        }
    }

    fn recompute_average(&mut self) {
        self.average_share_price = if self.market_shares == 0 {
            0
        } else {
            (self.total_market_price / self.market_shares) as u32
        };
    }

    /// The market value has changed; move the buy/sell targets with it.
    ///
    /// The buy side saturates at zero: both operands are unsigned and a
    /// wide spread can exceed the average early in a session. The sell side
    /// widens before narrowing back; the price domain keeps it in `u32`
    /// range.
    fn update_position(&mut self) {
        self.target_buy_price = self.average_share_price.saturating_sub(self.price_spread);
        self.target_sell_price =
            (u64::from(self.average_share_price) + u64::from(self.price_spread)) as u32;
    }
}
