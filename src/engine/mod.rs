//! Incremental VWAP tracking and target price computation.

mod trading;

pub use trading::TradingEngine;
