//! Lock-free transport between the ingest and processing threads.

mod ring;

pub use ring::{Consumer, Producer, SpscRingBuffer};
