//! Trading events decoded from LOBSTER-style message data.

mod event;

pub use event::{Event, EventType, events_from_records};
