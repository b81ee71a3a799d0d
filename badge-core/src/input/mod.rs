//! Button input
//!
//! Button edges from the hardware callback land in a single-slot
//! [`ButtonQueue`]; logic threads and the animator drain it with
//! filtered, deadline-bounded reads.

pub mod events;
pub mod queue;

pub use events::{code, Button, ButtonEvent, ButtonFilter, Edge};
pub use queue::{ButtonQueue, PushError, ReadError, QUEUE_CAPACITY};
