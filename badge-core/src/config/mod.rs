//! Configuration types
//!
//! Display timing and board selection, chosen once at startup.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
