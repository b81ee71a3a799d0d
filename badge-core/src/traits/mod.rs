//! Hardware abstraction traits
//!
//! These traits define the interface between the display engine
//! and the hardware-specific LED matrix drivers.

pub mod led;

pub use led::{BlinkRate, LedMatrixDriver};
