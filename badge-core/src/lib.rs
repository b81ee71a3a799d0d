//! Board-agnostic display engine and input queue for the badge
//!
//! Every screen, menu and game on the badge is built on this crate:
//!
//! - Glyph table (8x8 font lookup)
//! - Display state (steady bitmap plus fast/slow blink masks)
//! - Swipe/scroll animator, interruptible by button input
//! - Refresh loop diffing the display state against the LEDs
//! - Bounded button event queue
//! - LED driver trait and board LED mappings
//!
//! # Bit layout
//!
//! A bitmap is a `u64` holding an 8x8 grid. The most significant byte is
//! the top row and bit 7 of each byte is the leftmost column, so bit `i`
//! sits in row `7 - (i >> 3)`, column `7 - (i & 7)`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod anim;
pub mod config;
pub mod display;
pub mod effects;
pub mod glyph;
pub mod input;
pub mod refresh;
pub mod traits;

pub use anim::{Animator, Direction};
pub use config::{BoardRevision, ConfigError, DisplayConfig};
pub use display::{DisplayState, SharedDisplay};
pub use glyph::{glyph, glyph_byte, UNKNOWN_GLYPH};
pub use input::{Button, ButtonEvent, ButtonFilter, ButtonQueue, Edge, PushError};
pub use refresh::{run_refresh, LedWrite, Refresher};
pub use traits::{BlinkRate, LedMatrixDriver};

/// Width and height of the LED matrix
pub const GRID_SIZE: usize = 8;
