//! Swipe and scroll animations
//!
//! A swipe slides the current picture out and a target bitmap in, one
//! row or column per step, over exactly eight steps. Text scrolling feeds
//! one glyph per swipe.

pub mod animator;
pub mod direction;

pub use animator::Animator;
pub use direction::Direction;
