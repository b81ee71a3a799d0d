//! Badge Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits that the badge's peripheral
//! drivers are written against, so the same driver code runs on every
//! board revision (and against mocks on the host).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  badge-core (display engine, input)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  badge-drivers (HT16K33 LED matrix)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  badge-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`i2c::EmbeddedHalI2c`] - adapter for any `embedded-hal` I2C master

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{EmbeddedHalI2c, I2cBus};
