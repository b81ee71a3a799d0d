//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in badge-core for the badge's hardware:
//!
//! - LED matrix controller (HT16K33 over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod ht16k33;

pub use ht16k33::{Ht16k33, Ht16k33Error};
