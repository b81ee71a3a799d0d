//! Display state
//!
//! The "desired" picture: a steady bitmap plus two blink masks. Logic
//! threads write it, the refresh loop reads a snapshot every tick.
//!
//! Direct writes (`set_all`, `mask_on`, `mask_off`, `mask_invert`) always
//! win over blinking: every pixel they touch is removed from both blink
//! masks. The two blink masks never overlap.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::config::MAX_BRIGHTNESS;
use crate::traits::BlinkRate;

/// Bitmap with a single pixel set
///
/// Positions wrap modulo 64, so pixel 64 is pixel 0.
#[inline]
pub const fn pixel_mask(pos: u8) -> u64 {
    1u64 << (pos & 63)
}

/// Desired display contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Pixels lit continuously
    pub steady: u64,
    /// Pixels toggled at the fast blink rate
    pub blink_fast: u64,
    /// Pixels toggled at the slow blink rate
    pub blink_slow: u64,
}

impl DisplayState {
    /// All pixels off, nothing blinking
    pub const fn blank() -> Self {
        Self {
            steady: 0,
            blink_fast: 0,
            blink_slow: 0,
        }
    }

    /// Replace the whole picture and stop all blinking
    pub fn set_all(&mut self, bitmap: u64) {
        self.steady = bitmap;
        self.blink_fast = 0;
        self.blink_slow = 0;
    }

    /// Turn on every pixel in `mask`
    pub fn mask_on(&mut self, mask: u64) {
        self.steady |= mask;
        self.stop_blink(mask);
    }

    /// Turn off every pixel in `mask`
    pub fn mask_off(&mut self, mask: u64) {
        self.steady &= !mask;
        self.stop_blink(mask);
    }

    /// Invert every pixel in `mask`
    pub fn mask_invert(&mut self, mask: u64) {
        self.steady ^= mask;
        self.stop_blink(mask);
    }

    /// Make every pixel in `mask` blink, fast or slow
    pub fn mask_blink(&mut self, mask: u64, fast: bool) {
        self.steady &= !mask;
        if fast {
            self.blink_fast |= mask;
            self.blink_slow &= !mask;
        } else {
            self.blink_fast &= !mask;
            self.blink_slow |= mask;
        }
    }

    /// Union of both blink masks
    pub const fn blinking(&self) -> u64 {
        self.blink_fast | self.blink_slow
    }

    fn stop_blink(&mut self, mask: u64) {
        self.blink_fast &= !mask;
        self.blink_slow &= !mask;
    }
}

/// Display state shared between logic threads and the refresh loop
///
/// Every operation is one locked read-modify-write of the whole
/// [`DisplayState`], so the refresh loop never sees a steady bitmap and
/// blink masks from different updates.
pub struct SharedDisplay<M: RawMutex> {
    state: Mutex<M, Cell<DisplayState>>,
    brightness: Signal<M, u8>,
    blink_all: Signal<M, BlinkRate>,
}

impl<M: RawMutex> Default for SharedDisplay<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SharedDisplay<M> {
    /// Create a blank display
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(DisplayState::blank())),
            brightness: Signal::new(),
            blink_all: Signal::new(),
        }
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> DisplayState {
        self.state.lock(|state| state.get())
    }

    /// Current steady bitmap
    pub fn steady(&self) -> u64 {
        self.snapshot().steady
    }

    /// Apply an arbitrary update atomically
    pub fn update<R>(&self, f: impl FnOnce(&mut DisplayState) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }

    /// Replace the whole picture and stop all blinking
    pub fn set_all(&self, bitmap: u64) {
        self.update(|s| s.set_all(bitmap));
    }

    /// Turn on every pixel in `mask`
    pub fn mask_on(&self, mask: u64) {
        self.update(|s| s.mask_on(mask));
    }

    /// Turn off every pixel in `mask`
    pub fn mask_off(&self, mask: u64) {
        self.update(|s| s.mask_off(mask));
    }

    /// Invert every pixel in `mask`
    pub fn mask_invert(&self, mask: u64) {
        self.update(|s| s.mask_invert(mask));
    }

    /// Make every pixel in `mask` blink
    pub fn mask_blink(&self, mask: u64, fast: bool) {
        self.update(|s| s.mask_blink(mask, fast));
    }

    /// Turn on pixel `pos` (0-63, wrapping)
    pub fn pixel_on(&self, pos: u8) {
        self.mask_on(pixel_mask(pos));
    }

    /// Turn off pixel `pos`
    pub fn pixel_off(&self, pos: u8) {
        self.mask_off(pixel_mask(pos));
    }

    /// Invert pixel `pos`
    pub fn pixel_invert(&self, pos: u8) {
        self.mask_invert(pixel_mask(pos));
    }

    /// Make pixel `pos` blink, fast or slow
    pub fn pixel_blink(&self, pos: u8, fast: bool) {
        self.mask_blink(pixel_mask(pos), fast);
    }

    /// Request a new global brightness (clamped to 100 %)
    ///
    /// Applied by the refresh loop on its next tick; the latest request wins.
    pub fn set_brightness(&self, percent: u8) {
        self.brightness.signal(percent.min(MAX_BRIGHTNESS));
    }

    /// Request a whole-display hardware blink
    pub fn blink_all(&self, rate: BlinkRate) {
        self.blink_all.signal(rate);
    }

    pub(crate) fn take_brightness(&self) -> Option<u8> {
        self.brightness.try_take()
    }

    pub(crate) fn take_blink_all(&self) -> Option<BlinkRate> {
        self.blink_all.try_take()
    }
}
