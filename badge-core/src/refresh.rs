//! Refresh loop
//!
//! Runs at the display frame rate. Each tick compares the desired
//! [`DisplayState`] with a shadow of what is lit in hardware and writes
//! only the LEDs whose state changes:
//!
//! ```text
//! to_invert  = (shadow ^ steady) & !(blink_fast | blink_slow)
//! to_invert |= blink_fast   every frame_rate / fast_blink_hz ticks
//! to_invert |= blink_slow   every frame_rate / slow_blink_hz ticks
//! shadow    ^= to_invert
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Ticker;
use heapless::Vec;

use crate::config::{BoardRevision, DisplayConfig};
use crate::display::{DisplayState, SharedDisplay};
use crate::traits::LedMatrixDriver;

/// Pixels on the matrix, and so the most writes a tick can make
pub const PIXEL_COUNT: usize = 64;

/// One physical LED write made by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedWrite {
    /// Physical LED index (after board mapping)
    pub led: u8,
    pub on: bool,
}

/// Writes made by a single tick
pub type Frame = Vec<LedWrite, PIXEL_COUNT>;

/// Refresh state: the hardware shadow and the tick counter
#[derive(Debug, Clone)]
pub struct Refresher {
    shadow: u64,
    tick: u32,
    fast_period: u32,
    slow_period: u32,
    board: BoardRevision,
}

impl Refresher {
    /// Start from an all-off matrix
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            shadow: 0,
            tick: 0,
            fast_period: config.fast_blink_period_ticks(),
            slow_period: config.slow_blink_period_ticks(),
            board: config.board,
        }
    }

    /// What the hardware currently shows, as a logical bitmap
    pub fn shadow(&self) -> u64 {
        self.shadow
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u32 {
        self.tick
    }

    /// Pixels the next tick will toggle for `state`
    pub fn plan(&self, state: &DisplayState) -> u64 {
        let mut to_invert = (self.shadow ^ state.steady) & !state.blinking();
        if self.tick % self.fast_period == 0 {
            to_invert |= state.blink_fast;
        }
        if self.tick % self.slow_period == 0 {
            to_invert |= state.blink_slow;
        }
        to_invert
    }

    /// Run one tick against `driver`
    ///
    /// A pixel whose write fails keeps its old shadow bit, so the next
    /// tick tries it again.
    pub fn tick<D: LedMatrixDriver>(&mut self, state: &DisplayState, driver: &mut D) -> Frame {
        let to_invert = self.plan(state);
        let mut frame = Frame::new();
        let mut applied = 0u64;

        let mut pending = to_invert;
        while pending != 0 {
            let pos = pending.trailing_zeros() as u8;
            let mask = 1u64 << pos;
            pending &= !mask;

            let on = self.shadow & mask == 0;
            let led = self.board.led_index(pos);
            match driver.set_led(led, on) {
                Ok(()) => {
                    applied |= mask;
                    // at most one write per pixel, so this always fits
                    let _ = frame.push(LedWrite { led, on });
                }
                Err(_) => warn!("LED {} write failed, retrying next frame", led),
            }
        }

        if !frame.is_empty() {
            trace!("tick {}: {} LED writes", self.tick, frame.len());
        }

        self.shadow ^= applied;
        self.tick = self.tick.wrapping_add(1);
        frame
    }
}

/// Apply pending brightness and whole-display blink requests
pub fn apply_commands<M: RawMutex, D: LedMatrixDriver>(display: &SharedDisplay<M>, driver: &mut D) {
    if let Some(percent) = display.take_brightness() {
        debug!("Brightness {}%", percent);
        if driver.set_brightness(percent).is_err() {
            warn!("Failed to set brightness {}%", percent);
        }
    }
    if let Some(rate) = display.take_blink_all() {
        debug!("Blink all {:?}", rate);
        if driver.set_blink_rate(rate).is_err() {
            warn!("Failed to set blink rate {:?}", rate);
        }
    }
}

/// Refresh loop - drives `driver` from `display` forever
///
/// Spawn this in its own task at startup. `config` should already have
/// passed [`DisplayConfig::validate`].
pub async fn run_refresh<M: RawMutex, D: LedMatrixDriver>(
    display: &SharedDisplay<M>,
    driver: &mut D,
    config: &DisplayConfig,
) {
    info!(
        "Refresh loop started: {} fps, blink {}/{} Hz",
        config.frame_rate_hz, config.fast_blink_hz, config.slow_blink_hz
    );

    if driver.set_brightness(config.brightness).is_err() {
        warn!("Failed to set initial brightness");
    }

    let mut refresher = Refresher::new(config);
    let mut ticker = Ticker::every(config.frame_period());

    loop {
        apply_commands(display, driver);
        let state = display.snapshot();
        refresher.tick(&state, driver);
        ticker.next().await;
    }
}
