//! LED matrix driver trait

/// Whole-display blink rate supported by the matrix controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkRate {
    /// Display steady
    #[default]
    None,
    /// Blink at 2 Hz
    Hz2,
    /// Blink at 1 Hz
    Hz1,
    /// Blink at 0.5 Hz
    HalfHz,
}

/// Trait for the LED matrix controller
///
/// Indices passed to [`set_led`](Self::set_led) are physical LED numbers
/// as produced by the board's LED mapping, not logical pixel positions.
pub trait LedMatrixDriver {
    /// Error type for driver operations
    type Error: core::fmt::Debug;

    /// Turn a single LED on or off
    fn set_led(&mut self, physical: u8, on: bool) -> Result<(), Self::Error>;

    /// Set global brightness (0-100 %)
    fn set_brightness(&mut self, percent: u8) -> Result<(), Self::Error>;

    /// Set the whole-display hardware blink
    fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), Self::Error>;
}
