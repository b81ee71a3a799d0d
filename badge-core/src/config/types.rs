//! Display configuration type definitions

use embassy_time::Duration;

use super::hardware::BoardRevision;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default refresh rate in frames per second
pub const DEFAULT_FRAME_RATE_HZ: u32 = 50;

/// Default fast blink rate (Hz)
pub const DEFAULT_FAST_BLINK_HZ: u32 = 10;

/// Default slow blink rate (Hz)
pub const DEFAULT_SLOW_BLINK_HZ: u32 = 2;

/// Maximum brightness (percent)
pub const MAX_BRIGHTNESS: u8 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame rate must be non-zero
    ZeroFrameRate,
    /// Frame period shorter than one timer tick
    FrameRateTooHigh,
    /// Blink rates must be non-zero
    ZeroBlinkRate,
    /// A blink rate cannot exceed the frame rate
    BlinkFasterThanFrames,
    /// Brightness above 100 %
    BrightnessOutOfRange,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFrameRate => f.write_str("frame rate must be non-zero"),
            ConfigError::FrameRateTooHigh => {
                f.write_str("frame rate exceeds the timer tick rate")
            }
            ConfigError::ZeroBlinkRate => f.write_str("blink rate must be non-zero"),
            ConfigError::BlinkFasterThanFrames => {
                f.write_str("blink rate exceeds frame rate")
            }
            ConfigError::BrightnessOutOfRange => f.write_str("brightness above 100%"),
        }
    }
}

/// Display engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Refresh loop rate (frames per second)
    pub frame_rate_hz: u32,
    /// Toggle rate of fast-blinking pixels (Hz)
    pub fast_blink_hz: u32,
    /// Toggle rate of slow-blinking pixels (Hz)
    pub slow_blink_hz: u32,
    /// Board revision (selects LED mapping)
    pub board: BoardRevision,
    /// Initial global brightness (0-100 %)
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            fast_blink_hz: DEFAULT_FAST_BLINK_HZ,
            slow_blink_hz: DEFAULT_SLOW_BLINK_HZ,
            board: BoardRevision::default(),
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl DisplayConfig {
    /// Check the configuration for values the refresh loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate_hz == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if Duration::from_hz(self.frame_rate_hz as u64).as_ticks() == 0 {
            return Err(ConfigError::FrameRateTooHigh);
        }
        if self.fast_blink_hz == 0 || self.slow_blink_hz == 0 {
            return Err(ConfigError::ZeroBlinkRate);
        }
        if self.fast_blink_hz > self.frame_rate_hz || self.slow_blink_hz > self.frame_rate_hz {
            return Err(ConfigError::BlinkFasterThanFrames);
        }
        if self.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        Ok(())
    }

    /// Time between refresh ticks, never shorter than one timer tick
    pub fn frame_period(&self) -> Duration {
        let period = Duration::from_hz(self.frame_rate_hz.max(1) as u64);
        period.max(Duration::from_ticks(1))
    }

    /// Ticks between toggles of fast-blinking pixels
    pub fn fast_blink_period_ticks(&self) -> u32 {
        (self.frame_rate_hz / self.fast_blink_hz.max(1)).max(1)
    }

    /// Ticks between toggles of slow-blinking pixels
    pub fn slow_blink_period_ticks(&self) -> u32 {
        (self.frame_rate_hz / self.slow_blink_hz.max(1)).max(1)
    }
}
