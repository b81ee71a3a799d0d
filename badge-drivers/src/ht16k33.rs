//! HT16K33 LED matrix controller (I2C)
//!
//! The HT16K33 drives up to 16x8 LEDs from 16 bytes of display RAM. The
//! badge's 8x8 matrix is wired across the first 128 LEDs; the board LED
//! mapping in badge-core picks which.
//!
//! # I2C Protocol
//!
//! Commands are single bytes, the high nibble selecting the register:
//! - 0x2_: system setup (bit 0 = oscillator on)
//! - 0x8_: display setup (bit 0 = display on, bits 1-2 = blink rate)
//! - 0xE_: dimming (low nibble = level 0-15)
//!
//! Display RAM is written as `[address, data...]` with address 0x00-0x0F.
//! LED `n` is bit `n % 8` of RAM byte `n / 8`.

use badge_core::traits::{BlinkRate, LedMatrixDriver};
use badge_hal::i2c::I2cBus;

/// HT16K33 command bytes
pub mod cmd {
    /// System setup register
    pub const SYSTEM_SETUP: u8 = 0x20;
    /// Oscillator on (system setup)
    pub const OSCILLATOR_ON: u8 = 0x01;
    /// Display setup register
    pub const DISPLAY_SETUP: u8 = 0x80;
    /// Display on (display setup)
    pub const DISPLAY_ON: u8 = 0x01;
    /// Dimming register
    pub const DIMMING: u8 = 0xE0;
    /// First display RAM address
    pub const DISPLAY_RAM: u8 = 0x00;
}

/// Default 7-bit address (A0-A2 floating)
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Bytes of display RAM
pub const RAM_SIZE: usize = 16;

/// Number of addressable LEDs
pub const LED_COUNT: usize = RAM_SIZE * 8;

/// Highest dimming level
pub const MAX_DIMMING: u8 = 15;

/// HT16K33 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ht16k33Error<E> {
    /// I2C transfer failed
    Bus(E),
    /// LED index beyond the controller's RAM
    InvalidLed(u8),
}

/// Blink bits of the display setup register
fn blink_bits(rate: BlinkRate) -> u8 {
    let bits = match rate {
        BlinkRate::None => 0,
        BlinkRate::Hz2 => 1,
        BlinkRate::Hz1 => 2,
        BlinkRate::HalfHz => 3,
    };
    bits << 1
}

/// Map 0-100 % onto a dimming level
pub fn dimming_level(percent: u8) -> u8 {
    (percent.min(100) as u16 * MAX_DIMMING as u16 / 100) as u8
}

/// HT16K33 driver
pub struct Ht16k33<I: I2cBus> {
    bus: I,
    address: u8,
    /// Last value written to each RAM byte
    ram: [u8; RAM_SIZE],
}

impl<I: I2cBus> Ht16k33<I> {
    /// Create a driver at [`DEFAULT_ADDRESS`]; call [`init`](Self::init) before use
    pub fn new(bus: I) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address (0x70-0x77)
    pub fn with_address(bus: I, address: u8) -> Self {
        Self {
            bus,
            address,
            ram: [0; RAM_SIZE],
        }
    }

    /// Start the oscillator, clear the RAM and switch the display on
    /// at full brightness with no blink
    pub fn init(&mut self) -> Result<(), Ht16k33Error<I::Error>> {
        self.command(cmd::SYSTEM_SETUP | cmd::OSCILLATOR_ON)?;

        let mut clear = [0u8; RAM_SIZE + 1];
        clear[0] = cmd::DISPLAY_RAM;
        self.bus
            .write(self.address, &clear)
            .map_err(Ht16k33Error::Bus)?;
        self.ram = [0; RAM_SIZE];

        self.command(cmd::DISPLAY_SETUP | cmd::DISPLAY_ON | blink_bits(BlinkRate::None))?;
        self.command(cmd::DIMMING | MAX_DIMMING)
    }

    /// Cached display RAM contents
    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    /// Release the I2C bus
    pub fn release(self) -> I {
        self.bus
    }

    fn command(&mut self, byte: u8) -> Result<(), Ht16k33Error<I::Error>> {
        self.bus
            .write(self.address, &[byte])
            .map_err(Ht16k33Error::Bus)
    }
}

impl<I> LedMatrixDriver for Ht16k33<I>
where
    I: I2cBus,
    I::Error: core::fmt::Debug,
{
    type Error = Ht16k33Error<I::Error>;

    fn set_led(&mut self, physical: u8, on: bool) -> Result<(), Self::Error> {
        if physical as usize >= LED_COUNT {
            return Err(Ht16k33Error::InvalidLed(physical));
        }
        let index = (physical / 8) as usize;
        let bit = 1u8 << (physical % 8);
        let data = if on {
            self.ram[index] | bit
        } else {
            self.ram[index] & !bit
        };

        self.bus
            .write(self.address, &[cmd::DISPLAY_RAM + index as u8, data])
            .map_err(Ht16k33Error::Bus)?;
        // only cache what reached the chip
        self.ram[index] = data;
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), Self::Error> {
        self.command(cmd::DIMMING | dimming_level(percent))
    }

    fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), Self::Error> {
        self.command(cmd::DISPLAY_SETUP | cmd::DISPLAY_ON | blink_bits(rate))
    }
}
