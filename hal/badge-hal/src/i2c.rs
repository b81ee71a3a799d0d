//! I2C bus abstractions
//!
//! Provides the I2C master trait used by the LED matrix driver, and an
//! adapter so any `embedded-hal` 1.0 I2C implementation can be plugged in.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Adapter from an `embedded-hal` I2C master to [`I2cBus`]
pub struct EmbeddedHalI2c<T> {
    inner: T,
}

impl<T> EmbeddedHalI2c<T> {
    /// Wrap an `embedded-hal` I2C master
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped bus
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.write_read(address, write_data, read_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};

    /// Records the last write seen by the wrapped bus
    struct FakeBus {
        last_address: u8,
        last_write: [u8; 4],
        last_len: usize,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl embedded_hal::i2c::I2c<SevenBitAddress> for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = address;
            for op in operations {
                match op {
                    Operation::Write(data) => {
                        self.last_len = data.len();
                        self.last_write[..data.len()].copy_from_slice(data);
                    }
                    Operation::Read(buf) => buf.fill(0xAB),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_adapter_forwards_write() {
        let mut bus = EmbeddedHalI2c::new(FakeBus {
            last_address: 0,
            last_write: [0; 4],
            last_len: 0,
        });
        bus.write(0x70, &[0x21]).unwrap();
        let inner = bus.release();
        assert_eq!(inner.last_address, 0x70);
        assert_eq!(&inner.last_write[..inner.last_len], &[0x21]);
    }

    #[test]
    fn test_adapter_forwards_write_read() {
        let mut bus = EmbeddedHalI2c::new(FakeBus {
            last_address: 0,
            last_write: [0; 4],
            last_len: 0,
        });
        let mut buf = [0u8; 2];
        bus.write_read(0x70, &[0x00], &mut buf).unwrap();
        assert_eq!(buf, [0xAB, 0xAB]);
    }
}
