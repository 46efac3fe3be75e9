//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::VcnlInterface;

// Largest payload a single register write may carry (register byte excluded).
const MAX_WRITE_LEN: usize = 4;

/// I2C-based interface implementation for the VCNL drivers.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> VcnlInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn read(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.i2c.write_read(address, &[register], buf)?;
        Ok(buf.len())
    }

    fn write(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> core::result::Result<usize, Self::Error> {
        if data.is_empty() || data.len() > MAX_WRITE_LEN {
            return Ok(0);
        }

        let mut frame = [0u8; MAX_WRITE_LEN + 1];
        frame[0] = register;
        frame[1..=data.len()].copy_from_slice(data);
        self.i2c.write(address, &frame[..=data.len()])?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::I2cInterface;
    use crate::interface::VcnlInterface;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn read_addresses_register_then_fills_buffer() {
        let expectations = [I2cTransaction::write_read(0x60, vec![0x08], vec![0x34, 0x12])];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        let mut buf = [0u8; 2];
        assert_eq!(interface.read(0x60, 0x08, &mut buf), Ok(2));
        assert_eq!(buf, [0x34, 0x12]);

        i2c.done();
    }

    #[test]
    fn write_prefixes_payload_with_register() {
        let expectations = [I2cTransaction::write(0x41, vec![0x06, 0xCD, 0xAB])];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        assert_eq!(interface.write(0x41, 0x06, &[0xCD, 0xAB]), Ok(2));

        i2c.done();
    }

    #[test]
    fn bus_errors_are_passed_through() {
        let expectations = [I2cTransaction::write_read(0x60, vec![0x03], vec![0x00, 0x00])
            .with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone());

        let mut buf = [0u8; 2];
        assert_eq!(interface.read(0x60, 0x03, &mut buf), Err(ErrorKind::Other));

        i2c.done();
    }

    #[test]
    fn empty_transfers_skip_the_bus() {
        let mut i2c = I2cMock::new(&[]);
        let mut interface = I2cInterface::new(i2c.clone());

        assert_eq!(interface.read(0x60, 0x08, &mut []), Ok(0));
        assert_eq!(interface.write(0x60, 0x08, &[]), Ok(0));

        i2c.done();
    }

    #[test]
    fn oversized_write_reports_nothing_transferred() {
        let mut i2c = I2cMock::new(&[]);
        let mut interface = I2cInterface::new(i2c.clone());

        assert_eq!(interface.write(0x60, 0x08, &[0; 5]), Ok(0));

        i2c.done();
    }
}
