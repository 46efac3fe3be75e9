//! Bus interface abstraction for the VCNL drivers.

pub mod callback;
pub mod i2c;

/// Abstraction over the register transfers required by the drivers.
///
/// Both methods report how many bytes actually moved; the drivers treat any
/// count other than the register width as a failed transaction.
pub trait VcnlInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Reads `buf.len()` bytes starting at `register` of the device at `address`.
    fn read(&mut self, address: u8, register: u8, buf: &mut [u8])
    -> core::result::Result<usize, Self::Error>;

    /// Writes `data` starting at `register` of the device at `address`.
    fn write(&mut self, address: u8, register: u8, data: &[u8])
    -> core::result::Result<usize, Self::Error>;

    /// Returns `false` when the interface cannot perform both transfer directions.
    fn is_attached(&self) -> bool {
        true
    }
}
