//! Interface backed by plain function pointers.
//!
//! Suits firmware that already exposes its bus as a pair of free functions
//! returning the number of bytes moved.

use core::convert::Infallible;

use super::VcnlInterface;

/// Reads `buf.len()` bytes from `register` of the device at the 7-bit `address`.
pub type ReadFn = fn(address: u8, register: u8, buf: &mut [u8]) -> u16;

/// Writes `data` to `register` of the device at the 7-bit `address`.
pub type WriteFn = fn(address: u8, register: u8, data: &[u8]) -> u16;

/// Interface adapter over a caller-supplied read/write function pair.
#[derive(Clone, Copy)]
pub struct CallbackInterface {
    read: Option<ReadFn>,
    write: Option<WriteFn>,
}

impl CallbackInterface {
    /// Builds an adapter from possibly missing transfer functions.
    ///
    /// A missing half is rejected when a driver is constructed from it.
    pub const fn new(read: Option<ReadFn>, write: Option<WriteFn>) -> Self {
        Self { read, write }
    }

    /// Builds an adapter from a complete function pair.
    pub const fn from_fns(read: ReadFn, write: WriteFn) -> Self {
        Self::new(Some(read), Some(write))
    }
}

impl VcnlInterface for CallbackInterface {
    type Error = Infallible;

    fn read(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<usize, Self::Error> {
        Ok(self
            .read
            .map_or(0, |read| usize::from(read(address, register, buf))))
    }

    fn write(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> core::result::Result<usize, Self::Error> {
        Ok(self
            .write
            .map_or(0, |write| usize::from(write(address, register, data))))
    }

    fn is_attached(&self) -> bool {
        self.read.is_some() && self.write.is_some()
    }
}
