//! Word-sized register transactions shared by both chip families.
//!
//! Every VCNL register is 16 bits wide and travels low byte first, so this
//! layer is the only place that touches the interface. A transfer that moves
//! anything other than exactly [`WORD_LEN`] bytes is reported as
//! [`Error::Transfer`].

use crate::error::{Error, Result};
use crate::interface::VcnlInterface;

/// Width in bytes of every register transaction.
pub const WORD_LEN: usize = 2;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Metadata exposed by every typed register value.
pub trait RegisterValue: Copy + From<u16> + Into<u16> {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
}

/// Implements the `u16` conversions and [`RegisterValue`] for a 16-bit bitfield.
macro_rules! word_register {
    ($ty:ident, $reg:expr, $access:expr) => {
        impl From<u16> for $ty {
            fn from(value: u16) -> Self {
                Self::from_bytes(value.to_le_bytes())
            }
        }

        impl From<$ty> for u16 {
            fn from(value: $ty) -> Self {
                u16::from_le_bytes(value.into_bytes())
            }
        }

        impl $crate::bus::RegisterValue for $ty {
            const ADDRESS: u8 = $reg.addr();
            const ACCESS: $crate::bus::RegisterAccess = $access;
        }
    };
}

pub(crate) use word_register;

/// Interface bound to the slave address of a single device.
pub(crate) struct RegisterBus<IFACE> {
    interface: IFACE,
    address: u8,
}

impl<IFACE> RegisterBus<IFACE> {
    pub(crate) const fn new(interface: IFACE, address: u8) -> Self {
        Self { interface, address }
    }

    pub(crate) const fn address(&self) -> u8 {
        self.address
    }

    pub(crate) fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    pub(crate) fn release(self) -> IFACE {
        self.interface
    }
}

impl<IFACE, CommE> RegisterBus<IFACE>
where
    IFACE: VcnlInterface<Error = CommE>,
{
    /// Reads a register and assembles it as `low | high << 8`.
    pub(crate) fn read_word(&mut self, register: u8) -> Result<u16, CommE> {
        let mut raw = [0u8; WORD_LEN];
        let count = self
            .interface
            .read(self.address, register, &mut raw)
            .map_err(Error::from)?;
        check_len(count)?;

        let value = u16::from_le_bytes(raw);
        trace!("read {} <- {}", register, value);
        Ok(value)
    }

    /// Writes a register low byte first.
    pub(crate) fn write_word(&mut self, register: u8, value: u16) -> Result<(), CommE> {
        trace!("write {} -> {}", register, value);
        let count = self
            .interface
            .write(self.address, register, &value.to_le_bytes())
            .map_err(Error::from)?;
        check_len(count)
    }

    /// Reads a typed register.
    pub(crate) fn read<R: RegisterValue>(&mut self) -> Result<R, CommE> {
        self.read_word(R::ADDRESS).map(R::from)
    }

    /// Writes a typed register.
    pub(crate) fn write<R: RegisterValue>(&mut self, value: R) -> Result<(), CommE> {
        debug_assert!(R::ACCESS == RegisterAccess::ReadWrite);
        self.write_word(R::ADDRESS, value.into())
    }

    /// Read-modify-write of a typed register.
    ///
    /// The value is written back even when `mutate` leaves it unchanged. A
    /// failed read skips the write.
    pub(crate) fn modify<R, F>(&mut self, mutate: F) -> Result<R, CommE>
    where
        R: RegisterValue,
        F: FnOnce(&mut R),
    {
        let mut value = self.read::<R>()?;
        mutate(&mut value);
        self.write(value)?;
        Ok(value)
    }
}

fn check_len<E>(actual: usize) -> Result<(), E> {
    if actual == WORD_LEN {
        Ok(())
    } else {
        Err(Error::Transfer {
            expected: WORD_LEN,
            actual,
        })
    }
}
