//! VCNL3030/VCNL3040 proximity sensors.
//!
//! Power and sensing control share `PS_CONF` (0x03): bit 8 powers the chip
//! down and bit 0 halts measurement.

pub mod device;
pub mod registers;

pub use self::device::{InterruptFlags, Vcnl30x0};
pub use self::registers::Register;
