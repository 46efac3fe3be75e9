//! VCNL36825 proximity sensor.
//!
//! Power control lives in `PS_CONF1` (0x00) while sensing start/stop lives in
//! `PS_CONF2` (0x03).

pub mod device;
pub mod registers;

pub use self::device::Vcnl3682x;
pub use self::registers::{InterruptFlags, Register};
