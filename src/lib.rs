//! Register-level drivers for the Vishay VCNL3030/VCNL3040 and VCNL36825
//! I2C proximity sensors.
//!
//! Each chip family gets its own driver type, generic over a
//! [`VcnlInterface`](interface::VcnlInterface) that performs the raw register
//! transfers. Every register is 16 bits wide and travels low byte first.
//!
//! ```rust,no_run
//! use vcnl::params::Vcnl30x0Variant;
//! use vcnl::{Thresholds, Vcnl30x0};
//!
//! # fn example<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<(), vcnl::Error<I::Error>> {
//! let mut sensor = Vcnl30x0::init_i2c(i2c, Vcnl30x0Variant::Vcnl3040)?;
//! sensor.set_thresholds(Thresholds::new(100, 2_000))?;
//! sensor.start()?;
//!
//! let proximity = sensor.read_proximity()?;
//! let flags = sensor.service_interrupt()?;
//! # let _ = (proximity, flags);
//! let _i2c = sensor.deinit_i2c();
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

mod log; // <-- must be first module!

mod bus;
mod error;

pub mod config;
pub mod interface;
pub mod params;
pub mod vcnl30x0;
pub mod vcnl3682x;

pub use crate::bus::{RegisterAccess, RegisterValue, WORD_LEN};
pub use crate::config::Thresholds;
pub use crate::error::{Error, Result};
pub use crate::vcnl30x0::Vcnl30x0;
pub use crate::vcnl3682x::Vcnl3682x;
