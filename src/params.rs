//! Strongly typed parameter enumerations for the VCNL drivers.
//!
//! Chip variants resolve the 7-bit slave address; field encodings map directly
//! to the register bit patterns.
//!
//! # Examples
//!
//! ```rust
//! use vcnl::params::{LedCurrent, Vcnl30x0Variant};
//!
//! assert_eq!(Vcnl30x0Variant::Vcnl3040.address(), 0x60);
//! assert_eq!(LedCurrent::from_milliamps(130), Some(LedCurrent::Ma120));
//! ```

use modular_bitfield::prelude::Specifier;

/// Members of the VCNL3030/VCNL3040 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vcnl30x0Variant {
    /// VCNL3030X01.
    Vcnl3030,
    /// VCNL3040.
    Vcnl3040,
}

impl Vcnl30x0Variant {
    /// Returns the fixed 7-bit slave address of this part.
    pub const fn address(self) -> u8 {
        match self {
            Self::Vcnl3030 => 0x41,
            Self::Vcnl3040 => 0x60,
        }
    }
}

/// Members of the VCNL3682x family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vcnl3682xVariant {
    /// VCNL36825T.
    Vcnl36825,
}

impl Vcnl3682xVariant {
    /// Returns the fixed 7-bit slave address of this part.
    pub const fn address(self) -> u8 {
        match self {
            Self::Vcnl36825 => 0x60,
        }
    }
}

/// IR LED drive current encoded in `PS_MS.LED_I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum LedCurrent {
    /// 50 mA.
    Ma50 = 0b000,
    /// 75 mA.
    Ma75 = 0b001,
    /// 100 mA.
    Ma100 = 0b010,
    /// 120 mA.
    Ma120 = 0b011,
    /// 140 mA.
    Ma140 = 0b100,
    /// 160 mA.
    Ma160 = 0b101,
    /// 180 mA.
    Ma180 = 0b110,
    /// 200 mA.
    Ma200 = 0b111,
}

impl LedCurrent {
    const ALL: [Self; 8] = [
        Self::Ma50,
        Self::Ma75,
        Self::Ma100,
        Self::Ma120,
        Self::Ma140,
        Self::Ma160,
        Self::Ma180,
        Self::Ma200,
    ];

    /// Returns the drive current in milliamps.
    pub const fn milliamps(self) -> u8 {
        match self {
            Self::Ma50 => 50,
            Self::Ma75 => 75,
            Self::Ma100 => 100,
            Self::Ma120 => 120,
            Self::Ma140 => 140,
            Self::Ma160 => 160,
            Self::Ma180 => 180,
            Self::Ma200 => 200,
        }
    }

    /// Picks the largest setting that does not exceed `ma`.
    ///
    /// Returns `None` below the 50 mA minimum.
    pub fn from_milliamps(ma: u8) -> Option<Self> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|current| current.milliamps() <= ma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_current_rounds_down() {
        assert_eq!(LedCurrent::from_milliamps(49), None);
        assert_eq!(LedCurrent::from_milliamps(50), Some(LedCurrent::Ma50));
        assert_eq!(LedCurrent::from_milliamps(99), Some(LedCurrent::Ma75));
        assert_eq!(LedCurrent::from_milliamps(255), Some(LedCurrent::Ma200));
    }

    #[test]
    fn variant_addresses_match_datasheets() {
        assert_eq!(Vcnl30x0Variant::Vcnl3030.address(), 0x41);
        assert_eq!(Vcnl30x0Variant::Vcnl3040.address(), 0x60);
        assert_eq!(Vcnl3682xVariant::Vcnl36825.address(), 0x60);
    }
}
