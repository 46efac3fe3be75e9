//! Register map definitions for the VCNL3030/VCNL3040.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::bus::{RegisterAccess, word_register};
use crate::params::LedCurrent;

/// Addressable registers of the VCNL30x0 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// `PS_CONF1`/`PS_CONF2`: power and sensing control.
    PsConf = 0x03,
    /// `PS_CONF3`/`PS_MS`: mode selection and LED current.
    PsConf3Ms = 0x04,
    /// `PS_CANC`: cancellation level subtracted from every reading.
    PsCanc = 0x05,
    /// `PS_THDL`: low interrupt threshold.
    PsThdl = 0x06,
    /// `PS_THDH`: high interrupt threshold.
    PsThdh = 0x07,
    /// `PS_DATA`: proximity output.
    PsData = 0x08,
    /// `INT_FLAG`: interrupt flags.
    IntFlag = 0x0D,
    /// `ID`: device identification.
    Id = 0x0E,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(value: Register) -> Self {
        value.addr()
    }
}

/// Bitfield representation of the `PS_CONF` register (address `0x03`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsConf {
    // Sensing disable (bit 0).
    pub sensing_disable: bool,
    #[skip]
    __: B7,
    // Power down (bit 8).
    pub power_down: bool,
    #[skip]
    __: B7,
}

/// Bitfield representation of the `PS_CONF3_MS` register (address `0x04`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsConf3Ms {
    #[skip]
    __: B8,
    // LED drive current (bits 10:8).
    pub led_current: LedCurrent,
    #[skip]
    __: B5,
}

/// Bitfield representation of the `INT_FLAG` register (address `0x0D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntFlag {
    #[skip]
    __: B8,
    // Reading fell below the low threshold (bit 8).
    pub away: bool,
    // Reading rose above the high threshold (bit 9).
    pub close: bool,
    #[skip]
    __: B6,
}

word_register!(PsConf, Register::PsConf, RegisterAccess::ReadWrite);
word_register!(PsConf3Ms, Register::PsConf3Ms, RegisterAccess::ReadWrite);
word_register!(IntFlag, Register::IntFlag, RegisterAccess::ReadOnly);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps_conf_layout_matches_driver_bits() {
        let conf = PsConf::from(0x0101u16);
        assert!(conf.sensing_disable());
        assert!(conf.power_down());

        let cleared = conf.with_power_down(false);
        assert_eq!(u16::from(cleared), 0x0001);
    }

    #[test]
    fn led_current_lives_in_the_high_byte() {
        let ms = PsConf3Ms::from(0x00FFu16).with_led_current(LedCurrent::Ma120);
        assert_eq!(u16::from(ms), 0x03FF);
        assert_eq!(PsConf3Ms::from(0x0700u16).led_current(), LedCurrent::Ma200);
    }

    #[test]
    fn int_flag_decodes_away_and_close() {
        let flags = IntFlag::from(0x0200u16);
        assert!(!flags.away());
        assert!(flags.close());
        assert!(IntFlag::from(0x0100u16).away());
    }
}
