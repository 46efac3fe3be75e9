//! Register map definitions for the VCNL36825.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::bus::{RegisterAccess, word_register};

/// Addressable registers of the VCNL3682x family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// `PS_CONF1`: power and calibration control.
    PsConf1 = 0x00,
    /// `PS_CONF2`: sensing control.
    PsConf2 = 0x03,
    /// `PS_CONF3`.
    PsConf3 = 0x04,
    /// `PS_THDL`: low interrupt threshold.
    PsThdl = 0x05,
    /// `PS_THDH`: high interrupt threshold.
    PsThdh = 0x06,
    /// `PS_CANC`: sunlight cancellation level.
    PsCanc = 0x07,
    /// `PS_CONF4`.
    PsConf4 = 0x08,
    /// `PS_DATA`: proximity output.
    PsData = 0xF8,
    /// `INT_FLAG`: interrupt flags.
    IntFlag = 0xF9,
    /// `ID`: device identification.
    Id = 0xFA,
    /// `PS_AC_DATA`: auto-calibration result.
    PsAcData = 0xFB,
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

/// Bitfield representation of the `PS_CONF1` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsConf1 {
    #[skip]
    __: B1,
    // Power on (bit 1).
    pub ps_on: bool,
    #[skip]
    __: B5,
    // Calibration mode enable (bit 7).
    pub ps_cal: bool,
    #[skip]
    __: B1,
    // Mode enable, must be set while running (bit 9).
    pub ps_mode: bool,
    #[skip]
    __: B6,
}

/// Bitfield representation of the `PS_CONF2` register (address `0x03`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsConf2 {
    // Sensing stop (bit 0).
    pub ps_st: bool,
    #[skip]
    __: B15,
}

/// Bitfield representation of the `INT_FLAG` register (address `0xF9`).
///
/// Stored verbatim by the driver after each interrupt service call.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptFlags {
    #[skip]
    __: B8,
    // Reading fell below the low threshold (bit 8).
    #[skip(setters)]
    pub away: bool,
    // Reading rose above the high threshold (bit 9).
    #[skip(setters)]
    pub close: bool,
    #[skip]
    __: B2,
    // Sunlight protection mode entered (bit 12).
    #[skip(setters)]
    pub sunlight_protection: bool,
    // Auto-calibration complete (bit 13).
    #[skip(setters)]
    pub calibration_done: bool,
    #[skip]
    __: B2,
}

impl Default for InterruptFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "InterruptFlags {{ AWAY: {}, CLOSE: {}, SPFLAG: {}, ACFLAG: {} }}",
            self.away(),
            self.close(),
            self.sunlight_protection(),
            self.calibration_done()
        );
    }
}

word_register!(PsConf1, Register::PsConf1, RegisterAccess::ReadWrite);
word_register!(PsConf2, Register::PsConf2, RegisterAccess::ReadWrite);
word_register!(InterruptFlags, Register::IntFlag, RegisterAccess::ReadOnly);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps_conf1_layout_matches_driver_bits() {
        let conf = PsConf1::new()
            .with_ps_on(true)
            .with_ps_cal(true)
            .with_ps_mode(true);
        assert_eq!(u16::from(conf), (1 << 1) | (1 << 7) | (1 << 9));
    }

    #[test]
    fn interrupt_flags_decode_every_event() {
        let flags = InterruptFlags::from(0x3300u16);
        assert!(flags.away());
        assert!(flags.close());
        assert!(flags.sunlight_protection());
        assert!(flags.calibration_done());
        assert_eq!(u16::from(flags), 0x3300);

        let none = InterruptFlags::from(0x00FFu16);
        assert!(!none.away() && !none.close());
    }
}
