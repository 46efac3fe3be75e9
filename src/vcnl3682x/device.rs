//! High-level VCNL36825 device driver implementation.

use embedded_hal::i2c::I2c;

use crate::bus::RegisterBus;
use crate::config::Thresholds;
use crate::error::{Error, Result};
use crate::interface::VcnlInterface;
use crate::interface::i2c::I2cInterface;
use crate::params::Vcnl3682xVariant;

use super::registers::{InterruptFlags, PsConf1, PsConf2, Register};

/// Synchronous driver for the VCNL36825 proximity sensor.
pub struct Vcnl3682x<IFACE> {
    bus: RegisterBus<IFACE>,
    variant: Vcnl3682xVariant,
    flags: InterruptFlags,
}

impl<IFACE> Vcnl3682x<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Consumes the driver and returns the owned interface without touching the bus.
    pub fn release(self) -> IFACE {
        self.bus.release()
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        self.bus.interface_mut()
    }

    /// Returns the chip variant selected at construction.
    pub fn variant(&self) -> Vcnl3682xVariant {
        self.variant
    }

    /// Returns the 7-bit slave address resolved from the variant.
    pub fn address(&self) -> u8 {
        self.bus.address()
    }

    /// Returns the raw `INT_FLAG` value stored by the last interrupt service call.
    pub fn flags(&self) -> InterruptFlags {
        self.flags
    }
}

impl<I2C> Vcnl3682x<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for `embedded-hal` I2C buses; powers the device on.
    pub fn init_i2c(i2c: I2C, variant: Vcnl3682xVariant) -> Result<Self, I2C::Error> {
        Self::init(I2cInterface::new(i2c), variant)
    }

    /// Powers the device down and returns the I2C bus.
    pub fn deinit_i2c(self) -> I2C {
        self.deinit().release()
    }
}

impl<IFACE, CommE> Vcnl3682x<IFACE>
where
    IFACE: VcnlInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Teardown =====================================
    // ==================================================================
    /// Validates the interface and binds the driver without any bus traffic.
    pub fn new(interface: IFACE, variant: Vcnl3682xVariant) -> Result<Self, CommE> {
        if !interface.is_attached() {
            return Err(Error::MissingAdapter);
        }

        Ok(Self {
            bus: RegisterBus::new(interface, variant.address()),
            variant,
            flags: InterruptFlags::default(),
        })
    }

    /// Binds the driver and powers the device on.
    ///
    /// Only interface validation fails this call; see [`Vcnl3682x::enable`] to
    /// retry a failed power-on.
    pub fn init(interface: IFACE, variant: Vcnl3682xVariant) -> Result<Self, CommE> {
        let mut device = Self::new(interface, variant)?;
        debug!("vcnl3682x init at address {}", device.address());

        if device.enable().is_err() {
            warn!("vcnl3682x power-on failed during init");
        }

        Ok(device)
    }

    /// Stops sensing, powers down, and returns the interface.
    pub fn deinit(mut self) -> IFACE {
        if self.shutdown().is_err() {
            warn!("vcnl3682x shutdown incomplete during deinit");
        }

        self.release()
    }

    /// Stops sensing and powers down, reporting the first failure.
    pub fn shutdown(&mut self) -> Result<(), CommE> {
        let stopped = self.stop();
        let disabled = self.disable();
        stopped.and(disabled)
    }

    // ==================================================================
    // == Power & Sensing Control =======================================
    // ==================================================================
    /// Powers the chip on, then enables the measurement mode bits.
    ///
    /// `PS_ON` is written on its own before `PS_CAL` and bit 9 follow in a
    /// second write of the same word.
    pub fn enable(&mut self) -> Result<(), CommE> {
        let mut conf = self.bus.modify::<PsConf1, _>(|conf| conf.set_ps_on(true))?;

        conf.set_ps_cal(true);
        conf.set_ps_mode(true);
        self.bus.write(conf)
    }

    /// Clears the power-on and mode bits of `PS_CONF1`.
    pub fn disable(&mut self) -> Result<(), CommE> {
        self.bus.modify::<PsConf1, _>(|conf| {
            conf.set_ps_on(false);
            conf.set_ps_cal(false);
            conf.set_ps_mode(false);
        })?;
        Ok(())
    }

    /// Clears `PS_CONF2.PS_ST`, starting measurements.
    pub fn start(&mut self) -> Result<(), CommE> {
        self.bus.modify::<PsConf2, _>(|conf| conf.set_ps_st(false))?;
        Ok(())
    }

    /// Sets `PS_CONF2.PS_ST`, halting measurements.
    pub fn stop(&mut self) -> Result<(), CommE> {
        self.bus.modify::<PsConf2, _>(|conf| conf.set_ps_st(true))?;
        Ok(())
    }

    // ==================================================================
    // == Thresholds & Cancellation =====================================
    // ==================================================================
    /// Writes the low interrupt threshold.
    pub fn set_low_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.write_register(Register::PsThdl, threshold)
    }

    /// Writes the high interrupt threshold.
    pub fn set_high_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.write_register(Register::PsThdh, threshold)
    }

    /// Validates and writes both interrupt thresholds, low first.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) -> Result<(), CommE> {
        thresholds.validate().map_err(|_| Error::InvalidConfig)?;

        self.set_low_threshold(thresholds.low)?;
        self.set_high_threshold(thresholds.high)
    }

    /// Writes the sunlight cancellation level.
    pub fn set_cancellation(&mut self, cancellation: u16) -> Result<(), CommE> {
        self.write_register(Register::PsCanc, cancellation)
    }

    // ==================================================================
    // == Data Acquisition & Interrupts =================================
    // ==================================================================
    /// Reads the latest proximity count.
    pub fn read_proximity(&mut self) -> Result<u16, CommE> {
        self.read_register(Register::PsData)
    }

    /// Reads the device identification register.
    pub fn read_id(&mut self) -> Result<u16, CommE> {
        self.read_register(Register::Id)
    }

    /// Reads the offset found by the last auto-calibration.
    pub fn read_auto_calibration(&mut self) -> Result<u16, CommE> {
        self.read_register(Register::PsAcData)
    }

    /// Reads `INT_FLAG` and stores it verbatim in the driver.
    pub fn service_interrupt(&mut self) -> Result<InterruptFlags, CommE> {
        self.flags = self.bus.read::<InterruptFlags>()?;
        Ok(self.flags)
    }

    /// Reads the interrupt flags, then the proximity count.
    pub fn service_interrupt_with_proximity(&mut self) -> Result<(InterruptFlags, u16), CommE> {
        let flags = self.service_interrupt()?;
        let proximity = self.read_proximity()?;
        Ok((flags, proximity))
    }

    // ==================================================================
    // == Raw Register Access ===========================================
    // ==================================================================
    /// Reads a 16-bit register.
    pub fn read_register(&mut self, register: Register) -> Result<u16, CommE> {
        self.bus.read_word(register.addr())
    }

    /// Writes a 16-bit register.
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), CommE> {
        self.bus.write_word(register.addr(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::tests::{read_short, store_bytes, store_read, store_write, write_unreachable};
    use crate::interface::callback::CallbackInterface;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x60;
    const MODE_BITS: u16 = (1 << 1) | (1 << 7) | (1 << 9);

    fn read(register: u8, value: u16) -> I2cTransaction {
        I2cTransaction::write_read(ADDR, vec![register], value.to_le_bytes().to_vec())
    }

    fn write(register: u8, value: u16) -> I2cTransaction {
        let [lo, hi] = value.to_le_bytes();
        I2cTransaction::write(ADDR, vec![register, lo, hi])
    }

    fn device(i2c: &I2cMock) -> Vcnl3682x<I2cInterface<I2cMock>> {
        Vcnl3682x::new(I2cInterface::new(i2c.clone()), Vcnl3682xVariant::Vcnl36825).unwrap()
    }

    #[test]
    fn init_powers_on_in_two_writes() {
        let expectations = [
            read(0x00, 0x0001),
            write(0x00, 0x0003),
            write(0x00, 0x0001 | MODE_BITS),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let device = Vcnl3682x::init_i2c(i2c.clone(), Vcnl3682xVariant::Vcnl36825).unwrap();

        assert_eq!(device.address(), 0x60);
        assert_eq!(u16::from(device.flags()), 0);

        i2c.done();
    }

    #[test]
    fn failed_first_write_skips_mode_bits() {
        let expectations = [
            read(0x00, 0x0000),
            write(0x00, 0x0002).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        assert_eq!(device.enable(), Err(Error::Interface(ErrorKind::Other)));

        i2c.done();
    }

    #[test]
    fn disable_clears_power_and_mode_bits() {
        let expectations = [read(0x00, 0xF000 | MODE_BITS), write(0x00, 0xF000)];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        device.disable().unwrap();

        i2c.done();
    }

    #[test]
    fn enable_then_disable_restores_power_bit() {
        let mut device = Vcnl3682x::new(
            CallbackInterface::from_fns(store_read, store_write),
            Vcnl3682xVariant::Vcnl36825,
        )
        .unwrap();

        device.enable().unwrap();
        assert_eq!(u16::from_le_bytes(store_bytes(0x00)), MODE_BITS);

        device.disable().unwrap();
        assert_eq!(u16::from_le_bytes(store_bytes(0x00)), 0);
    }

    #[test]
    fn sensing_control_lives_in_ps_conf2() {
        let expectations = [
            read(0x03, 0x0000),
            write(0x03, 0x0001),
            read(0x03, 0x0041),
            write(0x03, 0x0040),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        device.stop().unwrap();
        device.start().unwrap();

        i2c.done();
    }

    #[test]
    fn short_reads_abort_read_modify_write() {
        let mut device = Vcnl3682x::new(
            CallbackInterface::from_fns(read_short, write_unreachable),
            Vcnl3682xVariant::Vcnl36825,
        )
        .unwrap();
        let short = Err(Error::Transfer {
            expected: 2,
            actual: 1,
        });

        assert_eq!(device.enable(), short);
        assert_eq!(device.disable(), short);
        assert_eq!(device.start(), short);
        assert_eq!(device.stop(), short);
    }

    #[test]
    fn missing_adapter_is_rejected() {
        assert!(matches!(
            Vcnl3682x::init(
                CallbackInterface::new(Some(store_read), None),
                Vcnl3682xVariant::Vcnl36825
            ),
            Err(Error::MissingAdapter)
        ));
    }

    #[test]
    fn configuration_writes_hit_family_addresses() {
        let expectations = [write(0x05, 100), write(0x06, 900), write(0x07, 42)];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        device.set_thresholds(Thresholds::new(100, 900)).unwrap();
        device.set_cancellation(42).unwrap();

        i2c.done();
    }

    #[test]
    fn service_interrupt_stores_raw_flags() {
        let expectations = [read(0xF9, 0x2100), read(0xF8, 0x0321), read(0xFB, 0x0007)];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        let (flags, proximity) = device.service_interrupt_with_proximity().unwrap();
        assert!(flags.away());
        assert!(flags.calibration_done());
        assert!(!flags.close());
        assert_eq!(u16::from(device.flags()), 0x2100);
        assert_eq!(proximity, 0x0321);
        assert_eq!(device.read_auto_calibration().unwrap(), 0x0007);

        i2c.done();
    }

    #[test]
    fn deinit_stops_then_disables() {
        let expectations = [
            read(0x03, 0x0000),
            write(0x03, 0x0001),
            read(0x00, MODE_BITS),
            write(0x00, 0x0000),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let _ = device(&i2c).deinit_i2c();

        i2c.done();
    }

    #[test]
    fn read_id_returns_the_id_register() {
        let expectations = [read(0xFA, 0x0026)];
        let mut i2c = I2cMock::new(&expectations);
        let mut device = device(&i2c);

        assert_eq!(device.read_id().unwrap(), 0x0026);

        i2c.done();
    }
}
