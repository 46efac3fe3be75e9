//! High-level VCNL3030/VCNL3040 device driver implementation.

use embedded_hal::i2c::I2c;

use crate::bus::RegisterBus;
use crate::config::Thresholds;
use crate::error::{Error, Result};
use crate::interface::VcnlInterface;
use crate::interface::i2c::I2cInterface;
use crate::params::{LedCurrent, Vcnl30x0Variant};

use super::registers::{IntFlag, PsConf, PsConf3Ms, Register};

/// Synchronous driver for the VCNL3030/VCNL3040 proximity sensors.
pub struct Vcnl30x0<IFACE> {
    bus: RegisterBus<IFACE>,
    variant: Vcnl30x0Variant,
    flags: InterruptFlags,
}

/// Threshold events decoded from `INT_FLAG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptFlags {
    /// INT_FLAG[8] PS_IF_AWAY: the object moved away past the low threshold.
    pub far: bool,
    /// INT_FLAG[9] PS_IF_CLOSE: the object approached past the high threshold.
    pub close: bool,
}

impl From<IntFlag> for InterruptFlags {
    fn from(raw: IntFlag) -> Self {
        Self {
            far: raw.away(),
            close: raw.close(),
        }
    }
}

impl<IFACE> Vcnl30x0<IFACE> {
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
    pub fn variant(&self) -> Vcnl30x0Variant {
        self.variant
    }

    /// Returns the 7-bit slave address resolved from the variant.
    pub fn address(&self) -> u8 {
        self.bus.address()
    }

    /// Returns the flags decoded by the last [`service_interrupt`](Self::service_interrupt).
    pub fn flags(&self) -> InterruptFlags {
        self.flags
    }
}

impl<I2C> Vcnl30x0<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for `embedded-hal` I2C buses; powers the device on.
    pub fn init_i2c(i2c: I2C, variant: Vcnl30x0Variant) -> Result<Self, I2C::Error> {
        Self::init(I2cInterface::new(i2c), variant)
    }

    /// Powers the device down and returns the I2C bus.
    pub fn deinit_i2c(self) -> I2C {
        self.deinit().release()
    }
}

impl<IFACE, CommE> Vcnl30x0<IFACE>
where
    IFACE: VcnlInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Teardown =====================================
    // ==================================================================
    /// Validates the interface and binds the driver without any bus traffic.
    pub fn new(interface: IFACE, variant: Vcnl30x0Variant) -> Result<Self, CommE> {
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
    /// Only interface validation fails this call. A failed power-on is logged
    /// and can be retried with [`enable`](Self::enable).
    pub fn init(interface: IFACE, variant: Vcnl30x0Variant) -> Result<Self, CommE> {
        let mut device = Self::new(interface, variant)?;
        debug!("vcnl30x0 init at address {}", device.address());

        if device.enable().is_err() {
            warn!("vcnl30x0 power-on failed during init");
        }

        Ok(device)
    }

    /// Stops sensing, powers down, and returns the interface.
    ///
    /// Both steps are attempted regardless of the other's outcome.
    pub fn deinit(mut self) -> IFACE {
        if self.shutdown().is_err() {
            warn!("vcnl30x0 shutdown incomplete during deinit");
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
    /// Clears the power-down bit in `PS_CONF`.
    pub fn enable(&mut self) -> Result<(), CommE> {
        self.bus
            .modify::<PsConf, _>(|conf| conf.set_power_down(false))?;
        Ok(())
    }

    /// Sets the power-down bit in `PS_CONF`.
    pub fn disable(&mut self) -> Result<(), CommE> {
        self.bus
            .modify::<PsConf, _>(|conf| conf.set_power_down(true))?;
        Ok(())
    }

    /// Clears the sensing-disable bit in `PS_CONF`.
    pub fn start(&mut self) -> Result<(), CommE> {
        self.bus
            .modify::<PsConf, _>(|conf| conf.set_sensing_disable(false))?;
        Ok(())
    }

    /// Sets the sensing-disable bit in `PS_CONF`.
    pub fn stop(&mut self) -> Result<(), CommE> {
        self.bus
            .modify::<PsConf, _>(|conf| conf.set_sensing_disable(true))?;
        Ok(())
    }

    /// Selects the IR LED drive current.
    pub fn set_led_current(&mut self, current: LedCurrent) -> Result<(), CommE> {
        self.bus
            .modify::<PsConf3Ms, _>(|ms| ms.set_led_current(current))?;
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

    /// Writes the cancellation level subtracted from each reading.
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

    /// Decodes `INT_FLAG` into [`InterruptFlags`] and stores them in the driver.
    pub fn service_interrupt(&mut self) -> Result<InterruptFlags, CommE> {
        let raw = self.bus.read::<IntFlag>()?;
        self.flags = InterruptFlags::from(raw);
        Ok(self.flags)
    }

    /// Decodes the interrupt flags, then reads the proximity count.
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
