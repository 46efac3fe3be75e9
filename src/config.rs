//! Configuration primitives shared by the VCNL drivers.

/// Interrupt window programmed into `PS_THDL`/`PS_THDH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Lower proximity count bound.
    pub low: u16,
    /// Upper proximity count bound.
    pub high: u16,
}

impl Thresholds {
    /// Creates a threshold window without validating it.
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// Checks that the window is not inverted.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvertedThresholds);
        }

        Ok(())
    }
}

/// Validation errors generated while verifying configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The low threshold lies above the high threshold.
    InvertedThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_window_is_rejected() {
        assert_eq!(
            Thresholds::new(200, 100).validate(),
            Err(ConfigError::InvertedThresholds)
        );
        assert_eq!(Thresholds::new(100, 100).validate(), Ok(()));
    }
}
