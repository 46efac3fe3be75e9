//! Error handling primitives for the VCNL drivers.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The bus moved a different number of bytes than the register width.
    Transfer {
        /// Bytes the register access required.
        expected: usize,
        /// Bytes the interface reported as transferred.
        actual: usize,
    },
    /// The interface is missing its read or write half.
    MissingAdapter,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
