//! Error Types
//!
//! Filtering itself never fails: [`crate::SensorProcessor::process`] accepts
//! every reading and degrades quietly on odd configuration. Errors only come
//! from the opt-in configuration check and from addressing channels in a
//! [`crate::SensorBank`].
//!
//! Like the rest of the crate, errors are `Copy`, carry no heap data and stay
//! a few bytes wide so they can be returned from the polling loop cheaply.

use thiserror_no_std::Error;

/// Result type for bank operations
pub type BankResult<T> = Result<T, BankError>;

/// Configuration that is legal but almost certainly a mistake
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Epsilon is negative or not a finite number
    ///
    /// A negative epsilon reports every sample; NaN never reports a change.
    #[error("Epsilon {epsilon} must be a finite, non-negative number")]
    InvalidEpsilon {
        /// The rejected threshold
        epsilon: f64,
    },
}

/// Errors from multi-channel bank operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    /// No room for another channel
    #[error("Sensor bank full: capacity {capacity}")]
    BankFull {
        /// Fixed channel capacity of the bank
        capacity: usize,
    },

    /// Channel id was not handed out by this bank
    #[error("Unknown sensor channel {channel}")]
    UnknownChannel {
        /// The id that was looked up
        channel: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidEpsilon { epsilon } =>
                defmt::write!(fmt, "Invalid epsilon {}", epsilon),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BankError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::BankFull { capacity } =>
                defmt::write!(fmt, "Bank full ({})", capacity),
            Self::UnknownChannel { channel } =>
                defmt::write!(fmt, "Unknown channel {}", channel),
        }
    }
}
