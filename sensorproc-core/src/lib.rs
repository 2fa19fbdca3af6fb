//! Sensor report filtering for embedded firmware
//!
//! Two small primitives for polling loops that read noisy sensors:
//! - [`wrapping_delta`]: elapsed time between two readings of a wrapping
//!   millisecond counter
//! - [`SensorProcessor`]: per-channel smoothing that only reports a value
//!   upward when it moved by more than `epsilon`, or when the poll timeout
//!   forces a refresh
//!
//! Key constraints:
//! - No heap allocation, O(1) per sample
//! - Works on `no_std` targets with any 8/16/32/64-bit tick counter
//! - Clock is injected, so tests run against a fake clock
//!
//! ```no_run
//! use sensorproc_core::{SensorProcessor, Update, time::FnTimeSource};
//!
//! # fn millis() -> u32 { 0 }
//! let mut processor = SensorProcessor::with_defaults(FnTimeSource::new(millis));
//!
//! // Called once per poll cycle
//! match processor.process(21.7_f32) {
//!     Update::Emitted { value, .. } => { let _ = value; } // publish it
//!     Update::Unchanged => {}
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod bank;
pub mod config;
pub mod constants;
pub mod errors;
pub mod processor;
pub mod time;
pub mod value;

// Public API
pub use bank::{ChannelId, SensorBank};
pub use config::ProcessorConfig;
pub use errors::{BankError, ConfigError};
pub use processor::{EmitReason, SensorProcessor, Update};
pub use time::{wrapping_delta, TimeSource, WrappingCounter};
pub use value::SensorValue;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
