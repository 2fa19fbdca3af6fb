//! Default Filter Settings and Time Conversions
//!
//! The defaults suit slow environmental channels (temperature, humidity,
//! pressure) polled about once a second: five samples of smoothing, a
//! change threshold just above typical sensor noise, and a forced refresh
//! once a minute so downstream consumers see the channel is alive.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== FILTER DEFAULTS =====

/// Default number of samples folded into the running mean.
pub const DEFAULT_SMOOTH_WINDOW: u32 = 5;

/// Default poll timeout (seconds).
///
/// After this long without an emission the current mean is reported even
/// if it has not moved. Matches the usual 60 s environmental monitoring
/// interval.
pub const DEFAULT_POLL_TIMEOUT_S: u32 = 60;

/// Poll timeout value that disables forced emission.
pub const POLL_TIMEOUT_DISABLED: u32 = 0;

/// Default minimum change of the smoothed value before it is reported.
///
/// ±0.1 is the typical noise floor of consumer temperature sensors.
pub const DEFAULT_EPSILON: f64 = 0.1;
