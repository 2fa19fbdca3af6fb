//! Per-Channel Smoothing and Report Filtering
//!
//! ## Overview
//!
//! Sensors are polled far more often than anyone upstream wants to hear about
//! them. A [`SensorProcessor`] sits between the raw reading and the publisher
//! and answers one question per poll: *is this worth reporting?*
//!
//! ## Algorithm
//!
//! For every reading `x`:
//!
//! ```text
//! mean  = (mean * count + x) / (count + 1)
//! count = min(count + 1, smooth_window)
//! delta = |last_emitted - mean|
//!
//! emit if   first sample since reset
//!        or delta > epsilon
//!        or (timeout enabled and elapsed since last emit > timeout)
//! ```
//!
//! The window only caps how much weight history gets. Once `count` reaches
//! `smooth_window`, every new reading moves the mean by `1 / (window + 1)` of
//! the difference, so old samples fade out gradually instead of being evicted.
//! This is not a sliding window and is not meant to be one.
//!
//! ## Timeout
//!
//! A flat signal never crosses `epsilon`, so downstream consumers could not
//! tell a steady room from a dead sensor. The poll timeout forces the current
//! mean out once `poll_timeout_secs` have passed since the last emission. The
//! elapsed time is taken with [`crate::wrapping_delta`], so a tick counter
//! rolling over does not trigger (or suppress) a refresh.
//!
//! ## Example
//!
//! ```rust
//! use sensorproc_core::{EmitReason, ProcessorConfig, SensorProcessor, Update};
//! use sensorproc_core::time::MockTimeSource;
//!
//! let clock = MockTimeSource::new(0_u32);
//! let mut processor = SensorProcessor::new(ProcessorConfig::default(), &clock);
//!
//! // First reading is always reported
//! assert_eq!(
//!     processor.process(100.0),
//!     Update::Emitted { value: 100.0, reason: EmitReason::FirstSample }
//! );
//!
//! // Noise below epsilon is swallowed
//! assert_eq!(processor.process(100.05), Update::Unchanged);
//!
//! // ...until the poll timeout forces a refresh
//! clock.advance(60_001);
//! assert!(processor.process(100.05).is_emitted());
//! ```

use crate::config::ProcessorConfig;
use crate::time::{wrapping_delta, TimeSource, WrappingCounter};
use crate::value::SensorValue;

/// Why a reading was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitReason {
    /// First reading after construction or [`SensorProcessor::reset`]
    FirstSample,
    /// Smoothed value moved by more than epsilon
    Changed,
    /// Poll timeout elapsed without a change
    PollTimeout,
}

/// Outcome of processing one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update<V> {
    /// Nothing new to report
    Unchanged,
    /// Report `value` upstream
    Emitted {
        /// Smoothed value, converted back to the reading type
        value: V,
        /// What triggered the report
        reason: EmitReason,
    },
}

impl<V> Update<V> {
    /// True if this reading produced a report
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emitted { .. })
    }

    /// The reported value, if any
    pub fn value(self) -> Option<V> {
        match self {
            Self::Emitted { value, .. } => Some(value),
            Self::Unchanged => None,
        }
    }

    /// The emission trigger, if any
    pub fn reason(&self) -> Option<EmitReason> {
        match self {
            Self::Emitted { reason, .. } => Some(*reason),
            Self::Unchanged => None,
        }
    }

    /// Convert the reported value, keeping the reason
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Update<U> {
        match self {
            Self::Emitted { value, reason } => Update::Emitted {
                value: f(value),
                reason,
            },
            Self::Unchanged => Update::Unchanged,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EmitReason {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::FirstSample => defmt::write!(fmt, "first"),
            Self::Changed => defmt::write!(fmt, "changed"),
            Self::PollTimeout => defmt::write!(fmt, "timeout"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<V: defmt::Format> defmt::Format for Update<V> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unchanged => defmt::write!(fmt, "unchanged"),
            Self::Emitted { value, reason } =>
                defmt::write!(fmt, "emit {} ({})", value, reason),
        }
    }
}

/// Smoothing filter for one sensor channel
///
/// Owns its clock handle. Pass `&clock` to share one clock between several
/// processors, or a [`crate::time::FnTimeSource`] wrapping the HAL tick
/// function.
#[derive(Debug, Clone)]
pub struct SensorProcessor<C: TimeSource> {
    config: ProcessorConfig,
    clock: C,
    /// Samples folded into `mean`, capped at `config.smooth_window`
    sample_count: u32,
    mean: f64,
    /// `None` until the first emission after reset
    last_emitted: Option<f64>,
    last_emit_at: C::Tick,
}

impl<C: TimeSource> SensorProcessor<C> {
    /// Create a processor and reset it against `clock`
    pub fn new(config: ProcessorConfig, clock: C) -> Self {
        if let Err(_err) = config.validate() {
            log_warn!("Sensor processor configured with {}", _err);
        }

        let mut processor = Self {
            config,
            clock,
            sample_count: 0,
            mean: 0.0,
            last_emitted: None,
            last_emit_at: C::Tick::ZERO,
        };
        processor.reset();
        processor
    }

    /// Create a processor with the default window, timeout and epsilon
    pub fn with_defaults(clock: C) -> Self {
        Self::new(ProcessorConfig::default(), clock)
    }

    /// Forget all history; the next reading is reported unconditionally
    pub fn reset(&mut self) {
        self.sample_count = 0;
        self.mean = 0.0;
        self.last_emitted = None;
        self.last_emit_at = self.clock.now();
        log_debug!("Sensor processor reset at tick {:?}", self.last_emit_at);
    }

    /// Fold in one reading and decide whether to report
    ///
    /// Never fails. Integer readings get the mean back truncated toward zero.
    pub fn process<V: SensorValue>(&mut self, reading: V) -> Update<V> {
        let mean = self.accumulate(reading.to_f64());

        let changed = match self.last_emitted {
            None => Some(EmitReason::FirstSample),
            Some(last) if libm::fabs(last - mean) > self.config.epsilon => {
                Some(EmitReason::Changed)
            }
            Some(_) => None,
        };

        let (reason, now) = match changed {
            Some(reason) => (reason, self.clock.now()),
            None => {
                if !self.config.timeout_enabled() {
                    return Update::Unchanged;
                }
                let now = self.clock.now();
                let elapsed = wrapping_delta(self.last_emit_at, now).as_millis_u64();
                if elapsed <= self.config.poll_timeout_ms() {
                    return Update::Unchanged;
                }
                (EmitReason::PollTimeout, now)
            }
        };

        self.last_emitted = Some(mean);
        self.last_emit_at = now;
        log_trace!("Emitting {} ({:?}) at tick {:?}", mean, reason, now);

        Update::Emitted {
            value: V::from_f64(mean),
            reason,
        }
    }

    /// In-place variant of [`SensorProcessor::process`]
    ///
    /// Overwrites `value` with the smoothed value and returns `true` when the
    /// reading should be reported; leaves it untouched otherwise.
    pub fn filter_in_place<V: SensorValue>(&mut self, value: &mut V) -> bool {
        match self.process(*value) {
            Update::Emitted { value: smoothed, .. } => {
                *value = smoothed;
                true
            }
            Update::Unchanged => false,
        }
    }

    fn accumulate(&mut self, reading: f64) -> f64 {
        let count = f64::from(self.sample_count);
        self.mean = (self.mean * count + reading) / (count + 1.0);
        if self.sample_count < self.config.smooth_window {
            self.sample_count += 1;
        }
        self.mean
    }

    /// Active configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Samples currently weighted into the mean
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Current smoothed estimate, reported or not
    pub fn running_mean(&self) -> f64 {
        self.mean
    }

    /// Last reported value, `None` before the first report
    pub fn last_emitted(&self) -> Option<f64> {
        self.last_emitted
    }

    /// True until the first report after reset
    pub fn is_first_sample(&self) -> bool {
        self.last_emitted.is_none()
    }

    /// Tick of the last report (or of the last reset)
    pub fn last_emit_timestamp(&self) -> C::Tick {
        self.last_emit_at
    }

    /// Clock this processor reads
    pub fn time_source(&self) -> &C {
        &self.clock
    }
}
