//! Processor configuration
//!
//! Holds the three knobs of a [`crate::SensorProcessor`]. Nothing here is
//! enforced when a processor is built: an odd configuration just produces odd
//! (but well-defined) filtering. Call [`ProcessorConfig::validate`] when
//! settings come from somewhere untrusted, such as a provisioning blob.

use crate::constants::{
    DEFAULT_EPSILON, DEFAULT_POLL_TIMEOUT_S, DEFAULT_SMOOTH_WINDOW, MS_PER_SECOND,
    POLL_TIMEOUT_DISABLED,
};
use crate::errors::ConfigError;

/// Smoothing and reporting settings for one sensor channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessorConfig {
    /// Number of samples after which the running mean stops gaining weight
    pub smooth_window: u32,

    /// Seconds without an emission before the mean is reported anyway
    /// (0 disables)
    pub poll_timeout_secs: u32,

    /// Minimum change of the mean that counts as a new value
    pub epsilon: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            smooth_window: DEFAULT_SMOOTH_WINDOW,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_S,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ProcessorConfig {
    /// Create a configuration from explicit values
    pub fn new(smooth_window: u32, poll_timeout_secs: u32, epsilon: f64) -> Self {
        Self {
            smooth_window,
            poll_timeout_secs,
            epsilon,
        }
    }

    /// Set the smoothing window
    pub fn with_smooth_window(mut self, smooth_window: u32) -> Self {
        self.smooth_window = smooth_window;
        self
    }

    /// Set the poll timeout in seconds
    pub fn with_poll_timeout_secs(mut self, poll_timeout_secs: u32) -> Self {
        self.poll_timeout_secs = poll_timeout_secs;
        self
    }

    /// Disable timeout-forced emission
    pub fn without_poll_timeout(mut self) -> Self {
        self.poll_timeout_secs = POLL_TIMEOUT_DISABLED;
        self
    }

    /// Set the change threshold
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Whether timeout-forced emission is active
    pub fn timeout_enabled(&self) -> bool {
        self.poll_timeout_secs != POLL_TIMEOUT_DISABLED
    }

    /// Poll timeout in milliseconds
    ///
    /// Computed in `u64` so large second values cannot overflow.
    pub fn poll_timeout_ms(&self) -> u64 {
        u64::from(self.poll_timeout_secs) * MS_PER_SECOND
    }

    /// Reject settings that make the change threshold meaningless
    ///
    /// A zero window and a zero timeout are both valid: the first reports
    /// raw readings, the second turns off forced refreshes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_firmware_settings() {
        let config = ProcessorConfig::default();
        assert_eq!(config.smooth_window, 5);
        assert_eq!(config.poll_timeout_secs, 60);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.poll_timeout_ms(), 60_000);
        assert!(config.timeout_enabled());
    }

    #[test]
    fn builder_setters() {
        let config = ProcessorConfig::default()
            .with_smooth_window(10)
            .with_epsilon(0.5)
            .without_poll_timeout();

        assert_eq!(config, ProcessorConfig::new(10, 0, 0.5));
        assert!(!config.timeout_enabled());
    }

    #[test]
    fn large_timeout_does_not_overflow() {
        let config = ProcessorConfig::default().with_poll_timeout_secs(u32::MAX);
        assert_eq!(config.poll_timeout_ms(), u64::from(u32::MAX) * 1000);
    }

    #[test]
    fn validate_rejects_bad_epsilon() {
        assert!(ProcessorConfig::default().validate().is_ok());
        assert!(ProcessorConfig::default().with_epsilon(0.0).validate().is_ok());
        assert!(ProcessorConfig::new(0, 0, 1.0).validate().is_ok());

        assert!(matches!(
            ProcessorConfig::default().with_epsilon(-0.1).validate(),
            Err(ConfigError::InvalidEpsilon { .. })
        ));
        assert!(ProcessorConfig::default().with_epsilon(f64::NAN).validate().is_err());
        assert!(ProcessorConfig::default().with_epsilon(f64::INFINITY).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_blob_falls_back_to_defaults() {
        let config: ProcessorConfig = serde_json::from_str(r#"{"epsilon": 0.5}"#).unwrap();
        assert_eq!(config, ProcessorConfig::default().with_epsilon(0.5));

        let config: ProcessorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProcessorConfig::new(5, 60, 0.1));

        let config: ProcessorConfig =
            serde_json::from_str(r#"{"smooth_window": 8, "poll_timeout_secs": 0}"#).unwrap();
        assert_eq!(config.smooth_window, 8);
        assert!(!config.timeout_enabled());
        assert_eq!(config.epsilon, 0.1);
    }
}
