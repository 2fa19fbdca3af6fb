//! Fixed-Capacity Bank of Sensor Channels
//!
//! Firmware usually polls several channels per cycle (temperature, humidity,
//! pressure, ...) against one tick counter. [`SensorBank`] keeps one
//! [`SensorProcessor`] per channel in a `heapless::Vec`, so the channel count
//! is fixed at compile time and nothing is allocated.
//!
//! ```rust
//! use sensorproc_core::{ProcessorConfig, SensorBank};
//! use sensorproc_core::time::MockTimeSource;
//!
//! let clock = MockTimeSource::new(0_u32);
//! let mut bank: SensorBank<_, 4> = SensorBank::new(&clock);
//!
//! let temperature = bank.add_channel(ProcessorConfig::default()).unwrap();
//! let humidity = bank.add_channel(ProcessorConfig::default().with_epsilon(1.0)).unwrap();
//!
//! assert!(bank.process(temperature, 21.4_f32).unwrap().is_emitted());
//! assert!(bank.process(humidity, 48_u8).unwrap().is_emitted());
//! ```

use heapless::Vec;

use crate::config::ProcessorConfig;
use crate::errors::{BankError, BankResult};
use crate::processor::{SensorProcessor, Update};
use crate::time::TimeSource;
use crate::value::SensorValue;

/// Handle for a channel registered in a [`SensorBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(usize);

impl ChannelId {
    /// Position of the channel in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Up to `N` sensor channels sharing one clock
pub struct SensorBank<C: TimeSource + Clone, const N: usize> {
    clock: C,
    channels: Vec<SensorProcessor<C>, N>,
}

impl<C: TimeSource + Clone, const N: usize> SensorBank<C, N> {
    /// Create an empty bank
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            channels: Vec::new(),
        }
    }

    /// Register a channel; its processor starts reset against the shared clock
    pub fn add_channel(&mut self, config: ProcessorConfig) -> BankResult<ChannelId> {
        let id = ChannelId(self.channels.len());
        self.channels
            .push(SensorProcessor::new(config, self.clock.clone()))
            .map_err(|_| BankError::BankFull { capacity: N })?;
        log_debug!("Registered sensor channel {}", id.0);
        Ok(id)
    }

    /// Feed one reading to a channel
    pub fn process<V: SensorValue>(
        &mut self,
        channel: ChannelId,
        reading: V,
    ) -> BankResult<Update<V>> {
        Ok(self.channel_mut(channel)?.process(reading))
    }

    /// Reset a single channel
    pub fn reset_channel(&mut self, channel: ChannelId) -> BankResult<()> {
        self.channel_mut(channel)?.reset();
        Ok(())
    }

    /// Reset every channel, e.g. after a sensor bus re-init
    pub fn reset_all(&mut self) {
        for processor in self.channels.iter_mut() {
            processor.reset();
        }
    }

    /// Inspect a channel's processor
    pub fn channel(&self, channel: ChannelId) -> BankResult<&SensorProcessor<C>> {
        self.channels
            .get(channel.0)
            .ok_or(BankError::UnknownChannel { channel: channel.0 })
    }

    fn channel_mut(&mut self, channel: ChannelId) -> BankResult<&mut SensorProcessor<C>> {
        self.channels
            .get_mut(channel.0)
            .ok_or(BankError::UnknownChannel { channel: channel.0 })
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if no channel is registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Maximum number of channels
    pub const fn capacity(&self) -> usize {
        N
    }
}
