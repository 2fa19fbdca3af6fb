//! Shared helpers for integration tests
//!
//! Deterministic sensor traces and a small polling-loop driver, so scenarios
//! read like the firmware loop they model.

#![allow(dead_code)]

use sensorproc_core::time::{MockTimeSource, TimeSource};
use sensorproc_core::{SensorProcessor, SensorValue, Update, WrappingCounter};

/// Pseudo-random noise source with a fixed seed
pub struct NoiseGenerator {
    seed: u32,
}

impl NoiseGenerator {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Uniform noise in `[-amplitude, amplitude]`
    pub fn next(&mut self, amplitude: f64) -> f64 {
        // Numerical Recipes LCG
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let unit = f64::from(self.seed >> 8) / f64::from(1_u32 << 24);
        (unit * 2.0 - 1.0) * amplitude
    }
}

/// One emitted report in a polling run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report<V> {
    pub poll: usize,
    pub tick: u64,
    pub update: Update<V>,
}

/// Drive `processor` once per `interval_ms`, collecting emitted reports
pub fn run_polling_loop<C, V>(
    processor: &mut SensorProcessor<&MockTimeSource<C>>,
    clock: &MockTimeSource<C>,
    interval_ms: u64,
    readings: impl IntoIterator<Item = V>,
) -> Vec<Report<V>>
where
    C: WrappingCounter,
    V: SensorValue,
{
    let mut reports = Vec::new();
    for (poll, reading) in readings.into_iter().enumerate() {
        clock.advance(interval_ms);
        let update = processor.process(reading);
        if update.is_emitted() {
            reports.push(Report {
                poll,
                tick: clock.now().as_millis_u64(),
                update,
            });
        }
    }
    reports
}

/// Flat signal with bounded noise
pub fn noisy_constant(base: f64, amplitude: f64, samples: usize, seed: u32) -> Vec<f64> {
    let mut noise = NoiseGenerator::new(seed);
    (0..samples).map(|_| base + noise.next(amplitude)).collect()
}
