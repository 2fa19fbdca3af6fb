//! Time management for edge devices
//!
//! Microcontroller tick counters are fixed width and wrap back to zero: a
//! 32-bit millisecond counter rolls over after ~49.7 days, a 16-bit one after
//! ~65 seconds. Plain subtraction across the rollover underflows, so every
//! elapsed-time calculation in this crate goes through [`wrapping_delta`].
//!
//! Clock sources:
//! - [`FnTimeSource`]: wraps a HAL function such as `millis()`
//! - [`MonotonicClock`]: `std::time::Instant` truncated to a `u32` counter
//! - [`MockTimeSource`]: controllable time for testing

use core::cell::Cell;

/// Fixed-width unsigned tick counter that wraps at [`WrappingCounter::MAX`]
pub trait WrappingCounter: Copy + Ord + core::fmt::Debug {
    /// Largest value before the counter rolls over to zero
    const MAX: Self;

    /// Counter start value
    const ZERO: Self;

    /// Widen to `u64` for comparisons against millisecond thresholds
    fn as_millis_u64(self) -> u64;

    /// Add `ms` milliseconds, rolling over past `MAX`
    fn wrapping_add_millis(self, ms: u64) -> Self;

    /// Forward distance from `self` to `later`, assuming at most one wrap
    fn wrapping_delta(self, later: Self) -> Self;
}

macro_rules! impl_wrapping_counter {
    ($($ty:ty),*) => {
        $(
            impl WrappingCounter for $ty {
                const MAX: Self = <$ty>::MAX;
                const ZERO: Self = 0;

                #[inline]
                fn as_millis_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn wrapping_add_millis(self, ms: u64) -> Self {
                    // Truncating `ms` keeps the result modulo the counter width
                    self.wrapping_add(ms as $ty)
                }

                #[inline]
                fn wrapping_delta(self, later: Self) -> Self {
                    if later >= self {
                        later - self
                    } else {
                        // MAX - self + later < MAX here, so the +1 cannot overflow
                        (Self::MAX - self) + later + 1
                    }
                }
            }
        )*
    };
}

impl_wrapping_counter!(u8, u16, u32, u64, usize);

/// Elapsed ticks from `first` to `second` on a wrapping counter
///
/// ```rust
/// use sensorproc_core::wrapping_delta;
///
/// assert_eq!(wrapping_delta(1000_u32, 1500), 500);
/// // 16-bit counter rolled over between the two samples
/// assert_eq!(wrapping_delta(65530_u16, 10), 16);
/// ```
#[inline]
pub fn wrapping_delta<T: WrappingCounter>(first: T, second: T) -> T {
    first.wrapping_delta(second)
}

/// Source of monotonic millisecond ticks
///
/// The counter may wrap; consumers only ever compare ticks through
/// [`wrapping_delta`].
pub trait TimeSource {
    /// Counter type returned by [`TimeSource::now`]
    type Tick: WrappingCounter;

    /// Current tick count in milliseconds
    fn now(&self) -> Self::Tick;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    type Tick = T::Tick;

    fn now(&self) -> Self::Tick {
        (**self).now()
    }
}

/// Time source backed by a plain function or closure
///
/// This is how firmware hands its HAL tick function to the processor:
///
/// ```rust
/// use sensorproc_core::time::{FnTimeSource, TimeSource};
///
/// fn millis() -> u32 { 42 }
///
/// let clock = FnTimeSource::new(millis);
/// assert_eq!(clock.now(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnTimeSource<F> {
    read: F,
}

impl<F> FnTimeSource<F> {
    /// Wrap a tick-reading function
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F, T> TimeSource for FnTimeSource<F>
where
    F: Fn() -> T,
    T: WrappingCounter,
{
    type Tick = T;

    fn now(&self) -> T {
        (self.read)()
    }
}

/// Hosted monotonic clock that behaves like an Arduino `millis()` counter
///
/// Starts at 0 on creation and wraps at `u32::MAX`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a new clock at tick 0
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    type Tick = u32;

    fn now(&self) -> u32 {
        // Truncation is the wraparound
        self.start.elapsed().as_millis() as u32
    }
}

/// Controllable clock for tests
///
/// Time only moves when told to. Uses a `Cell` so a test can keep advancing
/// the clock while a processor holds `&MockTimeSource`.
#[derive(Debug, Clone)]
pub struct MockTimeSource<T: WrappingCounter = u32> {
    ticks: Cell<T>,
}

impl<T: WrappingCounter> MockTimeSource<T> {
    /// Create a mock clock reading `start`
    pub fn new(start: T) -> Self {
        Self {
            ticks: Cell::new(start),
        }
    }

    /// Jump to an absolute tick value
    pub fn set(&self, ticks: T) {
        self.ticks.set(ticks);
    }

    /// Move forward by `ms`, wrapping at the counter width
    pub fn advance(&self, ms: u64) {
        self.ticks.set(self.ticks.get().wrapping_add_millis(ms));
    }
}

impl<T: WrappingCounter> TimeSource for MockTimeSource<T> {
    type Tick = T;

    fn now(&self) -> T {
        self.ticks.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_delta_is_plain_subtraction() {
        assert_eq!(wrapping_delta(0_u32, 0), 0);
        assert_eq!(wrapping_delta(1000_u32, 61_001), 60_001);
        assert_eq!(wrapping_delta(5_u8, 255), 250);
    }

    #[test]
    fn delta_across_16_bit_rollover() {
        // 5 ticks to MAX, 1 tick to roll over, 10 more
        assert_eq!(wrapping_delta(65530_u16, 10), 16);
        assert_eq!(wrapping_delta(u16::MAX, 0), 1);
    }

    #[test]
    fn delta_across_32_bit_rollover() {
        assert_eq!(wrapping_delta(u32::MAX - 99, 100), 200);
        assert_eq!(wrapping_delta(u64::MAX, u64::MAX - 1), u64::MAX);
    }

    #[test]
    fn mock_time_advances_and_wraps() {
        let clock = MockTimeSource::new(65_000_u16);
        clock.advance(500);
        assert_eq!(clock.now(), 65_500);

        clock.advance(100);
        assert_eq!(clock.now(), 64);

        clock.set(7);
        assert_eq!(clock.now(), 7);
    }

    #[test]
    fn shared_reference_reads_same_clock() {
        let clock = MockTimeSource::new(10_u32);
        let borrowed = &clock;
        clock.advance(5);
        assert_eq!(borrowed.now(), 15);
    }

    #[test]
    fn closure_time_source() {
        let base = Cell::new(3_u32);
        let clock = FnTimeSource::new(|| base.get());
        assert_eq!(clock.now(), 3);
        base.set(9);
        assert_eq!(clock.now(), 9);
    }

    #[cfg(feature = "std")]
    #[test]
    fn monotonic_clock_starts_near_zero() {
        let clock = MonotonicClock::new();
        assert!(clock.now() < 1000);
    }
}
