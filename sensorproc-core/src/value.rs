//! Numeric types a sensor channel can report
//!
//! The filter always averages in `f64`. A reading is widened on the way in,
//! and the emitted mean is narrowed back on the way out. Integer types
//! truncate toward zero (`7.9 -> 7`, `-7.5 -> -7`) and saturate at their
//! bounds, so an ADC channel read as `i32` gets `i32` updates back.

/// A reading type the processor can smooth
pub trait SensorValue: Copy {
    /// Widen a raw reading for averaging
    fn to_f64(self) -> f64;

    /// Narrow a smoothed value back to the reading type
    fn from_f64(value: f64) -> Self;
}

impl SensorValue for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl SensorValue for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

macro_rules! impl_integer_sensor_value {
    ($($ty:ty),*) => {
        $(
            impl SensorValue for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    // `as` truncates toward zero and saturates; NaN becomes 0
                    value as $ty
                }
            }
        )*
    };
}

impl_integer_sensor_value!(i8, i16, i32, i64, u8, u16, u32, u64);
