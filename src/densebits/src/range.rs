//! Bit-packed encoding of values against declared bounds.
//!
//! A value `v` in `[min, max]` is transmitted as `v - min` using
//! exactly `ceil(log2(max - min + 1))` bits. Floating point values
//! are quantized to a fixed number of steps between the bounds first.
//!
//! Values outside of their bounds are rejected with
//! [`Error::RangeViolation`] before anything is written.

use std::fmt;

use densebits_bit_buf::{
    utils::{bits_for_span, low_mask},
    BitReader, BitWriter,
};

use crate::Error;

#[cfg(feature = "serde")]
mod serde_impl;

/// Integer types which can be range-encoded.
pub trait RangeInt: Copy + PartialOrd + fmt::Debug {
    /// Widens the value losslessly.
    fn to_wide(self) -> i128;

    /// Narrows a wide value back, which must be in bounds.
    fn from_wide(wide: i128) -> Self;
}

macro_rules! impl_range_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RangeInt for $ty {
                #[inline]
                fn to_wide(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_wide(wide: i128) -> Self {
                    wide as $ty
                }
            }
        )*
    };
}

impl_range_int!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

/// Floating point types which can be range-encoded.
pub trait RangeFloat: Copy + PartialOrd + fmt::Debug {
    /// Converts the value to [`f64`] for quantization.
    fn to_f64(self) -> f64;

    /// Converts a dequantized value back.
    fn from_f64(value: f64) -> Self;
}

impl RangeFloat for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl RangeFloat for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Declared `[min, max]` bounds for an integer value.
///
/// The number of bits needed for encoding is computed once when the
/// spec is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeSpec<T> {
    min: T,
    max: T,
    bits: u32,
}

impl<T: RangeInt> RangeSpec<T> {
    /// Creates a spec for values in `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics when `min > max`.
    pub fn new(min: T, max: T) -> Self {
        match Self::try_new(min, max) {
            Some(spec) => spec,
            None => panic!("range minimum {min:?} exceeds maximum {max:?}"),
        }
    }

    /// Creates a spec for values in `min..=max`, if `min <= max`.
    pub fn try_new(min: T, max: T) -> Option<Self> {
        (min <= max).then(|| Self {
            min,
            max,
            bits: bits_for_span(span(min, max)),
        })
    }

    /// The lowest encodable value.
    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    /// The highest encodable value.
    #[inline]
    pub fn max(&self) -> T {
        self.max
    }

    /// The number of bits every encoded value occupies.
    #[inline]
    pub fn bits_required(&self) -> u32 {
        self.bits
    }

    /// Whether `value` lies within the bounds.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

#[inline]
fn span<T: RangeInt>(min: T, max: T) -> u64 {
    // The widest span, that of a 64-bit type, still fits.
    (max.to_wide() - min.to_wide()) as u64
}

// Relative slack for treating a span as a whole multiple of the
// requested precision, which absorbs rounding of decimal precisions.
const STEP_TOLERANCE: f64 = 1e-6;

/// Declared `[min, max]` bounds for a floating point value, quantized
/// into evenly spaced steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRangeSpec<F> {
    min: F,
    max: F,
    precision: f64,
    steps: u64,
    bits: u32,

    // Whether the spec was built from a bit budget rather than
    // a precision.
    by_bits: bool,
}

impl<F: RangeFloat> FloatRangeSpec<F> {
    /// Creates a spec for values in `min..=max` which are quantized into
    /// evenly spaced steps no wider than `precision`.
    ///
    /// When the span is not a whole multiple of `precision`, the steps
    /// shrink to fit it exactly. [`Self::precision`] reports the
    /// effective step.
    ///
    /// # Panics
    ///
    /// Panics when the bounds are not ordered, when `precision` is not a
    /// positive finite number or when the range needs more than 64 bits.
    pub fn new(min: F, max: F, precision: F) -> Self {
        match Self::try_new(min, max, precision) {
            Some(spec) => spec,
            None => panic!("invalid float range [{min:?}, {max:?}] with precision {precision:?}"),
        }
    }

    /// Fallible version of [`Self::new`].
    pub fn try_new(min: F, max: F, precision: F) -> Option<Self> {
        let (lo, hi, precision) = (min.to_f64(), max.to_f64(), precision.to_f64());
        if !(lo <= hi && hi.is_finite() && lo.is_finite()) {
            return None;
        }
        if !(precision > 0.0 && precision.is_finite()) {
            return None;
        }

        // Spans which are not a whole multiple of `precision` get one
        // more step, so the effective step never exceeds `precision`.
        let ratio = (hi - lo) / precision;
        let steps = if (ratio - ratio.round()).abs() <= ratio * STEP_TOLERANCE {
            ratio.round()
        } else {
            ratio.ceil()
        };
        // 2^64 is the first step count we can't represent.
        if steps >= 18_446_744_073_709_551_616.0 {
            return None;
        }

        let steps = steps as u64;
        let precision = match steps {
            0 => 0.0,
            n => (hi - lo) / n as f64,
        };

        Some(Self::from_parts(min, max, precision, steps, false))
    }

    /// Creates a spec for values in `min..=max` which are quantized so that
    /// every encoded value occupies exactly `bits` bits.
    ///
    /// When `min == max` no bits are needed regardless of `bits`.
    ///
    /// # Panics
    ///
    /// Panics when the bounds are not ordered or `bits` exceeds 64.
    pub fn with_bits(min: F, max: F, bits: u32) -> Self {
        match Self::try_with_bits(min, max, bits) {
            Some(spec) => spec,
            None => panic!("invalid float range [{min:?}, {max:?}] with {bits} bits"),
        }
    }

    /// Fallible version of [`Self::with_bits`].
    pub fn try_with_bits(min: F, max: F, bits: u32) -> Option<Self> {
        let (lo, hi) = (min.to_f64(), max.to_f64());
        if !(lo <= hi && hi.is_finite() && lo.is_finite()) || bits > u64::BITS {
            return None;
        }

        let steps = if lo == hi { 0 } else { low_mask(bits) };
        let precision = match steps {
            0 => 0.0,
            n => (hi - lo) / n as f64,
        };

        Some(Self::from_parts(min, max, precision, steps, true))
    }

    fn from_parts(min: F, max: F, precision: f64, steps: u64, by_bits: bool) -> Self {
        Self {
            min,
            max,
            precision,
            steps,
            bits: bits_for_span(steps),
            by_bits,
        }
    }

    /// The lowest encodable value.
    #[inline]
    pub fn min(&self) -> F {
        self.min
    }

    /// The highest encodable value.
    #[inline]
    pub fn max(&self) -> F {
        self.max
    }

    /// The distance between two neighboring quantization steps.
    #[inline]
    pub fn precision(&self) -> F {
        F::from_f64(self.precision)
    }

    /// The number of bits every encoded value occupies.
    #[inline]
    pub fn bits_required(&self) -> u32 {
        self.bits
    }

    /// Whether `value` lies within the bounds. NaN never does.
    #[inline]
    pub fn contains(&self, value: F) -> bool {
        self.min <= value && value <= self.max
    }

    fn quantize(&self, value: F) -> u64 {
        match self.steps {
            0 => 0,
            // Float to int casts saturate, rounding may overshoot by one.
            steps => {
                let q = ((value.to_f64() - self.min.to_f64()) / self.precision).round();
                (q as u64).min(steps)
            }
        }
    }

    fn dequantize(&self, q: u64) -> F {
        if q == self.steps {
            return self.max;
        }

        let value = self.min.to_f64() + q as f64 * self.precision;
        F::from_f64(value.min(self.max.to_f64()))
    }
}

/// Writes `value` using the bits required by `spec`.
pub fn encode<T: RangeInt>(
    writer: &mut BitWriter,
    value: T,
    spec: &RangeSpec<T>,
) -> Result<(), Error> {
    if !spec.contains(value) {
        return Err(Error::range_violation(value, spec.min, spec.max));
    }

    let offset = (value.to_wide() - spec.min.to_wide()) as u64;
    writer.write_bits(offset, spec.bits);

    Ok(())
}

/// Reads a value encoded against `spec`.
pub fn decode<T: RangeInt>(reader: &mut BitReader<'_>, spec: &RangeSpec<T>) -> Result<T, Error> {
    let offset = reader.read_bits(spec.bits)?;
    if offset > span(spec.min, spec.max) {
        return Err(Error::Format("range-encoded value exceeds its bounds"));
    }

    Ok(T::from_wide(spec.min.to_wide() + offset as i128))
}

/// Writes the quantized representation of `value` under `spec`.
pub fn encode_float<F: RangeFloat>(
    writer: &mut BitWriter,
    value: F,
    spec: &FloatRangeSpec<F>,
) -> Result<(), Error> {
    if !spec.contains(value) {
        return Err(Error::range_violation(value, spec.min, spec.max));
    }

    writer.write_bits(spec.quantize(value), spec.bits);
    Ok(())
}

/// Reads a quantized value and maps it back into the bounds of `spec`.
pub fn decode_float<F: RangeFloat>(
    reader: &mut BitReader<'_>,
    spec: &FloatRangeSpec<F>,
) -> Result<F, Error> {
    let q = reader.read_bits(spec.bits)?;
    if q > spec.steps {
        return Err(Error::Format("quantized value exceeds its bounds"));
    }

    Ok(spec.dequantize(q))
}
