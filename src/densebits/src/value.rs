//! Raw full-width encoding of primitive values.
//!
//! This is the representation a value gets when no tighter bounds
//! are known for it, e.g. on the fallback path of entropy encoding.

use densebits_bit_buf::{BitReader, BitWriter};

use crate::{Error, Visit, Visitor};

/// A primitive type with a fixed-width raw bit representation.
///
/// Pointer-sized integers are deliberately not primitives, their
/// width would make the encoding depend on the target platform.
pub trait Primitive: Copy {
    /// Number of bits in the raw representation.
    const BITS: u32;

    /// Converts the value into its raw bits.
    fn to_raw(self) -> u64;

    /// Reconstructs the value from its raw bits.
    fn from_raw(raw: u64) -> Self;
}

macro_rules! impl_primitive_int {
    ($($ty:ty => $uty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn to_raw(self) -> u64 {
                    self as $uty as u64
                }

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $uty as $ty
                }
            }
        )*
    };
}

impl_primitive_int! {
    u8 => u8,
    i8 => u8,
    u16 => u16,
    i16 => u16,
    u32 => u32,
    i32 => u32,
    u64 => u64,
    i64 => u64,
}

impl Primitive for bool {
    const BITS: u32 = 1;

    #[inline]
    fn to_raw(self) -> u64 {
        self as u64
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        raw != 0
    }
}

impl Primitive for f32 {
    const BITS: u32 = u32::BITS;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl Primitive for f64 {
    const BITS: u32 = u64::BITS;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
}

macro_rules! impl_visit_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Visit for $ty {
                #[inline]
                fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), Error> {
                    visitor.value(self)
                }
            }
        )*
    };
}

impl_visit_primitive!(bool, u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

#[inline]
pub(crate) fn encode<P: Primitive>(writer: &mut BitWriter, value: P) {
    writer.write_bits(value.to_raw(), P::BITS);
}

#[inline]
pub(crate) fn decode<P: Primitive>(reader: &mut BitReader<'_>) -> Result<P, Error> {
    let raw = reader.read_bits(P::BITS)?;
    Ok(P::from_raw(raw))
}
