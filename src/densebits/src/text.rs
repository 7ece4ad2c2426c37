//! Text and character array encoding.
//!
//! Text is written as a container size prefix holding the number of
//! code units, followed by every unit as `width` little-endian bytes.
//! The width is an explicit parameter so that encodings don't depend
//! on how wide a character happens to be on some platform.
//!
//! Dynamic containers ([`TextBuf`]) report their length explicitly, so
//! embedded terminators round-trip. Fixed arrays are terminated by the
//! zero unit instead and always keep their last slot for it.

use std::{fmt, mem::size_of};

use densebits_bit_buf::{utils::low_mask, BitReader, BitWriter};

use crate::{container_size, Error};

/// A code unit of text.
///
/// The zero unit acts as terminator in fixed-capacity arrays.
pub trait TextUnit: Copy + Default + PartialEq + fmt::Debug {
    /// The natural width of a unit in bytes.
    const WIDTH: usize;

    /// Gets the unit as raw bits.
    fn to_bits(self) -> u64;

    /// Reconstructs a unit from raw bits, if they fit.
    fn from_bits(bits: u64) -> Option<Self>;
}

macro_rules! impl_text_unit {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TextUnit for $ty {
                const WIDTH: usize = size_of::<$ty>();

                #[inline]
                fn to_bits(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_bits(bits: u64) -> Option<Self> {
                    <$ty>::try_from(bits).ok()
                }
            }
        )*
    };
}

impl_text_unit!(u8, u16, u32, u64);

/// A dynamically sized text container which reports its own length.
pub trait TextBuf {
    /// The code unit type stored in the container.
    type Unit: TextUnit;

    /// Gets the units currently stored.
    fn units(&self) -> &[Self::Unit];

    /// The maximum number of units the container can hold, if any.
    fn unit_limit(&self) -> Option<usize> {
        None
    }

    /// Replaces the contents with `units`, which never exceed
    /// [`Self::unit_limit`].
    fn assign(&mut self, units: Vec<Self::Unit>) -> Result<(), Error>;
}

impl<U: TextUnit> TextBuf for Vec<U> {
    type Unit = U;

    #[inline]
    fn units(&self) -> &[U] {
        self
    }

    #[inline]
    fn assign(&mut self, units: Vec<U>) -> Result<(), Error> {
        *self = units;
        Ok(())
    }
}

impl TextBuf for String {
    type Unit = u8;

    #[inline]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }

    fn assign(&mut self, units: Vec<u8>) -> Result<(), Error> {
        *self = String::from_utf8(units).map_err(|_| Error::Format("text is not valid UTF-8"))?;
        Ok(())
    }
}

/// Text storage with a hard capacity of `N` units and an explicit
/// length.
///
/// Decoding longer text into it keeps only the first `N` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundedText<U, const N: usize> {
    data: [U; N],
    len: usize,
}

impl<U: TextUnit, const N: usize> BoundedText<U, N> {
    /// Creates empty text.
    pub fn new() -> Self {
        Self {
            data: [U::default(); N],
            len: 0,
        }
    }

    /// Creates text from a slice, keeping at most `N` units.
    pub fn from_units(units: &[U]) -> Self {
        let mut text = Self::new();
        text.set(units);
        text
    }

    fn set(&mut self, units: &[U]) {
        let len = units.len().min(N);
        self.data[..len].copy_from_slice(&units[..len]);
        self.data[len..].fill(U::default());
        self.len = len;
    }

    /// Gets the stored units.
    #[inline]
    pub fn as_slice(&self) -> &[U] {
        &self.data[..self.len]
    }

    /// Gets the number of stored units.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no units are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The maximum number of units.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<U: TextUnit, const N: usize> Default for BoundedText<U, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: TextUnit, const N: usize> TextBuf for BoundedText<U, N> {
    type Unit = U;

    #[inline]
    fn units(&self) -> &[U] {
        self.as_slice()
    }

    #[inline]
    fn unit_limit(&self) -> Option<usize> {
        Some(N)
    }

    #[inline]
    fn assign(&mut self, units: Vec<U>) -> Result<(), Error> {
        self.set(&units);
        Ok(())
    }
}

/// Gets the number of units of a fixed array that get encoded.
///
/// This is the position of the first terminator, but never more than
/// `capacity - 1` so the final slot stays reserved for a terminator.
pub fn array_len<U: TextUnit>(array: &[U]) -> usize {
    let bound = array.len().saturating_sub(1);
    array[..bound]
        .iter()
        .position(|&u| u == U::default())
        .unwrap_or(bound)
}

#[inline]
fn check_width(width: usize) -> u32 {
    assert!(
        (1..=size_of::<u64>()).contains(&width),
        "text unit width must be between 1 and 8 bytes, got {width}"
    );
    (width * u8::BITS as usize) as u32
}

/// Writes `units` with a length prefix, each unit `width` bytes wide.
///
/// # Panics
///
/// Panics when `width` is not in `1..=8`.
pub fn encode<U: TextUnit>(writer: &mut BitWriter, units: &[U], width: usize) -> Result<(), Error> {
    let nbits = check_width(width);
    let limit = low_mask(nbits);

    // Validate everything up front so nothing is written on failure.
    if let Some(&unit) = units.iter().find(|u| u.to_bits() > limit) {
        return Err(Error::range_violation(unit.to_bits(), 0, limit));
    }

    container_size::encode(writer, units.len())?;
    for unit in units {
        writer.write_bits(unit.to_bits(), nbits);
    }

    Ok(())
}

/// Reads length-prefixed text, keeping at most `limit` units.
///
/// Units beyond `limit` are skipped so the stream stays positioned
/// right after the text.
///
/// # Panics
///
/// Panics when `width` is not in `1..=8`.
pub fn decode<U: TextUnit>(
    reader: &mut BitReader<'_>,
    limit: Option<usize>,
    width: usize,
) -> Result<Vec<U>, Error> {
    let nbits = check_width(width);
    let len = container_size::decode(reader)?;

    // Refuse lengths the input can't possibly back before allocating.
    let payload_bits = len
        .checked_mul(nbits as usize)
        .filter(|&bits| bits <= reader.remaining_bits())
        .ok_or(Error::Format("text length exceeds the remaining input"))?;

    let keep = limit.map_or(len, |limit| len.min(limit));
    let mut units = Vec::with_capacity(keep);
    for _ in 0..keep {
        let bits = reader.read_bits(nbits)?;
        let unit =
            U::from_bits(bits).ok_or(Error::Format("text unit does not fit the element type"))?;
        units.push(unit);
    }

    if keep < len {
        log::debug!("Truncating text of {len} units to {keep} units");
        reader.skip_bits(payload_bits - keep * nbits as usize)?;
    }

    Ok(units)
}

/// Reads length-prefixed text into a fixed array.
///
/// At most `array.len() - 1` units are copied, followed by a
/// terminator. The rest of the array is zero-filled.
pub fn decode_array<U: TextUnit>(
    reader: &mut BitReader<'_>,
    array: &mut [U],
    width: usize,
) -> Result<(), Error> {
    let units = decode::<U>(reader, Some(array.len().saturating_sub(1)), width)?;

    array[..units.len()].copy_from_slice(&units);
    array[units.len()..].fill(U::default());

    Ok(())
}
