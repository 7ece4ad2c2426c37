//! Dictionary substitution for frequently occurring values.
//!
//! A value found in a dictionary of `N` candidates is replaced by its
//! index, range-encoded over `[0, N]`. The index `N` itself signals
//! that the value was not found and is followed by a full encoding
//! of it.
//!
//! Lookups are linear scans, dictionaries are meant to hold a handful
//! of entries.

use densebits_bit_buf::{BitReader, BitWriter};

use crate::{
    range::{self, RangeSpec},
    Error,
};

/// Gets the spec which dictionary indices of a dictionary with `len`
/// entries are encoded with.
#[inline]
pub fn index_spec(len: usize) -> RangeSpec<usize> {
    RangeSpec::new(0, len)
}

/// Writes the index of `value` in `dictionary`, or the sentinel.
///
/// Returns whether the value was found. When it wasn't, the caller
/// is responsible for encoding the value itself afterwards.
pub fn encode_index<T: PartialEq>(
    writer: &mut BitWriter,
    value: &T,
    dictionary: &[T],
) -> Result<bool, Error> {
    let index = dictionary.iter().position(|candidate| candidate == value);
    log::trace!("Entropy lookup yielded {index:?} of {}", dictionary.len());

    range::encode(
        writer,
        index.unwrap_or(dictionary.len()),
        &index_spec(dictionary.len()),
    )?;

    Ok(index.is_some())
}

/// Reads a dictionary index.
///
/// Returns [`None`] for the sentinel, in which case the full value
/// follows in the stream.
pub fn decode_index(reader: &mut BitReader<'_>, len: usize) -> Result<Option<usize>, Error> {
    let index = match range::decode(reader, &index_spec(len)) {
        Ok(index) => index,
        Err(Error::BufferUnderflow(_)) => return Err(Error::Format("truncated dictionary index")),
        Err(Error::Format(_)) => return Err(Error::Format("dictionary index out of bounds")),
        Err(e) => return Err(e),
    };

    Ok((index < len).then_some(index))
}
