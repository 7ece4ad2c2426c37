//! Variable-width element count prefixes.
//!
//! Counts are written as 1, 2 or 4 bytes. The high bits of the first
//! byte select the width and the remaining bits hold the count with
//! its most significant bits first:
//!
//! | count                     | bytes | layout                                  |
//! |---------------------------|-------|-----------------------------------------|
//! | `0 ..= 0x7F`              | 1     | `0xxxxxxx`                              |
//! | `0x80 ..= 0x3FFF`         | 2     | `10xxxxxx xxxxxxxx`                     |
//! | `0x4000 ..= 0x3FFF_FFFF`  | 4     | `11xxxxxx xxxxxxxx xxxxxxxx xxxxxxxx`   |
//!
//! Every byte is written as 8 bits at the current bit position, so a
//! prefix does not force the stream to a byte boundary. Decoding only
//! accepts the shortest form for any count.
//!
//! The 4-byte form keeps all of its bytes most significant first. It is
//! not byte-compatible with encoders that write its low half in little
//! endian order.

use densebits_bit_buf::{BitReader, BitWriter};

use crate::Error;

/// The largest count that can be encoded.
pub const MAX_CONTAINER_SIZE: usize = 0x3FFF_FFFF;

const ONE_BYTE_LIMIT: usize = 0x80;
const TWO_BYTE_LIMIT: usize = 0x4000;

const TWO_BYTE_MARKER: u8 = 0b1000_0000;
const FOUR_BYTE_MARKER: u8 = 0b1100_0000;
const PAYLOAD_MASK: u8 = 0b0011_1111;

/// Gets the number of bytes the prefix for `count` occupies.
///
/// Counts above [`MAX_CONTAINER_SIZE`] can't be encoded and report
/// the size of the widest form.
#[inline]
pub const fn size_in_bytes(count: usize) -> usize {
    if count < ONE_BYTE_LIMIT {
        1
    } else if count < TWO_BYTE_LIMIT {
        2
    } else {
        4
    }
}

/// Writes the prefix for `count`.
pub fn encode(writer: &mut BitWriter, count: usize) -> Result<(), Error> {
    if count > MAX_CONTAINER_SIZE {
        return Err(Error::range_violation(count, 0, MAX_CONTAINER_SIZE));
    }

    let width = size_in_bytes(count);
    let marker = match width {
        1 => 0,
        2 => TWO_BYTE_MARKER,
        _ => FOUR_BYTE_MARKER,
    };

    let bytes = (count as u32).to_be_bytes();
    let bytes = &bytes[bytes.len() - width..];

    writer.write_bits((bytes[0] | marker) as u64, u8::BITS);
    for &b in &bytes[1..] {
        writer.write_bits(b as u64, u8::BITS);
    }

    Ok(())
}

#[inline]
fn read_byte(reader: &mut BitReader<'_>) -> Result<u32, Error> {
    reader
        .read_bits(u8::BITS)
        .map(|b| b as u32)
        .map_err(|_| Error::Format("truncated container size prefix"))
}

/// Reads a prefix and returns the count it holds.
pub fn decode(reader: &mut BitReader<'_>) -> Result<usize, Error> {
    let first = read_byte(reader)?;

    let (width, mut count) = match first as u8 {
        b if b & TWO_BYTE_MARKER == 0 => (1, b as u32),
        b if b & FOUR_BYTE_MARKER == TWO_BYTE_MARKER => (2, (b & PAYLOAD_MASK) as u32),
        b => (4, (b & PAYLOAD_MASK) as u32),
    };

    for _ in 1..width {
        count = (count << u8::BITS) | read_byte(reader)?;
    }

    let count = count as usize;
    if size_in_bytes(count) != width {
        return Err(Error::Format("overlong container size prefix"));
    }

    Ok(count)
}
