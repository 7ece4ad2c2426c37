use bitvec::prelude::*;

use crate::{utils::align_down, UnderflowError};

/// A buffer which enables bit-based deserialization of data.
///
/// Individual bit reading starts at the LSB of the byte, working
/// towards the MSB. Values wider than a byte are assembled in
/// little-endian ordering.
///
/// The reader borrows its data and never reads past the end of
/// the slice it was constructed over.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    data: &'a BitSlice<u8, Lsb0>,

    // Current bit offset into `data`.
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Constructs a new [`BitReader`] over a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: data.view_bits::<Lsb0>(),
            pos: 0,
        }
    }

    /// Gets the total bits in the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Indicates whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Gets the remaining bits available in the buffer.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.data.len() - self.pos
    }

    #[cold]
    #[inline(never)]
    fn underflow(&self, requested: usize) -> UnderflowError {
        UnderflowError {
            requested,
            remaining: self.remaining_bits(),
        }
    }

    #[inline]
    fn take(&mut self, nbits: usize) -> Result<&'a BitSlice<u8, Lsb0>, UnderflowError> {
        if nbits > self.remaining_bits() {
            return Err(self.underflow(nbits));
        }

        let data: &'a BitSlice<u8, Lsb0> = self.data;
        let chunk = &data[self.pos..self.pos + nbits];
        self.pos += nbits;

        Ok(chunk)
    }

    /// Attempts to read `nbits` bits from the buffer into the low-order
    /// bits of a [`u64`].
    ///
    /// Reading zero bits always succeeds and yields `0`.
    ///
    /// # Panics
    ///
    /// Panics when `nbits` exceeds 64.
    #[inline]
    pub fn read_bits(&mut self, nbits: u32) -> Result<u64, UnderflowError> {
        assert!(nbits <= u64::BITS, "cannot read more than 64 bits at once");

        let chunk = self.take(nbits as usize)?;
        Ok(match chunk.is_empty() {
            true => 0,
            false => chunk.load_le::<u64>(),
        })
    }

    /// Attempts to read a single bit from the buffer.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, UnderflowError> {
        self.take(1).map(|bit| bit[0])
    }

    /// Advances the cursor by `nbits` bits without inspecting them.
    ///
    /// Fails without moving the cursor when fewer bits remain.
    #[inline]
    pub fn skip_bits(&mut self, nbits: usize) -> Result<(), UnderflowError> {
        self.take(nbits).map(|_| ())
    }

    /// Discards the remaining bits of a partially consumed byte so
    /// that the next read starts at a byte boundary.
    #[inline]
    pub fn realign_to_byte(&mut self) {
        // The underlying data always spans whole bytes, so rounding
        // the remainder down can never move past its end.
        let remaining = self.remaining_bits();
        self.pos += remaining - align_down(remaining, u8::BITS as usize);
    }
}
