use crate::utils::{bits_to_bytes, low_mask};

// Upper bound of staged bits in the accumulator. Only whole
// bytes leave it, so up to 7 stale bits always stay behind.
const BUFFER_SIZE: u32 = u64::BITS - 1;

// Bits that are guaranteed to fit after a commit.
const WRITABLE_BITS: u32 = BUFFER_SIZE & !7;

/// Growable output buffer for bit-packed data.
///
/// Bits fill every byte starting from its least significant bit.
/// Values wider than 8 bits are laid out in little-endian order.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    // Committed output bytes.
    inner: Vec<u8>,

    // Staged bits, oldest in the low end.
    buf: u64,
    count: u32,
}

impl BitWriter {
    /// Creates an empty [`BitWriter`].
    pub const fn new() -> Self {
        Self {
            inner: Vec::new(),
            buf: 0,
            count: 0,
        }
    }

    /// Creates a [`BitWriter`] appending to `vec`.
    ///
    /// Existing contents of `vec` are kept and new bits start at the
    /// next byte boundary after them.
    pub const fn from_vec(vec: Vec<u8>) -> Self {
        Self {
            inner: vec,
            buf: 0,
            count: 0,
        }
    }

    /// Total number of bits written so far, staged ones included.
    #[inline]
    pub fn written_bits(&self) -> usize {
        (self.inner.len() << 3) + self.count as usize
    }

    /// Gets the number of bytes the buffer occupies once a trailing
    /// partial byte is padded out.
    #[inline]
    pub fn byte_len(&self) -> usize {
        bits_to_bytes(self.written_bits())
    }

    /// Indicates if the writer doesn't contain any bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.written_bits() == 0
    }

    /// Indicates how many more bits can be staged before the
    /// accumulator gets committed to the data buffer.
    #[inline]
    pub fn remaining(&self) -> u32 {
        WRITABLE_BITS.saturating_sub(self.count)
    }

    /// Gets a view of the committed bytes in the buffer.
    ///
    /// Bits staged since the last [`Self::commit`] or
    /// [`Self::realign_to_byte`] are not part of the view.
    #[inline]
    pub fn view(&self) -> &[u8] {
        &self.inner
    }

    /// Consumes the [`BitWriter`] and returns the byte buffer with a
    /// trailing partial byte zero-padded.
    #[inline]
    pub fn into_inner(mut self) -> Vec<u8> {
        self.realign_to_byte();
        self.inner
    }

    /// Reserves room for at least `nbytes` more output bytes.
    #[inline]
    pub fn reserve(&mut self, nbytes: usize) {
        self.inner.reserve(nbytes);
    }

    /// Flushes all whole bytes staged in the accumulator to the
    /// data buffer.
    pub fn commit(&mut self) {
        debug_assert!(self.count <= BUFFER_SIZE);

        let nbytes = (self.count >> 3) as usize;
        self.inner.extend_from_slice(&self.buf.to_le_bytes()[..nbytes]);

        self.buf >>= self.count & WRITABLE_BITS;
        self.count &= 7;
    }

    /// Commits all whole staged bytes and gets the bits left over as
    /// a zero-padded byte, if there are any.
    ///
    /// Unlike [`Self::realign_to_byte`], the partial byte stays staged
    /// and later writes continue right after its last bit.
    pub fn commit_partial(&mut self) -> Option<u8> {
        self.commit();
        (self.count != 0).then(|| (self.buf & low_mask(self.count)) as u8)
    }

    /// Appends the `nbits` low-order bits of `value` to the buffer.
    ///
    /// Bits above `nbits` in `value` are ignored.
    ///
    /// # Panics
    ///
    /// Panics when `nbits` exceeds 64.
    pub fn write_bits(&mut self, value: u64, nbits: u32) {
        assert!(nbits <= u64::BITS, "cannot write more than 64 bits at once");

        // Wide values don't fit next to stale bits, so split them.
        if nbits > WRITABLE_BITS {
            let half = u32::BITS;
            self.write_bits(value, half);
            self.write_bits(value >> half, nbits - half);
            return;
        }

        if nbits > BUFFER_SIZE - self.count {
            self.commit();
        }

        self.buf |= (value & low_mask(nbits)) << self.count;
        self.count += nbits;
    }

    /// Writes a [`bool`] value as a single bit.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_bits(value as u64, 1);
    }

    /// Realigns the buffer to the boundaries of the next
    /// untouched byte, zero-padding a partial byte.
    pub fn realign_to_byte(&mut self) {
        self.commit();

        // At most 7 bits remain, which get zero-padded.
        if self.count != 0 {
            self.inner.push(self.buf as u8);

            self.buf = 0;
            self.count = 0;
        }
    }
}
