//! Bit arithmetic helpers shared by the buffers and the codecs
//! built on top of them.

/// Aligns `value` down to the next multiple of `align`.
///
/// # Panics
///
/// Panics in debug mode when `align` is not a power of two.
#[inline(always)]
pub const fn align_down(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    value & !(align - 1)
}

/// Gets the number of bytes needed to hold `bits` bits, counting
/// a trailing partial byte as a whole one.
#[inline(always)]
pub const fn bits_to_bytes(bits: usize) -> usize {
    bits.div_ceil(u8::BITS as usize)
}

/// Gets the number of bits needed to represent every value in
/// `0..=span`.
///
/// This is `ceil(log2(span + 1))`, so a span of zero needs no
/// bits at all.
#[inline(always)]
pub const fn bits_for_span(span: u64) -> u32 {
    u64::BITS - span.leading_zeros()
}

/// Builds a mask covering the `nbits` low-order bits of a [`u64`].
#[inline(always)]
pub const fn low_mask(nbits: u32) -> u64 {
    match nbits {
        0 => 0,
        n => u64::MAX >> (u64::BITS - n),
    }
}
