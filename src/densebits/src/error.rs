use densebits_bit_buf::UnderflowError;
use thiserror::Error;

/// Errors that may occur while encoding or decoding values.
///
/// Every error is reported by the call that detected it. The buffer is
/// left in whatever state the partial operation produced.
#[derive(Debug, Error)]
pub enum Error {
    /// A read requested more bits than the input has left.
    #[error("{0}")]
    BufferUnderflow(#[from] UnderflowError),

    /// A value to encode lies outside of its declared bounds.
    #[error("value {value} is out of range [{min}, {max}]")]
    RangeViolation {
        value: String,
        min: String,
        max: String,
    },

    /// The input is truncated or internally inconsistent.
    #[error("malformed input: {0}")]
    Format(&'static str),
}

impl Error {
    #[cold]
    #[inline(never)]
    pub(crate) fn range_violation<T: std::fmt::Debug>(value: T, min: T, max: T) -> Self {
        Self::RangeViolation {
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        }
    }
}
