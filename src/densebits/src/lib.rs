//! Bit-packed binary serialization of structured values.
//!
//! Values are encoded into the smallest representation their declared
//! constraints allow:
//!
//! - integers and floats against [`RangeSpec`]s and [`FloatRangeSpec`]s,
//!   using only as many bits as their bounds need,
//! - frequent values as indices into small dictionaries
//!   ([`Visitor::entropy`]),
//! - text and sequences with a 1 to 4 byte [`container_size`] prefix.
//!
//! Types describe their layout once through [`Visit`], which is then
//! driven by a [`Serializer`] or a [`Deserializer`]. Fields must be
//! visited in the same order in both directions; nothing about the
//! layout is stored in the output.
//!
//! # Wire format
//!
//! Bits are packed starting at the LSB of every byte. Values wider than
//! a byte end up little endian. There is no padding between values
//! unless [`Visitor::align`] is requested, and the final partial byte
//! is zero-padded.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use densebits_bit_buf::{BitReader, BitWriter, UnderflowError};

pub mod container_size;

mod context;
pub use context::Context;

mod de;
pub use de::Deserializer;

pub mod entropy;

mod error;
pub use error::Error;

pub mod range;
pub use range::{FloatRangeSpec, RangeSpec};

mod ser;
pub use ser::Serializer;

pub mod text;
pub use text::BoundedText;

pub mod value;

mod visit;
pub use visit::{Visit, Visitor};

/// Serializes `value` into a new byte vector.
///
/// The value is taken mutably because [`Visit`] serves both directions.
pub fn to_vec<T: Visit>(value: &mut T) -> Result<Vec<u8>, Error> {
    let mut writer = BitWriter::new();
    value.visit(&mut Serializer::new(&mut writer))?;

    Ok(writer.into_inner())
}

/// Deserializes a `T` from `data`.
///
/// Trailing bytes after the value are ignored.
pub fn from_slice<T: Visit + Default>(data: &[u8]) -> Result<T, Error> {
    let mut value = T::default();
    value.visit(&mut Deserializer::new(data))?;

    Ok(value)
}
