//! Provides buffers for bit-level serialization and deserialization
//! of data.
//!
//! Every operation on types from this crate starts at a byte's LSB,
//! working towards the MSB. Quantities spanning multiple bytes end up
//! in little endian byte ordering.
//!
//! [`BitWriter`] stages bits in a 64-bit accumulator and commits them
//! to a growable byte vector in whole bytes. [`BitReader`] borrows a
//! byte slice and hands out bits from it, refusing to ever read past
//! the end of the slice.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use thiserror::Error;

mod reader;
pub use reader::BitReader;

mod writer;
pub use writer::BitWriter;

pub mod utils;

/// Error produced when a read requests more bits than the
/// underlying buffer has left.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("attempted to read {requested} bits with only {remaining} remaining")]
pub struct UnderflowError {
    /// The number of bits that were requested.
    pub requested: usize,
    /// The number of bits that were still available.
    pub remaining: usize,
}
