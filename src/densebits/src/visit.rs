//! The symmetric interface that user types are (de)serialized through.
//!
//! Both [`Serializer`](crate::Serializer) and
//! [`Deserializer`](crate::Deserializer) implement [`Visitor`]. Every
//! operation takes the field by mutable reference; the serializer reads
//! from it and the deserializer writes to it. This lets a single
//! [`Visit`] implementation describe the layout of a type for both
//! directions:
//!
//! ```
//! use densebits::{Error, RangeSpec, Visit, Visitor};
//!
//! #[derive(Default)]
//! struct Player {
//!     health: u8,
//!     name: String,
//! }
//!
//! impl Visit for Player {
//!     fn visit<V: Visitor>(&mut self, v: &mut V) -> Result<(), Error> {
//!         v.range(&mut self.health, &RangeSpec::new(0, 100))?;
//!         v.text(&mut self.name)
//!     }
//! }
//!
//! let mut player = Player { health: 42, name: "vbe".into() };
//! let bytes = densebits::to_vec(&mut player)?;
//!
//! let decoded: Player = densebits::from_slice(&bytes)?;
//! assert_eq!(decoded.health, 42);
//! assert_eq!(decoded.name, "vbe");
//! # Ok::<(), Error>(())
//! ```

use crate::{
    range::{FloatRangeSpec, RangeFloat, RangeInt, RangeSpec},
    text::{TextBuf, TextUnit},
    value::Primitive,
    Error,
};

/// A type with a field layout that can be driven through a [`Visitor`].
pub trait Visit {
    /// Visits every field of `self` in a fixed order.
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), Error>;
}

/// One direction of the (de)serialization process.
pub trait Visitor: Sized {
    /// Processes a primitive in its raw full-width representation.
    fn value<P: Primitive>(&mut self, value: &mut P) -> Result<(), Error>;

    /// Processes an integer bit-packed against `spec`.
    fn range<T: RangeInt>(&mut self, value: &mut T, spec: &RangeSpec<T>) -> Result<(), Error>;

    /// Processes a float quantized against `spec`.
    fn range_float<F: RangeFloat>(
        &mut self,
        value: &mut F,
        spec: &FloatRangeSpec<F>,
    ) -> Result<(), Error>;

    /// Processes a variable-width element count.
    fn container_size(&mut self, count: &mut usize) -> Result<(), Error>;

    /// Processes dynamic text with units of their natural width.
    fn text<B: TextBuf>(&mut self, text: &mut B) -> Result<(), Error> {
        self.text_with_width(text, B::Unit::WIDTH)
    }

    /// Processes dynamic text with units encoded as `width` bytes.
    fn text_with_width<B: TextBuf>(&mut self, text: &mut B, width: usize) -> Result<(), Error>;

    /// Processes a zero-terminated fixed array with units of their
    /// natural width.
    fn text_array<U: TextUnit>(&mut self, array: &mut [U]) -> Result<(), Error> {
        self.text_array_with_width(array, U::WIDTH)
    }

    /// Processes a zero-terminated fixed array with units encoded as
    /// `width` bytes.
    fn text_array_with_width<U: TextUnit>(
        &mut self,
        array: &mut [U],
        width: usize,
    ) -> Result<(), Error>;

    /// Processes a value through `dictionary`, using its own [`Visit`]
    /// implementation when it is not found.
    fn entropy<T>(&mut self, value: &mut T, dictionary: &[T]) -> Result<(), Error>
    where
        T: Visit + PartialEq + Clone,
    {
        self.entropy_with(value, dictionary, |visitor, value| value.visit(visitor))
    }

    /// Processes a value through `dictionary`, running `fallback` when it
    /// is not found.
    ///
    /// `fallback` is never called when the value is in the dictionary.
    fn entropy_with<T, F>(&mut self, value: &mut T, dictionary: &[T], fallback: F) -> Result<(), Error>
    where
        T: PartialEq + Clone,
        F: FnOnce(&mut Self, &mut T) -> Result<(), Error>;

    /// Processes a sequence of at most `max_len` elements, each of which
    /// is handled by `f`.
    fn container<T, F>(&mut self, items: &mut Vec<T>, max_len: usize, f: F) -> Result<(), Error>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), Error>;

    /// Processes a nested type through its [`Visit`] implementation.
    #[inline]
    fn object<T: Visit>(&mut self, value: &mut T) -> Result<(), Error> {
        value.visit(self)
    }

    /// Moves the stream to the next byte boundary.
    fn align(&mut self) -> Result<(), Error>;
}
