use densebits_bit_buf::BitWriter;

use crate::{
    container_size, entropy,
    range::{self, FloatRangeSpec, RangeFloat, RangeInt, RangeSpec},
    text::{self, TextBuf, TextUnit},
    value::{self, Primitive},
    Error, Visitor,
};

/// The encoding half of the [`Visitor`] interface.
///
/// Borrows a [`BitWriter`] and appends every visited value to it.
pub struct Serializer<'w> {
    writer: &'w mut BitWriter,
}

impl<'w> Serializer<'w> {
    /// Creates a serializer which appends to `writer`.
    pub fn new(writer: &'w mut BitWriter) -> Self {
        Self { writer }
    }

    /// Gets the number of bits written to the underlying buffer.
    #[inline]
    pub fn written_bits(&self) -> usize {
        self.writer.written_bits()
    }
}

impl Visitor for Serializer<'_> {
    #[inline]
    fn value<P: Primitive>(&mut self, value: &mut P) -> Result<(), Error> {
        value::encode(self.writer, *value);
        Ok(())
    }

    #[inline]
    fn range<T: RangeInt>(&mut self, value: &mut T, spec: &RangeSpec<T>) -> Result<(), Error> {
        range::encode(self.writer, *value, spec)
    }

    #[inline]
    fn range_float<F: RangeFloat>(
        &mut self,
        value: &mut F,
        spec: &FloatRangeSpec<F>,
    ) -> Result<(), Error> {
        range::encode_float(self.writer, *value, spec)
    }

    #[inline]
    fn container_size(&mut self, count: &mut usize) -> Result<(), Error> {
        container_size::encode(self.writer, *count)
    }

    fn text_with_width<B: TextBuf>(&mut self, text: &mut B, width: usize) -> Result<(), Error> {
        text::encode(self.writer, text.units(), width)
    }

    fn text_array_with_width<U: TextUnit>(
        &mut self,
        array: &mut [U],
        width: usize,
    ) -> Result<(), Error> {
        let len = text::array_len(array);
        text::encode(self.writer, &array[..len], width)
    }

    fn entropy_with<T, F>(&mut self, value: &mut T, dictionary: &[T], fallback: F) -> Result<(), Error>
    where
        T: PartialEq + Clone,
        F: FnOnce(&mut Self, &mut T) -> Result<(), Error>,
    {
        match entropy::encode_index(self.writer, value, dictionary)? {
            true => Ok(()),
            false => fallback(self, value),
        }
    }

    fn container<T, F>(&mut self, items: &mut Vec<T>, max_len: usize, mut f: F) -> Result<(), Error>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), Error>,
    {
        if items.len() > max_len {
            return Err(Error::range_violation(items.len(), 0, max_len));
        }

        container_size::encode(self.writer, items.len())?;
        items.iter_mut().try_for_each(|item| f(self, item))
    }

    #[inline]
    fn align(&mut self) -> Result<(), Error> {
        self.writer.realign_to_byte();
        Ok(())
    }
}
