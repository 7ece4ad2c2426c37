use densebits_bit_buf::BitReader;

use crate::{
    container_size, entropy,
    range::{self, FloatRangeSpec, RangeFloat, RangeInt, RangeSpec},
    text::{self, TextBuf, TextUnit},
    value::{self, Primitive},
    Error, Visitor,
};

/// The decoding half of the [`Visitor`] interface.
///
/// Reads values from a borrowed byte slice in the same order they
/// were written in.
pub struct Deserializer<'r> {
    reader: BitReader<'r>,
}

impl<'r> Deserializer<'r> {
    /// Creates a deserializer over `data`.
    pub fn new(data: &'r [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
        }
    }

    /// Gets the number of bits that were not consumed yet.
    ///
    /// Up to 7 bits of padding may remain after the last value.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.reader.remaining_bits()
    }
}

impl Visitor for Deserializer<'_> {
    #[inline]
    fn value<P: Primitive>(&mut self, value: &mut P) -> Result<(), Error> {
        *value = value::decode(&mut self.reader)?;
        Ok(())
    }

    #[inline]
    fn range<T: RangeInt>(&mut self, value: &mut T, spec: &RangeSpec<T>) -> Result<(), Error> {
        *value = range::decode(&mut self.reader, spec)?;
        Ok(())
    }

    #[inline]
    fn range_float<F: RangeFloat>(
        &mut self,
        value: &mut F,
        spec: &FloatRangeSpec<F>,
    ) -> Result<(), Error> {
        *value = range::decode_float(&mut self.reader, spec)?;
        Ok(())
    }

    #[inline]
    fn container_size(&mut self, count: &mut usize) -> Result<(), Error> {
        *count = container_size::decode(&mut self.reader)?;
        Ok(())
    }

    fn text_with_width<B: TextBuf>(&mut self, text: &mut B, width: usize) -> Result<(), Error> {
        let units = text::decode(&mut self.reader, text.unit_limit(), width)?;
        text.assign(units)
    }

    fn text_array_with_width<U: TextUnit>(
        &mut self,
        array: &mut [U],
        width: usize,
    ) -> Result<(), Error> {
        text::decode_array(&mut self.reader, array, width)
    }

    fn entropy_with<T, F>(&mut self, value: &mut T, dictionary: &[T], fallback: F) -> Result<(), Error>
    where
        T: PartialEq + Clone,
        F: FnOnce(&mut Self, &mut T) -> Result<(), Error>,
    {
        match entropy::decode_index(&mut self.reader, dictionary.len())? {
            Some(index) => {
                value.clone_from(&dictionary[index]);
                Ok(())
            }
            None => fallback(self, value),
        }
    }

    fn container<T, F>(&mut self, items: &mut Vec<T>, max_len: usize, mut f: F) -> Result<(), Error>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), Error>,
    {
        let len = container_size::decode(&mut self.reader)?;
        if len > max_len {
            return Err(Error::Format("container length exceeds its maximum"));
        }

        items.clear();
        items.resize_with(len, T::default);
        items.iter_mut().try_for_each(|item| f(self, item))
    }

    #[inline]
    fn align(&mut self) -> Result<(), Error> {
        self.reader.realign_to_byte();
        Ok(())
    }
}
