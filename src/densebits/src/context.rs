use densebits_bit_buf::BitWriter;

use crate::{container_size, Deserializer, Serializer};

/// Owner of the buffer for one (de)serialization session.
///
/// Serializers and deserializers created from a context borrow its
/// buffer, so they can be used one after another but never at the
/// same time.
#[derive(Debug, Default)]
pub struct Context {
    writer: BitWriter,

    // Committed bytes plus the padded partial byte, rebuilt on
    // every view of an unaligned buffer.
    padded: Vec<u8>,
}

impl Context {
    /// Creates a context with an empty buffer.
    pub const fn new() -> Self {
        Self {
            writer: BitWriter::new(),
            padded: Vec::new(),
        }
    }

    /// Creates a context with room for `nbytes` bytes preallocated.
    pub fn with_capacity(nbytes: usize) -> Self {
        let mut writer = BitWriter::new();
        writer.reserve(nbytes);

        Self {
            writer,
            padded: Vec::new(),
        }
    }

    /// Creates a serializer appending to the buffer.
    pub fn serializer(&mut self) -> Serializer<'_> {
        Serializer::new(&mut self.writer)
    }

    /// Creates a deserializer reading the buffer from its start.
    ///
    /// A trailing partial byte reads as zero-padded, see [`Self::view`].
    pub fn deserializer(&mut self) -> Deserializer<'_> {
        Deserializer::new(self.view())
    }

    /// Gets the number of bytes in the buffer, counting a trailing
    /// partial byte as a whole one.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.writer.byte_len()
    }

    /// Gets the number of bytes the container size prefix for `count`
    /// occupies.
    #[inline]
    pub const fn container_size_bytes(count: usize) -> usize {
        container_size::size_in_bytes(count)
    }

    /// Gets the contents of the buffer, zero-padding a trailing
    /// partial byte.
    ///
    /// The padding is not part of the stream. Serializers created
    /// afterwards keep packing bits right after the last one written.
    pub fn view(&mut self) -> &[u8] {
        match self.writer.commit_partial() {
            None => self.writer.view(),
            Some(partial) => {
                log::debug!(
                    "Padding {} bits to a byte boundary for viewing",
                    self.writer.written_bits()
                );

                self.padded.clear();
                self.padded.extend_from_slice(self.writer.view());
                self.padded.push(partial);
                &self.padded
            }
        }
    }

    /// Consumes the context and returns the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
