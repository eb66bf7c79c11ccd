//! Byte-order reversal for fixed-size codecs.

use crate::bytes::ensure_remaining;
use crate::codec::{Decoder, Encoder, Size, Sizing, assert_is_fixed_size};
use crate::error::{Error, Result};

/// A fixed-size codec whose bytes are written and read back to front.
#[derive(Debug, Clone)]
pub struct Reverse<C> {
    inner: C,
    fixed_size: usize,
}

impl<C> Reverse<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

fn reverse<C: Sizing>(inner: C) -> Result<Reverse<C>> {
    let fixed_size = assert_is_fixed_size(&inner)?;
    Ok(Reverse { inner, fixed_size })
}

/// Reverse the bytes written by `encoder`. Fails with
/// [`Error::ExpectedFixedLength`] for a variable-size encoder.
pub fn reverse_encoder<E: Sizing>(encoder: E) -> Result<Reverse<E>> {
    reverse(encoder)
}

pub fn reverse_decoder<D: Sizing>(decoder: D) -> Result<Reverse<D>> {
    reverse(decoder)
}

/// Reverse both sides of `codec`, e.g. to turn a little-endian number codec
/// into a big-endian one.
///
/// ```rust
/// use codec_kit::{Decoder, Encoder, reverse_codec, u32_codec};
///
/// let codec = reverse_codec(u32_codec()).unwrap();
/// assert_eq!(codec.encode(&1).unwrap(), [0, 0, 0, 1]);
/// assert_eq!(codec.decode(&[0, 0, 0, 1]).unwrap(), 1);
/// ```
pub fn reverse_codec<C: Sizing>(codec: C) -> Result<Reverse<C>> {
    reverse(codec)
}

impl<C> Sizing for Reverse<C> {
    fn size(&self) -> Size {
        Size::Fixed(self.fixed_size)
    }
}

impl<T: ?Sized, E: Encoder<T>> Encoder<T> for Reverse<E> {
    fn get_size_from_value(&self, _value: &T) -> Result<usize> {
        Ok(self.fixed_size)
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let new_offset = self.inner.write(value, bytes, offset)?;
        let end = offset + self.fixed_size;
        let bytes_length = bytes.len();
        bytes
            .get_mut(offset..end)
            .ok_or(Error::BufferTooSmall {
                codec: "reverse_encoder",
                expected: end,
                bytes_length,
            })?
            .reverse();
        Ok(new_offset)
    }
}

impl<T, D: Decoder<T>> Decoder<T> for Reverse<D> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        ensure_remaining(bytes, offset, self.fixed_size, "reverse_decoder")?;
        let end = offset + self.fixed_size;
        let mut window = bytes.get(offset..end).unwrap_or_default().to_vec();
        window.reverse();
        let (value, consumed) = self.inner.read(&window, 0)?;
        Ok((value, offset + consumed))
    }
}
