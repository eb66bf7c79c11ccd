//! Force any codec into an exact byte width.
//!
//! Encoding truncates or zero-pads the inner encoding to the width. Decoding
//! hands the inner decoder exactly that window, re-fitted to the inner width
//! when the inner decoder is itself fixed-size.

use crate::bytes::{ensure_remaining, fix_bytes, write_bytes};
use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::Result;
use std::borrow::Cow;

/// A codec presented as [`Size::Fixed`] of a chosen width.
#[derive(Debug, Clone)]
pub struct FixedSize<C> {
    inner: C,
    fixed_size: usize,
}

impl<C> FixedSize<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

pub fn fix_encoder_size<E: Sizing>(encoder: E, fixed_size: usize) -> FixedSize<E> {
    FixedSize {
        inner: encoder,
        fixed_size,
    }
}

pub fn fix_decoder_size<D: Sizing>(decoder: D, fixed_size: usize) -> FixedSize<D> {
    FixedSize {
        inner: decoder,
        fixed_size,
    }
}

/// Fix both sides of `codec` to `fixed_size` bytes.
///
/// ```rust
/// use codec_kit::{Decoder, Encoder, fix_codec_size, utf8_codec};
///
/// let codec = fix_codec_size(utf8_codec(), 8);
/// assert_eq!(codec.encode("hi").unwrap(), b"hi\0\0\0\0\0\0");
/// assert_eq!(codec.decode(b"hi\0\0\0\0\0\0").unwrap(), "hi");
/// ```
pub fn fix_codec_size<C: Sizing>(codec: C, fixed_size: usize) -> FixedSize<C> {
    FixedSize {
        inner: codec,
        fixed_size,
    }
}

impl<C> Sizing for FixedSize<C> {
    fn size(&self) -> Size {
        Size::Fixed(self.fixed_size)
    }
}

impl<T: ?Sized, E: Encoder<T>> Encoder<T> for FixedSize<E> {
    fn get_size_from_value(&self, _value: &T) -> Result<usize> {
        Ok(self.fixed_size)
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        // Encode into a scratch buffer so a larger inner encoding can be truncated.
        let encoded = self.inner.encode(value)?;
        let fixed = fix_bytes(&encoded, self.fixed_size);
        write_bytes(bytes, offset, &fixed, "fix_encoder_size")
    }
}

impl<T, D: Decoder<T>> Decoder<T> for FixedSize<D> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        ensure_remaining(bytes, offset, self.fixed_size, "fix_decoder_size")?;
        let end = offset + self.fixed_size;
        let window = bytes.get(offset..end).unwrap_or_default();
        let window = match self.inner.size() {
            Size::Fixed(inner_size) if inner_size != self.fixed_size => fix_bytes(window, inner_size),
            _ => Cow::Borrowed(window),
        };
        let (value, _) = self.inner.read(&window, 0)?;
        Ok((value, end))
    }
}
