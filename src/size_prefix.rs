//! Length-prefixed framing.
//!
//! The content is encoded first to learn its length, the length is written
//! with the prefix codec, and the content follows. Decoding reads the length
//! and hands the inner decoder exactly that many bytes.

use crate::bytes::{ensure_remaining, write_bytes};
use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::Result;
use crate::numbers::{Integer, checked_number};
use std::fmt;
use std::marker::PhantomData;

/// A codec whose content is preceded by its byte length.
///
/// `N` is the integer type of the prefix codec `P`.
pub struct SizePrefixed<C, P, N> {
    inner: C,
    prefix: P,
    _number: PhantomData<fn() -> N>,
}

impl<C: Clone, P: Clone, N> Clone for SizePrefixed<C, P, N> {
    fn clone(&self) -> Self {
        SizePrefixed {
            inner: self.inner.clone(),
            prefix: self.prefix.clone(),
            _number: PhantomData,
        }
    }
}

impl<C: fmt::Debug, P: fmt::Debug, N> fmt::Debug for SizePrefixed<C, P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizePrefixed")
            .field("inner", &self.inner)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl<C, P, N> SizePrefixed<C, P, N> {
    fn new(inner: C, prefix: P) -> Self
    where
        C: Sizing,
        P: Sizing,
    {
        tracing::trace!(inner = %inner.size(), prefix = %prefix.size(), "added size prefix");
        SizePrefixed {
            inner,
            prefix,
            _number: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn prefix(&self) -> &P {
        &self.prefix
    }
}

pub fn add_encoder_size_prefix<E, P, N>(encoder: E, prefix: P) -> SizePrefixed<E, P, N>
where
    E: Sizing,
    P: Encoder<N>,
    N: Integer,
{
    SizePrefixed::new(encoder, prefix)
}

pub fn add_decoder_size_prefix<D, P, N>(decoder: D, prefix: P) -> SizePrefixed<D, P, N>
where
    D: Sizing,
    P: Decoder<N>,
    N: Integer,
{
    SizePrefixed::new(decoder, prefix)
}

/// Prefix the content of `codec` with its byte length, written by `prefix`.
///
/// ```rust
/// use codec_kit::{Decoder, Encoder, add_codec_size_prefix, u16_codec, utf8_codec};
///
/// let codec = add_codec_size_prefix(utf8_codec(), u16_codec());
/// assert_eq!(codec.encode("abc").unwrap(), [3, 0, b'a', b'b', b'c']);
/// assert_eq!(codec.read(&[3, 0, b'a', b'b', b'c', 0xff], 0).unwrap(), ("abc".to_string(), 5));
/// ```
pub fn add_codec_size_prefix<C, P, N>(codec: C, prefix: P) -> SizePrefixed<C, P, N>
where
    C: Sizing,
    P: Encoder<N> + Decoder<N>,
    N: Integer,
{
    SizePrefixed::new(codec, prefix)
}

impl<C: Sizing, P: Sizing, N> Sizing for SizePrefixed<C, P, N> {
    fn size(&self) -> Size {
        match (self.prefix.size(), self.inner.size()) {
            (Size::Fixed(prefix), Size::Fixed(inner)) => Size::Fixed(prefix + inner),
            (prefix, inner) => Size::Variable {
                max_size: prefix
                    .max_size()
                    .zip(inner.max_size())
                    .map(|(prefix, inner)| prefix + inner),
            },
        }
    }
}

impl<T, E, P, N> Encoder<T> for SizePrefixed<E, P, N>
where
    T: ?Sized,
    E: Encoder<T>,
    P: Encoder<N>,
    N: Integer,
{
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        let content_size = self.inner.get_size_from_value(value)?;
        let length: N = checked_number(content_size as i128, "size_prefix")?;
        Ok(self.prefix.get_size_from_value(&length)? + content_size)
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let content = self.inner.encode(value)?;
        let length: N = checked_number(content.len() as i128, "size_prefix")?;
        let offset = self.prefix.write(&length, bytes, offset)?;
        write_bytes(bytes, offset, &content, "add_encoder_size_prefix")
    }
}

impl<T, D, P, N> Decoder<T> for SizePrefixed<D, P, N>
where
    D: Decoder<T>,
    P: Decoder<N>,
    N: Integer,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        let (length, offset) = self.prefix.read(bytes, offset)?;
        let length: usize = checked_number(length.to_i128(), "size_prefix")?;
        ensure_remaining(bytes, offset, length, "add_decoder_size_prefix")?;
        let end = offset + length;
        let value = self.inner.decode(&bytes[offset..end])?;
        Ok((value, end))
    }
}
