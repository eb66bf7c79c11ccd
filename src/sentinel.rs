//! Sentinel framing: content followed by a terminating byte sequence.
//!
//! The content must never contain the sentinel itself, otherwise decoding
//! would stop early, so encoding checks for it.
//!
//! ```rust
//! use codec_kit::{Decoder, Encoder, add_codec_sentinel, utf8_codec};
//!
//! let codec = add_codec_sentinel(utf8_codec(), [0xff, 0xff]);
//! assert_eq!(codec.encode("hi").unwrap(), [b'h', b'i', 0xff, 0xff]);
//! assert_eq!(codec.read(&[b'h', b'i', 0xff, 0xff, 9], 0).unwrap(), ("hi".to_string(), 4));
//! ```

use crate::bytes::{find_bytes, write_bytes};
use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::{Error, Result};

/// A codec whose content is terminated by a sentinel byte sequence.
#[derive(Debug, Clone)]
pub struct Sentinel<C> {
    inner: C,
    sentinel: Vec<u8>,
}

impl<C> Sentinel<C> {
    fn new(inner: C, sentinel: &[u8]) -> Self {
        tracing::trace!(sentinel = %hex::encode(sentinel), "added sentinel");
        Sentinel {
            inner,
            sentinel: sentinel.to_vec(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn sentinel(&self) -> &[u8] {
        &self.sentinel
    }
}

pub fn add_encoder_sentinel<E: Sizing>(encoder: E, sentinel: impl AsRef<[u8]>) -> Sentinel<E> {
    Sentinel::new(encoder, sentinel.as_ref())
}

pub fn add_decoder_sentinel<D: Sizing>(decoder: D, sentinel: impl AsRef<[u8]>) -> Sentinel<D> {
    Sentinel::new(decoder, sentinel.as_ref())
}

pub fn add_codec_sentinel<C: Sizing>(codec: C, sentinel: impl AsRef<[u8]>) -> Sentinel<C> {
    Sentinel::new(codec, sentinel.as_ref())
}

impl<C: Sizing> Sizing for Sentinel<C> {
    fn size(&self) -> Size {
        match self.inner.size() {
            Size::Fixed(n) => Size::Fixed(n + self.sentinel.len()),
            Size::Variable { max_size } => Size::Variable {
                max_size: max_size.map(|max| max + self.sentinel.len()),
            },
        }
    }
}

impl<T: ?Sized, E: Encoder<T>> Encoder<T> for Sentinel<E> {
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        Ok(self.inner.get_size_from_value(value)? + self.sentinel.len())
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let content = self.inner.encode(value)?;
        if find_bytes(&content, &self.sentinel).is_some() {
            return Err(Error::EncodedBytesMustNotIncludeSentinel {
                encoded_bytes: content,
                sentinel: self.sentinel.clone(),
            });
        }
        let offset = write_bytes(bytes, offset, &content, "add_encoder_sentinel")?;
        write_bytes(bytes, offset, &self.sentinel, "add_encoder_sentinel")
    }
}

impl<T, D: Decoder<T>> Decoder<T> for Sentinel<D> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        let candidate = bytes.get(offset..).unwrap_or_default();
        let Some(index) = find_bytes(candidate, &self.sentinel) else {
            return Err(Error::SentinelMissingInDecodedBytes {
                decoded_bytes: candidate.to_vec(),
                sentinel: self.sentinel.clone(),
            });
        };
        let value = self.inner.decode(&candidate[..index])?;
        Ok((value, offset + index + self.sentinel.len()))
    }
}
