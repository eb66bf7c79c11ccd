//! Raw byte and UTF-8 string codecs.
//!
//! Both are variable-size and unbounded: the decoder consumes every byte from
//! the offset to the end of the buffer. Frame them with a size prefix, a fixed
//! size or a sentinel to place anything after them.

use crate::bytes::write_bytes;
use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::{Error, Result};

/// Writes bytes as they are and reads back the rest of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BytesCodec;

pub fn bytes_codec() -> BytesCodec {
    BytesCodec
}

impl Sizing for BytesCodec {
    fn size(&self) -> Size {
        Size::UNBOUNDED
    }
}

impl Encoder<[u8]> for BytesCodec {
    fn get_size_from_value(&self, value: &[u8]) -> Result<usize> {
        Ok(value.len())
    }

    fn write(&self, value: &[u8], bytes: &mut [u8], offset: usize) -> Result<usize> {
        write_bytes(bytes, offset, value, "bytes")
    }
}

impl Encoder<Vec<u8>> for BytesCodec {
    fn get_size_from_value(&self, value: &Vec<u8>) -> Result<usize> {
        Ok(value.len())
    }

    fn write(&self, value: &Vec<u8>, bytes: &mut [u8], offset: usize) -> Result<usize> {
        write_bytes(bytes, offset, value, "bytes")
    }
}

impl Decoder<Vec<u8>> for BytesCodec {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
        let rest = bytes.get(offset..).unwrap_or_default();
        Ok((rest.to_vec(), offset + rest.len()))
    }
}

/// UTF-8 text without any length information.
///
/// Decoding strips NUL characters, so text read back from a zero-padded
/// fixed-size window comes back without its padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Utf8Codec;

pub fn utf8_codec() -> Utf8Codec {
    Utf8Codec
}

impl Sizing for Utf8Codec {
    fn size(&self) -> Size {
        Size::UNBOUNDED
    }
}

impl Encoder<str> for Utf8Codec {
    fn get_size_from_value(&self, value: &str) -> Result<usize> {
        Ok(value.len())
    }

    fn write(&self, value: &str, bytes: &mut [u8], offset: usize) -> Result<usize> {
        write_bytes(bytes, offset, value.as_bytes(), "utf8")
    }
}

impl Encoder<String> for Utf8Codec {
    fn get_size_from_value(&self, value: &String) -> Result<usize> {
        Ok(value.len())
    }

    fn write(&self, value: &String, bytes: &mut [u8], offset: usize) -> Result<usize> {
        write_bytes(bytes, offset, value.as_bytes(), "utf8")
    }
}

impl Decoder<String> for Utf8Codec {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(String, usize)> {
        let rest = bytes.get(offset..).unwrap_or_default();
        let text = std::str::from_utf8(rest).map_err(|_| Error::InvalidString)?;
        Ok((text.replace('\0', ""), offset + rest.len()))
    }
}
