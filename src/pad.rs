//! Padding before or after a codec.
//!
//! Padding grows the declared size and shifts the cursor; the padding bytes
//! themselves are whatever the buffer already holds, which is zero for a
//! buffer allocated by `encode`. Built from [`Resize`] inside [`Offset`].
//!
//! ```rust
//! use codec_kit::{Decoder, Encoder, pad_left_codec, pad_right_codec, u8_codec};
//!
//! assert_eq!(pad_left_codec(u8_codec(), 3).encode(&7).unwrap(), [0, 0, 0, 7]);
//! assert_eq!(pad_right_codec(u8_codec(), 3).encode(&7).unwrap(), [7, 0, 0, 0]);
//! assert_eq!(pad_left_codec(u8_codec(), 3).read(&[0, 0, 0, 7], 0).unwrap(), (7, 4));
//! ```

use crate::codec::Sizing;
use crate::offset::{Offset, OffsetConfig, offset_codec, offset_decoder, offset_encoder};
use crate::resize::{Resize, grow};

fn left(offset: usize) -> OffsetConfig {
    let shift = i64::try_from(offset).unwrap_or(i64::MAX);
    OffsetConfig::new().pre_offset(move |scope| scope.pre_offset.saturating_add(shift))
}

fn right(offset: usize) -> OffsetConfig {
    let shift = i64::try_from(offset).unwrap_or(i64::MAX);
    OffsetConfig::new().post_offset(move |scope| scope.post_offset.saturating_add(shift))
}

/// Skip `offset` bytes before writing with `encoder`.
pub fn pad_left_encoder<E: Sizing>(
    encoder: E,
    offset: usize,
) -> Offset<Resize<E, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_encoder(grow(encoder, offset), left(offset))
}

/// Skip `offset` bytes after writing with `encoder`.
pub fn pad_right_encoder<E: Sizing>(
    encoder: E,
    offset: usize,
) -> Offset<Resize<E, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_encoder(grow(encoder, offset), right(offset))
}

/// Skip `offset` bytes before reading with `decoder`.
pub fn pad_left_decoder<D: Sizing>(
    decoder: D,
    offset: usize,
) -> Offset<Resize<D, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_decoder(grow(decoder, offset), left(offset))
}

/// Skip `offset` bytes after reading with `decoder`.
pub fn pad_right_decoder<D: Sizing>(
    decoder: D,
    offset: usize,
) -> Offset<Resize<D, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_decoder(grow(decoder, offset), right(offset))
}

pub fn pad_left_codec<C: Sizing>(
    codec: C,
    offset: usize,
) -> Offset<Resize<C, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_codec(grow(codec, offset), left(offset))
}

pub fn pad_right_codec<C: Sizing>(
    codec: C,
    offset: usize,
) -> Offset<Resize<C, impl Fn(i64) -> i64 + Clone + Send + Sync>> {
    offset_codec(grow(codec, offset), right(offset))
}
