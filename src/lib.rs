//! # codec-kit
//!
//! Composable binary codecs. Small encoders and decoders are wrapped by
//! combinators to describe an exact wire layout: fixed widths, length
//! prefixes, sentinels, padding, relocated fields, reversed byte order and
//! enum discriminators.
//!
//! ## Overview
//!
//! Every codec declares a [`Size`]: either [`Size::Fixed`], the same byte
//! length for every value, or [`Size::Variable`], a per-value length with an
//! optional upper bound. Combinators keep the sizing mode of what they wrap
//! and add whatever overhead they introduce. Nothing is mutated after
//! construction, so codecs can be shared freely, including across threads.
//!
//! ## Combinators
//!
//! | Combinator | Wire effect | Size |
//! |------------|-------------|------|
//! | [`fix_codec_size`] | truncate or zero-pad to `n` bytes | fixed `n` |
//! | [`add_codec_size_prefix`] | length, then content | sum of both sizes |
//! | [`add_codec_sentinel`] | content, then a terminating byte sequence | inner + sentinel length |
//! | [`offset_codec`] | moves the cursor before and after the inner codec | unchanged |
//! | [`pad_left_codec`] / [`pad_right_codec`] | skips bytes before / after | inner + padding |
//! | [`resize_codec`] | none, only the declared size changes | remapped |
//! | [`reverse_codec`] | reverses the bytes | fixed only |
//! | [`transform_codec`] / [`try_transform_codec`] | none, only the value type changes | unchanged |
//! | [`get_enum_codec`] | integer discriminator | discriminator codec size |
//!
//! Each combinator also has `*_encoder` and `*_decoder` forms for wrapping
//! one side only. [`combine_codec`] joins separately built halves after
//! checking that their sizes agree.
//!
//! ## Example
//!
//! ```rust
//! use codec_kit::{Decoder, Encoder, Size, Sizing, add_codec_size_prefix, u32_codec, utf8_codec};
//!
//! let codec = add_codec_size_prefix(utf8_codec(), u32_codec());
//! assert_eq!(codec.size(), Size::Variable { max_size: None });
//!
//! // Encode: a 4-byte little-endian length, then the UTF-8 bytes.
//! let bytes = codec.encode("hello").unwrap();
//! assert_eq!(bytes, [5, 0, 0, 0, b'h', b'e', b'l', b'l', b'o']);
//!
//! // Decode it back.
//! let decoded: String = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

pub mod bytes;
pub mod codec;
pub mod enum_codec;
pub mod enum_helpers;
pub mod error;
pub mod fix_size;
pub mod numbers;
pub mod offset;
pub mod pad;
pub mod raw;
pub mod resize;
pub mod reverse;
pub mod sentinel;
pub mod size_prefix;
pub mod transform;

pub use bytes::{contains_bytes, find_bytes, fix_bytes, merge_bytes, pad_bytes};
pub use codec::{
    Codec, Combined, Decoder, Encoder, EncoderSizing, FnDecoder, FnEncoder, Size, SizeFn, Sizing,
    assert_is_fixed_size, assert_is_variable_size, combine_codec, combine_codec_with_description,
    create_codec, create_decoder, create_encoder, create_fixed_codec, create_fixed_decoder, create_fixed_encoder,
    create_variable_codec, create_variable_decoder, create_variable_encoder, is_fixed_size,
    is_variable_size,
};
pub use enum_codec::{EnumCodec, EnumCodecConfig, get_enum_codec, get_enum_decoder, get_enum_encoder};
pub use enum_helpers::{
    EnumDefinition, EnumStats, EnumValue, EnumVariant, format_numerical_values,
    get_enum_index_from_discriminator, get_enum_index_from_variant, get_enum_stats,
};
pub use error::{Error, Result};
pub use fix_size::{FixedSize, fix_codec_size, fix_decoder_size, fix_encoder_size};
pub use numbers::{
    Endian, I8Codec, I16Codec, I32Codec, I64Codec, Integer, ShortU16Codec, U8Codec, U16Codec,
    U32Codec, U64Codec, i8_codec, i16_codec, i32_codec, i64_codec, short_u16_codec, u8_codec,
    u16_codec, u32_codec, u64_codec,
};
pub use offset::{
    Offset, OffsetConfig, PostOffsetScope, PreOffsetScope, offset_codec, offset_decoder,
    offset_encoder, wrap_offset,
};
pub use pad::{
    pad_left_codec, pad_left_decoder, pad_left_encoder, pad_right_codec, pad_right_decoder,
    pad_right_encoder,
};
pub use raw::{BytesCodec, Utf8Codec, bytes_codec, utf8_codec};
pub use resize::{Resize, resize_codec, resize_decoder, resize_encoder};
pub use reverse::{Reverse, reverse_codec, reverse_decoder, reverse_encoder};
pub use sentinel::{Sentinel, add_codec_sentinel, add_decoder_sentinel, add_encoder_sentinel};
pub use size_prefix::{
    SizePrefixed, add_codec_size_prefix, add_decoder_size_prefix, add_encoder_size_prefix,
};
#[allow(deprecated)]
pub use transform::{
    KeepDecoded, TransformCodec, TransformDecoder, TransformEncoder, TryTransformCodec,
    TryTransformDecoder, TryTransformEncoder, map_codec, map_decoder, map_encoder,
    transform_codec, transform_codec_input, transform_decoder, transform_encoder,
    try_transform_codec, try_transform_decoder, try_transform_encoder,
};
