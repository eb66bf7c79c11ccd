//! Integer codecs.
//!
//! These are the building blocks used as size prefixes and enum
//! discriminators. Fixed-width codecs take an [`Endian`]; the `*_codec()`
//! shorthands are little-endian.
//!
//! | Codec | Rust type | Size |
//! |-------|-----------|------|
//! | [`U8Codec`] / [`I8Codec`] | `u8` / `i8` | 1 byte |
//! | [`U16Codec`] / [`I16Codec`] | `u16` / `i16` | 2 bytes |
//! | [`U32Codec`] / [`I32Codec`] | `u32` / `i32` | 4 bytes |
//! | [`U64Codec`] / [`I64Codec`] | `u64` / `i64` | 8 bytes |
//! | [`ShortU16Codec`] | `u16` | 1 to 3 bytes |

use crate::bytes::{ensure_remaining, write_bytes};
use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Byte order of a fixed-width integer codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// Primitive integers that can travel through a numeric codec.
///
/// Conversions go through `i128`, which holds every value of every
/// implementor.
pub trait Integer: Copy {
    const MIN: i128;
    const MAX: i128;

    fn to_i128(self) -> i128;

    /// `None` when `value` does not fit in `Self`.
    fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Integer for $ty {
                const MIN: i128 = <$ty>::MIN as i128;
                const MAX: i128 = <$ty>::MAX as i128;

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(value: i128) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, i128, isize);

/// Convert `value` into `N`, or fail with [`Error::NumberOutOfRange`].
pub(crate) fn checked_number<N: Integer>(value: i128, codec: &'static str) -> Result<N> {
    N::from_i128(value).ok_or(Error::NumberOutOfRange {
        codec,
        value,
        min: N::MIN,
        max: N::MAX,
    })
}

// ── Fixed-width codecs ─────────────────────────────────────────────────────

macro_rules! fixed_number_codec {
    ($(#[$doc:meta])* $name:ident, $shorthand:ident, $ty:ty, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            endian: Endian,
        }

        impl $name {
            pub const SIZE: usize = std::mem::size_of::<$ty>();

            pub fn new(endian: Endian) -> Self {
                $name { endian }
            }

            pub fn endian(&self) -> Endian {
                self.endian
            }
        }

        #[doc = concat!("Little-endian [`", stringify!($name), "`].")]
        pub fn $shorthand() -> $name {
            $name::new(Endian::Little)
        }

        impl Sizing for $name {
            fn size(&self) -> Size {
                Size::Fixed(Self::SIZE)
            }
        }

        impl Encoder<$ty> for $name {
            fn get_size_from_value(&self, _value: &$ty) -> Result<usize> {
                Ok(Self::SIZE)
            }

            fn write(&self, value: &$ty, bytes: &mut [u8], offset: usize) -> Result<usize> {
                let encoded = match self.endian {
                    Endian::Little => value.to_le_bytes(),
                    Endian::Big => value.to_be_bytes(),
                };
                write_bytes(bytes, offset, &encoded, $label)
            }
        }

        impl Decoder<$ty> for $name {
            fn read(&self, bytes: &[u8], offset: usize) -> Result<($ty, usize)> {
                ensure_remaining(bytes, offset, Self::SIZE, $label)?;
                let end = offset + Self::SIZE;
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(&bytes[offset..end]);
                let value = match self.endian {
                    Endian::Little => <$ty>::from_le_bytes(raw),
                    Endian::Big => <$ty>::from_be_bytes(raw),
                };
                Ok((value, end))
            }
        }
    };
}

fixed_number_codec!(
    /// One unsigned byte.
    U8Codec, u8_codec, u8, "u8"
);
fixed_number_codec!(U16Codec, u16_codec, u16, "u16");
fixed_number_codec!(U32Codec, u32_codec, u32, "u32");
fixed_number_codec!(U64Codec, u64_codec, u64, "u64");
fixed_number_codec!(
    /// One signed byte, two's complement.
    I8Codec, i8_codec, i8, "i8"
);
fixed_number_codec!(I16Codec, i16_codec, i16, "i16");
fixed_number_codec!(I32Codec, i32_codec, i32, "i32");
fixed_number_codec!(I64Codec, i64_codec, i64, "i64");

// ── shortU16 ───────────────────────────────────────────────────────────────

/// Compact `u16` encoding: 7 bits per byte, low bits first, with the high bit
/// of each byte flagging that another byte follows.
///
/// ```rust
/// use codec_kit::{Encoder, short_u16_codec};
///
/// assert_eq!(short_u16_codec().encode(&127).unwrap(), [0x7f]);
/// assert_eq!(short_u16_codec().encode(&128).unwrap(), [0x80, 0x01]);
/// assert_eq!(short_u16_codec().encode(&65535).unwrap(), [0xff, 0xff, 0x03]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortU16Codec;

const SHORT_U16_MAX_SIZE: usize = 3;

pub fn short_u16_codec() -> ShortU16Codec {
    ShortU16Codec
}

impl Sizing for ShortU16Codec {
    fn size(&self) -> Size {
        Size::Variable {
            max_size: Some(SHORT_U16_MAX_SIZE),
        }
    }
}

impl Encoder<u16> for ShortU16Codec {
    fn get_size_from_value(&self, value: &u16) -> Result<usize> {
        Ok(match *value {
            0..=0x7f => 1,
            0x80..=0x3fff => 2,
            _ => 3,
        })
    }

    fn write(&self, value: &u16, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let mut encoded = [0u8; SHORT_U16_MAX_SIZE];
        let mut remaining = *value;
        let mut len = 0;
        loop {
            let mut byte = (remaining & 0x7f) as u8;
            remaining >>= 7;
            if remaining != 0 {
                byte |= 0x80;
            }
            encoded[len] = byte;
            len += 1;
            if remaining == 0 {
                break;
            }
        }
        write_bytes(bytes, offset, &encoded[..len], "short_u16")
    }
}

impl Decoder<u16> for ShortU16Codec {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(u16, usize)> {
        let mut value: u32 = 0;
        for index in 0..SHORT_U16_MAX_SIZE {
            ensure_remaining(bytes, offset, index + 1, "short_u16")?;
            let byte = bytes[offset + index];
            value |= u32::from(byte & 0x7f) << (index * 7);
            if byte & 0x80 == 0 {
                let value = checked_number::<u16>(i128::from(value), "short_u16")?;
                return Ok((value, offset + index + 1));
            }
        }
        // A continuation bit on the last byte means the value does not fit.
        Err(Error::NumberOutOfRange {
            codec: "short_u16",
            value: i128::from(value),
            min: u16::MIN.into(),
            max: u16::MAX.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_number() {
        assert_eq!(checked_number::<u8>(255, "u8").unwrap(), 255);
        assert_eq!(
            checked_number::<u8>(256, "u8").unwrap_err(),
            Error::NumberOutOfRange { codec: "u8", value: 256, min: 0, max: 255 }
        );
        assert!(checked_number::<i8>(-129, "i8").is_err());
    }

    #[test]
    fn test_short_u16_sizes() {
        let codec = ShortU16Codec;
        assert_eq!(codec.get_size_from_value(&0).unwrap(), 1);
        assert_eq!(codec.get_size_from_value(&0x3fff).unwrap(), 2);
        assert_eq!(codec.get_size_from_value(&0x4000).unwrap(), 3);
    }
}
