//! Enum codec: a variant travels as an integer discriminator.
//!
//! The discriminator is the position of the variant in its definition, or,
//! with `use_values_as_discriminators`, the numeric value of the variant.
//! It is written by any integer codec, a single `u8` by default.
//!
//! ```rust
//! use codec_kit::{Decoder, EnumCodecConfig, EnumDefinition, EnumValue, Encoder, get_enum_codec};
//!
//! let direction = EnumDefinition::new()
//!     .explicit("Up", "up")
//!     .explicit("Down", "down");
//! let codec = get_enum_codec(&direction, EnumCodecConfig::default()).unwrap();
//!
//! // Encode by key or by value.
//! assert_eq!(codec.encode(&EnumValue::from("Down")).unwrap(), [1]);
//! assert_eq!(codec.encode(&EnumValue::from("down")).unwrap(), [1]);
//! assert_eq!(codec.decode(&[1]).unwrap(), EnumValue::from("down"));
//! ```

use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::enum_helpers::{
    EnumDefinition, EnumStats, EnumValue, get_enum_index_from_discriminator,
    get_enum_index_from_variant,
};
use crate::error::{Error, Result};
use crate::numbers::{Integer, U8Codec, checked_number};
use std::fmt;
use std::marker::PhantomData;

/// How an enum codec writes its discriminator.
#[derive(Debug, Clone)]
pub struct EnumCodecConfig<P> {
    /// Integer codec used for the discriminator.
    pub size: P,
    /// Write the numeric value of each variant instead of its position.
    pub use_values_as_discriminators: bool,
}

impl<P> EnumCodecConfig<P> {
    pub fn new(size: P) -> Self {
        EnumCodecConfig {
            size,
            use_values_as_discriminators: false,
        }
    }

    pub fn with_values_as_discriminators(mut self) -> Self {
        self.use_values_as_discriminators = true;
        self
    }
}

impl Default for EnumCodecConfig<U8Codec> {
    fn default() -> Self {
        EnumCodecConfig::new(U8Codec::default())
    }
}

/// Encodes and decodes [`EnumValue`]s of one [`EnumDefinition`].
///
/// Encoding accepts a variant's value or its key; decoding always yields the
/// value.
pub struct EnumCodec<P, N> {
    prefix: P,
    stats: EnumStats,
    use_values_as_discriminators: bool,
    _number: PhantomData<fn() -> N>,
}

impl<P: Clone, N> Clone for EnumCodec<P, N> {
    fn clone(&self) -> Self {
        EnumCodec {
            prefix: self.prefix.clone(),
            stats: self.stats.clone(),
            use_values_as_discriminators: self.use_values_as_discriminators,
            _number: PhantomData,
        }
    }
}

impl<P: fmt::Debug, N> fmt::Debug for EnumCodec<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumCodec")
            .field("prefix", &self.prefix)
            .field("stats", &self.stats)
            .field("use_values_as_discriminators", &self.use_values_as_discriminators)
            .finish()
    }
}

impl<P: Sizing, N> EnumCodec<P, N> {
    fn new(definition: &EnumDefinition, config: EnumCodecConfig<P>) -> Result<Self> {
        let stats = EnumStats::new(definition);
        if config.use_values_as_discriminators {
            let string_values = stats.lexical_values();
            if !string_values.is_empty() {
                return Err(Error::CannotUseLexicalValuesAsEnumDiscriminators { string_values });
            }
        }
        tracing::debug!(
            variants = stats.len(),
            use_values_as_discriminators = config.use_values_as_discriminators,
            size = %config.size.size(),
            "built enum codec"
        );
        Ok(EnumCodec {
            prefix: config.size,
            stats,
            use_values_as_discriminators: config.use_values_as_discriminators,
            _number: PhantomData,
        })
    }

    pub fn stats(&self) -> &EnumStats {
        &self.stats
    }

    pub fn uses_values_as_discriminators(&self) -> bool {
        self.use_values_as_discriminators
    }
}

impl<P, N: Integer> EnumCodec<P, N> {
    /// Resolve `variant` to the discriminator to write.
    fn discriminator(&self, variant: &EnumValue) -> Result<N> {
        let invalid = || Error::InvalidEnumVariant {
            variant: variant.clone(),
            numerical_values: self.stats.numerical_values.clone(),
            string_values: self.stats.string_values.clone(),
        };
        let index = get_enum_index_from_variant(&self.stats, variant).ok_or_else(invalid)?;
        let discriminator = if self.use_values_as_discriminators {
            self.stats.enum_values[index].as_number().ok_or_else(invalid)?
        } else {
            i64::try_from(index).map_err(|_| invalid())?
        };
        checked_number(i128::from(discriminator), "enum_discriminator")
    }

    fn out_of_range(&self, discriminator: i64) -> Error {
        let valid_discriminators: Vec<i64> = if self.use_values_as_discriminators {
            self.stats.numerical_values.clone()
        } else {
            (0..self.stats.len() as i64).collect()
        };
        Error::EnumDiscriminatorOutOfRange {
            discriminator,
            min_range: valid_discriminators.first().copied().unwrap_or(0),
            max_range: valid_discriminators.last().copied().unwrap_or(-1),
            valid_discriminators,
        }
    }
}

pub fn get_enum_encoder<P, N>(
    definition: &EnumDefinition,
    config: EnumCodecConfig<P>,
) -> Result<EnumCodec<P, N>>
where
    P: Encoder<N>,
    N: Integer,
{
    EnumCodec::new(definition, config)
}

pub fn get_enum_decoder<P, N>(
    definition: &EnumDefinition,
    config: EnumCodecConfig<P>,
) -> Result<EnumCodec<P, N>>
where
    P: Decoder<N>,
    N: Integer,
{
    EnumCodec::new(definition, config)
}

/// Build an enum codec. Fails with
/// [`Error::CannotUseLexicalValuesAsEnumDiscriminators`] when values are
/// requested as discriminators but some are not numbers.
pub fn get_enum_codec<P, N>(
    definition: &EnumDefinition,
    config: EnumCodecConfig<P>,
) -> Result<EnumCodec<P, N>>
where
    P: Encoder<N> + Decoder<N>,
    N: Integer,
{
    EnumCodec::new(definition, config)
}

impl<P: Sizing, N> Sizing for EnumCodec<P, N> {
    fn size(&self) -> Size {
        self.prefix.size()
    }
}

impl<P: Encoder<N>, N: Integer> Encoder<EnumValue> for EnumCodec<P, N> {
    fn get_size_from_value(&self, value: &EnumValue) -> Result<usize> {
        self.prefix.get_size_from_value(&self.discriminator(value)?)
    }

    fn write(&self, value: &EnumValue, bytes: &mut [u8], offset: usize) -> Result<usize> {
        self.prefix.write(&self.discriminator(value)?, bytes, offset)
    }
}

impl<P: Decoder<N>, N: Integer> Decoder<EnumValue> for EnumCodec<P, N> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(EnumValue, usize)> {
        let (raw, offset) = self.prefix.read(bytes, offset)?;
        let discriminator = i64::try_from(raw.to_i128()).unwrap_or(i64::MAX);
        let index = get_enum_index_from_discriminator(
            &self.stats,
            discriminator,
            self.use_values_as_discriminators,
        )
        .ok_or_else(|| self.out_of_range(discriminator))?;
        Ok((self.stats.enum_values[index].clone(), offset))
    }
}
