use crate::codec::Size;
use crate::enum_helpers::{EnumValue, format_numerical_values};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, encoding with, or decoding with a codec.
///
/// Every variant carries the context needed to explain the failure; nothing is
/// reduced to a bare string except [`Error::Message`], which exists for user
/// callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A custom error message raised from a user callback
    #[error("{0}")]
    Message(String),

    /// A fixed-size codec was required but a variable-size one was given
    #[error("expected a fixed-size codec, got a {size} one")]
    ExpectedFixedLength { size: Size },

    /// A variable-size codec was required but a fixed-size one was given
    #[error("expected a variable-size codec, got a fixed-size one of {fixed_size} bytes")]
    ExpectedVariableLength { fixed_size: usize },

    /// An encoder and a decoder disagree on their declared size
    #[error("encoder and decoder must have the same size, got [{encoder}] and [{decoder}]")]
    IncompatibleSizes { encoder: Size, decoder: Size },

    /// Fewer bytes remain in the input than the codec needs
    #[error("{codec}: expected {expected} bytes, got {bytes_length}")]
    NotEnoughBytes {
        codec: &'static str,
        expected: usize,
        bytes_length: usize,
    },

    /// The destination buffer is too short for the bytes being written
    #[error("{codec}: cannot write up to byte {expected} into a buffer of {bytes_length} bytes")]
    BufferTooSmall {
        codec: &'static str,
        expected: usize,
        bytes_length: usize,
    },

    /// A computed offset fell outside `[0, bytes_length]`
    #[error("{codec}: offset {offset} is out of range for a byte array of length {bytes_length}")]
    OffsetOutOfRange {
        codec: &'static str,
        offset: i64,
        bytes_length: usize,
    },

    /// A resize function produced a negative size
    #[error("{codec}: expected a positive byte length, got {bytes_length}")]
    ExpectedPositiveByteLength { codec: &'static str, bytes_length: i64 },

    /// The encoded content contains the sentinel that is supposed to terminate it
    #[error(
        "encoded bytes [{}] must not include the sentinel [{}]",
        hex::encode(.encoded_bytes),
        hex::encode(.sentinel)
    )]
    EncodedBytesMustNotIncludeSentinel { encoded_bytes: Vec<u8>, sentinel: Vec<u8> },

    /// No sentinel was found after the read offset
    #[error(
        "sentinel [{}] is missing in decoded bytes [{}]",
        hex::encode(.sentinel),
        hex::encode(.decoded_bytes)
    )]
    SentinelMissingInDecodedBytes { decoded_bytes: Vec<u8>, sentinel: Vec<u8> },

    /// Values were requested as discriminators but some variants have lexical values
    #[error(
        "cannot use lexical values [{}] as enum discriminators",
        join_strings(.string_values)
    )]
    CannotUseLexicalValuesAsEnumDiscriminators { string_values: Vec<String> },

    /// The value to encode matches no variant, key or value of the enum
    #[error(
        "invalid enum variant: expected one of [{}] or a number in [{}], got [{variant}]",
        join_strings(.string_values),
        format_numerical_values(.numerical_values)
    )]
    InvalidEnumVariant {
        variant: EnumValue,
        numerical_values: Vec<i64>,
        string_values: Vec<String>,
    },

    /// The decoded discriminator maps to no variant
    #[error(
        "enum discriminator out of range: expected a number in [{}], got {discriminator}",
        format_numerical_values(.valid_discriminators)
    )]
    EnumDiscriminatorOutOfRange {
        discriminator: i64,
        min_range: i64,
        max_range: i64,
        valid_discriminators: Vec<i64>,
    },

    /// A number does not fit the integer type of a numeric codec
    #[error("{codec}: expected a number between {min} and {max}, got {value}")]
    NumberOutOfRange {
        codec: &'static str,
        value: i128,
        min: i128,
        max: i128,
    },

    /// Decoded bytes are not valid UTF-8
    #[error("string contains invalid bytes")]
    InvalidString,
}

impl Error {
    /// Build an [`Error::Message`] from anything displayable.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

fn join_strings(values: &[String]) -> String {
    values.join(", ")
}
