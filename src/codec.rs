//! Primitive codec contracts.
//!
//! An [`Encoder`] turns a value into bytes, a [`Decoder`] turns bytes back into
//! a value, and a [`Codec`] is anything that does both. Every one of them
//! declares its [`Size`] through the [`Sizing`] trait: either a constant byte
//! length, or a per-value length with an optional upper bound.
//!
//! ## Calling convention
//!
//! | Operation | Contract |
//! |-----------|----------|
//! | `write(value, bytes, offset)` | writes at `offset`, returns the offset right after the written bytes |
//! | `encode(value)` | allocates exactly `get_size_from_value(value)` bytes and calls `write` at 0 |
//! | `read(bytes, offset)` | reads at `offset`, returns the value and the offset right after it |
//! | `decode(bytes)` | `read` at 0, discarding the final offset |
//!
//! `read` never mutates its input. `write` only touches the bytes it declares.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// ── Size ───────────────────────────────────────────────────────────────────

/// The declared byte length of an encoder or decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    /// Every value occupies exactly this many bytes.
    Fixed(usize),
    /// The length depends on the value; `max_size` bounds it when known.
    Variable { max_size: Option<usize> },
}

impl Size {
    /// A variable size with no upper bound.
    pub const UNBOUNDED: Size = Size::Variable { max_size: None };

    /// The byte length of a fixed size, `None` for a variable one.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            Size::Fixed(n) => Some(n),
            Size::Variable { .. } => None,
        }
    }

    /// Largest number of bytes a value can take. A fixed size is its own bound.
    pub fn max_size(self) -> Option<usize> {
        match self {
            Size::Fixed(n) => Some(n),
            Size::Variable { max_size } => max_size,
        }
    }

    /// Whether every value takes the same number of bytes.
    pub fn is_fixed(self) -> bool {
        matches!(self, Size::Fixed(_))
    }

    /// Whether the length depends on the value.
    pub fn is_variable(self) -> bool {
        !self.is_fixed()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Fixed(n) => write!(f, "fixed size {}", n),
            Size::Variable { max_size: Some(max) } => write!(f, "variable size (max {})", max),
            Size::Variable { max_size: None } => write!(f, "variable size"),
        }
    }
}

// ── Traits ─────────────────────────────────────────────────────────────────

/// Exposes the declared [`Size`] of an encoder, a decoder, or both.
pub trait Sizing {
    fn size(&self) -> Size;
}

/// Serializes values of type `T` into bytes.
pub trait Encoder<T: ?Sized>: Sizing {
    /// Number of bytes `value` encodes to. Fixed-size encoders return their
    /// fixed size.
    fn get_size_from_value(&self, value: &T) -> Result<usize>;

    /// Write `value` into `bytes` at `offset` and return the offset after it.
    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize>;

    /// Encode `value` into a freshly allocated, exactly sized buffer.
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; self.get_size_from_value(value)?];
        self.write(value, &mut bytes, 0)?;
        Ok(bytes)
    }
}

/// Deserializes values of type `T` from bytes.
pub trait Decoder<T>: Sizing {
    /// Read a value from `bytes` at `offset`, returning it with the offset after it.
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)>;

    /// Decode a value from the start of `bytes`.
    fn decode(&self, bytes: &[u8]) -> Result<T> {
        self.read(bytes, 0).map(|(value, _)| value)
    }
}

/// Anything that encodes `In` and decodes `Out`.
///
/// `Out` may be stricter than `In`, e.g. a codec that encodes any `str` but
/// always decodes to an owned `String`.
pub trait Codec<In: ?Sized, Out = In>: Encoder<In> + Decoder<Out> {}

impl<In: ?Sized, Out, C> Codec<In, Out> for C where C: Encoder<In> + Decoder<Out> + ?Sized {}

// ── Forwarding impls ───────────────────────────────────────────────────────

macro_rules! forward_codec_impls {
    ($($wrapper:ident)::+) => {
        impl<S: Sizing + ?Sized> Sizing for $($wrapper)::+<S> {
            fn size(&self) -> Size {
                (**self).size()
            }
        }

        impl<T: ?Sized, E: Encoder<T> + ?Sized> Encoder<T> for $($wrapper)::+<E> {
            fn get_size_from_value(&self, value: &T) -> Result<usize> {
                (**self).get_size_from_value(value)
            }
            fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
                (**self).write(value, bytes, offset)
            }
            fn encode(&self, value: &T) -> Result<Vec<u8>> {
                (**self).encode(value)
            }
        }

        impl<T, D: Decoder<T> + ?Sized> Decoder<T> for $($wrapper)::+<D> {
            fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
                (**self).read(bytes, offset)
            }
            fn decode(&self, bytes: &[u8]) -> Result<T> {
                (**self).decode(bytes)
            }
        }
    };
}

forward_codec_impls!(Box);
forward_codec_impls!(Arc);

impl<S: Sizing + ?Sized> Sizing for &S {
    fn size(&self) -> Size {
        (**self).size()
    }
}

impl<T: ?Sized, E: Encoder<T> + ?Sized> Encoder<T> for &E {
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        (**self).get_size_from_value(value)
    }
    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        (**self).write(value, bytes, offset)
    }
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        (**self).encode(value)
    }
}

impl<T, D: Decoder<T> + ?Sized> Decoder<T> for &D {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        (**self).read(bytes, offset)
    }
    fn decode(&self, bytes: &[u8]) -> Result<T> {
        (**self).decode(bytes)
    }
}

// ── Size predicates ────────────────────────────────────────────────────────

pub fn is_fixed_size<S: Sizing + ?Sized>(codec: &S) -> bool {
    codec.size().is_fixed()
}

pub fn is_variable_size<S: Sizing + ?Sized>(codec: &S) -> bool {
    codec.size().is_variable()
}

/// Returns the fixed size of `codec`, or [`Error::ExpectedFixedLength`].
pub fn assert_is_fixed_size<S: Sizing + ?Sized>(codec: &S) -> Result<usize> {
    match codec.size() {
        Size::Fixed(n) => Ok(n),
        size => Err(Error::ExpectedFixedLength { size }),
    }
}

/// Returns the optional max size of `codec`, or [`Error::ExpectedVariableLength`].
pub fn assert_is_variable_size<S: Sizing + ?Sized>(codec: &S) -> Result<Option<usize>> {
    match codec.size() {
        Size::Fixed(fixed_size) => Err(Error::ExpectedVariableLength { fixed_size }),
        Size::Variable { max_size } => Ok(max_size),
    }
}

// ── Closure-backed encoders and decoders ───────────────────────────────────

/// How a closure-backed encoder knows its size.
#[derive(Debug, Clone, Copy)]
pub enum EncoderSizing<F> {
    Fixed(usize),
    Variable {
        get_size_from_value: F,
        max_size: Option<usize>,
    },
}

impl<F> EncoderSizing<F> {
    /// The [`Size`] this sizing rule declares.
    pub fn size(&self) -> Size {
        match self {
            EncoderSizing::Fixed(n) => Size::Fixed(*n),
            EncoderSizing::Variable { max_size, .. } => Size::Variable { max_size: *max_size },
        }
    }
}

/// Size function type used by fixed-size closure encoders, where it is never called.
pub type SizeFn<T> = fn(&T) -> usize;

/// An encoder assembled from a sizing rule and a `write` closure.
///
/// Built with [`create_encoder`], [`create_fixed_encoder`] or
/// [`create_variable_encoder`]; `encode` is derived from `write`.
pub struct FnEncoder<T: ?Sized, F, W> {
    sizing: EncoderSizing<F>,
    write: W,
    _value: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Clone, W: Clone> Clone for FnEncoder<T, F, W> {
    fn clone(&self) -> Self {
        FnEncoder {
            sizing: self.sizing.clone(),
            write: self.write.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: ?Sized, F, W> fmt::Debug for FnEncoder<T, F, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEncoder").field("size", &self.size()).finish()
    }
}

impl<T: ?Sized, F, W> Sizing for FnEncoder<T, F, W> {
    fn size(&self) -> Size {
        self.sizing.size()
    }
}

impl<T, F, W> Encoder<T> for FnEncoder<T, F, W>
where
    T: ?Sized,
    F: Fn(&T) -> usize,
    W: Fn(&T, &mut [u8], usize) -> Result<usize>,
{
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        Ok(match &self.sizing {
            EncoderSizing::Fixed(n) => *n,
            EncoderSizing::Variable { get_size_from_value, .. } => get_size_from_value(value),
        })
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        (self.write)(value, bytes, offset)
    }
}

pub fn create_encoder<T, F, W>(sizing: EncoderSizing<F>, write: W) -> FnEncoder<T, F, W>
where
    T: ?Sized,
    F: Fn(&T) -> usize,
    W: Fn(&T, &mut [u8], usize) -> Result<usize>,
{
    FnEncoder {
        sizing,
        write,
        _value: PhantomData,
    }
}

pub fn create_fixed_encoder<T, W>(fixed_size: usize, write: W) -> FnEncoder<T, SizeFn<T>, W>
where
    T: ?Sized,
    W: Fn(&T, &mut [u8], usize) -> Result<usize>,
{
    create_encoder(EncoderSizing::Fixed(fixed_size), write)
}

pub fn create_variable_encoder<T, F, W>(
    get_size_from_value: F,
    max_size: Option<usize>,
    write: W,
) -> FnEncoder<T, F, W>
where
    T: ?Sized,
    F: Fn(&T) -> usize,
    W: Fn(&T, &mut [u8], usize) -> Result<usize>,
{
    create_encoder(
        EncoderSizing::Variable {
            get_size_from_value,
            max_size,
        },
        write,
    )
}

/// A decoder assembled from a declared size and a `read` closure.
pub struct FnDecoder<T, R> {
    size: Size,
    read: R,
    _value: PhantomData<fn() -> T>,
}

impl<T, R: Clone> Clone for FnDecoder<T, R> {
    fn clone(&self) -> Self {
        FnDecoder {
            size: self.size,
            read: self.read.clone(),
            _value: PhantomData,
        }
    }
}

impl<T, R> fmt::Debug for FnDecoder<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDecoder").field("size", &self.size).finish()
    }
}

impl<T, R> Sizing for FnDecoder<T, R> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<T, R> Decoder<T> for FnDecoder<T, R>
where
    R: Fn(&[u8], usize) -> Result<(T, usize)>,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        (self.read)(bytes, offset)
    }
}

pub fn create_decoder<T, R>(size: Size, read: R) -> FnDecoder<T, R>
where
    R: Fn(&[u8], usize) -> Result<(T, usize)>,
{
    FnDecoder {
        size,
        read,
        _value: PhantomData,
    }
}

pub fn create_fixed_decoder<T, R>(fixed_size: usize, read: R) -> FnDecoder<T, R>
where
    R: Fn(&[u8], usize) -> Result<(T, usize)>,
{
    create_decoder(Size::Fixed(fixed_size), read)
}

pub fn create_variable_decoder<T, R>(max_size: Option<usize>, read: R) -> FnDecoder<T, R>
where
    R: Fn(&[u8], usize) -> Result<(T, usize)>,
{
    create_decoder(Size::Variable { max_size }, read)
}

/// Build a codec from a sizing rule, a `write` and a `read` closure. The
/// decoder declares the same size as the encoder.
pub fn create_codec<In, Out, F, W, R>(
    sizing: EncoderSizing<F>,
    write: W,
    read: R,
) -> Combined<FnEncoder<In, F, W>, FnDecoder<Out, R>>
where
    In: ?Sized,
    F: Fn(&In) -> usize,
    W: Fn(&In, &mut [u8], usize) -> Result<usize>,
    R: Fn(&[u8], usize) -> Result<(Out, usize)>,
{
    let size = sizing.size();
    Combined {
        encoder: create_encoder(sizing, write),
        decoder: create_decoder(size, read),
        description: None,
    }
}

/// Build a fixed-size codec from a `write` and a `read` closure.
pub fn create_fixed_codec<In, Out, W, R>(
    fixed_size: usize,
    write: W,
    read: R,
) -> Combined<FnEncoder<In, SizeFn<In>, W>, FnDecoder<Out, R>>
where
    In: ?Sized,
    W: Fn(&In, &mut [u8], usize) -> Result<usize>,
    R: Fn(&[u8], usize) -> Result<(Out, usize)>,
{
    Combined {
        encoder: create_fixed_encoder(fixed_size, write),
        decoder: create_fixed_decoder(fixed_size, read),
        description: None,
    }
}

/// Build a variable-size codec from a size function, `write` and `read`.
pub fn create_variable_codec<In, Out, F, W, R>(
    get_size_from_value: F,
    max_size: Option<usize>,
    write: W,
    read: R,
) -> Combined<FnEncoder<In, F, W>, FnDecoder<Out, R>>
where
    In: ?Sized,
    F: Fn(&In) -> usize,
    W: Fn(&In, &mut [u8], usize) -> Result<usize>,
    R: Fn(&[u8], usize) -> Result<(Out, usize)>,
{
    Combined {
        encoder: create_variable_encoder(get_size_from_value, max_size, write),
        decoder: create_variable_decoder(max_size, read),
        description: None,
    }
}

// ── Combining ──────────────────────────────────────────────────────────────

/// An encoder and a decoder joined into one codec by [`combine_codec`].
#[derive(Debug, Clone)]
pub struct Combined<E, D> {
    encoder: E,
    decoder: D,
    description: Option<String>,
}

impl<E, D> Combined<E, D> {
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn into_parts(self) -> (E, D) {
        (self.encoder, self.decoder)
    }
}

impl<E: Sizing, D> Sizing for Combined<E, D> {
    fn size(&self) -> Size {
        self.encoder.size()
    }
}

impl<T: ?Sized, E: Encoder<T>, D> Encoder<T> for Combined<E, D> {
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        self.encoder.get_size_from_value(value)
    }
    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        self.encoder.write(value, bytes, offset)
    }
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        self.encoder.encode(value)
    }
}

impl<T, E: Sizing, D: Decoder<T>> Decoder<T> for Combined<E, D> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        self.decoder.read(bytes, offset)
    }
    fn decode(&self, bytes: &[u8]) -> Result<T> {
        self.decoder.decode(bytes)
    }
}

/// Join an encoder and a decoder that agree on their declared size.
///
/// Fails with [`Error::IncompatibleSizes`] when one side is fixed and the
/// other variable, when fixed sizes differ, or when max sizes differ.
pub fn combine_codec<E: Sizing, D: Sizing>(encoder: E, decoder: D) -> Result<Combined<E, D>> {
    let (encoder_size, decoder_size) = (encoder.size(), decoder.size());
    if encoder_size != decoder_size {
        return Err(Error::IncompatibleSizes {
            encoder: encoder_size,
            decoder: decoder_size,
        });
    }
    tracing::trace!(size = %encoder_size, "combined encoder and decoder");
    Ok(Combined {
        encoder,
        decoder,
        description: None,
    })
}

/// Like [`combine_codec`], labelling the result with `description`.
pub fn combine_codec_with_description<E: Sizing, D: Sizing>(
    encoder: E,
    decoder: D,
    description: impl Into<String>,
) -> Result<Combined<E, D>> {
    let mut codec = combine_codec(encoder, decoder)?;
    codec.description = Some(description.into());
    Ok(codec)
}
