//! Value-level adapters that leave the wire format alone.
//!
//! `unmap` turns the new input type into the one the inner encoder expects;
//! `map` turns what the inner decoder produced into the new output type and
//! also sees the whole buffer and the read offset. The `try_*` forms take
//! closures returning [`Result`](crate::Result), for conversions that can
//! fail.
//!
//! ```rust
//! use codec_kit::{Decoder, Encoder, transform_codec, u8_codec};
//!
//! let codec = transform_codec(
//!     u8_codec(),
//!     |flag: &bool| u8::from(*flag),
//!     |byte: u8, _bytes: &[u8], _offset: usize| byte != 0,
//! );
//! assert_eq!(codec.encode(&true).unwrap(), [1]);
//! let flag: bool = codec.decode(&[0]).unwrap();
//! assert!(!flag);
//! ```

use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::Result;
use std::fmt;
use std::marker::PhantomData;

// ── Encoder ────────────────────────────────────────────────────────────────

/// An encoder that converts its input with `unmap` before delegating.
pub struct TransformEncoder<E, U, Old> {
    inner: E,
    unmap: U,
    _old: PhantomData<fn() -> Old>,
}

impl<E: Clone, U: Clone, Old> Clone for TransformEncoder<E, U, Old> {
    fn clone(&self) -> Self {
        TransformEncoder {
            inner: self.inner.clone(),
            unmap: self.unmap.clone(),
            _old: PhantomData,
        }
    }
}

impl<E: fmt::Debug, U, Old> fmt::Debug for TransformEncoder<E, U, Old> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformEncoder").field("inner", &self.inner).finish()
    }
}

pub fn transform_encoder<E, U, Old, New>(encoder: E, unmap: U) -> TransformEncoder<E, U, Old>
where
    E: Encoder<Old>,
    U: Fn(&New) -> Old,
    New: ?Sized,
{
    TransformEncoder {
        inner: encoder,
        unmap,
        _old: PhantomData,
    }
}

impl<E: Sizing, U, Old> Sizing for TransformEncoder<E, U, Old> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<New, Old, E, U> Encoder<New> for TransformEncoder<E, U, Old>
where
    New: ?Sized,
    E: Encoder<Old>,
    U: Fn(&New) -> Old,
{
    fn get_size_from_value(&self, value: &New) -> Result<usize> {
        match self.inner.size() {
            Size::Fixed(fixed_size) => Ok(fixed_size),
            Size::Variable { .. } => self.inner.get_size_from_value(&(self.unmap)(value)),
        }
    }

    fn write(&self, value: &New, bytes: &mut [u8], offset: usize) -> Result<usize> {
        self.inner.write(&(self.unmap)(value), bytes, offset)
    }
}

// ── Decoder ────────────────────────────────────────────────────────────────

/// A decoder that converts what the inner decoder produced with `map`.
pub struct TransformDecoder<D, M, Old> {
    inner: D,
    map: M,
    _old: PhantomData<fn() -> Old>,
}

impl<D: Clone, M: Clone, Old> Clone for TransformDecoder<D, M, Old> {
    fn clone(&self) -> Self {
        TransformDecoder {
            inner: self.inner.clone(),
            map: self.map.clone(),
            _old: PhantomData,
        }
    }
}

impl<D: fmt::Debug, M, Old> fmt::Debug for TransformDecoder<D, M, Old> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformDecoder").field("inner", &self.inner).finish()
    }
}

pub fn transform_decoder<D, M, Old, New>(decoder: D, map: M) -> TransformDecoder<D, M, Old>
where
    D: Decoder<Old>,
    M: Fn(Old, &[u8], usize) -> New,
{
    TransformDecoder {
        inner: decoder,
        map,
        _old: PhantomData,
    }
}

impl<D: Sizing, M, Old> Sizing for TransformDecoder<D, M, Old> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<New, Old, D, M> Decoder<New> for TransformDecoder<D, M, Old>
where
    D: Decoder<Old>,
    M: Fn(Old, &[u8], usize) -> New,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(New, usize)> {
        let (value, new_offset) = self.inner.read(bytes, offset)?;
        Ok(((self.map)(value, bytes, offset), new_offset))
    }
}

// ── Codec ──────────────────────────────────────────────────────────────────

/// Both adapters around a single codec.
pub struct TransformCodec<C, U, M, OldIn, OldOut> {
    inner: C,
    unmap: U,
    map: M,
    _old: PhantomData<fn() -> (OldIn, OldOut)>,
}

impl<C: Clone, U: Clone, M: Clone, OldIn, OldOut> Clone for TransformCodec<C, U, M, OldIn, OldOut> {
    fn clone(&self) -> Self {
        TransformCodec {
            inner: self.inner.clone(),
            unmap: self.unmap.clone(),
            map: self.map.clone(),
            _old: PhantomData,
        }
    }
}

impl<C: fmt::Debug, U, M, OldIn, OldOut> fmt::Debug for TransformCodec<C, U, M, OldIn, OldOut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformCodec").field("inner", &self.inner).finish()
    }
}

pub fn transform_codec<C, U, M, OldIn, OldOut, NewIn, NewOut>(
    codec: C,
    unmap: U,
    map: M,
) -> TransformCodec<C, U, M, OldIn, OldOut>
where
    C: Encoder<OldIn> + Decoder<OldOut>,
    U: Fn(&NewIn) -> OldIn,
    M: Fn(OldOut, &[u8], usize) -> NewOut,
    NewIn: ?Sized,
{
    TransformCodec {
        inner: codec,
        unmap,
        map,
        _old: PhantomData,
    }
}

/// Decoded values pass through unchanged.
pub type KeepDecoded<T> = fn(T, &[u8], usize) -> T;

fn keep_decoded<T>(value: T, _bytes: &[u8], _offset: usize) -> T {
    value
}

/// Transform only the encode side of `codec`; it still decodes to `Out`.
pub fn transform_codec_input<C, U, OldIn, NewIn, Out>(
    codec: C,
    unmap: U,
) -> TransformCodec<C, U, KeepDecoded<Out>, OldIn, Out>
where
    C: Encoder<OldIn> + Decoder<Out>,
    U: Fn(&NewIn) -> OldIn,
    NewIn: ?Sized,
{
    transform_codec(codec, unmap, keep_decoded::<Out> as KeepDecoded<Out>)
}

impl<C: Sizing, U, M, OldIn, OldOut> Sizing for TransformCodec<C, U, M, OldIn, OldOut> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<NewIn, C, U, M, OldIn, OldOut> Encoder<NewIn> for TransformCodec<C, U, M, OldIn, OldOut>
where
    NewIn: ?Sized,
    C: Encoder<OldIn>,
    U: Fn(&NewIn) -> OldIn,
{
    fn get_size_from_value(&self, value: &NewIn) -> Result<usize> {
        match self.inner.size() {
            Size::Fixed(fixed_size) => Ok(fixed_size),
            Size::Variable { .. } => self.inner.get_size_from_value(&(self.unmap)(value)),
        }
    }

    fn write(&self, value: &NewIn, bytes: &mut [u8], offset: usize) -> Result<usize> {
        self.inner.write(&(self.unmap)(value), bytes, offset)
    }
}

impl<NewOut, C, U, M, OldIn, OldOut> Decoder<NewOut> for TransformCodec<C, U, M, OldIn, OldOut>
where
    C: Decoder<OldOut>,
    M: Fn(OldOut, &[u8], usize) -> NewOut,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(NewOut, usize)> {
        let (value, new_offset) = self.inner.read(bytes, offset)?;
        Ok(((self.map)(value, bytes, offset), new_offset))
    }
}

// ── Fallible adapters ──────────────────────────────────────────────────────

/// Like [`TransformEncoder`], but `unmap` may reject a value.
pub struct TryTransformEncoder<E, U, Old> {
    inner: E,
    unmap: U,
    _old: PhantomData<fn() -> Old>,
}

impl<E: Clone, U: Clone, Old> Clone for TryTransformEncoder<E, U, Old> {
    fn clone(&self) -> Self {
        TryTransformEncoder {
            inner: self.inner.clone(),
            unmap: self.unmap.clone(),
            _old: PhantomData,
        }
    }
}

impl<E: fmt::Debug, U, Old> fmt::Debug for TryTransformEncoder<E, U, Old> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransformEncoder").field("inner", &self.inner).finish()
    }
}

/// Narrow the input of `encoder`. Errors returned by `unmap` surface from
/// `write`, `encode` and, for variable-size encoders, `get_size_from_value`.
pub fn try_transform_encoder<E, U, Old, New>(encoder: E, unmap: U) -> TryTransformEncoder<E, U, Old>
where
    E: Encoder<Old>,
    U: Fn(&New) -> Result<Old>,
    New: ?Sized,
{
    TryTransformEncoder {
        inner: encoder,
        unmap,
        _old: PhantomData,
    }
}

impl<E: Sizing, U, Old> Sizing for TryTransformEncoder<E, U, Old> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<New, Old, E, U> Encoder<New> for TryTransformEncoder<E, U, Old>
where
    New: ?Sized,
    E: Encoder<Old>,
    U: Fn(&New) -> Result<Old>,
{
    fn get_size_from_value(&self, value: &New) -> Result<usize> {
        match self.inner.size() {
            Size::Fixed(fixed_size) => Ok(fixed_size),
            Size::Variable { .. } => self.inner.get_size_from_value(&(self.unmap)(value)?),
        }
    }

    fn write(&self, value: &New, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let value = (self.unmap)(value)?;
        self.inner.write(&value, bytes, offset)
    }
}

/// Like [`TransformDecoder`], but `map` may reject what was decoded.
pub struct TryTransformDecoder<D, M, Old> {
    inner: D,
    map: M,
    _old: PhantomData<fn() -> Old>,
}

impl<D: Clone, M: Clone, Old> Clone for TryTransformDecoder<D, M, Old> {
    fn clone(&self) -> Self {
        TryTransformDecoder {
            inner: self.inner.clone(),
            map: self.map.clone(),
            _old: PhantomData,
        }
    }
}

impl<D: fmt::Debug, M, Old> fmt::Debug for TryTransformDecoder<D, M, Old> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransformDecoder").field("inner", &self.inner).finish()
    }
}

pub fn try_transform_decoder<D, M, Old, New>(decoder: D, map: M) -> TryTransformDecoder<D, M, Old>
where
    D: Decoder<Old>,
    M: Fn(Old, &[u8], usize) -> Result<New>,
{
    TryTransformDecoder {
        inner: decoder,
        map,
        _old: PhantomData,
    }
}

impl<D: Sizing, M, Old> Sizing for TryTransformDecoder<D, M, Old> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<New, Old, D, M> Decoder<New> for TryTransformDecoder<D, M, Old>
where
    D: Decoder<Old>,
    M: Fn(Old, &[u8], usize) -> Result<New>,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(New, usize)> {
        let (value, new_offset) = self.inner.read(bytes, offset)?;
        Ok(((self.map)(value, bytes, offset)?, new_offset))
    }
}

/// Both fallible adapters around a single codec.
///
/// ```rust
/// use codec_kit::{Decoder, Encoder, Error, try_transform_codec, u8_codec};
///
/// let codec = try_transform_codec(
///     u8_codec(),
///     |value: &u16| u8::try_from(*value).map_err(Error::custom),
///     |byte: u8, _bytes: &[u8], _offset: usize| {
///         if byte == 0 { Err(Error::custom("zero is reserved")) } else { Ok(u16::from(byte)) }
///     },
/// );
/// assert_eq!(codec.encode(&7).unwrap(), [7]);
/// assert!(codec.encode(&300).is_err());
/// let decoded: Result<u16, Error> = codec.decode(&[0]);
/// assert!(decoded.is_err());
/// ```
pub struct TryTransformCodec<C, U, M, OldIn, OldOut> {
    inner: C,
    unmap: U,
    map: M,
    _old: PhantomData<fn() -> (OldIn, OldOut)>,
}

impl<C: Clone, U: Clone, M: Clone, OldIn, OldOut> Clone for TryTransformCodec<C, U, M, OldIn, OldOut> {
    fn clone(&self) -> Self {
        TryTransformCodec {
            inner: self.inner.clone(),
            unmap: self.unmap.clone(),
            map: self.map.clone(),
            _old: PhantomData,
        }
    }
}

impl<C: fmt::Debug, U, M, OldIn, OldOut> fmt::Debug for TryTransformCodec<C, U, M, OldIn, OldOut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryTransformCodec").field("inner", &self.inner).finish()
    }
}

pub fn try_transform_codec<C, U, M, OldIn, OldOut, NewIn, NewOut>(
    codec: C,
    unmap: U,
    map: M,
) -> TryTransformCodec<C, U, M, OldIn, OldOut>
where
    C: Encoder<OldIn> + Decoder<OldOut>,
    U: Fn(&NewIn) -> Result<OldIn>,
    M: Fn(OldOut, &[u8], usize) -> Result<NewOut>,
    NewIn: ?Sized,
{
    TryTransformCodec {
        inner: codec,
        unmap,
        map,
        _old: PhantomData,
    }
}

impl<C: Sizing, U, M, OldIn, OldOut> Sizing for TryTransformCodec<C, U, M, OldIn, OldOut> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<NewIn, C, U, M, OldIn, OldOut> Encoder<NewIn> for TryTransformCodec<C, U, M, OldIn, OldOut>
where
    NewIn: ?Sized,
    C: Encoder<OldIn>,
    U: Fn(&NewIn) -> Result<OldIn>,
{
    fn get_size_from_value(&self, value: &NewIn) -> Result<usize> {
        match self.inner.size() {
            Size::Fixed(fixed_size) => Ok(fixed_size),
            Size::Variable { .. } => self.inner.get_size_from_value(&(self.unmap)(value)?),
        }
    }

    fn write(&self, value: &NewIn, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let value = (self.unmap)(value)?;
        self.inner.write(&value, bytes, offset)
    }
}

impl<NewOut, C, U, M, OldIn, OldOut> Decoder<NewOut> for TryTransformCodec<C, U, M, OldIn, OldOut>
where
    C: Decoder<OldOut>,
    M: Fn(OldOut, &[u8], usize) -> Result<NewOut>,
{
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(NewOut, usize)> {
        let (value, new_offset) = self.inner.read(bytes, offset)?;
        Ok(((self.map)(value, bytes, offset)?, new_offset))
    }
}

// ── Legacy map aliases ─────────────────────────────────────────────────────

#[deprecated(note = "use `transform_encoder` instead")]
pub fn map_encoder<E, U, Old, New>(encoder: E, unmap: U) -> TransformEncoder<E, U, Old>
where
    E: Encoder<Old>,
    U: Fn(&New) -> Old,
    New: ?Sized,
{
    transform_encoder(encoder, unmap)
}

/// Like [`transform_decoder`], but `map` only receives the decoded value.
#[deprecated(note = "use `transform_decoder` instead")]
pub fn map_decoder<D, M, Old, New>(
    decoder: D,
    map: M,
) -> TransformDecoder<D, impl Fn(Old, &[u8], usize) -> New, Old>
where
    D: Decoder<Old>,
    M: Fn(Old) -> New,
{
    transform_decoder(decoder, move |value: Old, _bytes: &[u8], _offset: usize| map(value))
}

#[deprecated(note = "use `transform_codec` instead")]
pub fn map_codec<C, U, M, OldIn, OldOut, NewIn, NewOut>(
    codec: C,
    unmap: U,
    map: M,
) -> TransformCodec<C, U, impl Fn(OldOut, &[u8], usize) -> NewOut, OldIn, OldOut>
where
    C: Encoder<OldIn> + Decoder<OldOut>,
    U: Fn(&NewIn) -> OldIn,
    M: Fn(OldOut) -> NewOut,
    NewIn: ?Sized,
{
    transform_codec(
        codec,
        unmap,
        move |value: OldOut, _bytes: &[u8], _offset: usize| map(value),
    )
}
