//! Remap the declared size of a codec with an arbitrary function.
//!
//! The bytes the inner codec writes are untouched; only the size callers see
//! (and therefore the buffer `encode` allocates) changes.

use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::{Error, Result};
use std::fmt;

/// A codec whose declared size goes through a resize function.
#[derive(Clone)]
pub struct Resize<C, F> {
    inner: C,
    resize: F,
    size: Size,
}

impl<C: fmt::Debug, F> fmt::Debug for Resize<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resize")
            .field("inner", &self.inner)
            .field("size", &self.size)
            .finish()
    }
}

impl<C, F> Resize<C, F> {
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, F> Resize<C, F>
where
    C: Sizing,
    F: Fn(i64) -> i64,
{
    fn new(inner: C, resize: F, codec: &'static str) -> Result<Self> {
        let size = match inner.size() {
            Size::Fixed(fixed_size) => {
                let resized = checked_length(resize(to_signed(fixed_size)), codec)?;
                tracing::debug!(from = fixed_size, to = resized, "{codec} remapped fixed size");
                Size::Fixed(resized)
            }
            variable => variable,
        };
        Ok(Resize {
            inner,
            resize,
            size,
        })
    }
}

fn to_signed(length: usize) -> i64 {
    i64::try_from(length).unwrap_or(i64::MAX)
}

fn checked_length(bytes_length: i64, codec: &'static str) -> Result<usize> {
    usize::try_from(bytes_length).map_err(|_| Error::ExpectedPositiveByteLength { codec, bytes_length })
}

/// Remap the size of `encoder`.
///
/// Fixed sizes are remapped once, here; variable sizes on every
/// `get_size_from_value` call. A negative result fails with
/// [`Error::ExpectedPositiveByteLength`].
pub fn resize_encoder<E, F>(encoder: E, resize: F) -> Result<Resize<E, F>>
where
    E: Sizing,
    F: Fn(i64) -> i64,
{
    Resize::new(encoder, resize, "resize_encoder")
}

/// Remap the size of `decoder`. Variable-size decoders are left as they are.
pub fn resize_decoder<D, F>(decoder: D, resize: F) -> Result<Resize<D, F>>
where
    D: Sizing,
    F: Fn(i64) -> i64,
{
    Resize::new(decoder, resize, "resize_decoder")
}

pub fn resize_codec<C, F>(codec: C, resize: F) -> Result<Resize<C, F>>
where
    C: Sizing,
    F: Fn(i64) -> i64,
{
    Resize::new(codec, resize, "resize_codec")
}

/// Grow the size of `inner` by `extra` bytes. Cannot go negative.
pub(crate) fn grow<C: Sizing>(
    inner: C,
    extra: usize,
) -> Resize<C, impl Fn(i64) -> i64 + Clone + Send + Sync> {
    let signed_extra = to_signed(extra);
    let resize = move |size: i64| size.saturating_add(signed_extra);
    let size = match inner.size() {
        Size::Fixed(fixed_size) => Size::Fixed(fixed_size.saturating_add(extra)),
        variable => variable,
    };
    Resize {
        inner,
        resize,
        size,
    }
}

impl<C, F> Sizing for Resize<C, F> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<T, E, F> Encoder<T> for Resize<E, F>
where
    T: ?Sized,
    E: Encoder<T>,
    F: Fn(i64) -> i64,
{
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        match self.size {
            Size::Fixed(fixed_size) => Ok(fixed_size),
            Size::Variable { .. } => {
                let size = self.inner.get_size_from_value(value)?;
                checked_length((self.resize)(to_signed(size)), "resize_encoder")
            }
        }
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        self.inner.write(value, bytes, offset)
    }
}

impl<T, D: Decoder<T>, F> Decoder<T> for Resize<D, F> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        self.inner.read(bytes, offset)
    }
}
