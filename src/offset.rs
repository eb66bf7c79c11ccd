//! Relocate the cursor around an inner codec.
//!
//! An [`OffsetConfig`] can move the offset before the inner codec runs
//! (`pre_offset`) and change the offset reported after it (`post_offset`).
//! Both callbacks see the whole buffer, so they can address it relatively or
//! absolutely, and can wrap around it with `wrap_bytes`.
//!
//! ```rust
//! use codec_kit::{Encoder, OffsetConfig, offset_encoder, u8_codec};
//!
//! // Write the byte at the last position of the buffer.
//! let encoder = offset_encoder(u8_codec(), OffsetConfig::new().pre_offset(|scope| scope.wrap_bytes(-1)));
//! let mut buffer = [0u8; 4];
//! encoder.write(&42, &mut buffer, 0).unwrap();
//! assert_eq!(buffer, [0, 0, 0, 42]);
//! ```

use crate::codec::{Decoder, Encoder, Size, Sizing};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Floor modulo of `offset` over `bytes_length`; always 0 for an empty buffer.
pub fn wrap_offset(offset: i64, bytes_length: usize) -> i64 {
    match i64::try_from(bytes_length) {
        Ok(0) | Err(_) => 0,
        Ok(length) => offset.rem_euclid(length),
    }
}

/// What a `pre_offset` callback sees.
#[derive(Debug, Clone, Copy)]
pub struct PreOffsetScope<'a> {
    /// The entire buffer.
    pub bytes: &'a [u8],
    /// The offset the combinator was called with.
    pub pre_offset: i64,
}

impl PreOffsetScope<'_> {
    pub fn wrap_bytes(&self, offset: i64) -> i64 {
        wrap_offset(offset, self.bytes.len())
    }
}

/// What a `post_offset` callback sees.
#[derive(Debug, Clone, Copy)]
pub struct PostOffsetScope<'a> {
    /// The entire buffer.
    pub bytes: &'a [u8],
    /// The offset the combinator was called with.
    pub pre_offset: i64,
    /// The offset the inner codec was called with.
    pub new_pre_offset: i64,
    /// The offset the inner codec returned.
    pub post_offset: i64,
}

impl PostOffsetScope<'_> {
    pub fn wrap_bytes(&self, offset: i64) -> i64 {
        wrap_offset(offset, self.bytes.len())
    }
}

type PreOffsetFn = dyn Fn(&PreOffsetScope<'_>) -> i64 + Send + Sync;
type PostOffsetFn = dyn Fn(&PostOffsetScope<'_>) -> i64 + Send + Sync;

/// Optional offset callbacks. A missing callback passes the offset through.
#[derive(Clone, Default)]
pub struct OffsetConfig {
    pre_offset: Option<Arc<PreOffsetFn>>,
    post_offset: Option<Arc<PostOffsetFn>>,
}

impl OffsetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_offset<F>(mut self, pre_offset: F) -> Self
    where
        F: Fn(&PreOffsetScope<'_>) -> i64 + Send + Sync + 'static,
    {
        self.pre_offset = Some(Arc::new(pre_offset));
        self
    }

    pub fn post_offset<F>(mut self, post_offset: F) -> Self
    where
        F: Fn(&PostOffsetScope<'_>) -> i64 + Send + Sync + 'static,
    {
        self.post_offset = Some(Arc::new(post_offset));
        self
    }

    /// Run the pre-offset callback and check the result against the buffer.
    fn apply_pre(&self, bytes: &[u8], pre_offset: usize, codec: &'static str) -> Result<usize> {
        let pre_offset = to_signed(pre_offset);
        let new_pre_offset = match &self.pre_offset {
            Some(callback) => callback(&PreOffsetScope { bytes, pre_offset }),
            None => pre_offset,
        };
        check_offset(new_pre_offset, bytes.len(), codec)
    }

    /// Run the post-offset callback and check the result against the buffer.
    fn apply_post(
        &self,
        bytes: &[u8],
        pre_offset: usize,
        new_pre_offset: usize,
        post_offset: usize,
        codec: &'static str,
    ) -> Result<usize> {
        let post_offset = to_signed(post_offset);
        let new_post_offset = match &self.post_offset {
            Some(callback) => callback(&PostOffsetScope {
                bytes,
                pre_offset: to_signed(pre_offset),
                new_pre_offset: to_signed(new_pre_offset),
                post_offset,
            }),
            None => post_offset,
        };
        check_offset(new_post_offset, bytes.len(), codec)
    }
}

impl fmt::Debug for OffsetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetConfig")
            .field("pre_offset", &self.pre_offset.is_some())
            .field("post_offset", &self.post_offset.is_some())
            .finish()
    }
}

fn to_signed(offset: usize) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

fn check_offset(offset: i64, bytes_length: usize, codec: &'static str) -> Result<usize> {
    match usize::try_from(offset) {
        Ok(checked) if checked <= bytes_length => Ok(checked),
        _ => Err(Error::OffsetOutOfRange {
            codec,
            offset,
            bytes_length,
        }),
    }
}

/// A codec whose read and write cursor is moved by an [`OffsetConfig`].
#[derive(Debug, Clone)]
pub struct Offset<C> {
    inner: C,
    config: OffsetConfig,
}

impl<C> Offset<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn config(&self) -> &OffsetConfig {
        &self.config
    }
}

pub fn offset_encoder<E: Sizing>(encoder: E, config: OffsetConfig) -> Offset<E> {
    tracing::trace!(?config, "offset encoder");
    Offset {
        inner: encoder,
        config,
    }
}

pub fn offset_decoder<D: Sizing>(decoder: D, config: OffsetConfig) -> Offset<D> {
    tracing::trace!(?config, "offset decoder");
    Offset {
        inner: decoder,
        config,
    }
}

pub fn offset_codec<C: Sizing>(codec: C, config: OffsetConfig) -> Offset<C> {
    tracing::trace!(?config, "offset codec");
    Offset {
        inner: codec,
        config,
    }
}

impl<C: Sizing> Sizing for Offset<C> {
    fn size(&self) -> Size {
        self.inner.size()
    }
}

impl<T: ?Sized, E: Encoder<T>> Encoder<T> for Offset<E> {
    fn get_size_from_value(&self, value: &T) -> Result<usize> {
        self.inner.get_size_from_value(value)
    }

    fn write(&self, value: &T, bytes: &mut [u8], offset: usize) -> Result<usize> {
        let new_pre_offset = self.config.apply_pre(bytes, offset, "offset_encoder")?;
        let post_offset = self.inner.write(value, bytes, new_pre_offset)?;
        self.config
            .apply_post(bytes, offset, new_pre_offset, post_offset, "offset_encoder")
    }
}

impl<T, D: Decoder<T>> Decoder<T> for Offset<D> {
    fn read(&self, bytes: &[u8], offset: usize) -> Result<(T, usize)> {
        let new_pre_offset = self.config.apply_pre(bytes, offset, "offset_decoder")?;
        let (value, post_offset) = self.inner.read(bytes, new_pre_offset)?;
        let new_post_offset =
            self.config
                .apply_post(bytes, offset, new_pre_offset, post_offset, "offset_decoder")?;
        Ok((value, new_post_offset))
    }
}
