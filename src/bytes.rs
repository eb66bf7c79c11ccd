//! Byte-slice helpers shared by the combinators.

use crate::error::{Error, Result};
use std::borrow::Cow;

/// Concatenate `chunks`, borrowing instead of copying when at most one of
/// them is non-empty.
pub fn merge_bytes<'a>(chunks: &[&'a [u8]]) -> Cow<'a, [u8]> {
    let mut non_empty = chunks.iter().filter(|chunk| !chunk.is_empty());
    match (non_empty.next(), non_empty.next()) {
        (None, _) => Cow::Borrowed(&[]),
        (Some(only), None) => Cow::Borrowed(*only),
        _ => Cow::Owned(chunks.concat()),
    }
}

/// Right-pad `bytes` with zeros up to `length`. Longer input is returned as is.
pub fn pad_bytes(bytes: &[u8], length: usize) -> Cow<'_, [u8]> {
    if bytes.len() >= length {
        return Cow::Borrowed(bytes);
    }
    let mut padded = Vec::with_capacity(length);
    padded.extend_from_slice(bytes);
    padded.resize(length, 0);
    Cow::Owned(padded)
}

/// Truncate or zero-pad `bytes` so the result is exactly `length` bytes long.
pub fn fix_bytes(bytes: &[u8], length: usize) -> Cow<'_, [u8]> {
    if bytes.len() >= length {
        Cow::Borrowed(&bytes[..length])
    } else {
        pad_bytes(bytes, length)
    }
}

/// Whether `needle` occurs in `haystack` exactly at `offset`.
pub fn contains_bytes(haystack: &[u8], needle: &[u8], offset: usize) -> bool {
    offset
        .checked_add(needle.len())
        .and_then(|end| haystack.get(offset..end))
        .is_some_and(|window| window == needle)
}

/// Position of the first occurrence of `needle` in `haystack`.
///
/// An empty haystack never matches, not even an empty needle.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.is_empty() {
        return None;
    }
    match needle {
        [byte] => memchr::memchr(*byte, haystack),
        _ => memchr::memmem::find(haystack, needle),
    }
}

/// Copy `source` into `target` at `offset`, returning the offset after it.
pub(crate) fn write_bytes(
    target: &mut [u8],
    offset: usize,
    source: &[u8],
    codec: &'static str,
) -> Result<usize> {
    let end = offset.saturating_add(source.len());
    let bytes_length = target.len();
    let window = target.get_mut(offset..end).ok_or(Error::BufferTooSmall {
        codec,
        expected: end,
        bytes_length,
    })?;
    window.copy_from_slice(source);
    Ok(end)
}

/// Fail with [`Error::NotEnoughBytes`] unless `offset` lies within `bytes`
/// and `expected` bytes remain after it.
pub(crate) fn ensure_remaining(
    bytes: &[u8],
    offset: usize,
    expected: usize,
    codec: &'static str,
) -> Result<()> {
    let remaining = bytes.len().saturating_sub(offset);
    if offset > bytes.len() || remaining < expected {
        return Err(Error::NotEnoughBytes {
            codec,
            expected,
            bytes_length: remaining,
        });
    }
    Ok(())
}
