//! # Bounded Byte Cursor
//!
//! This module provides the two leaf primitives of the decoder: fixed-width
//! big-endian integer reads ([`BeInt`]) and the [`PayloadReader`] cursor that
//! walks a bounded byte region.
//!
//! ## Contract
//!
//! Every operation either advances the cursor by exactly the consumed span
//! and succeeds, or leaves the cursor untouched and fails with a
//! `Corrupted` error. A `PayloadReader` can therefore be copied freely to
//! probe ahead without committing the advance.
//!
//! ## Bounds Checks
//!
//! The overrun test in [`PayloadReader::skip`] guards every read in the
//! crate; all higher-level operations funnel through it. Building with the
//! `unchecked-reads` feature compiles the test out, which removes one
//! branch from the hot path at the cost of undefined behavior on malformed
//! input. Well-formed files never take the failing branch, so the feature
//! cannot change their behavior.
//!
//! ## Endianness
//!
//! The disk format is fixed big-endian; [`BeInt::from_be_slice`] byte-swaps
//! on little-endian hosts via `from_be_bytes`. Integers are always decoded
//! from byte slices, never by casting the byte pointer to an integer
//! pointer, so unaligned positions are fine.

use eyre::Result;

/// A fixed-width unsigned integer decodable from big-endian bytes.
///
/// Implemented for the four widths the format uses: `u8`, `u16`, `u32`,
/// `u64`. Callers always hand `from_be_slice` exactly [`WIDTH`](Self::WIDTH)
/// bytes; the slice length is validated by the cursor before the call.
pub trait BeInt: Copy {
    const WIDTH: usize;

    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Widens to `u64` for length arithmetic that must not truncate.
    fn into_u64(self) -> u64;
}

macro_rules! be_int {
    ($($ty:ty),*) => {
        $(
            impl BeInt for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_be_slice(bytes: &[u8]) -> Self {
                    // INVARIANT: the cursor validated the length before handing
                    // the slice over.
                    Self::from_be_bytes(bytes.try_into().unwrap())
                }

                #[inline]
                fn into_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

be_int!(u8, u16, u32, u64);

/// A cursor over a bounded byte region.
///
/// Carries the remaining bytes of the region and advances by typed reads and
/// offset skips. Constructed from a framed region as `(payload, declared
/// length)` — the slice already is exactly that pair.
#[derive(Debug, Clone, Copy)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Advances past `n` bytes, returning the bytes skipped over.
    ///
    /// Fails with `Corrupted` if fewer than `n` bytes remain.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<&'a [u8]> {
        #[cfg(not(feature = "unchecked-reads"))]
        if n > self.data.len() {
            corrupted!(
                "read of {} bytes overruns region with {} remaining",
                n,
                self.data.len()
            );
        }

        debug_assert!(n <= self.data.len());
        // SAFETY: `n <= self.data.len()` is checked above. With the
        // `unchecked-reads` feature the check compiles out and the caller
        // contract (well-formed file) guarantees the bound instead.
        let (head, tail) = unsafe {
            (
                self.data.get_unchecked(..n),
                self.data.get_unchecked(n..),
            )
        };
        self.data = tail;
        Ok(head)
    }

    /// Reads a fixed-width big-endian unsigned integer and advances past it.
    #[inline]
    pub fn read_int<T: BeInt>(&mut self) -> Result<T> {
        let bytes = self.skip(T::WIDTH)?;
        Ok(T::from_be_slice(bytes))
    }

    /// Skips `offset` bytes, then reads an integer.
    ///
    /// On failure the cursor has not moved.
    #[inline]
    pub fn read_int_at<T: BeInt>(&mut self, offset: usize) -> Result<T> {
        let mut probe = *self;
        probe.skip(offset)?;
        let value = probe.read_int()?;
        *self = probe;
        Ok(value)
    }

    /// Returns `n` bytes starting at the cursor and advances past them.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.skip(n)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        !self.data.is_empty()
    }

    pub(crate) fn rest(&self) -> &'a [u8] {
        self.data
    }
}
