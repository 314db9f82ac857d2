//! Sequential byte sources consumed by the decoder.
//!
//! The decoder never seeks. Every read is "exactly N bytes or fail", and gaps are
//! skipped by reading and discarding.

use crate::error::BitmapError;

/// Size of the scratch buffer used by the default [`ByteSource::skip`].
const SKIP_CHUNK: usize = 1024;

/// A forward-only source of bytes.
///
/// Implemented for `&[u8]` (advancing the slice like [`std::io::Read`] does) and,
/// with the `std` feature, for any reader wrapped in [`ReadSource`].
pub trait ByteSource {
    /// Fill `buf` completely or fail.
    ///
    /// On failure the number of bytes consumed is unspecified.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BitmapError>;

    /// Discard exactly `n` bytes.
    ///
    /// The default reads through a fixed-size stack buffer, so an adversarial gap
    /// size never turns into a large allocation.
    fn skip(&mut self, mut n: u64) -> Result<(), BitmapError> {
        let mut scratch = [0u8; SKIP_CHUNK];
        while n > 0 {
            let chunk = n.min(SKIP_CHUNK as u64) as usize;
            self.read_exact(&mut scratch[..chunk])?;
            n -= chunk as u64;
        }
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        let n = buf.len();
        let (head, tail) = self
            .split_at_checked(n)
            .ok_or(BitmapError::UnexpectedEof)?;
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    fn skip(&mut self, n: u64) -> Result<(), BitmapError> {
        let n = usize::try_from(n).map_err(|_| BitmapError::UnexpectedEof)?;
        *self = self.get(n..).ok_or(BitmapError::UnexpectedEof)?;
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        (**self).read_exact(buf)
    }

    fn skip(&mut self, n: u64) -> Result<(), BitmapError> {
        (**self).skip(n)
    }
}

/// Adapts a [`std::io::Read`] into a [`ByteSource`].
///
/// I/O errors (including a short read) are returned as [`BitmapError::Io`]
/// without reinterpretation. The wrapped reader is not closed or otherwise
/// managed; get it back with [`ReadSource::into_inner`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for ReadSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        std::io::Read::read_exact(&mut self.inner, buf)?;
        Ok(())
    }
}
