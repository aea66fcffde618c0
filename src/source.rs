//! The input half: [`ByteSource`] and a slice-backed implementation.
use super::{StreamError, StreamResult};

/// A saved read position, see [`ByteSource::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(usize);

impl Mark {
    /// The absolute read position this mark refers to
    #[inline]
    pub fn position(self) -> usize {
        self.0
    }
}

/// Decoders read data from the implementations of this trait.
pub trait ByteSource {
    /// Fill the whole `buf` with the next bytes and advance past them.
    ///
    /// When fewer than `buf.len()` bytes are available nothing is consumed and
    /// `Err(StreamError::UnexpectedEof)` is returned.
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<()>;
    /// Return the next byte without advancing.
    fn peek(&self) -> StreamResult<u8>;
    /// Return the current read position.
    fn position(&self) -> usize;
    /// Move the read position to an absolute offset.
    fn seek(&mut self, pos: usize) -> StreamResult<()>;
    /// Return the number of bytes which can be read without blocking.
    fn available(&self) -> usize;
    /// Read and consume a single byte.
    #[inline]
    fn read_byte(&mut self) -> StreamResult<u8> {
        let byte = self.peek()?;
        self.read(&mut [0u8])?;
        Ok(byte)
    }
    /// Read and consume exactly `N` bytes.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.read(&mut buf)?;
        Ok(buf)
    }
    /// Snapshot the current read position.
    #[inline]
    fn mark(&self) -> Mark {
        Mark(self.position())
    }
    /// Go back to a position previously saved with [`ByteSource::mark`].
    #[inline]
    fn reset(&mut self, mark: Mark) -> StreamResult<()> {
        self.seek(mark.0)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &'_ mut T {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        (**self).read(buf)
    }
    #[inline]
    fn peek(&self) -> StreamResult<u8> {
        (**self).peek()
    }
    #[inline]
    fn position(&self) -> usize {
        (**self).position()
    }
    #[inline]
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        (**self).seek(pos)
    }
    #[inline]
    fn available(&self) -> usize {
        (**self).available()
    }
    #[inline]
    fn read_byte(&mut self) -> StreamResult<u8> {
        (**self).read_byte()
    }
    #[inline]
    fn mark(&self) -> Mark {
        (**self).mark()
    }
    #[inline]
    fn reset(&mut self, mark: Mark) -> StreamResult<()> {
        (**self).reset(mark)
    }
}

/// A reader over a borrowed slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceReader<'a> {
    input: &'a [u8],
    index: usize
}

impl<'a> SliceReader<'a> {
    /// Create new instance reading from the beginning of `input`
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader { input, index: 0 }
    }
    /// Return the unread portion of the input slice
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.index..]
    }
    /// Return the whole input slice
    pub fn into_inner(self) -> &'a [u8] {
        self.input
    }
}

impl ByteSource for SliceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let end = self.index.checked_add(buf.len())
                  .ok_or(StreamError::UnexpectedEof)?;
        let chunk = self.input.get(self.index..end)
                    .ok_or(StreamError::UnexpectedEof)?;
        buf.copy_from_slice(chunk);
        self.index = end;
        Ok(())
    }

    #[inline]
    fn peek(&self) -> StreamResult<u8> {
        self.input.get(self.index).copied()
        .ok_or(StreamError::UnexpectedEof)
    }

    #[inline]
    fn read_byte(&mut self) -> StreamResult<u8> {
        let byte = self.peek()?;
        self.index += 1;
        Ok(byte)
    }

    #[inline]
    fn position(&self) -> usize {
        self.index
    }

    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.input.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.index = pos;
        Ok(())
    }

    #[inline]
    fn available(&self) -> usize {
        self.input.len() - self.index
    }
}
