//! Byte sink and source traits shared by the `pack` encoders and decoders.
//!
//! [`ByteSink`] is an appendable, seekable output channel and [`ByteSource`] a
//! peekable, seekable input channel which can report how many bytes are
//! immediately available. Both report failures with [`StreamError`].
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

use core::fmt;

mod foreign;
mod source;

pub use source::{ByteSource, Mark, SliceReader};

pub type StreamResult<T> = Result<T, StreamError>;

/// An error returned by [`ByteSink`] and [`ByteSource`] implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreamError {
    /// Sink is full
    BufferFull,
    /// Source has no more bytes
    UnexpectedEof,
    /// Seek target is outside of the addressable region
    InvalidSeek,
    /// The underlying I/O object reported an error
    Io,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamError::BufferFull => "buffer is full",
            StreamError::UnexpectedEof => "unexpected end of input",
            StreamError::InvalidSeek => "seek position out of range",
            StreamError::Io => "stream I/O failure",
        })
    }
}

impl core::error::Error for StreamError {}

/// Encoders append data to the implementations of this trait.
pub trait ByteSink {
    /// Append all bytes from `buf`.
    ///
    /// When over capacity return `Err(StreamError::BufferFull)`.
    fn write(&mut self, buf: &[u8]) -> StreamResult<()>;
    /// Append a single `byte`.
    ///
    /// When over capacity return `Err(StreamError::BufferFull)`.
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.write(core::slice::from_ref(&byte))
    }
    /// Append a string.
    ///
    /// When over capacity return `Err(StreamError::BufferFull)`.
    #[inline]
    fn write_str(&mut self, s: &str) -> StreamResult<()> {
        self.write(s.as_bytes())
    }
    /// Return the current write position.
    fn position(&self) -> usize;
    /// Move the write position to an absolute offset.
    ///
    /// Appendable buffers drop everything written at and after `pos`.
    fn seek(&mut self, pos: usize) -> StreamResult<()>;
    /// Push any pending output to the underlying destination.
    #[inline]
    fn flush(&mut self) -> StreamResult<()> {
        Ok(())
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &'_ mut T {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        (**self).write(buf)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        (**self).write_byte(byte)
    }
    #[inline]
    fn write_str(&mut self, s: &str) -> StreamResult<()> {
        (**self).write_str(s)
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
    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }
}

/// A sink appending to a borrowed byte slice.
#[derive(Debug, PartialEq)]
pub struct SliceWriter<'a> {
    pub buf: &'a mut [u8],
    pub len: usize
}

impl AsRef<[u8]> for SliceWriter<'_> {
    /// Return the bytes written so far
    fn as_ref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsMut<[u8]> for SliceWriter<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceWriter { buf, len: 0 }
    }
    /// Return the number of bytes written
    pub fn len(&self) -> usize {
        self.len
    }
    /// Return `true` if nothing was written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Return the length of the whole slice
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
    /// Return the number of bytes which can still be written
    pub fn rem_capacity(&self) -> usize {
        self.buf.len() - self.len
    }
    /// Forget the populated portion, the whole capacity becomes available again
    pub fn clear(&mut self) {
        self.len = 0;
    }
    /// Split off the written bytes, keeping the slice's lifetime, and return a
    /// writer over the unused tail.
    pub fn split(self) -> (&'a mut[u8], Self) {
        let (res, buf) = self.buf.split_at_mut(self.len);
        (res, Self { buf, len: 0 })
    }
    /// Give back the whole slice
    pub fn into_buf(self) -> &'a mut [u8] {
        self.buf
    }
}

impl ByteSink for SliceWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        let end = self.len + buf.len();
        match self.buf.get_mut(self.len..end) {
            Some(chunk) => {
                chunk.copy_from_slice(buf);
                self.len = end;
                Ok(())
            }
            None => Err(StreamError::BufferFull)
        }
    }

    #[inline]
    fn position(&self) -> usize {
        self.len
    }

    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len {
            return Err(StreamError::InvalidSeek)
        }
        self.len = pos;
        Ok(())
    }
}
