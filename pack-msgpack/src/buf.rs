//! Wrappers selecting the `bin` family and C-style string buffers.
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::vec::Vec;

use core::ops::Deref;

use pack_stream::{ByteSink, ByteSource};

use crate::decode::{attempt, read_bin_len, read_header_available, read_header_within, read_str_len, Decode};
use crate::encode::{write_bin, write_str, Encode};
use crate::error::{Error, Result};

/// Borrowed bytes encoded as `bin` instead of an array of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bin<'a>(pub &'a [u8]);

impl Deref for Bin<'_> {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        self.0
    }
}

impl Encode for Bin<'_> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_bin(out, self.0)
    }
}

/// Owned bytes transferred as `bin`.
#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteBuf(pub Vec<u8>);

#[cfg(any(feature = "std", feature = "alloc"))]
impl ByteBuf {
    pub fn new() -> Self {
        ByteBuf(Vec::new())
    }
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl Deref for ByteBuf {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        ByteBuf(bytes)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl Encode for ByteBuf {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_bin(out, &self.0)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl Decode for ByteBuf {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        attempt(src, |src| {
            let len = read_header_available(src, read_bin_len, 1)?;
            let mut bytes = Vec::new();
            bytes.resize(len, 0);
            src.read(&mut bytes)?;
            self.0 = bytes;
            Ok(())
        })
    }
}

/// A string decoded into a caller-supplied byte buffer.
///
/// The buffer must hold the string followed by a `0` terminator, so a string
/// of `len` bytes needs a buffer of at least `len + 1` bytes.
///
/// ```
/// use pack_msgpack::{from_reader, StrBuf, Error};
/// use pack_stream::SliceReader;
///
/// let mut storage = [0xffu8; 4];
/// let mut text = StrBuf::new(&mut storage);
/// from_reader(SliceReader::new(b"\xa3abc"), &mut text).unwrap();
/// assert_eq!(text.as_str(), "abc");
/// assert_eq!(text.as_bytes_with_nul(), b"abc\0");
/// assert_eq!(from_reader(SliceReader::new(b"\xa4abcd"), &mut text), Err(Error::SizeLimitExceeded));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct StrBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> StrBuf<'a> {
    /// Create an empty string over `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        StrBuf { buf, len: 0 }
    }
    /// Return the string length in bytes, without the terminator.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Return the length of the longest string which fits.
    pub fn capacity(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
    /// Return the string bytes including the terminator.
    ///
    /// Empty when the buffer has no room even for the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        let end = (self.len + 1).min(self.buf.len());
        &self.buf[..end]
    }
    /// Destruct into the underlying buffer
    pub fn into_buf(self) -> &'a mut [u8] {
        self.buf
    }
}

impl Encode for StrBuf<'_> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_str(out, self.as_str())
    }
}

impl Decode for StrBuf<'_> {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let capacity = self.buf.len().checked_sub(1).ok_or(Error::SizeLimitExceeded)?;
        let buf = &mut *self.buf;
        let res = attempt(src, |src| {
            let len = read_header_within(src, read_str_len, capacity)?;
            src.read(&mut buf[..len])?;
            core::str::from_utf8(&buf[..len])?;
            Ok(len)
        });
        match res {
            Ok(len) => {
                buf[len] = 0;
                self.len = len;
                Ok(())
            }
            Err(Error::InvalidUtf8) => {
                // the previous content was overwritten
                buf[0] = 0;
                self.len = 0;
                Err(Error::InvalidUtf8)
            }
            Err(err) => Err(err)
        }
    }
}
