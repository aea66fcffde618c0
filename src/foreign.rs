/// Implementation for foreign types
#[cfg(feature = "std")]
use std::{vec::Vec, collections::VecDeque, io::Cursor};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{vec::Vec, collections::VecDeque};

#[allow(unused_imports)]
use super::*;

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl ByteSink for Vec<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl ByteSink for VecDeque<u8> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend(buf.iter().copied());
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push_back(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T> ByteSink for Cursor<T>
    where Cursor<T>: std::io::Write
{
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        std::io::Write::write_all(self, buf).map_err(|err| match err.kind() {
            std::io::ErrorKind::WriteZero => StreamError::BufferFull,
            _ => StreamError::Io
        })
    }
    #[inline]
    fn position(&self) -> usize {
        Cursor::position(self) as usize
    }
    #[inline]
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        self.set_position(pos as u64);
        Ok(())
    }
    fn flush(&mut self) -> StreamResult<()> {
        std::io::Write::flush(self).map_err(|_| StreamError::Io)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let start = ByteSource::position(self);
        let end = start.checked_add(buf.len())
                  .ok_or(StreamError::UnexpectedEof)?;
        let chunk = self.get_ref().as_ref().get(start..end)
                    .ok_or(StreamError::UnexpectedEof)?;
        buf.copy_from_slice(chunk);
        self.set_position(end as u64);
        Ok(())
    }
    fn peek(&self) -> StreamResult<u8> {
        self.get_ref().as_ref().get(ByteSource::position(self)).copied()
        .ok_or(StreamError::UnexpectedEof)
    }
    #[inline]
    fn position(&self) -> usize {
        Cursor::position(self) as usize
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.get_ref().as_ref().len() {
            return Err(StreamError::InvalidSeek)
        }
        self.set_position(pos as u64);
        Ok(())
    }
    fn available(&self) -> usize {
        self.get_ref().as_ref().len().saturating_sub(ByteSource::position(self))
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> ByteSink for arrayvec::ArrayVec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.try_extend_from_slice(buf).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.try_push(byte).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const CAP: usize> ByteSink for heapless::Vec<u8, CAP> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte).map_err(|_| StreamError::BufferFull)
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}

#[cfg(feature = "smallvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "smallvec")))]
impl<A: smallvec::Array<Item = u8>> ByteSink for smallvec::SmallVec<A> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        self.push(byte);
        Ok(())
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}

#[cfg(feature = "tinyvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "tinyvec")))]
impl<A: tinyvec::Array<Item = u8>> ByteSink for tinyvec::ArrayVec<A> {
    fn write(&mut self, buf: &[u8]) -> StreamResult<()> {
        let len = self.len();
        let spare = self.grab_spare_slice_mut();
        let chunk = spare.get_mut(..buf.len()).ok_or(StreamError::BufferFull)?;
        chunk.copy_from_slice(buf);
        self.set_len(len + buf.len());
        Ok(())
    }
    #[inline]
    fn write_byte(&mut self, byte: u8) -> StreamResult<()> {
        match self.try_push(byte) {
            None => Ok(()),
            Some(_) => Err(StreamError::BufferFull)
        }
    }
    #[inline]
    fn position(&self) -> usize {
        self.len()
    }
    fn seek(&mut self, pos: usize) -> StreamResult<()> {
        if pos > self.len() {
            return Err(StreamError::InvalidSeek)
        }
        self.truncate(pos);
        Ok(())
    }
}
