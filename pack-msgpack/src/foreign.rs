//! Implementation for foreign fixed capacity containers
#[allow(unused_imports)]
use pack_stream::{ByteSink, ByteSource};

#[allow(unused_imports)]
use crate::{
    decode::{attempt, read_array_len, read_header_within, read_str_len, Decode},
    encode::{write_str, Encode},
    error::{Error, Result}
};

/// Read a string payload of at most `N` bytes and hand it to `store`.
#[cfg(any(feature = "heapless", feature = "arrayvec"))]
fn read_bounded_str<R, const N: usize, F>(src: &mut R, store: F) -> Result<()>
    where R: ByteSource + ?Sized, F: FnOnce(&str) -> Result<()>
{
    let mut scratch = [0u8; N];
    attempt(src, |src| {
        let len = read_header_within(src, read_str_len, N)?;
        let bytes = &mut scratch[..len];
        src.read(bytes)?;
        store(core::str::from_utf8(bytes)?)
    })
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<T: Encode, const N: usize> Encode for heapless::Vec<T, N> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.as_slice().encode(out)
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<T: Decode + Default, const N: usize> Decode for heapless::Vec<T, N> {
    /// An array longer than `N` is rejected before anything is consumed.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let len = read_header_within(src, read_array_len, N)?;
        self.clear();
        for _ in 0..len {
            let mut item = T::default();
            item.decode_into(src)?;
            self.push(item).map_err(|_| Error::SizeLimitExceeded)?;
        }
        Ok(())
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const N: usize> Encode for heapless::String<N> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_str(out, self.as_str())
    }
}

#[cfg(feature = "heapless")]
#[cfg_attr(docsrs, doc(cfg(feature = "heapless")))]
impl<const N: usize> Decode for heapless::String<N> {
    /// A string longer than `N` bytes is rejected before anything is consumed.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        read_bounded_str::<_, N, _>(src, |s| {
            self.clear();
            self.push_str(s).map_err(|_| Error::SizeLimitExceeded)
        })
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<T: Encode, const CAP: usize> Encode for arrayvec::ArrayVec<T, CAP> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.as_slice().encode(out)
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<T: Decode + Default, const CAP: usize> Decode for arrayvec::ArrayVec<T, CAP> {
    /// An array longer than `CAP` is rejected before anything is consumed.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let len = read_header_within(src, read_array_len, CAP)?;
        self.clear();
        for _ in 0..len {
            let mut item = T::default();
            item.decode_into(src)?;
            self.try_push(item).map_err(|_| Error::SizeLimitExceeded)?;
        }
        Ok(())
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> Encode for arrayvec::ArrayString<CAP> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_str(out, self.as_str())
    }
}

#[cfg(feature = "arrayvec")]
#[cfg_attr(docsrs, doc(cfg(feature = "arrayvec")))]
impl<const CAP: usize> Decode for arrayvec::ArrayString<CAP> {
    /// A string longer than `CAP` bytes is rejected before anything is consumed.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        read_bounded_str::<_, CAP, _>(src, |s| {
            self.clear();
            self.try_push_str(s).map_err(|_| Error::SizeLimitExceeded)
        })
    }
}
