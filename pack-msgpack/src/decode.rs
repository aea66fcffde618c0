//! MessagePack decoder
#[cfg(feature = "std")]
use std::{string::String, vec::Vec, collections::BTreeMap};

#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{string::String, vec::Vec, collections::BTreeMap};

use pack_stream::ByteSource;

use crate::endian::WireOrder;
use crate::error::{Error, Result};
use crate::format::Family;

/// Values which can be populated from MessagePack input.
///
/// The destination is supplied by the caller. Fixed capacity destinations
/// report [`Error::SizeLimitExceeded`] instead of growing.
pub trait Decode {
    /// Read the next value from `src` into `self`.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()>;
}

/// A group of destinations decoded one after another, see [`Decoder::deserialize_each`].
pub trait DecodeEach {
    fn decode_each<R: ByteSource + ?Sized>(self, src: &mut R) -> Result<()>;
}

/// MessagePack decoder reading values from a borrowed [`ByteSource`].
///
/// ```
/// use pack_msgpack::{Decoder, Error};
/// use pack_stream::SliceReader;
///
/// let mut reader = SliceReader::new(b"\xcd\x01\x2c\xc3\xa2hi");
/// let mut decoder = Decoder::new(&mut reader);
/// assert_eq!(decoder.read::<u16>(), Ok(300));
/// let (mut flag, mut text) = (false, String::new());
/// decoder.deserialize_each((&mut flag, &mut text)).unwrap();
/// assert_eq!((flag, text.as_str()), (true, "hi"));
/// assert_eq!(decoder.byte_count(), 7);
/// assert_eq!(decoder.read::<bool>(), Err(Error::EndOfData));
/// ```
pub struct Decoder<'a, R: ByteSource + ?Sized> {
    source: &'a mut R,
    start: usize,
}

impl<'a, R: ByteSource + ?Sized> Decoder<'a, R> {
    /// Create a decoder counting bytes from the source's current position.
    pub fn new(source: &'a mut R) -> Self {
        let start = source.position();
        Decoder { source, start }
    }
    /// Create a decoder reading from the absolute `offset` of the source.
    pub fn with_offset(source: &'a mut R, offset: usize) -> Result<Self> {
        source.seek(offset)?;
        Ok(Decoder { source, start: offset })
    }
    /// Return the number of bytes consumed since the decoder was created.
    #[inline]
    pub fn byte_count(&self) -> usize {
        self.source.position().saturating_sub(self.start)
    }
    /// Decode the next value into `out`.
    ///
    /// With no bytes available `Err(Error::EndOfData)` is returned and nothing
    /// is consumed.
    #[inline]
    pub fn deserialize<T: Decode + ?Sized>(&mut self, out: &mut T) -> Result<()> {
        decode_next(&mut *self.source, out)
    }
    /// Decode the next values into each destination of a tuple, in order.
    ///
    /// The first failure stops decoding; destinations populated before it
    /// keep their new values.
    #[inline]
    pub fn deserialize_each<S: DecodeEach>(&mut self, outs: S) -> Result<()> {
        outs.decode_each(&mut *self.source)
    }
    /// Decode the next value into a new instance of `T`.
    pub fn read<T: Decode + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.deserialize(&mut value)?;
        Ok(value)
    }
    /// Return the next tag byte without consuming it.
    #[inline]
    pub fn peek_tag(&self) -> Result<u8> {
        Ok(self.source.peek()?)
    }
    /// Return the family of the next tag without consuming it.
    #[inline]
    pub fn peek_family(&self) -> Result<Family> {
        self.peek_tag().map(Family::of)
    }
    /// Consume the next value without decoding it, including nested arrays
    /// and maps and the `ext` family.
    ///
    /// On failure the source is left where it was.
    pub fn skip_value(&mut self) -> Result<()> {
        if self.source.available() == 0 {
            return Err(Error::EndOfData)
        }
        attempt(&mut *self.source, skip_value)
    }
    /// Decode a `bin` value into a caller-supplied byte buffer and return the
    /// number of bytes populated.
    ///
    /// When the payload is longer than `buf` `Err(Error::SizeLimitExceeded)` is
    /// returned and nothing is consumed.
    pub fn deserialize_bin_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let src = &mut *self.source;
        if src.available() == 0 {
            return Err(Error::EndOfData)
        }
        attempt(src, |src| {
            let len = read_header_within(src, read_bin_len, buf.len())?;
            src.read(&mut buf[..len])?;
            Ok(len)
        })
    }
    /// Decode an array into the leading elements of `out` and return the number
    /// of elements populated.
    ///
    /// An array longer than `out` is rejected with `Err(Error::SizeLimitExceeded)`
    /// before anything is consumed. Elements past the returned count are left
    /// untouched.
    pub fn deserialize_slice<T: Decode>(&mut self, out: &mut [T]) -> Result<usize> {
        let src = &mut *self.source;
        if src.available() == 0 {
            return Err(Error::EndOfData)
        }
        decode_prefix(src, out)
    }
    /// Access the underlying source.
    pub fn source_mut(&mut self) -> &mut R {
        self.source
    }
}

/// Decode the next value from `src` into `out`.
pub fn from_reader<R, T>(mut src: R, out: &mut T) -> Result<()>
    where R: ByteSource, T: Decode + ?Sized
{
    decode_next(&mut src, out)
}

/// Decode a value of type `T` from the beginning of a slice.
///
/// Return a tuple with `(value, msgpack_len)`. `msgpack_len` <= `input.len()`.
pub fn from_slice<T: Decode + Default>(input: &[u8]) -> Result<(T, usize)> {
    let mut reader = pack_stream::SliceReader::new(input);
    let mut value = T::default();
    decode_next(&mut reader, &mut value)?;
    Ok((value, reader.position()))
}

pub(crate) fn decode_next<R, T>(src: &mut R, out: &mut T) -> Result<()>
    where R: ByteSource + ?Sized, T: Decode + ?Sized
{
    if src.available() == 0 {
        trace_debug!("MessagePack input exhausted at {}", src.position());
        return Err(Error::EndOfData)
    }
    let res = out.decode_into(src);
    if let Err(err) = &res {
        trace_debug!("MessagePack value rejected at {}: {}", src.position(), err);
    }
    res
}

/// Run `f`, moving the source back to where it was if it fails.
pub(crate) fn attempt<R, T, F>(src: &mut R, f: F) -> Result<T>
    where R: ByteSource + ?Sized, F: FnOnce(&mut R) -> Result<T>
{
    let mark = src.mark();
    match f(src) {
        Ok(value) => Ok(value),
        Err(err) => {
            src.reset(mark)?;
            Err(err)
        }
    }
}

#[inline]
pub(crate) fn fetch<T: WireOrder, R: ByteSource + ?Sized>(src: &mut R) -> Result<T> {
    let mut bytes = T::Bytes::default();
    src.read(bytes.as_mut())?;
    Ok(T::from_wire(bytes))
}

#[inline]
fn fetch_len32<R: ByteSource + ?Sized>(src: &mut R) -> Result<usize> {
    usize::try_from(fetch::<u32, _>(src)?).map_err(|_| Error::SizeLimitExceeded)
}

/// Return the length carried by a fixed family's tag, or consume the length
/// prefix of [`Family::prefix_width`] bytes which follows the tag.
fn read_len<R: ByteSource + ?Sized>(src: &mut R, family: Family) -> Result<usize> {
    Ok(match family {
        Family::FixStr(len)|Family::FixArray(len)|Family::FixMap(len) => len.into(),
        family => match family.prefix_width() {
            1 => fetch::<u8, _>(src)?.into(),
            2 => fetch::<u16, _>(src)?.into(),
            4 => fetch_len32(src)?,
            _ => return Err(Error::FormatMismatch)
        }
    })
}

/// Consume a string header and return the payload length.
///
/// On failure the tag may already be consumed.
pub fn read_str_len<R: ByteSource + ?Sized>(src: &mut R) -> Result<usize> {
    match Family::of(src.read_byte()?) {
        family@(Family::FixStr(_)|Family::Str8|Family::Str16|Family::Str32) => read_len(src, family),
        _ => Err(Error::FormatMismatch)
    }
}

/// Consume a binary header and return the payload length.
///
/// On failure the tag may already be consumed.
pub fn read_bin_len<R: ByteSource + ?Sized>(src: &mut R) -> Result<usize> {
    match Family::of(src.read_byte()?) {
        family@(Family::Bin8|Family::Bin16|Family::Bin32) => read_len(src, family),
        _ => Err(Error::FormatMismatch)
    }
}

/// Consume an array header and return the number of elements.
///
/// On failure the tag may already be consumed.
pub fn read_array_len<R: ByteSource + ?Sized>(src: &mut R) -> Result<usize> {
    match Family::of(src.read_byte()?) {
        family@(Family::FixArray(_)|Family::Array16|Family::Array32) => read_len(src, family),
        _ => Err(Error::FormatMismatch)
    }
}

/// Consume a map header and return the number of key-value pairs.
///
/// On failure the tag may already be consumed.
pub fn read_map_len<R: ByteSource + ?Sized>(src: &mut R) -> Result<usize> {
    match Family::of(src.read_byte()?) {
        family@(Family::FixMap(_)|Family::Map16|Family::Map32) => read_len(src, family),
        _ => Err(Error::FormatMismatch)
    }
}

/// Read a header with `read` and accept it only if the declared length fits
/// `capacity`. On failure the source is left where it was.
pub(crate) fn read_header_within<R: ByteSource + ?Sized>(
        src: &mut R,
        read: fn(&mut R) -> Result<usize>,
        capacity: usize
    ) -> Result<usize>
{
    attempt(src, |src| {
        let len = read(src)?;
        if len > capacity {
            return Err(Error::SizeLimitExceeded)
        }
        Ok(len)
    })
}

/// Read a header with `read` and accept it only if at least `min_item_size`
/// bytes per declared item are still available. On failure the source is left
/// where it was.
pub(crate) fn read_header_available<R: ByteSource + ?Sized>(
        src: &mut R,
        read: fn(&mut R) -> Result<usize>,
        min_item_size: usize
    ) -> Result<usize>
{
    attempt(src, |src| {
        let len = read(src)?;
        if len.saturating_mul(min_item_size) > src.available() {
            return Err(Error::EndOfData)
        }
        Ok(len)
    })
}

fn skip_bytes<R: ByteSource + ?Sized>(src: &mut R, len: usize) -> Result<()> {
    if len > src.available() {
        return Err(Error::EndOfData)
    }
    let pos = src.position() + len;
    Ok(src.seek(pos)?)
}

fn skip_value<R: ByteSource + ?Sized>(src: &mut R) -> Result<()> {
    // number of values still to be skipped, containers add their items
    let mut pending: u64 = 1;
    while pending != 0 {
        pending -= 1;
        let family = Family::of(src.read_byte()?);
        let payload = match family {
            Family::PosFixint(_)|Family::NegFixint(_)|
            Family::Nil|Family::False|Family::True => 0,
            Family::Reserved => return Err(Error::FormatMismatch),
            Family::FixArray(_)|Family::Array16|Family::Array32 => {
                pending += read_len(src, family)? as u64;
                0
            }
            Family::FixMap(_)|Family::Map16|Family::Map32 => {
                pending += 2 * read_len(src, family)? as u64;
                0
            }
            Family::FixStr(_)|Family::Str8|Family::Str16|Family::Str32|
            Family::Bin8|Family::Bin16|Family::Bin32 => read_len(src, family)?,
            // ext carries a type byte before the payload
            Family::Ext8|Family::Ext16|Family::Ext32 => {
                read_len(src, family)?.checked_add(1).ok_or(Error::SizeLimitExceeded)?
            }
            Family::FixExt1 => 2,
            Family::FixExt2 => 3,
            Family::FixExt4 => 5,
            Family::FixExt8 => 9,
            Family::FixExt16 => 17,
            Family::Uint8|Family::Int8 => 1,
            Family::Uint16|Family::Int16 => 2,
            Family::Float32|Family::Uint32|Family::Int32 => 4,
            Family::Float64|Family::Uint64|Family::Int64 => 8,
        };
        skip_bytes(src, payload)?;
        // every pending item takes at least a byte
        if pending > src.available() as u64 {
            return Err(Error::EndOfData)
        }
    }
    Ok(())
}

impl Decode for bool {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        *self = match Family::of(src.peek()?) {
            Family::True => true,
            Family::False => false,
            _ => return Err(Error::FormatMismatch)
        };
        src.read_byte()?;
        Ok(())
    }
}

trait Integer: TryFrom<i128> {
    const MIN: i128;
    const MAX: i128;
}

/// Decode an integer, checking the whole range of the wire tag against `N`
/// before anything is consumed.
fn read_integer<N: Integer, R: ByteSource + ?Sized>(src: &mut R) -> Result<N> {
    let family = Family::of(src.peek()?);
    let (min, max) = family.int_range().ok_or(Error::FormatMismatch)?;
    if min < N::MIN || max > N::MAX {
        return Err(Error::NarrowingConversion)
    }
    attempt(src, |src| {
        src.read_byte()?;
        let n: i128 = match family {
            Family::PosFixint(n) => n.into(),
            Family::NegFixint(n) => n.into(),
            Family::Uint8 => fetch::<u8, _>(src)?.into(),
            Family::Uint16 => fetch::<u16, _>(src)?.into(),
            Family::Uint32 => fetch::<u32, _>(src)?.into(),
            Family::Uint64 => fetch::<u64, _>(src)?.into(),
            Family::Int8 => fetch::<i8, _>(src)?.into(),
            Family::Int16 => fetch::<i16, _>(src)?.into(),
            Family::Int32 => fetch::<i32, _>(src)?.into(),
            Family::Int64 => fetch::<i64, _>(src)?.into(),
            _ => return Err(Error::FormatMismatch)
        };
        N::try_from(n).map_err(|_| Error::NarrowingConversion)
    })
}

macro_rules! impl_decode_integer {
    ($($ty:ty),*) => {$(
        impl Integer for $ty {
            const MIN: i128 = <$ty>::MIN as i128;
            const MAX: i128 = <$ty>::MAX as i128;
        }

        impl Decode for $ty {
            #[inline]
            fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
                *self = read_integer(src)?;
                Ok(())
            }
        }
    )*};
}

impl_decode_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl Decode for f32 {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        match Family::of(src.peek()?) {
            Family::Float32 => {}
            Family::Float64 => return Err(Error::NarrowingConversion),
            _ => return Err(Error::FormatMismatch)
        }
        attempt(src, |src| {
            src.read_byte()?;
            *self = fetch(src)?;
            Ok(())
        })
    }
}

impl Decode for f64 {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let family = Family::of(src.peek()?);
        if !matches!(family, Family::Float32|Family::Float64) {
            return Err(Error::FormatMismatch)
        }
        attempt(src, |src| {
            src.read_byte()?;
            *self = if family == Family::Float32 {
                fetch::<f32, _>(src)?.into()
            }
            else {
                fetch(src)?
            };
            Ok(())
        })
    }
}

impl Decode for () {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        if Family::of(src.peek()?) != Family::Nil {
            return Err(Error::FormatMismatch)
        }
        src.read_byte()?;
        Ok(())
    }
}

impl<T: Decode + Default> Decode for Option<T> {
    /// `nil` becomes `None`, anything else is decoded as `T`.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        if Family::of(src.peek()?) == Family::Nil {
            src.read_byte()?;
            *self = None;
            return Ok(())
        }
        match self {
            Some(value) => value.decode_into(src),
            None => {
                let mut value = T::default();
                value.decode_into(src)?;
                *self = Some(value);
                Ok(())
            }
        }
    }
}

impl<T: Decode + ?Sized> Decode for &mut T {
    #[inline]
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        (**self).decode_into(src)
    }
}

impl<T: Decode> Decode for [T] {
    /// Decode an array into the leading elements of the slice.
    ///
    /// An array longer than the slice is rejected before anything is consumed,
    /// elements past the decoded count are left untouched.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        decode_prefix(src, self).map(drop)
    }
}

/// Decode an array into the leading elements of `out` and return the number
/// of elements populated.
pub(crate) fn decode_prefix<R, T>(src: &mut R, out: &mut [T]) -> Result<usize>
    where R: ByteSource + ?Sized, T: Decode
{
    let len = read_header_within(src, read_array_len, out.len())?;
    for item in &mut out[..len] {
        item.decode_into(src)?;
    }
    Ok(len)
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    #[inline]
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        self.as_mut_slice().decode_into(src)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl Decode for String {
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        *self = attempt(src, |src| {
            let len = read_str_len(src)?;
            if len > src.available() {
                return Err(Error::EndOfData)
            }
            let mut bytes = Vec::new();
            bytes.resize(len, 0);
            src.read(&mut bytes)?;
            String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
        })?;
        Ok(())
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl<T: Decode + Default> Decode for Vec<T> {
    /// Resize the vector to the declared element count once, then decode the
    /// elements in place.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let len = read_header_available(src, read_array_len, 1)?;
        self.clear();
        self.resize_with(len, T::default);
        for item in self.iter_mut() {
            item.decode_into(src)?;
        }
        Ok(())
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl<K, V> Decode for BTreeMap<K, V>
    where K: Decode + Default + Ord, V: Decode + Default
{
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        let len = read_header_available(src, read_map_len, 2)?;
        self.clear();
        for _ in 0..len {
            let mut key = K::default();
            key.decode_into(src)?;
            let mut value = V::default();
            value.decode_into(src)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

macro_rules! impl_decode_tuple {
    ($($len:literal => ($($name:ident $idx:tt)+))+) => {$(
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            /// Decode an array positionally, an array shorter than the tuple
            /// populates only the leading elements.
            fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
                let len = read_header_within(src, read_array_len, $len)?;
                $(
                    if $idx < len {
                        self.$idx.decode_into(src)?;
                    }
                )+
                Ok(())
            }
        }

        impl<$($name: Decode),+> DecodeEach for ($($name,)+) {
            fn decode_each<R: ByteSource + ?Sized>(mut self, src: &mut R) -> Result<()> {
                $( decode_next(src, &mut self.$idx)?; )+
                Ok(())
            }
        }
    )+};
}

impl_decode_tuple! {
    1 => (T0 0)
    2 => (T0 0 T1 1)
    3 => (T0 0 T1 1 T2 2)
    4 => (T0 0 T1 1 T2 2 T3 3)
    5 => (T0 0 T1 1 T2 2 T3 3 T4 4)
    6 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5)
    7 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6)
    8 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6 T7 7)
    9 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6 T7 7 T8 8)
    10 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6 T7 7 T8 8 T9 9)
    11 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6 T7 7 T8 8 T9 9 T10 10)
    12 => (T0 0 T1 1 T2 2 T3 3 T4 4 T5 5 T6 6 T7 7 T8 8 T9 9 T10 10 T11 11)
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "std")]
    use std::{vec, vec::Vec, string::String, collections::BTreeMap};
    #[cfg(all(feature = "alloc",not(feature = "std")))]
    use alloc::{vec, vec::Vec, string::String, collections::BTreeMap};
    use pack_stream::SliceReader;
    use super::*;

    fn decoded<T: Decode + Default>(input: &[u8]) -> Result<(T, usize)> {
        from_slice(input)
    }

    #[test]
    fn test_de_bool() {
        assert_eq!(decoded::<bool>(b"\xC3"), Ok((true, 1)));
        assert_eq!(decoded::<bool>(b"\xC2\xC3"), Ok((false, 1)));
        assert_eq!(decoded::<bool>(b"\xCC\x01"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<bool>(b"\x01"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<bool>(b""), Err(Error::EndOfData));
    }

    #[test]
    fn test_de_uint() {
        assert_eq!(decoded::<u8>(b"\x00"), Ok((0, 1)));
        assert_eq!(decoded::<u8>(b"\x7F"), Ok((127, 1)));
        assert_eq!(decoded::<u8>(b"\xCC\xFF"), Ok((255, 2)));
        assert_eq!(decoded::<u16>(b"\xCD\x01\x00"), Ok((256, 3)));
        assert_eq!(decoded::<u32>(b"\xCE\x00\x01\x11\x70"), Ok((70000, 5)));
        assert_eq!(decoded::<u64>(b"\xCF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF"), Ok((u64::MAX, 9)));
        assert_eq!(decoded::<u32>(b"\xCC\x05"), Ok((5, 2)));
        assert_eq!(decoded::<usize>(b"\xCD\x01\x2C"), Ok((300, 3)));
        // the wire class decides, not the value
        assert_eq!(decoded::<u8>(b"\xCE\x00\x00\x00\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<u16>(b"\xCF\x00\x00\x00\x00\x00\x00\x00\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<u8>(b"\xFF"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<u64>(b"\xD0\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<u8>(b"\xCA\x00\x00\x00\x00"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<u8>(b"\xC0"), Err(Error::FormatMismatch));
    }

    #[test]
    fn test_de_int() {
        assert_eq!(decoded::<i8>(b"\xFF"), Ok((-1, 1)));
        assert_eq!(decoded::<i8>(b"\xE0"), Ok((-32, 1)));
        assert_eq!(decoded::<i8>(b"\x7F"), Ok((127, 1)));
        assert_eq!(decoded::<i8>(b"\xD0\xDF"), Ok((-33, 2)));
        assert_eq!(decoded::<i16>(b"\xD1\xFF\x7F"), Ok((-129, 3)));
        assert_eq!(decoded::<i16>(b"\xCC\xFF"), Ok((255, 2)));
        assert_eq!(decoded::<i32>(b"\xD2\x80\x00\x00\x00"), Ok((i32::MIN, 5)));
        assert_eq!(decoded::<i64>(b"\xD3\x80\x00\x00\x00\x00\x00\x00\x00"), Ok((i64::MIN, 9)));
        assert_eq!(decoded::<i64>(b"\xCE\xFF\xFF\xFF\xFF"), Ok((u32::MAX as i64, 5)));
        assert_eq!(decoded::<isize>(b"\xFB"), Ok((-5, 1)));
        assert_eq!(decoded::<i8>(b"\xCC\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<i8>(b"\xD1\x00\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<i16>(b"\xD2\xFF\xFF\xFF\xFF"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<i64>(b"\xCF\x00\x00\x00\x00\x00\x00\x00\x01"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<i32>(b"\xC3"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<i32>(b"\xA1a"), Err(Error::FormatMismatch));
    }

    #[test]
    fn test_de_int_leaves_source_on_failure() {
        let mut reader = SliceReader::new(b"\xCE\x00\x01\x11");
        let mut n = 0u8;
        assert_eq!(n.decode_into(&mut reader), Err(Error::NarrowingConversion));
        assert_eq!(reader.position(), 0);
        let mut n = 0u32;
        assert_eq!(n.decode_into(&mut reader), Err(Error::EndOfData));
        assert_eq!(reader.position(), 0);
        assert_eq!(n, 0);
    }

    #[test]
    fn test_de_float() {
        assert_eq!(decoded::<f32>(b"\xCA\x3F\xC0\x00\x00"), Ok((1.5, 5)));
        assert_eq!(decoded::<f64>(b"\xCA\x3F\xC0\x00\x00"), Ok((1.5, 5)));
        assert_eq!(decoded::<f64>(b"\xCB\xC0\x00\x00\x00\x00\x00\x00\x00"), Ok((-2.0, 9)));
        assert_eq!(decoded::<f32>(b"\xCB\xC0\x00\x00\x00\x00\x00\x00\x00"), Err(Error::NarrowingConversion));
        assert_eq!(decoded::<f32>(b"\x01"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<f64>(b"\xCC\x01"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<f64>(b"\xC0"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<f32>(b"\xCA\x3F\xC0\x00"), Err(Error::EndOfData));
        let (nan, _) = decoded::<f32>(b"\xCA\x7F\xC0\x00\x01").unwrap();
        assert_eq!(nan.to_bits(), 0x7FC0_0001);
    }

    #[test]
    fn test_de_nil() {
        assert_eq!(decoded::<()>(b"\xC0"), Ok(((), 1)));
        assert_eq!(decoded::<()>(b"\xC2"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<Option<u8>>(b"\xC0"), Ok((None, 1)));
        assert_eq!(decoded::<Option<u8>>(b"\x05"), Ok((Some(5), 1)));
        assert_eq!(decoded::<Option<bool>>(b"\x05"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<[Option<i8>; 2]>(b"\x92\xC0\xFF"), Ok(([None, Some(-1)], 3)));
        let mut value = Some(7u8);
        assert_eq!(from_reader(SliceReader::new(b"\xC0"), &mut value), Ok(()));
        assert_eq!(value, None);
    }

    #[test]
    fn test_de_array() {
        assert_eq!(decoded::<[u8; 3]>(b"\x93\x01\x02\x03"), Ok(([1, 2, 3], 4)));
        assert_eq!(decoded::<[u8; 3]>(b"\x92\x01\x02"), Ok(([1, 2, 0], 3)));
        assert_eq!(decoded::<[u8; 0]>(b"\x90"), Ok(([], 1)));
        assert_eq!(decoded::<[[i8; 2]; 2]>(b"\x92\x92\x01\xFF\x92\x02\xFE"), Ok(([[1, -1], [2, -2]], 7)));
        assert_eq!(decoded::<[u8; 2]>(b"\x93\x01\x02\x03"), Err(Error::SizeLimitExceeded));
        assert_eq!(decoded::<[u8; 2]>(b"\xC3"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<[u8; 2]>(b"\xDC\x00"), Err(Error::EndOfData));
        let mut input = [0u8; 19];
        input[..3].copy_from_slice(&[0xDC, 0x00, 0x10]);
        assert_eq!(decoded::<[u8; 16]>(&input), Ok(([0; 16], 19)));
        assert_eq!(decoded::<[u8; 15]>(&input), Err(Error::SizeLimitExceeded));
    }

    #[test]
    fn test_de_array_capacity_restores_position() {
        let mut reader = SliceReader::new(b"\xDC\x00\x10");
        let mut items = [0u16; 14];
        assert_eq!(items.decode_into(&mut reader), Err(Error::SizeLimitExceeded));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.peek(), Ok(0xDC));
    }

    #[test]
    fn test_de_array_element_failure_is_not_rolled_back() {
        let mut reader = SliceReader::new(b"\x93\x01\x02\xC3");
        let mut items = [0u8; 3];
        assert_eq!(items.decode_into(&mut reader), Err(Error::FormatMismatch));
        assert_eq!(items, [1, 2, 0]);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_de_tuple() {
        assert_eq!(decoded::<(bool, i8, u16)>(b"\x93\xC3\xFF\xCD\x01\x00"), Ok(((true, -1, 256), 6)));
        assert_eq!(decoded::<(bool, i8)>(b"\x91\xC3"), Ok(((true, 0), 2)));
        assert_eq!(decoded::<(bool,)>(b"\x92\xC3\xC3"), Err(Error::SizeLimitExceeded));
        assert_eq!(decoded::<(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8)>(
                    b"\x9C\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0A\x0B\x0C"),
                   Ok(((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12), 13)));
    }

    #[test]
    fn test_decoder() {
        let mut reader = SliceReader::new(b"xx\xC3\xC2\x01\xFF\xA1a");
        reader.seek(2).unwrap();
        let mut decoder = Decoder::new(&mut reader);
        assert_eq!(decoder.byte_count(), 0);
        assert_eq!(decoder.peek_tag(), Ok(0xC3));
        assert_eq!(decoder.peek_family(), Ok(Family::True));
        assert_eq!(decoder.read::<bool>(), Ok(true));
        let mut flag = true;
        decoder.deserialize(&mut flag).unwrap();
        assert!(!flag);
        assert_eq!(decoder.byte_count(), 2);
        let (mut a, mut b) = (0u8, 0i8);
        decoder.deserialize_each((&mut a, &mut b)).unwrap();
        assert_eq!((a, b), (1, -1));
        assert_eq!(decoder.byte_count(), 4);
        // the mismatching value stays unconsumed
        let mut c = 0u8;
        assert_eq!(decoder.deserialize_each((&mut c, &mut b)), Err(Error::FormatMismatch));
        assert_eq!(decoder.skip_value(), Ok(()));
        assert_eq!(decoder.byte_count(), 6);
        assert_eq!(decoder.deserialize(&mut c), Err(Error::EndOfData));
        assert_eq!(decoder.peek_tag(), Err(Error::EndOfData));
        assert_eq!(decoder.skip_value(), Err(Error::EndOfData));
        assert_eq!(decoder.source_mut().position(), 8);
    }

    #[test]
    fn test_decoder_each_keeps_earlier_values() {
        let mut reader = SliceReader::new(b"\x05\x06");
        let mut decoder = Decoder::new(&mut reader);
        let (mut a, mut b, mut c) = (0u8, 0u8, 0u8);
        assert_eq!(decoder.deserialize_each((&mut a, &mut b, &mut c)), Err(Error::EndOfData));
        assert_eq!((a, b, c), (5, 6, 0));
    }

    #[test]
    fn test_decoder_with_offset() {
        let mut reader = SliceReader::new(b"\xC3\xC2\xC0");
        let mut decoder = Decoder::with_offset(&mut reader, 1).unwrap();
        assert_eq!(decoder.read::<bool>(), Ok(false));
        assert_eq!(decoder.byte_count(), 1);
        assert_eq!(decoder.read::<()>(), Ok(()));
        assert!(matches!(Decoder::with_offset(&mut reader, 4), Err(Error::Stream(_))));
    }

    #[test]
    fn test_skip_value() {
        let input = b"\x82\xA1a\x92\x01\xCD\x01\x00\xA1b\xDE\x00\x01\xC0\xD4\x01\x02\xC7\x02\x05\xAA\xBB\xC3";
        let mut reader = SliceReader::new(input);
        let mut decoder = Decoder::new(&mut reader);
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 17);
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 22);
        assert_eq!(decoder.read::<bool>(), Ok(true));
        // truncated containers are left as they were
        let mut reader = SliceReader::new(b"\x93\x01\x02");
        let mut decoder = Decoder::new(&mut reader);
        assert_eq!(decoder.skip_value(), Err(Error::EndOfData));
        assert_eq!(decoder.byte_count(), 0);
        let mut reader = SliceReader::new(b"\x91\xC1");
        let mut decoder = Decoder::new(&mut reader);
        assert_eq!(decoder.skip_value(), Err(Error::FormatMismatch));
        assert_eq!(decoder.byte_count(), 0);
        let mut reader = SliceReader::new(b"\xDD\xFF\xFF\xFF\xFF\x01");
        let mut decoder = Decoder::new(&mut reader);
        assert_eq!(decoder.skip_value(), Err(Error::EndOfData));
    }

    #[test]
    fn test_header_readers() {
        let mut reader = SliceReader::new(
            b"\xA5\xD9\x20\xDA\x01\x00\xDB\x00\x01\x00\x00\xC4\x07\xC5\x01\x00\xC6\x00\x00\x00\x02\
              \x9F\xDC\x00\x10\xDD\x00\x01\x00\x00\x8F\xDE\x00\x10\xDF\x00\x00\x00\x03");
        assert_eq!(read_str_len(&mut reader), Ok(5));
        assert_eq!(read_str_len(&mut reader), Ok(32));
        assert_eq!(read_str_len(&mut reader), Ok(256));
        assert_eq!(read_str_len(&mut reader), Ok(65536));
        assert_eq!(read_bin_len(&mut reader), Ok(7));
        assert_eq!(read_bin_len(&mut reader), Ok(256));
        assert_eq!(read_bin_len(&mut reader), Ok(2));
        assert_eq!(read_array_len(&mut reader), Ok(15));
        assert_eq!(read_array_len(&mut reader), Ok(16));
        assert_eq!(read_array_len(&mut reader), Ok(65536));
        assert_eq!(read_map_len(&mut reader), Ok(15));
        assert_eq!(read_map_len(&mut reader), Ok(16));
        assert_eq!(read_map_len(&mut reader), Ok(3));
        assert_eq!(reader.available(), 0);
        // a family with a prefix of the wrong kind is a mismatch
        for input in [&b"\xC4\x01"[..], b"\xC7\x01", b"\xDE\x00\x01", b"\xCC\x01"] {
            assert_eq!(read_str_len(&mut SliceReader::new(input)), Err(Error::FormatMismatch));
        }
        assert_eq!(read_map_len(&mut SliceReader::new(b"\x9F")), Err(Error::FormatMismatch));
        assert_eq!(read_bin_len(&mut SliceReader::new(b"\xC5\x01")), Err(Error::EndOfData));
    }

    #[test]
    fn test_skip_prefixed_values() {
        let mut input = [0u8; 40];
        input[..3].copy_from_slice(b"\xC5\x00\x02");
        input[5..9].copy_from_slice(b"\xC8\x00\x01\x07");
        input[10..15].copy_from_slice(b"\xDB\x00\x00\x00\x01");
        input[16..21].copy_from_slice(b"\xDF\x00\x00\x00\x01");
        input[23] = 0xC3;
        let mut reader = SliceReader::new(&input[..24]);
        let mut decoder = Decoder::new(&mut reader);
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 5);
        // ext 16 carries a type byte before the payload
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 10);
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 16);
        decoder.skip_value().unwrap();
        assert_eq!(decoder.byte_count(), 23);
        assert_eq!(decoder.read::<bool>(), Ok(true));
    }

    #[test]
    fn test_deserialize_slice() {
        let mut reader = SliceReader::new(b"\x92\x01\x02\x93\x03\x04\x00\x94\x01\x01\x01\x01\xC0");
        let mut decoder = Decoder::new(&mut reader);
        let mut items = [9u8; 3];
        assert_eq!(decoder.deserialize_slice(&mut items), Ok(2));
        assert_eq!(items, [1, 2, 9]);
        assert_eq!(decoder.deserialize_slice(&mut items), Ok(3));
        assert_eq!(items, [3, 4, 0]);
        assert_eq!(decoder.deserialize_slice(&mut items), Err(Error::SizeLimitExceeded));
        assert_eq!(decoder.byte_count(), 7);
        assert_eq!(decoder.deserialize_slice(&mut [0u8; 4][..]), Ok(4));
        assert_eq!(decoder.deserialize_slice(&mut items), Err(Error::FormatMismatch));
        assert_eq!(decoder.skip_value(), Ok(()));
        assert_eq!(decoder.deserialize_slice(&mut items), Err(Error::EndOfData));
        assert_eq!(items, [3, 4, 0]);
    }

    #[test]
    fn test_deserialize_bin_into() {
        let mut reader = SliceReader::new(b"\xC4\x03abc\xC5\x00\x02xy\xA1a");
        let mut decoder = Decoder::new(&mut reader);
        let mut buf = [0u8; 3];
        assert_eq!(decoder.deserialize_bin_into(&mut buf), Ok(3));
        assert_eq!(&buf, b"abc");
        let mut small = [0u8; 1];
        assert_eq!(decoder.deserialize_bin_into(&mut small), Err(Error::SizeLimitExceeded));
        assert_eq!(decoder.byte_count(), 5);
        assert_eq!(decoder.deserialize_bin_into(&mut buf), Ok(2));
        assert_eq!(&buf[..2], b"xy");
        assert_eq!(decoder.deserialize_bin_into(&mut buf), Err(Error::FormatMismatch));
        assert_eq!(decoder.byte_count(), 10);
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_de_alloc() {
        assert_eq!(decoded::<String>(b"\xA3abc"), Ok((String::from("abc"), 4)));
        assert_eq!(decoded::<String>(b"\xD9\x01z"), Ok((String::from("z"), 3)));
        assert_eq!(decoded::<String>(b"\xA2\xFF\xFE"), Err(Error::InvalidUtf8));
        assert_eq!(decoded::<String>(b"\xA3ab"), Err(Error::EndOfData));
        assert_eq!(decoded::<String>(b"\x01"), Err(Error::FormatMismatch));
        assert_eq!(decoded::<Vec<i16>>(b"\x93\x01\xFF\xD1\x80\x00"), Ok((vec![1, -1, i16::MIN], 6)));
        assert_eq!(decoded::<Vec<u8>>(b"\x90"), Ok((vec![], 1)));
        assert_eq!(decoded::<Vec<Vec<bool>>>(b"\x92\x91\xC3\x90"), Ok((vec![vec![true], vec![]], 4)));
        // the declared count is checked against the input before allocating
        assert_eq!(decoded::<Vec<u8>>(b"\xDD\xFF\xFF\xFF\xFF\x01\x02"), Err(Error::EndOfData));
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1u8);
        map.insert(String::from("b"), 2u8);
        assert_eq!(decoded::<BTreeMap<String, u8>>(b"\x82\xA1a\x01\xA1b\x02"), Ok((map, 7)));
        assert_eq!(decoded::<BTreeMap<String, u8>>(b"\x92\xA1a\x01"), Err(Error::FormatMismatch));
        let mut reused = Vec::from([9u8; 8]);
        from_reader(SliceReader::new(b"\x92\x01\x02"), &mut reused).unwrap();
        assert_eq!(reused, [1, 2]);
        let mut text = String::from("keep");
        assert_eq!(from_reader(SliceReader::new(b"\xA2\xFF\xFE"), &mut text), Err(Error::InvalidUtf8));
        assert_eq!(text, "keep");
    }
}
