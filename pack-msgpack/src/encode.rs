//! MessagePack encoder
#[cfg(feature = "std")]
use std::{boxed::Box, string::String, vec::Vec, collections::BTreeMap};

#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{boxed::Box, string::String, vec::Vec, collections::BTreeMap};

use pack_stream::ByteSink;

use crate::endian::WireOrder;
use crate::error::{Error, Result};
use crate::format::*;

/// Values with a MessagePack representation.
///
/// Every implementation writes the smallest representation of the value.
pub trait Encode {
    /// Append the encoded value to `out`.
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()>;
}

/// A group of values encoded one after another, see [`Encoder::serialize_each`].
pub trait EncodeEach {
    fn encode_each<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()>;
}

/// Encode `value` and append it to `sink`.
pub fn to_writer<W, T>(mut sink: W, value: &T) -> Result<()>
    where W: ByteSink, T: Encode + ?Sized
{
    value.encode(&mut sink)
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
/// Encode `value` into a new vector of bytes.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
    where T: Encode + ?Sized
{
    let mut vec = Vec::new();
    value.encode(&mut vec)?;
    Ok(vec)
}

/// MessagePack encoder appending values to a borrowed [`ByteSink`].
///
/// The sink is flushed once, either by [`Encoder::finish`] or when the
/// encoder is dropped.
///
/// ```
/// use pack_msgpack::Encoder;
///
/// let mut out: Vec<u8> = Vec::new();
/// let mut encoder = Encoder::new(&mut out);
/// encoder.serialize(&300u16).unwrap();
/// encoder.serialize_each((true, "hi")).unwrap();
/// assert_eq!(encoder.byte_count(), 7);
/// drop(encoder);
/// assert_eq!(out, b"\xcd\x01\x2c\xc3\xa2hi");
/// ```
pub struct Encoder<'a, W: ByteSink + ?Sized> {
    sink: &'a mut W,
    start: usize,
    flushed: bool,
}

impl<'a, W: ByteSink + ?Sized> Encoder<'a, W> {
    /// Create an encoder counting bytes from the sink's current position.
    pub fn new(sink: &'a mut W) -> Self {
        let start = sink.position();
        Encoder { sink, start, flushed: false }
    }
    /// Create an encoder writing from the absolute `offset` of the sink.
    pub fn with_offset(sink: &'a mut W, offset: usize) -> Result<Self> {
        sink.seek(offset)?;
        Ok(Encoder { sink, start: offset, flushed: false })
    }
    /// Return the number of bytes appended since the encoder was created.
    #[inline]
    pub fn byte_count(&self) -> usize {
        self.sink.position().saturating_sub(self.start)
    }
    /// Encode a single value.
    #[inline]
    pub fn serialize<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(&mut *self.sink)
    }
    /// Encode each element of a tuple in order, without an array header.
    ///
    /// Values written before a failing one stay in the sink. When the sink
    /// fails, the failing value may leave its tag or a partial header behind.
    #[inline]
    pub fn serialize_each<S: EncodeEach>(&mut self, values: S) -> Result<()> {
        values.encode_each(&mut *self.sink)
    }
    /// Access the underlying sink.
    pub fn sink_mut(&mut self) -> &mut W {
        self.sink
    }
    /// Flush the sink and return the number of bytes appended.
    pub fn finish(mut self) -> Result<usize> {
        self.flushed = true;
        let count = self.byte_count();
        self.sink.flush()?;
        Ok(count)
    }
}

impl<W: ByteSink + ?Sized> Drop for Encoder<'_, W> {
    fn drop(&mut self) {
        if !self.flushed {
            self.flushed = true;
            if let Err(err) = self.sink.flush() {
                trace_warn!("flushing MessagePack sink failed: {}", err);
            }
        }
    }
}

#[inline]
fn write_tagged<W: ByteSink + ?Sized, T: WireOrder>(out: &mut W, tag: u8, v: T) -> Result<()> {
    out.write_byte(tag)?;
    out.write(v.to_wire().as_ref())?;
    Ok(())
}

/// Write `nil`.
#[inline]
pub fn write_nil<W: ByteSink + ?Sized>(out: &mut W) -> Result<()> {
    Ok(out.write_byte(NIL)?)
}

/// Write `true` or `false`.
#[inline]
pub fn write_bool<W: ByteSink + ?Sized>(out: &mut W, v: bool) -> Result<()> {
    Ok(out.write_byte(if v { TRUE } else { FALSE })?)
}

/// Write an unsigned integer using the smallest of:
/// positive fixint, `uint 8`, `uint 16`, `uint 32`, `uint 64`.
pub fn write_uint<W: ByteSink + ?Sized>(out: &mut W, v: u64) -> Result<()> {
    if v <= MAX_POSFIXINT as u64 {
        Ok(out.write_byte(v as u8)?)
    }
    else if let Ok(v) = u8::try_from(v) {
        write_tagged(out, UINT_8, v)
    }
    else if let Ok(v) = u16::try_from(v) {
        write_tagged(out, UINT_16, v)
    }
    else if let Ok(v) = u32::try_from(v) {
        write_tagged(out, UINT_32, v)
    }
    else {
        write_tagged(out, UINT_64, v)
    }
}

/// Write a signed integer using the smallest of:
/// negative or positive fixint, `int 8`, `int 16`, `int 32`, `int 64`.
pub fn write_int<W: ByteSink + ?Sized>(out: &mut W, v: i64) -> Result<()> {
    if (MIN_NEGFIXINT as i64..=MAX_POSFIXINT as i64).contains(&v) {
        Ok(out.write_byte(v as u8)?)
    }
    else if let Ok(v) = i8::try_from(v) {
        write_tagged(out, INT_8, v)
    }
    else if let Ok(v) = i16::try_from(v) {
        write_tagged(out, INT_16, v)
    }
    else if let Ok(v) = i32::try_from(v) {
        write_tagged(out, INT_32, v)
    }
    else {
        write_tagged(out, INT_64, v)
    }
}

/// Write `float 32`.
#[inline]
pub fn write_f32<W: ByteSink + ?Sized>(out: &mut W, v: f32) -> Result<()> {
    write_tagged(out, FLOAT_32, v)
}

/// Write `float 64`.
#[inline]
pub fn write_f64<W: ByteSink + ?Sized>(out: &mut W, v: f64) -> Result<()> {
    write_tagged(out, FLOAT_64, v)
}

/// Write a string header for a payload of `len` bytes.
///
/// Nothing is written when `len` does not fit in `str 32`.
pub fn write_str_len<W: ByteSink + ?Sized>(out: &mut W, len: usize) -> Result<()> {
    if len <= MAX_FIXSTR_SIZE {
        Ok(out.write_byte(FIXSTR | (len as u8))?)
    }
    else if let Ok(len) = u8::try_from(len) {
        write_tagged(out, STR_8, len)
    }
    else if let Ok(len) = u16::try_from(len) {
        write_tagged(out, STR_16, len)
    }
    else if let Ok(len) = u32::try_from(len) {
        write_tagged(out, STR_32, len)
    }
    else {
        Err(Error::SizeLimitExceeded)
    }
}

/// Write a string header followed by the string's bytes.
pub fn write_str<W: ByteSink + ?Sized>(out: &mut W, s: &str) -> Result<()> {
    write_str_len(out, s.len())?;
    Ok(out.write_str(s)?)
}

/// Write a binary header for a payload of `len` bytes.
///
/// Nothing is written when `len` does not fit in `bin 32`.
pub fn write_bin_len<W: ByteSink + ?Sized>(out: &mut W, len: usize) -> Result<()> {
    if let Ok(len) = u8::try_from(len) {
        write_tagged(out, BIN_8, len)
    }
    else if let Ok(len) = u16::try_from(len) {
        write_tagged(out, BIN_16, len)
    }
    else if let Ok(len) = u32::try_from(len) {
        write_tagged(out, BIN_32, len)
    }
    else {
        Err(Error::SizeLimitExceeded)
    }
}

/// Write a binary header followed by the bytes.
pub fn write_bin<W: ByteSink + ?Sized>(out: &mut W, bytes: &[u8]) -> Result<()> {
    write_bin_len(out, bytes.len())?;
    Ok(out.write(bytes)?)
}

/// Write an array header for `len` elements.
///
/// The elements should follow.
pub fn write_array_len<W: ByteSink + ?Sized>(out: &mut W, len: usize) -> Result<()> {
    if len <= MAX_FIXARRAY_SIZE {
        Ok(out.write_byte(FIXARRAY | (len as u8))?)
    }
    else if let Ok(len) = u16::try_from(len) {
        write_tagged(out, ARRAY_16, len)
    }
    else if let Ok(len) = u32::try_from(len) {
        write_tagged(out, ARRAY_32, len)
    }
    else {
        Err(Error::SizeLimitExceeded)
    }
}

/// Write a map header for `len` key-value pairs.
///
/// The keys and values should follow, alternately.
pub fn write_map_len<W: ByteSink + ?Sized>(out: &mut W, len: usize) -> Result<()> {
    if len <= MAX_FIXMAP_SIZE {
        Ok(out.write_byte(FIXMAP | (len as u8))?)
    }
    else if let Ok(len) = u16::try_from(len) {
        write_tagged(out, MAP_16, len)
    }
    else if let Ok(len) = u32::try_from(len) {
        write_tagged(out, MAP_32, len)
    }
    else {
        Err(Error::SizeLimitExceeded)
    }
}

impl Encode for bool {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_bool(out, *self)
    }
}

macro_rules! impl_encode_uint {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            #[inline]
            fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
                write_uint(out, *self as u64)
            }
        }
    )*};
}

macro_rules! impl_encode_int {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            #[inline]
            fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
                write_int(out, *self as i64)
            }
        }
    )*};
}

impl_encode_uint!(u8, u16, u32, u64, usize);
impl_encode_int!(i8, i16, i32, i64, isize);

impl Encode for f32 {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_f32(out, *self)
    }
}

impl Encode for f64 {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_f64(out, *self)
    }
}

impl Encode for str {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_str(out, self)
    }
}

impl Encode for () {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_nil(out)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        match self {
            Some(value) => value.encode(out),
            None => write_nil(out)
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_array_len(out, self.len())?;
        for item in self {
            item.encode(out)?;
        }
        Ok(())
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.as_slice().encode(out)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        (**self).encode(out)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        (**self).encode(out)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        (**self).encode(out)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl Encode for String {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_str(out, self)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.as_slice().encode(out)
    }
}

#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        write_map_len(out, self.len())?;
        for (key, value) in self {
            key.encode(out)?;
            value.encode(out)?;
        }
        Ok(())
    }
}

macro_rules! impl_encode_tuple {
    ($($len:literal => ($($name:ident $idx:tt)+))+) => {$(
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
                write_array_len(out, $len)?;
                $( self.$idx.encode(out)?; )+
                Ok(())
            }
        }

        impl<$($name: Encode),+> EncodeEach for ($($name,)+) {
            fn encode_each<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
                $( self.$idx.encode(out)?; )+
                Ok(())
            }
        }
    )+};
}

impl_encode_tuple! {
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
