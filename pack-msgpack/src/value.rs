//! A dynamically typed MessagePack value.
#[cfg(feature = "std")]
use std::{string::String, vec::Vec, boxed::Box};

#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{string::String, vec::Vec, boxed::Box};

use pack_stream::{ByteSink, ByteSource};

use crate::decode::{
    attempt, fetch, read_array_len, read_bin_len, read_header_available,
    read_map_len, read_str_len, Decode
};
use crate::encode::{
    write_array_len, write_bin, write_bool, write_f32, write_f64, write_int,
    write_map_len, write_nil, write_str, write_uint, Encode
};
use crate::error::{Error, Result};
use crate::format::Family;

/// How deep arrays and maps may nest inside a decoded [`Value`].
pub const MAX_NESTING: usize = 128;

/// Any MessagePack value except `ext`.
///
/// Decoded integers are normalized: non-negative ones become [`Value::Uint`]
/// and negative ones [`Value::Int`], regardless of the wire tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Uint(u64),
    Int(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    /// Key-value pairs in wire order, duplicate keys are kept.
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None
        }
    }

    /// Return the integer as `u64` if it is not negative.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Uint(v) => Some(v),
            Value::Int(v) => u64::try_from(v).ok(),
            _ => None
        }
    }

    /// Return the integer as `i64` if it is in range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Uint(v) => i64::try_from(v).ok(),
            Value::Int(v) => Some(v),
            _ => None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None
        }
    }

    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None
        }
    }

    /// Look up the first entry of a map with a string key equal to `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
    }
}

impl Encode for Value {
    fn encode<W: ByteSink + ?Sized>(&self, out: &mut W) -> Result<()> {
        match self {
            Value::Nil => write_nil(out),
            Value::Bool(v) => write_bool(out, *v),
            Value::Uint(v) => write_uint(out, *v),
            Value::Int(v) => write_int(out, *v),
            Value::F32(v) => write_f32(out, *v),
            Value::F64(v) => write_f64(out, *v),
            Value::Str(s) => write_str(out, s),
            Value::Bin(b) => write_bin(out, b),
            Value::Array(items) => {
                write_array_len(out, items.len())?;
                items.iter().try_for_each(|item| item.encode(out))
            }
            Value::Map(entries) => {
                write_map_len(out, entries.len())?;
                entries.iter().try_for_each(|(k, v)| {
                    k.encode(out)?;
                    v.encode(out)
                })
            }
        }
    }
}

impl Decode for Value {
    /// Decode any value by its tag.
    ///
    /// Containers nested deeper than [`MAX_NESTING`] are rejected with
    /// [`Error::SizeLimitExceeded`], `ext` and the reserved tag with
    /// [`Error::FormatMismatch`]. A scalar which fails leaves the source
    /// where it was.
    fn decode_into<R: ByteSource + ?Sized>(&mut self, src: &mut R) -> Result<()> {
        *self = decode_value(src, MAX_NESTING)?;
        Ok(())
    }
}

fn decode_value<R: ByteSource + ?Sized>(src: &mut R, depth: usize) -> Result<Value> {
    let family = Family::of(src.peek()?);
    match family {
        Family::FixArray(_)|Family::Array16|Family::Array32 => {
            let depth = depth.checked_sub(1).ok_or(Error::SizeLimitExceeded)?;
            let len = read_header_available(src, read_array_len, 1)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode_value(src, depth)?);
            }
            return Ok(Value::Array(items))
        }
        Family::FixMap(_)|Family::Map16|Family::Map32 => {
            let depth = depth.checked_sub(1).ok_or(Error::SizeLimitExceeded)?;
            let len = read_header_available(src, read_map_len, 2)?;
            let mut entries = Vec::with_capacity(len);
            for _ in 0..len {
                let key = decode_value(src, depth)?;
                let value = decode_value(src, depth)?;
                entries.push((key, value));
            }
            return Ok(Value::Map(entries))
        }
        _ => {}
    }
    attempt(src, |src| Ok(match family {
        Family::Nil => { src.read_byte()?; Value::Nil }
        Family::False => { src.read_byte()?; Value::Bool(false) }
        Family::True => { src.read_byte()?; Value::Bool(true) }
        Family::PosFixint(n) => { src.read_byte()?; Value::Uint(n.into()) }
        Family::NegFixint(n) => { src.read_byte()?; Value::Int(n.into()) }
        Family::Uint8|Family::Uint16|Family::Uint32|Family::Uint64 => {
            let mut n = 0u64;
            n.decode_into(src)?;
            Value::Uint(n)
        }
        Family::Int8|Family::Int16|Family::Int32|Family::Int64 => {
            let mut n = 0i64;
            n.decode_into(src)?;
            u64::try_from(n).map_or(Value::Int(n), Value::Uint)
        }
        Family::Float32 => {
            src.read_byte()?;
            Value::F32(fetch(src)?)
        }
        Family::Float64 => {
            src.read_byte()?;
            Value::F64(fetch(src)?)
        }
        Family::FixStr(_)|Family::Str8|Family::Str16|Family::Str32 => {
            let len = read_str_len(src)?;
            Value::Str(String::from_utf8(read_payload(src, len)?).map_err(|_| Error::InvalidUtf8)?)
        }
        Family::Bin8|Family::Bin16|Family::Bin32 => {
            let len = read_bin_len(src)?;
            Value::Bin(read_payload(src, len)?)
        }
        _ => return Err(Error::FormatMismatch)
    }))
}

fn read_payload<R: ByteSource + ?Sized>(src: &mut R, len: usize) -> Result<Vec<u8>> {
    if len > src.available() {
        return Err(Error::EndOfData)
    }
    let mut bytes = Vec::new();
    bytes.resize(len, 0);
    src.read(&mut bytes)?;
    Ok(bytes)
}

macro_rules! impl_from_for_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(v: $ty) -> Self {
                Value::$variant(v.into())
            }
        }
    )*};
}

impl_from_for_value! {
    bool => Bool,
    u8 => Uint, u16 => Uint, u32 => Uint, u64 => Uint,
    f32 => F32, f64 => F64,
    String => Str, &str => Str,
    Vec<Value> => Array,
    Vec<(Value, Value)> => Map,
}

macro_rules! impl_from_signed_for_value {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                let v = i64::from(v);
                u64::try_from(v).map_or(Value::Int(v), Value::Uint)
            }
        }
    )*};
}

impl_from_signed_for_value!(i8, i16, i32, i64);

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bin(bytes.into())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Box<T>> for Value {
    fn from(v: Box<T>) -> Self {
        (*v).into()
    }
}
