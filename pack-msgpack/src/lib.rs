//! A stream-oriented MessagePack encoder and decoder over [`pack-stream`](`pack_stream`) sinks and sources.
/*!

Values are written to a [`ByteSink`] with an [`Encoder`] and read back from a
[`ByteSource`] into caller-supplied destinations with a [`Decoder`].

[`Encode`] types:

| Rust type ->                    | MessagePack type
|---------------------------------|--------------------
| `()`, `None`                    | `nil`
| `Some(T)`                       | `T` -> `MessagePack`
| `bool`                          | `bool`
| `u8`-`u64`, `usize`             | `uint` (smallest representation)
| `i8`-`i64`, `isize`             | `int` (smallest representation)
| `f32`                           | `float-32`
| `f64`                           | `float-64`
| `str`, [`StrBuf`]               | `str` (sm. repr.)
| [`Bin`], [`ByteBuf`]            | `bin` (sm. repr.)
| `[T]`, `[T; N]`, `Vec<T>`       | `array` (sm. repr.)
| tuples of 1 to 12 elements      | `array` (sm. repr.)
| `BTreeMap<K, V>`                | `map` (sm. repr.)
| [`Value`]                       | any of the above

Unsigned types use the `uint` families, signed types the `int` families, both
escalating by value: `-1i32` is a negative `fixint`, `-33i32` is `int 8` and
`128i16` is `int 16`.

[`Decode`] types:

| MessagePack type -> | Rust type
|---------------------|----------------------------------------
| `nil`               | `()`, `None`, [`Value`]
| `bool`              | `bool`
| `fixint`, `int`     | `u8`-`u64`, `i8`-`i64` (when the tag's whole range fits)
| `float-32`          | `f32` or `f64`
| `float-64`          | `f64`
| `str`               | `String`, [`StrBuf`], `heapless::String`, `arrayvec::ArrayString`
| `bin`               | [`ByteBuf`], [`Decoder::deserialize_bin_into`]
| `array`             | `[T]`, `[T; N]`, tuples, `Vec<T>`, `heapless::Vec`, `arrayvec::ArrayVec`, [`Decoder::deserialize_slice`]
| `map`               | `BTreeMap<K, V>`
| `fixext`, `ext`     | Unsupported, skipped with [`Decoder::skip_value`]

An integer is accepted only if the destination can hold every value of the
wire tag's family, so an `uint 32` is never decoded into a `u8`, even when the
value itself would fit. A failed check leaves the source where it was.

```
use pack_msgpack::{Encoder, Decoder, Error};
use pack_stream::SliceReader;

let mut out: Vec<u8> = Vec::new();
let mut encoder = Encoder::new(&mut out);
encoder.serialize(&[16i32, 15, -1, -9]).unwrap();
encoder.serialize(&"hello").unwrap();
assert_eq!(encoder.finish(), Ok(11));

let mut reader = SliceReader::new(&out);
let mut decoder = Decoder::new(&mut reader);
let mut small = [0i32; 2];
assert_eq!(decoder.deserialize(&mut small), Err(Error::SizeLimitExceeded));
let mut items = [0i32; 4];
decoder.deserialize(&mut items).unwrap();
assert_eq!(items, [16, 15, -1, -9]);
assert_eq!(decoder.read::<String>().unwrap(), "hello");
assert_eq!(decoder.read::<u8>(), Err(Error::EndOfData));
```
*/
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc",not(feature = "std")))]
extern crate alloc;

#[macro_use]
mod trace;

pub mod format;
pub mod endian;
pub mod error;
pub mod encode;
pub mod decode;
pub mod buf;
#[cfg(any(feature = "std", feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(any(feature = "std", feature = "alloc"))))]
pub mod value;
#[cfg(all(feature = "serde", any(feature = "std", feature = "alloc")))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_value;
mod foreign;

pub use pack_stream;
pub use pack_stream::{ByteSink, ByteSource};

pub use error::{Error, Result};
pub use format::Family;

pub use encode::{
    Encode,
    EncodeEach,
    Encoder,
    to_writer
};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use encode::to_vec;

pub use decode::{
    Decode,
    DecodeEach,
    Decoder,
    from_reader,
    from_slice
};

pub use buf::{Bin, StrBuf};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use buf::ByteBuf;

#[cfg(any(feature = "std", feature = "alloc"))]
pub use value::Value;
