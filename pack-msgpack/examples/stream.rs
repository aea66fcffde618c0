//! Write a few records to an in-memory stream and read them back.
//!
//! Run with: cargo run -p pack-msgpack --example stream
use std::io::Cursor;

use pack_msgpack::{Bin, ByteSink, Decoder, Encoder, Error, Family, StrBuf, Value};

fn main() -> Result<(), Error> {
    let mut stream = Cursor::new(Vec::<u8>::new());

    let mut encoder = Encoder::new(&mut stream);
    encoder.serialize_each(("temperature", [21.5f32, 21.75, 22.0]))?;
    encoder.serialize(&-40i64)?;
    encoder.serialize(&Bin(b"\x01\x02\x03"))?;
    encoder.serialize(&70000u32)?;
    let written = encoder.finish()?;
    println!("encoded {} bytes", written);

    // append a fixext 1 value a decoder does not understand
    let mut stream = Cursor::new(stream.into_inner());
    let mut encoder = Encoder::with_offset(&mut stream, written)?;
    encoder.sink_mut().write(&[0xD4, 0x01, 0xFF])?;
    encoder.serialize("done")?;
    encoder.finish()?;

    let mut stream = Cursor::new(stream.into_inner());
    let mut decoder = Decoder::new(&mut stream);

    let mut name = [0u8; 16];
    let mut name = StrBuf::new(&mut name);
    let mut readings = [0f32; 3];
    decoder.deserialize_each((&mut name, &mut readings))?;
    println!("{}: {:?}", name.as_str(), readings);

    match decoder.read::<u8>() {
        Err(Error::NarrowingConversion) => println!("-40 does not fit an u8"),
        other => println!("unexpected: {:?}", other),
    }
    println!("as i8: {}", decoder.read::<i8>()?);

    let mut payload = [0u8; 8];
    let len = decoder.deserialize_bin_into(&mut payload)?;
    println!("bin payload: {:?}", &payload[..len]);

    println!("next: {:?}", decoder.peek_family()?);
    println!("as u32: {}", decoder.read::<u32>()?);

    while decoder.peek_family().is_ok() {
        match decoder.read::<Value>() {
            Ok(value) => println!("value: {:?}", value),
            Err(Error::FormatMismatch) if matches!(decoder.peek_family()?, Family::FixExt1) => {
                println!("skipping an extension value");
                decoder.skip_value()?;
            }
            Err(err) => return Err(err),
        }
    }
    println!("decoded {} bytes", decoder.byte_count());
    Ok(())
}
