//! The MessagePack format table.
//!
//! Every byte value belongs to exactly one [`Family`]. Families which embed a
//! value or a length in the tag byte itself are recognized by their high bits.
/* single byte families */
pub const MIN_POSFIXINT: u8 = 0x00; /* 0xxxxxxx */
pub const MAX_POSFIXINT: u8 = 0x7f;
pub const NEGFIXINT: u8 = 0xe0; /* 111xxxxx */
/// The lowest negative fixint, the two's complement value of `0b11100000`.
pub const MIN_NEGFIXINT: i8 = -32;
pub const MAX_NEGFIXINT: i8 = -1;

pub const FIXMAP: u8 = 0x80; /* 1000xxxx */
pub const MAX_FIXMAP_SIZE: usize = 0x0f;
pub const FIXARRAY: u8 = 0x90; /* 1001xxxx */
pub const MAX_FIXARRAY_SIZE: usize = 0x0f;
pub const FIXSTR: u8 = 0xa0; /* 101xxxxx */
pub const MAX_FIXSTR_SIZE: usize = 0x1f;

pub const NIL: u8       = 0xc0;
pub const RESERVED: u8  = 0xc1;
pub const FALSE: u8     = 0xc2;
pub const TRUE: u8      = 0xc3;

pub const BIN_8: u8     = 0xc4;
pub const BIN_16: u8    = 0xc5;
pub const BIN_32: u8    = 0xc6;

pub const EXT_8: u8     = 0xc7;
pub const EXT_16: u8    = 0xc8;
pub const EXT_32: u8    = 0xc9;

pub const FLOAT_32: u8  = 0xca;
pub const FLOAT_64: u8  = 0xcb;

pub const UINT_8: u8    = 0xcc;
pub const UINT_16: u8   = 0xcd;
pub const UINT_32: u8   = 0xce;
pub const UINT_64: u8   = 0xcf;

pub const INT_8: u8     = 0xd0;
pub const INT_16: u8    = 0xd1;
pub const INT_32: u8    = 0xd2;
pub const INT_64: u8    = 0xd3;

pub const FIXEXT_1: u8  = 0xd4;
pub const FIXEXT_2: u8  = 0xd5;
pub const FIXEXT_4: u8  = 0xd6;
pub const FIXEXT_8: u8  = 0xd7;
pub const FIXEXT_16: u8 = 0xd8;

pub const STR_8: u8     = 0xd9;
pub const STR_16: u8    = 0xda;
pub const STR_32: u8    = 0xdb;

pub const ARRAY_16: u8  = 0xdc;
pub const ARRAY_32: u8  = 0xdd;

pub const MAP_16: u8    = 0xde;
pub const MAP_32: u8    = 0xdf;

const POSFIXINT_MASK: u8 = 0x80;
const NEGFIXINT_MASK: u8 = 0xe0;
const FIXMAP_MASK: u8 = 0xf0;
const FIXARRAY_MASK: u8 = 0xf0;
const FIXSTR_MASK: u8 = 0xe0;

/// A wire category of a tag byte.
///
/// Fixed families carry the value or the length stored in the tag's low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    PosFixint(u8),
    NegFixint(i8),
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Nil,
    Reserved,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
}

impl Family {
    /// Classify a tag byte.
    pub const fn of(tag: u8) -> Family {
        if tag & POSFIXINT_MASK == MIN_POSFIXINT {
            return Family::PosFixint(tag)
        }
        if tag & NEGFIXINT_MASK == NEGFIXINT {
            return Family::NegFixint(tag as i8)
        }
        if tag & FIXMAP_MASK == FIXMAP {
            return Family::FixMap(tag & !FIXMAP_MASK)
        }
        if tag & FIXARRAY_MASK == FIXARRAY {
            return Family::FixArray(tag & !FIXARRAY_MASK)
        }
        if tag & FIXSTR_MASK == FIXSTR {
            return Family::FixStr(tag & !FIXSTR_MASK)
        }
        // only 0xc0..=0xdf is left
        match tag {
            NIL => Family::Nil,
            RESERVED => Family::Reserved,
            FALSE => Family::False,
            TRUE => Family::True,
            BIN_8 => Family::Bin8,
            BIN_16 => Family::Bin16,
            BIN_32 => Family::Bin32,
            EXT_8 => Family::Ext8,
            EXT_16 => Family::Ext16,
            EXT_32 => Family::Ext32,
            FLOAT_32 => Family::Float32,
            FLOAT_64 => Family::Float64,
            UINT_8 => Family::Uint8,
            UINT_16 => Family::Uint16,
            UINT_32 => Family::Uint32,
            UINT_64 => Family::Uint64,
            INT_8 => Family::Int8,
            INT_16 => Family::Int16,
            INT_32 => Family::Int32,
            INT_64 => Family::Int64,
            FIXEXT_1 => Family::FixExt1,
            FIXEXT_2 => Family::FixExt2,
            FIXEXT_4 => Family::FixExt4,
            FIXEXT_8 => Family::FixExt8,
            FIXEXT_16 => Family::FixExt16,
            STR_8 => Family::Str8,
            STR_16 => Family::Str16,
            STR_32 => Family::Str32,
            ARRAY_16 => Family::Array16,
            ARRAY_32 => Family::Array32,
            MAP_16 => Family::Map16,
            _ => Family::Map32,
        }
    }

    /// The range of values an integer family is able to express.
    ///
    /// Returns `None` for non-integer families.
    pub const fn int_range(self) -> Option<(i128, i128)> {
        Some(match self {
            Family::PosFixint(_) => (MIN_POSFIXINT as i128, MAX_POSFIXINT as i128),
            Family::NegFixint(_) => (MIN_NEGFIXINT as i128, MAX_NEGFIXINT as i128),
            Family::Uint8 => (0, u8::MAX as i128),
            Family::Uint16 => (0, u16::MAX as i128),
            Family::Uint32 => (0, u32::MAX as i128),
            Family::Uint64 => (0, u64::MAX as i128),
            Family::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Family::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Family::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Family::Int64 => (i64::MIN as i128, i64::MAX as i128),
            _ => return None
        })
    }

    /// Width in bytes of the length prefix following the tag.
    ///
    /// Fixed families and families without a length return 0.
    pub const fn prefix_width(self) -> usize {
        match self {
            Family::Bin8|Family::Ext8|Family::Str8 => 1,
            Family::Bin16|Family::Ext16|Family::Str16|
            Family::Array16|Family::Map16 => 2,
            Family::Bin32|Family::Ext32|Family::Str32|
            Family::Array32|Family::Map32 => 4,
            _ => 0
        }
    }
}
