//! Conversion between the host byte order and the big-endian wire order.
//!
//! The host order is picked at build time, the conversion never branches at runtime.

/// Reverse the order of bytes in an array.
#[inline(always)]
pub const fn reverse<const N: usize>(mut bytes: [u8; N]) -> [u8; N] {
    let mut i = 0;
    while i < N / 2 {
        let tmp = bytes[i];
        bytes[i] = bytes[N - 1 - i];
        bytes[N - 1 - i] = tmp;
        i += 1;
    }
    bytes
}

/// Convert a native-order byte pattern to wire order and back.
///
/// The operation is its own inverse.
#[cfg(target_endian = "little")]
#[inline(always)]
pub const fn normalize<const N: usize>(bytes: [u8; N]) -> [u8; N] {
    reverse(bytes)
}

/// Convert a native-order byte pattern to wire order and back.
///
/// The operation is its own inverse.
#[cfg(target_endian = "big")]
#[inline(always)]
pub const fn normalize<const N: usize>(bytes: [u8; N]) -> [u8; N] {
    bytes
}

/// Fixed width scalars with a wire representation.
pub trait WireOrder: Copy {
    /// The wire-order byte pattern
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;
    /// Return the wire-order byte pattern of `self`.
    fn to_wire(self) -> Self::Bytes;
    /// Reconstruct a value from its wire-order byte pattern.
    fn from_wire(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_wire_order_int {
    ($($ty:ty),*) => {$(
        impl WireOrder for $ty {
            type Bytes = [u8; core::mem::size_of::<$ty>()];
            #[inline(always)]
            fn to_wire(self) -> Self::Bytes {
                normalize(self.to_ne_bytes())
            }
            #[inline(always)]
            fn from_wire(bytes: Self::Bytes) -> Self {
                <$ty>::from_ne_bytes(normalize(bytes))
            }
        }
    )*};
}

impl_wire_order_int!(u8, u16, u32, u64, i8, i16, i32, i64);

// floats travel as their raw IEEE-754 bit patterns
impl WireOrder for f32 {
    type Bytes = [u8; 4];
    #[inline(always)]
    fn to_wire(self) -> Self::Bytes {
        self.to_bits().to_wire()
    }
    #[inline(always)]
    fn from_wire(bytes: Self::Bytes) -> Self {
        f32::from_bits(u32::from_wire(bytes))
    }
}

impl WireOrder for f64 {
    type Bytes = [u8; 8];
    #[inline(always)]
    fn to_wire(self) -> Self::Bytes {
        self.to_bits().to_wire()
    }
    #[inline(always)]
    fn from_wire(bytes: Self::Bytes) -> Self {
        f64::from_bits(u64::from_wire(bytes))
    }
}
