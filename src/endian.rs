//! Byte order handling for fixed-width payloads.
//!
//! NBT is big-endian on the wire; some derivative formats use little-endian.
//! The codec is generic over [`ByteOrder`] so both orders share one
//! implementation, and [`Endianness`] picks one at runtime.

use zerocopy::byteorder;

pub use zerocopy::{BigEndian, LittleEndian, NativeEndian};

pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}

/// Runtime selection of the stream byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl Endianness {
    /// The byte order of the running host.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    #[inline]
    pub fn read<T: Scalar>(self, bytes: &[u8]) -> T {
        match self {
            Endianness::Big => T::read_from::<BigEndian>(bytes),
            Endianness::Little => T::read_from::<LittleEndian>(bytes),
        }
    }

    #[inline]
    pub fn write<T: Scalar>(self, value: T, out: &mut Vec<u8>) {
        match self {
            Endianness::Big => value.write_to::<BigEndian>(out),
            Endianness::Little => value.write_to::<LittleEndian>(out),
        }
    }
}

/// A fixed-width number that can be converted between host order and a
/// stream byte order.
pub trait Scalar: Copy + Send + Sync + 'static {
    /// Width in bytes on the wire.
    const SIZE: usize;

    /// Decodes from the first [`Self::SIZE`] bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::SIZE`].
    fn read_from<O: ByteOrder>(bytes: &[u8]) -> Self;

    /// Appends the stream-order encoding of `self` to `out`.
    fn write_to<O: ByteOrder>(self, out: &mut Vec<u8>);
}

impl Scalar for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn read_from<O: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }

    #[inline]
    fn write_to<O: ByteOrder>(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $wrapper:ident, $size:literal);* $(;)?) => {
        $(
            impl Scalar for $ty {
                const SIZE: usize = $size;

                #[inline]
                fn read_from<O: ByteOrder>(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; $size];
                    raw.copy_from_slice(&bytes[..$size]);
                    byteorder::$wrapper::<O>::from_bytes(raw).get()
                }

                #[inline]
                fn write_to<O: ByteOrder>(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&byteorder::$wrapper::<O>::new(self).to_bytes());
                }
            }
        )*
    };
}

impl_scalar!(
    u16 => U16, 2;
    i16 => I16, 2;
    i32 => I32, 4;
    i64 => I64, 8;
    f32 => F32, 4;
    f64 => F64, 8;
);

/// Reinterprets a host value as the value whose native bytes equal its
/// stream-order bytes. Applying it twice yields the original value.
#[inline]
pub fn to_stream_order<O: ByteOrder, T: Scalar>(value: T) -> T {
    let mut buf = Vec::with_capacity(T::SIZE);
    value.write_to::<O>(&mut buf);
    T::read_from::<NativeEndian>(&buf)
}
