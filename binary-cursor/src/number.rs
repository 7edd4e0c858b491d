//! The closed set of fixed-width scalars the binary cursors move.
//!
//! Compile-time callers use the sealed [`Number`] trait; data-driven callers
//! use [`NumberKind`] and [`Value`]. Both derive sizes from the type alone:
//! 1 byte for `i8`/`u8`, 2 for 16-bit, 4 for 32-bit and `f32`, 8 for 64-bit
//! and `f64`. Floats travel as their IEEE-754 bit patterns.

use crate::Endian;

/// Tag for each supported scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl NumberKind {
    pub const ALL: [NumberKind; 10] = [
        NumberKind::I8,
        NumberKind::U8,
        NumberKind::I16,
        NumberKind::U16,
        NumberKind::I32,
        NumberKind::U32,
        NumberKind::I64,
        NumberKind::U64,
        NumberKind::F32,
        NumberKind::F64,
    ];

    /// Encoded size in bytes.
    pub const fn size(self) -> usize {
        match self {
            NumberKind::I8 | NumberKind::U8 => 1,
            NumberKind::I16 | NumberKind::U16 => 2,
            NumberKind::I32 | NumberKind::U32 | NumberKind::F32 => 4,
            NumberKind::I64 | NumberKind::U64 | NumberKind::F64 => 8,
        }
    }
}

/// Number of bytes needed to store a number of `kind`.
pub fn number_size(kind: NumberKind) -> usize {
    kind.size()
}

mod sealed {
    pub trait Sealed {}
}

/// A scalar the binary cursors can read and write.
///
/// Sealed: only the ten fixed-width primitives implement it, so asking a
/// cursor for any other type does not compile.
///
/// ```
/// use binary_cursor::BinaryReader;
///
/// let mut reader = BinaryReader::new(&[7u8, 0, 0, 0][..]);
/// assert_eq!(reader.read::<u32>(), Some(7));
/// ```
///
/// ```compile_fail
/// use binary_cursor::BinaryReader;
///
/// let mut reader = BinaryReader::new(&[0u8; 16][..]);
/// let _ = reader.read::<u128>();
/// ```
///
/// ```compile_fail
/// use binary_cursor::BinaryReader;
///
/// let mut reader = BinaryReader::new(&[1u8][..]);
/// let _ = reader.read::<bool>();
/// ```
///
/// Downstream crates cannot widen the set:
///
/// ```compile_fail
/// use binary_cursor::{Endian, Number, NumberKind, Value};
///
/// #[derive(Clone, Copy)]
/// struct Flag(u8);
///
/// impl Number for Flag {
///     const KIND: NumberKind = NumberKind::U8;
///     const SIZE: usize = 1;
///     fn decode(_: Endian, buf: &[u8]) -> Self {
///         Flag(buf[0])
///     }
///     fn encode(self, _: Endian, buf: &mut [u8]) {
///         buf[0] = self.0;
///     }
///     fn into_value(self) -> Value {
///         Value::U8(self.0)
///     }
/// }
/// ```
pub trait Number: sealed::Sealed + Copy {
    const KIND: NumberKind;
    const SIZE: usize;

    /// Decodes from exactly `Self::SIZE` bytes.
    fn decode(order: Endian, buf: &[u8]) -> Self;

    /// Encodes into exactly `Self::SIZE` bytes.
    fn encode(self, order: Endian, buf: &mut [u8]);

    fn into_value(self) -> Value;
}

macro_rules! impl_byte {
    ($ty:ty, $kind:ident) => {
        impl sealed::Sealed for $ty {}

        impl Number for $ty {
            const KIND: NumberKind = NumberKind::$kind;
            const SIZE: usize = 1;

            #[inline]
            fn decode(_order: Endian, buf: &[u8]) -> Self {
                buf[0] as $ty
            }

            #[inline]
            fn encode(self, _order: Endian, buf: &mut [u8]) {
                buf[0] = self as u8;
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    };
}

macro_rules! impl_int {
    ($ty:ty, $kind:ident, $bits:ty, $size:expr, $read:ident, $write:ident) => {
        impl sealed::Sealed for $ty {}

        impl Number for $ty {
            const KIND: NumberKind = NumberKind::$kind;
            const SIZE: usize = $size;

            #[inline]
            fn decode(order: Endian, buf: &[u8]) -> Self {
                order.$read(buf) as $ty
            }

            #[inline]
            fn encode(self, order: Endian, buf: &mut [u8]) {
                order.$write(buf, self as $bits);
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    };
}

macro_rules! impl_float {
    ($ty:ty, $kind:ident, $size:expr, $read:ident, $write:ident) => {
        impl sealed::Sealed for $ty {}

        impl Number for $ty {
            const KIND: NumberKind = NumberKind::$kind;
            const SIZE: usize = $size;

            #[inline]
            fn decode(order: Endian, buf: &[u8]) -> Self {
                <$ty>::from_bits(order.$read(buf))
            }

            #[inline]
            fn encode(self, order: Endian, buf: &mut [u8]) {
                order.$write(buf, self.to_bits());
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    };
}

impl_byte!(i8, I8);
impl_byte!(u8, U8);
impl_int!(i16, I16, u16, 2, read_u16, write_u16);
impl_int!(u16, U16, u16, 2, read_u16, write_u16);
impl_int!(i32, I32, u32, 4, read_u32, write_u32);
impl_int!(u32, U32, u32, 4, read_u32, write_u32);
impl_int!(i64, I64, u64, 8, read_u64, write_u64);
impl_int!(u64, U64, u64, 8, read_u64, write_u64);
impl_float!(f32, F32, 4, read_u32, write_u32);
impl_float!(f64, F64, 8, read_u64, write_u64);

/// A decoded scalar tagged with its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    pub fn kind(&self) -> NumberKind {
        match self {
            Value::I8(_) => NumberKind::I8,
            Value::U8(_) => NumberKind::U8,
            Value::I16(_) => NumberKind::I16,
            Value::U16(_) => NumberKind::U16,
            Value::I32(_) => NumberKind::I32,
            Value::U32(_) => NumberKind::U32,
            Value::I64(_) => NumberKind::I64,
            Value::U64(_) => NumberKind::U64,
            Value::F32(_) => NumberKind::F32,
            Value::F64(_) => NumberKind::F64,
        }
    }

    /// Decodes a value of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len()` differs from `kind.size()`.
    pub fn decode(kind: NumberKind, order: Endian, buf: &[u8]) -> Value {
        assert_eq!(buf.len(), kind.size(), "buffer does not fit {:?}", kind);
        match kind {
            NumberKind::I8 => Value::I8(i8::decode(order, buf)),
            NumberKind::U8 => Value::U8(u8::decode(order, buf)),
            NumberKind::I16 => Value::I16(i16::decode(order, buf)),
            NumberKind::U16 => Value::U16(u16::decode(order, buf)),
            NumberKind::I32 => Value::I32(i32::decode(order, buf)),
            NumberKind::U32 => Value::U32(u32::decode(order, buf)),
            NumberKind::I64 => Value::I64(i64::decode(order, buf)),
            NumberKind::U64 => Value::U64(u64::decode(order, buf)),
            NumberKind::F32 => Value::F32(f32::decode(order, buf)),
            NumberKind::F64 => Value::F64(f64::decode(order, buf)),
        }
    }

    /// Encodes into `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len()` differs from `self.kind().size()`.
    pub fn encode(&self, order: Endian, buf: &mut [u8]) {
        assert_eq!(
            buf.len(),
            self.kind().size(),
            "buffer does not fit {:?}",
            self.kind()
        );
        match *self {
            Value::I8(v) => v.encode(order, buf),
            Value::U8(v) => v.encode(order, buf),
            Value::I16(v) => v.encode(order, buf),
            Value::U16(v) => v.encode(order, buf),
            Value::I32(v) => v.encode(order, buf),
            Value::U32(v) => v.encode(order, buf),
            Value::I64(v) => v.encode(order, buf),
            Value::U64(v) => v.encode(order, buf),
            Value::F32(v) => v.encode(order, buf),
            Value::F64(v) => v.encode(order, buf),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    v.into_value()
                }
            }
        )*
    };
}

impl_from!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);
