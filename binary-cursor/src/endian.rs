use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order used for multi-byte numbers.
///
/// Dispatches at runtime to the `byteorder` implementations so a cursor can
/// switch order between fields. There is no "unset" order: every cursor holds
/// one of the two variants.
///
/// ```
/// use binary_cursor::Endian;
///
/// fn flag(order: Endian) -> u8 {
///     match order {
///         Endian::Little => 0,
///         Endian::Big => 1,
///     }
/// }
/// assert_eq!(flag(Endian::default()), 0);
/// ```
///
/// ```compile_fail
/// use binary_cursor::BinaryReader;
///
/// let reader = BinaryReader::with_byte_order(&b""[..], None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    /// The byte order of the target platform.
    pub const NATIVE: Endian = if cfg!(target_endian = "big") {
        Endian::Big
    } else {
        Endian::Little
    };

    #[inline]
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(buf),
            Endian::Big => BigEndian::read_u16(buf),
        }
    }

    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    #[inline]
    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endian::Little => LittleEndian::read_u64(buf),
            Endian::Big => BigEndian::read_u64(buf),
        }
    }

    #[inline]
    pub fn write_u16(self, buf: &mut [u8], n: u16) {
        match self {
            Endian::Little => LittleEndian::write_u16(buf, n),
            Endian::Big => BigEndian::write_u16(buf, n),
        }
    }

    #[inline]
    pub fn write_u32(self, buf: &mut [u8], n: u32) {
        match self {
            Endian::Little => LittleEndian::write_u32(buf, n),
            Endian::Big => BigEndian::write_u32(buf, n),
        }
    }

    #[inline]
    pub fn write_u64(self, buf: &mut [u8], n: u64) {
        match self {
            Endian::Little => LittleEndian::write_u64(buf, n),
            Endian::Big => BigEndian::write_u64(buf, n),
        }
    }
}
