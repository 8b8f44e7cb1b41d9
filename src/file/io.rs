//! Endian-aware, bounds-checked reading and writing of primitive values.
//!
//! All metadata structures are little-endian. The [`CilIO`] trait abstracts over the
//! primitive types so the row encoders and decoders can share one generic code path, and
//! the `*_dyn` helpers cover the 2-or-4-byte index columns whose width depends on the
//! size of the referenced table or heap.
//!
//! The compressed integer helpers implement the variable-length encoding of ECMA-335
//! II.23.2 used throughout signature, marshalling and permission-set blobs.
//!
//! # Examples
//!
//! ```rust
//! use cilmeta::{read_compressed_uint, write_compressed_uint};
//!
//! let mut blob = Vec::new();
//! write_compressed_uint(&mut blob, 0x3FFF)?;
//! assert_eq!(blob, [0xBF, 0xFF]);
//!
//! let mut offset = 0;
//! assert_eq!(read_compressed_uint(&blob, &mut offset)?, 0x3FFF);
//! # Ok::<(), cilmeta::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive values that can be converted to and from little-endian bytes.
pub trait CilIO: Sized + Copy {
    /// Fixed-size byte array backing this type.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_cil_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_cil_io! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order from a data buffer at a
/// specific offset, advancing the offset past the value.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes remaining.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(bytes) = T::Bytes::try_from(&data[*offset..end]) else {
        return Err(OutOfBounds);
    };

    *offset = end;
    Ok(T::from_le_bytes(bytes))
}

/// Reads a 2 or 4 byte index in little-endian order, widening to `u32`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes remaining.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    if is_large {
        read_le_at::<u32>(data, offset)
    } else {
        Ok(u32::from(read_le_at::<u16>(data, offset)?))
    }
}

/// Appends a value in little-endian byte order to a growable buffer.
pub fn write_le<T: CilIO>(data: &mut Vec<u8>, value: T) {
    data.extend_from_slice(value.to_le_bytes().as_ref());
}

/// Appends a 2 or 4 byte index in little-endian order.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if `value` does not fit into a 2 byte column.
pub fn write_le_dyn(data: &mut Vec<u8>, value: u32, is_large: bool) -> Result<()> {
    if is_large {
        write_le::<u32>(data, value);
    } else {
        let narrow = u16::try_from(value).map_err(|_| {
            malformed_error!("Value 0x{:X} does not fit into a 2 byte column", value)
        })?;
        write_le::<u16>(data, narrow);
    }

    Ok(())
}

/// Appends `value` using the compressed unsigned integer encoding (II.23.2).
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for values above `0x1FFF_FFFF`.
pub fn write_compressed_uint(data: &mut Vec<u8>, value: u32) -> Result<()> {
    if value < 0x80 {
        data.push(value as u8);
    } else if value < 0x4000 {
        data.extend_from_slice(&(0x8000 | value as u16).to_be_bytes());
    } else if value < 0x2000_0000 {
        data.extend_from_slice(&(0xC000_0000 | value).to_be_bytes());
    } else {
        return Err(malformed_error!(
            "Value 0x{:X} exceeds the compressed integer range",
            value
        ));
    }

    Ok(())
}

/// Appends `value` using the compressed signed integer encoding (II.23.2).
///
/// The sign bit is rotated into the lowest bit of the encoded representation.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for values outside `-0x1000_0000..=0x0FFF_FFFF`.
pub fn write_compressed_int(data: &mut Vec<u8>, value: i32) -> Result<()> {
    if !(-0x1000_0000..=0x0FFF_FFFF).contains(&value) {
        return Err(malformed_error!(
            "Value {} exceeds the compressed integer range",
            value
        ));
    }

    if value >= 0 {
        return write_compressed_uint(data, (value as u32) << 1);
    }

    let biased = if value >= -0x40 {
        0x40 + value
    } else if value >= -0x2000 {
        0x2000 + value
    } else {
        0x1000_0000 + value
    };

    let encoded = ((biased as u32) << 1) | 1;
    if value >= -0x40 {
        data.push(encoded as u8);
    } else if value >= -0x2000 {
        data.extend_from_slice(&(0x8000 | encoded as u16).to_be_bytes());
    } else {
        data.extend_from_slice(&(0xC000_0000 | encoded).to_be_bytes());
    }

    Ok(())
}

/// Reads a compressed unsigned integer (II.23.2), advancing `offset`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] on truncated input and
/// [`crate::Error::Malformed`] on an invalid lead byte.
pub fn read_compressed_uint(data: &[u8], offset: &mut usize) -> Result<u32> {
    let first = read_le_at::<u8>(data, offset)?;
    if first & 0x80 == 0 {
        return Ok(u32::from(first));
    }

    if first & 0xC0 == 0x80 {
        let second = read_le_at::<u8>(data, offset)?;
        return Ok((u32::from(first & 0x3F) << 8) | u32::from(second));
    }

    if first & 0xE0 == 0xC0 {
        let mut value = u32::from(first & 0x1F);
        for _ in 0..3 {
            value = (value << 8) | u32::from(read_le_at::<u8>(data, offset)?);
        }
        return Ok(value);
    }

    Err(malformed_error!(
        "Invalid compressed integer lead byte 0x{:02X}",
        first
    ))
}

/// Reads a compressed signed integer (II.23.2), advancing `offset`.
///
/// # Errors
/// See [`read_compressed_uint`].
pub fn read_compressed_int(data: &[u8], offset: &mut usize) -> Result<i32> {
    let start = *offset;
    let raw = read_compressed_uint(data, offset)?;
    let value = (raw >> 1) as i32;
    if raw & 1 == 0 {
        return Ok(value);
    }

    Ok(match *offset - start {
        1 => value - 0x40,
        2 => value - 0x2000,
        _ => value - 0x1000_0000,
    })
}
