//! Default values of fields, parameters and properties for the `Constant` table.
//!
//! A constant row stores the element type of the value and a blob holding the value
//! bytes in little-endian order. Strings are stored as UTF-16LE without a terminator, and
//! a null reference is stored as `ELEMENT_TYPE_CLASS` with a 4-byte zero value.

use std::fmt;

use widestring::U16String;

use crate::{
    metadata::{
        streams::BlobHeapBuilder,
        tables::{CodedIndex, CodedIndexType, ConstantRaw},
        typesystem::ELEMENT_TYPE,
    },
    Error, Result,
};

/// A literal value stored in the `Constant` table
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// System.Boolean
    Boolean(bool),
    /// System.Char, one UTF-16 code unit
    Char(u16),
    /// System.SByte
    I1(i8),
    /// System.Byte
    U1(u8),
    /// System.Int16
    I2(i16),
    /// System.UInt16
    U2(u16),
    /// System.Int32
    I4(i32),
    /// System.UInt32
    U4(u32),
    /// System.Int64
    I8(i64),
    /// System.UInt64
    U8(u64),
    /// System.Single
    R4(f32),
    /// System.Double
    R8(f64),
    /// System.String
    String(String),
    /// A null object reference
    Null,
}

impl ConstantValue {
    /// The element type code written to `Constant.Type`
    #[must_use]
    pub fn element_type(&self) -> u8 {
        match self {
            ConstantValue::Boolean(_) => ELEMENT_TYPE::BOOLEAN,
            ConstantValue::Char(_) => ELEMENT_TYPE::CHAR,
            ConstantValue::I1(_) => ELEMENT_TYPE::I1,
            ConstantValue::U1(_) => ELEMENT_TYPE::U1,
            ConstantValue::I2(_) => ELEMENT_TYPE::I2,
            ConstantValue::U2(_) => ELEMENT_TYPE::U2,
            ConstantValue::I4(_) => ELEMENT_TYPE::I4,
            ConstantValue::U4(_) => ELEMENT_TYPE::U4,
            ConstantValue::I8(_) => ELEMENT_TYPE::I8,
            ConstantValue::U8(_) => ELEMENT_TYPE::U8,
            ConstantValue::R4(_) => ELEMENT_TYPE::R4,
            ConstantValue::R8(_) => ELEMENT_TYPE::R8,
            ConstantValue::String(_) => ELEMENT_TYPE::STRING,
            ConstantValue::Null => ELEMENT_TYPE::CLASS,
        }
    }

    /// The value bytes stored in the blob heap
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ConstantValue::Boolean(value) => vec![u8::from(*value)],
            ConstantValue::Char(value) => value.to_le_bytes().to_vec(),
            ConstantValue::I1(value) => value.to_le_bytes().to_vec(),
            ConstantValue::U1(value) => vec![*value],
            ConstantValue::I2(value) => value.to_le_bytes().to_vec(),
            ConstantValue::U2(value) => value.to_le_bytes().to_vec(),
            ConstantValue::I4(value) => value.to_le_bytes().to_vec(),
            ConstantValue::U4(value) => value.to_le_bytes().to_vec(),
            ConstantValue::I8(value) => value.to_le_bytes().to_vec(),
            ConstantValue::U8(value) => value.to_le_bytes().to_vec(),
            ConstantValue::R4(value) => value.to_le_bytes().to_vec(),
            ConstantValue::R8(value) => value.to_le_bytes().to_vec(),
            ConstantValue::String(value) => U16String::from_str(value)
                .as_slice()
                .iter()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
            ConstantValue::Null => vec![0; 4],
        }
    }

    /// Builds the `Constant` row giving `parent` this default value.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `parent` is not a `HasConstant` index, or
    /// [`Error::Malformed`] if the value does not fit the blob heap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cilmeta::metadata::{
    ///     constant::ConstantValue,
    ///     streams::BlobHeapBuilder,
    ///     tables::{CodedIndex, CodedIndexType, TableId},
    /// };
    ///
    /// let mut blobs = BlobHeapBuilder::new();
    /// let field = CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, 2)?;
    /// let row = ConstantValue::I4(42).to_row(field, &mut blobs)?;
    /// assert_eq!(row.base, 0x08);
    /// assert_eq!(row.parent.row, 2);
    /// # Ok::<(), cilmeta::Error>(())
    /// ```
    pub fn to_row(&self, parent: CodedIndex, blobs: &mut BlobHeapBuilder) -> Result<ConstantRaw> {
        if parent.ci_type != CodedIndexType::HasConstant {
            return Err(Error::CodedIndexMismatch {
                coded_index: CodedIndexType::HasConstant,
                table: parent.tag,
            });
        }

        Ok(ConstantRaw {
            base: self.element_type(),
            parent,
            value: blobs.add(&self.to_bytes())?,
        })
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Boolean(value) => write!(f, "{value}"),
            ConstantValue::Char(value) => match char::from_u32(u32::from(*value)) {
                Some(c) => write!(f, "'{c}'"),
                None => write!(f, "'\\u{value:04X}'"),
            },
            ConstantValue::I1(value) => write!(f, "{value}"),
            ConstantValue::U1(value) => write!(f, "{value}"),
            ConstantValue::I2(value) => write!(f, "{value}"),
            ConstantValue::U2(value) => write!(f, "{value}"),
            ConstantValue::I4(value) => write!(f, "{value}"),
            ConstantValue::U4(value) => write!(f, "{value}"),
            ConstantValue::I8(value) => write!(f, "{value}"),
            ConstantValue::U8(value) => write!(f, "{value}"),
            ConstantValue::R4(value) => write!(f, "{value}"),
            ConstantValue::R8(value) => write!(f, "{value}"),
            ConstantValue::String(value) => write!(f, "\"{value}\""),
            ConstantValue::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::TableId;

    #[test]
    fn value_bytes() {
        assert_eq!(ConstantValue::Boolean(true).to_bytes(), [0x01]);
        assert_eq!(ConstantValue::I2(-2).to_bytes(), [0xFE, 0xFF]);
        assert_eq!(ConstantValue::U4(0x0102_0304).to_bytes(), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(ConstantValue::R4(1.0).to_bytes(), [0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(ConstantValue::Null.to_bytes(), [0, 0, 0, 0]);
        assert_eq!(ConstantValue::Null.element_type(), 0x12);
    }

    #[test]
    fn strings_are_utf16() {
        let value = ConstantValue::String("Hi\u{00E9}".to_string());
        assert_eq!(value.element_type(), 0x0E);
        assert_eq!(value.to_bytes(), [b'H', 0x00, b'i', 0x00, 0xE9, 0x00]);
        assert!(ConstantValue::String(String::new()).to_bytes().is_empty());
    }

    #[test]
    fn row_projection() {
        let mut blobs = BlobHeapBuilder::new();
        let param = CodedIndex::new(CodedIndexType::HasConstant, TableId::Param, 1).unwrap();
        let row = ConstantValue::Char(u16::from(b'x')).to_row(param, &mut blobs).unwrap();
        assert_eq!(row.base, 0x03);
        assert_eq!(&blobs.data()[row.value as usize..], &[0x02, b'x', 0x00]);

        let wrong = CodedIndex::new(CodedIndexType::HasFieldMarshal, TableId::Param, 1).unwrap();
        assert!(matches!(
            ConstantValue::Null.to_row(wrong, &mut blobs),
            Err(Error::CodedIndexMismatch { .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(ConstantValue::String("a".into()).to_string(), "\"a\"");
        assert_eq!(ConstantValue::Char(u16::from(b'q')).to_string(), "'q'");
        assert_eq!(ConstantValue::Null.to_string(), "null");
    }
}
