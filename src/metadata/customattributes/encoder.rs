//! Custom attribute blob encoding, ECMA-335 II.23.3.

use crate::{
    file::io::{write_compressed_uint, write_le},
    metadata::customattributes::{
        ArgumentType, CustomAttributeArgument, CustomAttributeNamedArgument, CustomAttributeValue,
        SERIALIZATION_TYPE,
    },
    Result,
};

/// The prolog every custom attribute blob starts with
pub const CUSTOM_ATTRIBUTE_PROLOG: u16 = 0x0001;

/// Encodes a custom attribute value into the blob referenced by `CustomAttribute.Value`.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if a string, array or argument list is too long to
/// be encoded.
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::customattributes::{
///     encode_custom_attribute_value, CustomAttributeArgument, CustomAttributeValue,
/// };
///
/// let value = CustomAttributeValue {
///     fixed_args: vec![CustomAttributeArgument::String(Some("Hi".to_string()))],
///     named_args: vec![],
/// };
/// assert_eq!(
///     encode_custom_attribute_value(&value)?,
///     [0x01, 0x00, 0x02, b'H', b'i', 0x00, 0x00]
/// );
/// # Ok::<(), cilmeta::Error>(())
/// ```
pub fn encode_custom_attribute_value(value: &CustomAttributeValue) -> Result<Vec<u8>> {
    let mut blob = Vec::new();
    write_le::<u16>(&mut blob, CUSTOM_ATTRIBUTE_PROLOG);

    for argument in &value.fixed_args {
        write_fixed_argument(&mut blob, argument)?;
    }

    let count = u16::try_from(value.named_args.len())
        .map_err(|_| malformed_error!("Too many named arguments: {}", value.named_args.len()))?;
    write_le::<u16>(&mut blob, count);
    for named in &value.named_args {
        write_named_argument(&mut blob, named)?;
    }

    Ok(blob)
}

/// Appends a `NamedArg`: field or property marker, type, name and value.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for values that cannot be encoded.
pub fn write_named_argument(blob: &mut Vec<u8>, named: &CustomAttributeNamedArgument) -> Result<()> {
    blob.push(if named.is_field {
        SERIALIZATION_TYPE::FIELD
    } else {
        SERIALIZATION_TYPE::PROPERTY
    });
    write_argument_type(blob, &named.value.argument_type())?;
    write_ser_string(blob, Some(&named.name))?;
    write_fixed_argument(blob, &named.value)
}

/// Appends a `FieldOrPropType`.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if an enum name is too long.
pub fn write_argument_type(blob: &mut Vec<u8>, argument_type: &ArgumentType) -> Result<()> {
    match argument_type {
        ArgumentType::Boolean => blob.push(SERIALIZATION_TYPE::BOOLEAN),
        ArgumentType::Char => blob.push(SERIALIZATION_TYPE::CHAR),
        ArgumentType::I1 => blob.push(SERIALIZATION_TYPE::I1),
        ArgumentType::U1 => blob.push(SERIALIZATION_TYPE::U1),
        ArgumentType::I2 => blob.push(SERIALIZATION_TYPE::I2),
        ArgumentType::U2 => blob.push(SERIALIZATION_TYPE::U2),
        ArgumentType::I4 => blob.push(SERIALIZATION_TYPE::I4),
        ArgumentType::U4 => blob.push(SERIALIZATION_TYPE::U4),
        ArgumentType::I8 => blob.push(SERIALIZATION_TYPE::I8),
        ArgumentType::U8 => blob.push(SERIALIZATION_TYPE::U8),
        ArgumentType::R4 => blob.push(SERIALIZATION_TYPE::R4),
        ArgumentType::R8 => blob.push(SERIALIZATION_TYPE::R8),
        ArgumentType::String => blob.push(SERIALIZATION_TYPE::STRING),
        ArgumentType::Type => blob.push(SERIALIZATION_TYPE::TYPE),
        ArgumentType::Object => blob.push(SERIALIZATION_TYPE::TAGGED_OBJECT),
        ArgumentType::Enum(name) => {
            blob.push(SERIALIZATION_TYPE::ENUM);
            write_ser_string(blob, Some(name))?;
        }
        ArgumentType::Array(element) => {
            blob.push(SERIALIZATION_TYPE::SZARRAY);
            write_argument_type(blob, element)?;
        }
    }

    Ok(())
}

fn write_fixed_argument(blob: &mut Vec<u8>, argument: &CustomAttributeArgument) -> Result<()> {
    match argument {
        CustomAttributeArgument::Bool(value) => blob.push(u8::from(*value)),
        CustomAttributeArgument::Char(value) => write_le::<u16>(blob, *value),
        CustomAttributeArgument::I1(value) => write_le::<i8>(blob, *value),
        CustomAttributeArgument::U1(value) => blob.push(*value),
        CustomAttributeArgument::I2(value) => write_le::<i16>(blob, *value),
        CustomAttributeArgument::U2(value) => write_le::<u16>(blob, *value),
        CustomAttributeArgument::I4(value) => write_le::<i32>(blob, *value),
        CustomAttributeArgument::U4(value) => write_le::<u32>(blob, *value),
        CustomAttributeArgument::I8(value) => write_le::<i64>(blob, *value),
        CustomAttributeArgument::U8(value) => write_le::<u64>(blob, *value),
        CustomAttributeArgument::R4(value) => write_le::<f32>(blob, *value),
        CustomAttributeArgument::R8(value) => write_le::<f64>(blob, *value),
        CustomAttributeArgument::String(value) | CustomAttributeArgument::Type(value) => {
            write_ser_string(blob, value.as_deref())?;
        }
        CustomAttributeArgument::Enum(_, underlying) => write_fixed_argument(blob, underlying)?,
        CustomAttributeArgument::Array(_, elements) => {
            let count = u32::try_from(elements.len())
                .map_err(|_| malformed_error!("Array of {} elements is too long", elements.len()))?;
            write_le::<u32>(blob, count);
            for element in elements {
                write_fixed_argument(blob, element)?;
            }
        }
        CustomAttributeArgument::Boxed(inner) => {
            write_argument_type(blob, &inner.argument_type())?;
            write_fixed_argument(blob, inner)?;
        }
    }

    Ok(())
}

/// `SerString`: compressed length and UTF-8 bytes, or `0xFF` for null.
pub(crate) fn write_ser_string(blob: &mut Vec<u8>, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            let length = u32::try_from(value.len())
                .map_err(|_| malformed_error!("String of {} bytes is too long", value.len()))?;
            write_compressed_uint(blob, length)?;
            blob.extend_from_slice(value.as_bytes());
        }
        None => blob.push(0xFF),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attribute() {
        let blob = encode_custom_attribute_value(&CustomAttributeValue::default()).unwrap();
        assert_eq!(blob, [0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn fixed_arguments() {
        let value = CustomAttributeValue {
            fixed_args: vec![
                CustomAttributeArgument::I4(-2),
                CustomAttributeArgument::Bool(true),
                CustomAttributeArgument::String(None),
                CustomAttributeArgument::Enum(
                    "System.AttributeTargets".to_string(),
                    Box::new(CustomAttributeArgument::I4(4)),
                ),
            ],
            named_args: vec![],
        };

        let blob = encode_custom_attribute_value(&value).unwrap();
        assert_eq!(
            blob,
            [
                0x01, 0x00, // prolog
                0xFE, 0xFF, 0xFF, 0xFF, // -2
                0x01, // true
                0xFF, // null string
                0x04, 0x00, 0x00, 0x00, // enum underlying value
                0x00, 0x00, // no named arguments
            ]
        );
    }

    #[test]
    fn named_arguments() {
        let value = CustomAttributeValue {
            fixed_args: vec![],
            named_args: vec![
                CustomAttributeNamedArgument::property(
                    "AllowMultiple",
                    CustomAttributeArgument::Bool(true),
                ),
                CustomAttributeNamedArgument::field(
                    "Tags",
                    CustomAttributeArgument::Array(
                        ArgumentType::U1,
                        vec![CustomAttributeArgument::U1(7)],
                    ),
                ),
            ],
        };

        let blob = encode_custom_attribute_value(&value).unwrap();
        let mut expected = vec![0x01, 0x00, 0x02, 0x00];
        expected.extend_from_slice(&[0x54, 0x02, 0x0D]);
        expected.extend_from_slice(b"AllowMultiple");
        expected.push(0x01);
        expected.extend_from_slice(&[0x53, 0x1D, 0x05, 0x04]);
        expected.extend_from_slice(b"Tags");
        expected.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0x07]);
        assert_eq!(blob, expected);
    }

    #[test]
    fn boxed_values() {
        let value = CustomAttributeValue {
            fixed_args: vec![CustomAttributeArgument::Boxed(Box::new(
                CustomAttributeArgument::I2(3),
            ))],
            named_args: vec![],
        };
        let blob = encode_custom_attribute_value(&value).unwrap();
        assert_eq!(blob, [0x01, 0x00, 0x06, 0x03, 0x00, 0x00, 0x00]);
    }
}
