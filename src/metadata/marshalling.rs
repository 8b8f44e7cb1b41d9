//! Native type marshalling descriptors for the `FieldMarshal` table.
//!
//! A descriptor tells the runtime how a field or parameter crosses into unmanaged code
//! (P/Invoke, COM interop). It is encoded as a blob following ECMA-335 II.23.4: the
//! [`NATIVE_TYPE`] byte of the primary type, followed by the optional parameters of that
//! type. Optional trailing parameters are omitted when unset; an unset parameter that is
//! followed by a set one is written with its "unspecified" value.
//!
//! # Examples
//!
//! ```rust
//! use cilmeta::metadata::marshalling::{encode_marshalling_descriptor, MarshallingInfo, NativeType, NATIVE_TYPE};
//!
//! let info = MarshallingInfo::new(NativeType::Array {
//!     element_type: Some(Box::new(NativeType::I4)),
//!     size_parameter_index: Some(1),
//!     size: None,
//!     size_parameter_multiplier: None,
//! });
//! assert_eq!(encode_marshalling_descriptor(&info)?, [NATIVE_TYPE::ARRAY, NATIVE_TYPE::I4, 0x01]);
//! # Ok::<(), cilmeta::Error>(())
//! ```

use crate::{file::io::write_compressed_uint, Result};

#[allow(non_snake_case, dead_code, missing_docs)]
/// Native type bytes of marshalling descriptors
pub mod NATIVE_TYPE {
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const I1: u8 = 0x03;
    pub const U1: u8 = 0x04;
    pub const I2: u8 = 0x05;
    pub const U2: u8 = 0x06;
    pub const I4: u8 = 0x07;
    pub const U4: u8 = 0x08;
    pub const I8: u8 = 0x09;
    pub const U8: u8 = 0x0a;
    pub const R4: u8 = 0x0b;
    pub const R8: u8 = 0x0c;
    pub const SYSCHAR: u8 = 0x0d;
    pub const VARIANT: u8 = 0x0e;
    pub const CURRENCY: u8 = 0x0f;
    pub const PTR: u8 = 0x10;
    pub const DECIMAL: u8 = 0x11;
    pub const DATE: u8 = 0x12;
    pub const BSTR: u8 = 0x13;
    pub const LPSTR: u8 = 0x14;
    pub const LPWSTR: u8 = 0x15;
    pub const LPTSTR: u8 = 0x16;
    pub const FIXEDSYSSTRING: u8 = 0x17;
    pub const OBJECTREF: u8 = 0x18;
    pub const IUNKNOWN: u8 = 0x19;
    pub const IDISPATCH: u8 = 0x1a;
    pub const STRUCT: u8 = 0x1b;
    pub const INTERFACE: u8 = 0x1c;
    pub const SAFEARRAY: u8 = 0x1d;
    pub const FIXEDARRAY: u8 = 0x1e;
    pub const INT: u8 = 0x1f;
    pub const UINT: u8 = 0x20;
    pub const NESTEDSTRUCT: u8 = 0x21;
    pub const BYVALSTR: u8 = 0x22;
    pub const ANSIBSTR: u8 = 0x23;
    pub const TBSTR: u8 = 0x24;
    pub const VARIANTBOOL: u8 = 0x25;
    pub const FUNC: u8 = 0x26;
    pub const ASANY: u8 = 0x28;
    pub const ARRAY: u8 = 0x2a;
    pub const LPSTRUCT: u8 = 0x2b;
    pub const CUSTOMMARSHALER: u8 = 0x2c;
    pub const ERROR: u8 = 0x2d;
    pub const IINSPECTABLE: u8 = 0x2e;
    pub const HSTRING: u8 = 0x2f;
    pub const LPUTF8STR: u8 = 0x30;
    // Unspecified element type of an array
    pub const MAX: u8 = 0x50;
}

#[allow(non_snake_case, dead_code, missing_docs)]
/// COM `VARTYPE` values naming the element type of a safe array
pub mod VARIANT_TYPE {
    pub const EMPTY: u16 = 0;
    pub const NULL: u16 = 1;
    pub const I2: u16 = 2;
    pub const I4: u16 = 3;
    pub const R4: u16 = 4;
    pub const R8: u16 = 5;
    pub const CY: u16 = 6;
    pub const DATE: u16 = 7;
    pub const BSTR: u16 = 8;
    pub const DISPATCH: u16 = 9;
    pub const ERROR: u16 = 10;
    pub const BOOL: u16 = 11;
    pub const VARIANT: u16 = 12;
    pub const UNKNOWN: u16 = 13;
    pub const DECIMAL: u16 = 14;
    pub const I1: u16 = 16;
    pub const UI1: u16 = 17;
    pub const UI2: u16 = 18;
    pub const UI4: u16 = 19;
    pub const I8: u16 = 20;
    pub const UI8: u16 = 21;
    pub const INT: u16 = 22;
    pub const UINT: u16 = 23;
    pub const RECORD: u16 = 36;
}

/// A complete marshalling descriptor.
#[derive(Debug, PartialEq, Clone)]
pub struct MarshallingInfo {
    /// The primary native type
    pub primary_type: NativeType,
    /// Trailing types, rare outside of hand written descriptors
    pub additional_types: Vec<NativeType>,
}

impl MarshallingInfo {
    /// A descriptor consisting of `primary_type` alone
    #[must_use]
    pub fn new(primary_type: NativeType) -> Self {
        MarshallingInfo {
            primary_type,
            additional_types: Vec::new(),
        }
    }
}

/// A native type for marshalling between managed and unmanaged code.
///
/// Payload fields are `None` when unspecified.
#[derive(Debug, PartialEq, Clone)]
#[allow(missing_docs)]
pub enum NativeType {
    Void,
    Boolean,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    SysChar,
    Variant,
    Currency,
    Decimal,
    Date,
    Int,
    UInt,
    Error,
    BStr,
    /// Null-terminated ANSI string
    LPStr {
        /// Parameter holding the string length
        size_parameter_index: Option<u32>,
    },
    /// Null-terminated UTF-16 string
    LPWStr {
        /// Parameter holding the string length
        size_parameter_index: Option<u32>,
    },
    /// Platform dependent string
    LPTStr {
        /// Parameter holding the string length
        size_parameter_index: Option<u32>,
    },
    /// Null-terminated UTF-8 string
    LPUtf8Str {
        /// Parameter holding the string length
        size_parameter_index: Option<u32>,
    },
    /// Character buffer inlined into a structure
    FixedSysString {
        /// Buffer size in characters
        size: Option<u32>,
    },
    AnsiBStr,
    TBStr,
    /// By-value string
    ByValStr {
        /// Buffer size in characters
        size: Option<u32>,
    },
    VariantBool,
    /// Array inlined into a structure
    FixedArray {
        /// Number of elements
        size: Option<u32>,
        /// Element type
        element_type: Option<Box<NativeType>>,
    },
    /// C-style array sized at runtime
    Array {
        /// Element type
        element_type: Option<Box<NativeType>>,
        /// Parameter holding the element count
        size_parameter_index: Option<u32>,
        /// Fixed element count, added to the parameter value
        size: Option<u32>,
        /// Multiplier applied to the size parameter
        size_parameter_multiplier: Option<u32>,
    },
    /// COM `SAFEARRAY`
    SafeArray {
        /// `VARTYPE` of the elements, see [`VARIANT_TYPE`]
        variant_type: Option<u16>,
    },
    /// Raw pointer
    Ptr {
        /// Pointee type
        ref_type: Option<Box<NativeType>>,
    },
    IUnknown,
    IDispatch,
    IInspectable,
    /// COM interface pointer
    Interface {
        /// Parameter holding the IID
        iid_parameter_index: Option<u32>,
    },
    /// C-style structure
    Struct {
        /// Packing size in bytes
        packing_size: Option<u8>,
        /// Total size in bytes
        class_size: Option<u32>,
    },
    NestedStruct,
    LPStruct,
    /// User supplied marshaler
    CustomMarshaler {
        /// GUID of the marshaler, usually empty
        guid: String,
        /// Unmanaged type name, usually empty
        native_type_name: String,
        /// Assembly qualified name of the marshaler type
        marshaler_type: String,
        /// Argument passed to `GetInstance`
        cookie: String,
    },
    ObjectRef,
    Func,
    AsAny,
    HString,
}

impl NativeType {
    /// The leading byte of this type in a descriptor
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            NativeType::Void => NATIVE_TYPE::VOID,
            NativeType::Boolean => NATIVE_TYPE::BOOLEAN,
            NativeType::I1 => NATIVE_TYPE::I1,
            NativeType::U1 => NATIVE_TYPE::U1,
            NativeType::I2 => NATIVE_TYPE::I2,
            NativeType::U2 => NATIVE_TYPE::U2,
            NativeType::I4 => NATIVE_TYPE::I4,
            NativeType::U4 => NATIVE_TYPE::U4,
            NativeType::I8 => NATIVE_TYPE::I8,
            NativeType::U8 => NATIVE_TYPE::U8,
            NativeType::R4 => NATIVE_TYPE::R4,
            NativeType::R8 => NATIVE_TYPE::R8,
            NativeType::SysChar => NATIVE_TYPE::SYSCHAR,
            NativeType::Variant => NATIVE_TYPE::VARIANT,
            NativeType::Currency => NATIVE_TYPE::CURRENCY,
            NativeType::Decimal => NATIVE_TYPE::DECIMAL,
            NativeType::Date => NATIVE_TYPE::DATE,
            NativeType::Int => NATIVE_TYPE::INT,
            NativeType::UInt => NATIVE_TYPE::UINT,
            NativeType::Error => NATIVE_TYPE::ERROR,
            NativeType::BStr => NATIVE_TYPE::BSTR,
            NativeType::LPStr { .. } => NATIVE_TYPE::LPSTR,
            NativeType::LPWStr { .. } => NATIVE_TYPE::LPWSTR,
            NativeType::LPTStr { .. } => NATIVE_TYPE::LPTSTR,
            NativeType::LPUtf8Str { .. } => NATIVE_TYPE::LPUTF8STR,
            NativeType::FixedSysString { .. } => NATIVE_TYPE::FIXEDSYSSTRING,
            NativeType::AnsiBStr => NATIVE_TYPE::ANSIBSTR,
            NativeType::TBStr => NATIVE_TYPE::TBSTR,
            NativeType::ByValStr { .. } => NATIVE_TYPE::BYVALSTR,
            NativeType::VariantBool => NATIVE_TYPE::VARIANTBOOL,
            NativeType::FixedArray { .. } => NATIVE_TYPE::FIXEDARRAY,
            NativeType::Array { .. } => NATIVE_TYPE::ARRAY,
            NativeType::SafeArray { .. } => NATIVE_TYPE::SAFEARRAY,
            NativeType::Ptr { .. } => NATIVE_TYPE::PTR,
            NativeType::IUnknown => NATIVE_TYPE::IUNKNOWN,
            NativeType::IDispatch => NATIVE_TYPE::IDISPATCH,
            NativeType::IInspectable => NATIVE_TYPE::IINSPECTABLE,
            NativeType::Interface { .. } => NATIVE_TYPE::INTERFACE,
            NativeType::Struct { .. } => NATIVE_TYPE::STRUCT,
            NativeType::NestedStruct => NATIVE_TYPE::NESTEDSTRUCT,
            NativeType::LPStruct => NATIVE_TYPE::LPSTRUCT,
            NativeType::CustomMarshaler { .. } => NATIVE_TYPE::CUSTOMMARSHALER,
            NativeType::ObjectRef => NATIVE_TYPE::OBJECTREF,
            NativeType::Func => NATIVE_TYPE::FUNC,
            NativeType::AsAny => NATIVE_TYPE::ASANY,
            NativeType::HString => NATIVE_TYPE::HSTRING,
        }
    }

    /// A C-style array of `element_type` with every size parameter unspecified
    #[must_use]
    pub fn array_of(element_type: NativeType) -> Self {
        NativeType::Array {
            element_type: Some(Box::new(element_type)),
            size_parameter_index: None,
            size: None,
            size_parameter_multiplier: None,
        }
    }

    /// Returns true if this type carries parameters after its leading byte.
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        matches!(
            self,
            NativeType::LPStr { .. }
                | NativeType::LPWStr { .. }
                | NativeType::LPTStr { .. }
                | NativeType::LPUtf8Str { .. }
                | NativeType::FixedSysString { .. }
                | NativeType::ByValStr { .. }
                | NativeType::FixedArray { .. }
                | NativeType::Array { .. }
                | NativeType::SafeArray { .. }
                | NativeType::Ptr { .. }
                | NativeType::Interface { .. }
                | NativeType::Struct { .. }
                | NativeType::CustomMarshaler { .. }
        )
    }
}

/// Encodes a marshalling descriptor into the blob referenced by `FieldMarshal.NativeType`.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if a size or index exceeds the compressed integer range.
pub fn encode_marshalling_descriptor(info: &MarshallingInfo) -> Result<Vec<u8>> {
    let mut blob = Vec::new();
    write_native_type(&mut blob, &info.primary_type)?;
    for additional in &info.additional_types {
        write_native_type(&mut blob, additional)?;
    }

    Ok(blob)
}

fn write_native_type(blob: &mut Vec<u8>, native_type: &NativeType) -> Result<()> {
    blob.push(native_type.code());

    match native_type {
        NativeType::LPStr {
            size_parameter_index,
        }
        | NativeType::LPWStr {
            size_parameter_index,
        }
        | NativeType::LPTStr {
            size_parameter_index,
        }
        | NativeType::LPUtf8Str {
            size_parameter_index,
        } => write_optional(blob, *size_parameter_index)?,
        NativeType::Interface {
            iid_parameter_index,
        } => write_optional(blob, *iid_parameter_index)?,
        NativeType::FixedSysString { size } | NativeType::ByValStr { size } => {
            write_optional(blob, *size)?;
        }
        NativeType::FixedArray { size, element_type } => {
            match (size, element_type) {
                (Some(size), _) => write_compressed_uint(blob, *size)?,
                (None, Some(_)) => write_compressed_uint(blob, 0)?,
                (None, None) => {}
            }
            if let Some(element_type) = element_type {
                write_native_type(blob, element_type)?;
            }
        }
        NativeType::Array {
            element_type,
            size_parameter_index,
            size,
            size_parameter_multiplier,
        } => {
            let trailing = [*size_parameter_index, *size, *size_parameter_multiplier];
            let written = trailing.iter().rposition(Option::is_some).map_or(0, |last| last + 1);

            match element_type {
                Some(element_type) => write_native_type(blob, element_type)?,
                None if written > 0 => blob.push(NATIVE_TYPE::MAX),
                None => {}
            }
            for value in &trailing[..written] {
                write_compressed_uint(blob, value.unwrap_or(0))?;
            }
        }
        NativeType::SafeArray { variant_type } => {
            if let Some(variant_type) = variant_type {
                write_compressed_uint(blob, u32::from(*variant_type))?;
            }
        }
        NativeType::Ptr { ref_type } => {
            if let Some(ref_type) = ref_type {
                write_native_type(blob, ref_type)?;
            }
        }
        NativeType::Struct {
            packing_size,
            class_size,
        } => match (packing_size, class_size) {
            (Some(packing), size) => {
                blob.push(*packing);
                write_optional(blob, *size)?;
            }
            (None, Some(size)) => {
                blob.push(0);
                write_compressed_uint(blob, *size)?;
            }
            (None, None) => {}
        },
        NativeType::CustomMarshaler {
            guid,
            native_type_name,
            marshaler_type,
            cookie,
        } => {
            for value in [guid, native_type_name, marshaler_type, cookie] {
                write_ser_string(blob, value)?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn write_optional(blob: &mut Vec<u8>, value: Option<u32>) -> Result<()> {
    match value {
        Some(value) => write_compressed_uint(blob, value),
        None => Ok(()),
    }
}

fn write_ser_string(blob: &mut Vec<u8>, value: &str) -> Result<()> {
    let length = u32::try_from(value.len())
        .map_err(|_| malformed_error!("String of {} bytes is too long", value.len()))?;
    write_compressed_uint(blob, length)?;
    blob.extend_from_slice(value.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(native_type: NativeType) -> Vec<u8> {
        encode_marshalling_descriptor(&MarshallingInfo::new(native_type)).unwrap()
    }

    #[test]
    fn simple_types() {
        assert_eq!(encode(NativeType::Boolean), [NATIVE_TYPE::BOOLEAN]);
        assert_eq!(encode(NativeType::IUnknown), [NATIVE_TYPE::IUNKNOWN]);
        assert_eq!(
            encode(NativeType::LPWStr {
                size_parameter_index: None
            }),
            [NATIVE_TYPE::LPWSTR]
        );
        assert_eq!(
            encode(NativeType::LPStr {
                size_parameter_index: Some(5)
            }),
            [NATIVE_TYPE::LPSTR, 0x05]
        );
    }

    #[test]
    fn arrays() {
        assert_eq!(encode(NativeType::array_of(NativeType::U1)), [NATIVE_TYPE::ARRAY, NATIVE_TYPE::U1]);

        let unspecified_element = NativeType::Array {
            element_type: None,
            size_parameter_index: None,
            size: Some(16),
            size_parameter_multiplier: None,
        };
        assert_eq!(
            encode(unspecified_element),
            [NATIVE_TYPE::ARRAY, NATIVE_TYPE::MAX, 0x00, 0x10]
        );

        let fixed = NativeType::FixedArray {
            size: Some(8),
            element_type: Some(Box::new(NativeType::I2)),
        };
        assert_eq!(encode(fixed), [NATIVE_TYPE::FIXEDARRAY, 0x08, NATIVE_TYPE::I2]);

        assert_eq!(
            encode(NativeType::SafeArray {
                variant_type: Some(VARIANT_TYPE::BSTR)
            }),
            [NATIVE_TYPE::SAFEARRAY, 0x08]
        );
    }

    #[test]
    fn custom_marshaler() {
        let marshaler = NativeType::CustomMarshaler {
            guid: String::new(),
            native_type_name: String::new(),
            marshaler_type: "Acme.Marshaler".to_string(),
            cookie: "x".to_string(),
        };
        assert!(marshaler.has_parameters());

        let mut expected = vec![NATIVE_TYPE::CUSTOMMARSHALER, 0x00, 0x00, 0x0E];
        expected.extend_from_slice(b"Acme.Marshaler");
        expected.extend_from_slice(&[0x01, b'x']);
        assert_eq!(encode(marshaler), expected);
    }

    #[test]
    fn structs_and_pointers() {
        assert_eq!(
            encode(NativeType::Struct {
                packing_size: Some(4),
                class_size: Some(0x100)
            }),
            [NATIVE_TYPE::STRUCT, 0x04, 0x81, 0x00]
        );
        assert_eq!(
            encode(NativeType::Ptr {
                ref_type: Some(Box::new(NativeType::Void))
            }),
            [NATIVE_TYPE::PTR, NATIVE_TYPE::VOID]
        );
    }
}
