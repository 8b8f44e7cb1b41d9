use strum::{EnumCount, EnumIter};

#[allow(non_snake_case, dead_code, missing_docs)]
/// Element type codes of signature blobs, ECMA-335 II.23.1.16
pub mod ELEMENT_TYPE {
    //Marks end of a list
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Followed by type
    pub const PTR: u8 = 0x0f;
    // Followed by type
    pub const BYREF: u8 = 0x10;
    // Followed by TypeDef or TypeRef token
    pub const VALUETYPE: u8 = 0x11;
    // Followed by TypeDef or TypeRef token
    pub const CLASS: u8 = 0x12;
    // Generic parameter in a generic type definition, represented as number
    pub const VAR: u8 = 0x13;
    // type rank boundsCount bound1 … loCount lo1 …
    pub const ARRAY: u8 = 0x14;
    // Generic type instantiation. Followed by type type-arg-count type-1 ... type-n
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // Followed by full method signature
    pub const FNPTR: u8 = 0x1b;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Single-dim array with 0 lower bound
    pub const SZARRAY: u8 = 0x1d;
    // Generic parameter in a generic method definition, represented as number
    pub const MVAR: u8 = 0x1e;
    // Required modifier : followed by a TypeDef or TypeRef token
    pub const CMOD_REQD: u8 = 0x1f;
    // Optional modifier : followed by a TypeDef or TypeRef token
    pub const CMOD_OPT: u8 = 0x20;
    // Implemented within the CLI
    pub const INTERNAL: u8 = 0x21;
    // Or’d with following element types
    pub const MODIFIER: u8 = 0x40;
    // Sentinel for vararg method signature
    pub const SENTINEL: u8 = 0x41;
    // Denotes a local variable that points at a pinned object
    pub const PINNED: u8 = 0x45;
}

/// The built-in types that signatures encode with a single element type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum ElementType {
    /// System.Void
    Void,
    /// System.Boolean
    Boolean,
    /// System.Char - a UTF-16 code unit
    Char,
    /// System.SByte
    I1,
    /// System.Byte
    U1,
    /// System.Int16
    I2,
    /// System.UInt16
    U2,
    /// System.Int32
    I4,
    /// System.UInt32
    U4,
    /// System.Int64
    I8,
    /// System.UInt64
    U8,
    /// System.Single
    R4,
    /// System.Double
    R8,
    /// System.IntPtr
    I,
    /// System.UIntPtr
    U,
    /// System.String
    String,
    /// System.Object
    Object,
    /// System.TypedReference
    TypedReference,
}

impl ElementType {
    /// The signature byte of this type
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            ElementType::Void => ELEMENT_TYPE::VOID,
            ElementType::Boolean => ELEMENT_TYPE::BOOLEAN,
            ElementType::Char => ELEMENT_TYPE::CHAR,
            ElementType::I1 => ELEMENT_TYPE::I1,
            ElementType::U1 => ELEMENT_TYPE::U1,
            ElementType::I2 => ELEMENT_TYPE::I2,
            ElementType::U2 => ELEMENT_TYPE::U2,
            ElementType::I4 => ELEMENT_TYPE::I4,
            ElementType::U4 => ELEMENT_TYPE::U4,
            ElementType::I8 => ELEMENT_TYPE::I8,
            ElementType::U8 => ELEMENT_TYPE::U8,
            ElementType::R4 => ELEMENT_TYPE::R4,
            ElementType::R8 => ELEMENT_TYPE::R8,
            ElementType::I => ELEMENT_TYPE::I,
            ElementType::U => ELEMENT_TYPE::U,
            ElementType::String => ELEMENT_TYPE::STRING,
            ElementType::Object => ELEMENT_TYPE::OBJECT,
            ElementType::TypedReference => ELEMENT_TYPE::TYPEDBYREF,
        }
    }

    /// Map a signature byte back to its built-in type, if it denotes one
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            ELEMENT_TYPE::VOID => ElementType::Void,
            ELEMENT_TYPE::BOOLEAN => ElementType::Boolean,
            ELEMENT_TYPE::CHAR => ElementType::Char,
            ELEMENT_TYPE::I1 => ElementType::I1,
            ELEMENT_TYPE::U1 => ElementType::U1,
            ELEMENT_TYPE::I2 => ElementType::I2,
            ELEMENT_TYPE::U2 => ElementType::U2,
            ELEMENT_TYPE::I4 => ElementType::I4,
            ELEMENT_TYPE::U4 => ElementType::U4,
            ELEMENT_TYPE::I8 => ElementType::I8,
            ELEMENT_TYPE::U8 => ElementType::U8,
            ELEMENT_TYPE::R4 => ElementType::R4,
            ELEMENT_TYPE::R8 => ElementType::R8,
            ELEMENT_TYPE::I => ElementType::I,
            ELEMENT_TYPE::U => ElementType::U,
            ELEMENT_TYPE::STRING => ElementType::String,
            ELEMENT_TYPE::OBJECT => ElementType::Object,
            ELEMENT_TYPE::TYPEDBYREF => ElementType::TypedReference,
            _ => return None,
        })
    }

    /// The type name inside the `System` namespace
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Void => "Void",
            ElementType::Boolean => "Boolean",
            ElementType::Char => "Char",
            ElementType::I1 => "SByte",
            ElementType::U1 => "Byte",
            ElementType::I2 => "Int16",
            ElementType::U2 => "UInt16",
            ElementType::I4 => "Int32",
            ElementType::U4 => "UInt32",
            ElementType::I8 => "Int64",
            ElementType::U8 => "UInt64",
            ElementType::R4 => "Single",
            ElementType::R8 => "Double",
            ElementType::I => "IntPtr",
            ElementType::U => "UIntPtr",
            ElementType::String => "String",
            ElementType::Object => "Object",
            ElementType::TypedReference => "TypedReference",
        }
    }

    /// Is this a value type
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        !matches!(self, ElementType::String | ElementType::Object)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn codes_map_back() {
        for element in ElementType::iter() {
            assert_eq!(ElementType::from_code(element.code()), Some(element));
        }
        assert_eq!(ElementType::from_code(ELEMENT_TYPE::CLASS), None);
        assert_eq!(ElementType::from_code(ELEMENT_TYPE::SZARRAY), None);
    }

    #[test]
    fn value_types() {
        assert!(ElementType::I4.is_value_type());
        assert!(ElementType::Void.is_value_type());
        assert!(!ElementType::String.is_value_type());
        assert!(!ElementType::Object.is_value_type());
    }

    #[test]
    fn structural_codes() {
        assert_eq!(ELEMENT_TYPE::PTR, 0x0f);
        assert_eq!(ELEMENT_TYPE::BYREF, 0x10);
        assert_eq!(ELEMENT_TYPE::ARRAY, 0x14);
        assert_eq!(ELEMENT_TYPE::GENERICINST, 0x15);
        assert_eq!(ELEMENT_TYPE::SZARRAY, 0x1d);
        assert_eq!(ELEMENT_TYPE::CMOD_REQD, 0x1f);
        assert_eq!(ELEMENT_TYPE::CMOD_OPT, 0x20);
        assert_eq!(ELEMENT_TYPE::SENTINEL, 0x41);
        assert_eq!(ELEMENT_TYPE::PINNED, 0x45);
    }
}
