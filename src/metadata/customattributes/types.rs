//! Custom attribute values and the serialization types describing them, ECMA-335 II.23.3.

/// A custom attribute blob: constructor arguments followed by named field and property values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomAttributeValue {
    /// Fixed arguments, in constructor parameter order
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

/// The type of a custom attribute argument, as written before named arguments and boxed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentType {
    /// System.Boolean
    Boolean,
    /// System.Char
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
    /// System.String
    String,
    /// System.Type
    Type,
    /// System.Object, the value is written with its own type
    Object,
    /// An enum, by assembly qualified name
    Enum(String),
    /// A single dimensional array
    Array(Box<ArgumentType>),
}

/// A single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// A UTF-16 code unit
    Char(u16),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// A string, `None` for null
    String(Option<String>),
    /// A type by assembly qualified name, `None` for null
    Type(Option<String>),
    /// Enum value: assembly qualified enum type and the underlying integer value
    Enum(String, Box<CustomAttributeArgument>),
    /// Array of elements of one type
    Array(ArgumentType, Vec<CustomAttributeArgument>),
    /// A value passed for a parameter of type `object`
    Boxed(Box<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// The serialization type of this value
    #[must_use]
    pub fn argument_type(&self) -> ArgumentType {
        match self {
            CustomAttributeArgument::Bool(_) => ArgumentType::Boolean,
            CustomAttributeArgument::Char(_) => ArgumentType::Char,
            CustomAttributeArgument::I1(_) => ArgumentType::I1,
            CustomAttributeArgument::U1(_) => ArgumentType::U1,
            CustomAttributeArgument::I2(_) => ArgumentType::I2,
            CustomAttributeArgument::U2(_) => ArgumentType::U2,
            CustomAttributeArgument::I4(_) => ArgumentType::I4,
            CustomAttributeArgument::U4(_) => ArgumentType::U4,
            CustomAttributeArgument::I8(_) => ArgumentType::I8,
            CustomAttributeArgument::U8(_) => ArgumentType::U8,
            CustomAttributeArgument::R4(_) => ArgumentType::R4,
            CustomAttributeArgument::R8(_) => ArgumentType::R8,
            CustomAttributeArgument::String(_) => ArgumentType::String,
            CustomAttributeArgument::Type(_) => ArgumentType::Type,
            CustomAttributeArgument::Enum(name, _) => ArgumentType::Enum(name.clone()),
            CustomAttributeArgument::Array(element, _) => {
                ArgumentType::Array(Box::new(element.clone()))
            }
            CustomAttributeArgument::Boxed(_) => ArgumentType::Object,
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

impl CustomAttributeNamedArgument {
    /// A property assignment
    pub fn property(name: impl Into<String>, value: CustomAttributeArgument) -> Self {
        CustomAttributeNamedArgument {
            is_field: false,
            name: name.into(),
            value,
        }
    }

    /// A field assignment
    pub fn field(name: impl Into<String>, value: CustomAttributeArgument) -> Self {
        CustomAttributeNamedArgument {
            is_field: true,
            name: name.into(),
            value,
        }
    }
}

/// .NET `CorSerializationType` constants as defined in corhdr.h
#[allow(non_snake_case, missing_docs)]
pub mod SERIALIZATION_TYPE {
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0A;
    pub const U8: u8 = 0x0B;
    pub const R4: u8 = 0x0C;
    pub const R8: u8 = 0x0D;
    pub const STRING: u8 = 0x0E;
    pub const SZARRAY: u8 = 0x1D;
    pub const TYPE: u8 = 0x50;
    pub const TAGGED_OBJECT: u8 = 0x51;
    pub const FIELD: u8 = 0x53;
    pub const PROPERTY: u8 = 0x54;
    pub const ENUM: u8 = 0x55;
}
