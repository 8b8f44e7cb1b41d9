use strum::{EnumCount, EnumIter};

/// Identifiers of every metadata table defined by ECMA-335 and the portable PDB format.
///
/// The discriminant is the table number used in metadata tokens and in the `valid` and
/// `sorted` bit vectors of the tables stream header.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TableId {
    /// `Module` table (0x00), exactly one row describing the current module
    Module = 0x00,
    /// `TypeRef` table (0x01), references to types defined in other scopes
    TypeRef = 0x01,
    /// `TypeDef` table (0x02), types defined in this module
    TypeDef = 0x02,
    /// `FieldPtr` table (0x03), indirection used by uncompressed metadata
    FieldPtr = 0x03,
    /// `Field` table (0x04), field definitions
    Field = 0x04,
    /// `MethodPtr` table (0x05), indirection used by uncompressed metadata
    MethodPtr = 0x05,
    /// `MethodDef` table (0x06), method definitions
    MethodDef = 0x06,
    /// `ParamPtr` table (0x07), indirection used by uncompressed metadata
    ParamPtr = 0x07,
    /// `Param` table (0x08), parameter definitions
    Param = 0x08,
    /// `InterfaceImpl` table (0x09), interfaces implemented by types
    InterfaceImpl = 0x09,
    /// `MemberRef` table (0x0A), references to fields and methods of other types
    MemberRef = 0x0A,
    /// `Constant` table (0x0B), compile-time constant values
    Constant = 0x0B,
    /// `CustomAttribute` table (0x0C), custom attribute instances
    CustomAttribute = 0x0C,
    /// `FieldMarshal` table (0x0D), native marshalling descriptors
    FieldMarshal = 0x0D,
    /// `DeclSecurity` table (0x0E), declarative security permission sets
    DeclSecurity = 0x0E,
    /// `ClassLayout` table (0x0F), explicit packing and class size
    ClassLayout = 0x0F,
    /// `FieldLayout` table (0x10), explicit field offsets
    FieldLayout = 0x10,
    /// `StandAloneSig` table (0x11), standalone signatures
    StandAloneSig = 0x11,
    /// `EventMap` table (0x12), maps types to their event ranges
    EventMap = 0x12,
    /// `EventPtr` table (0x13), indirection used by uncompressed metadata
    EventPtr = 0x13,
    /// `Event` table (0x14), event definitions
    Event = 0x14,
    /// `PropertyMap` table (0x15), maps types to their property ranges
    PropertyMap = 0x15,
    /// `PropertyPtr` table (0x16), indirection used by uncompressed metadata
    PropertyPtr = 0x16,
    /// `Property` table (0x17), property definitions
    Property = 0x17,
    /// `MethodSemantics` table (0x18), accessor methods of events and properties
    MethodSemantics = 0x18,
    /// `MethodImpl` table (0x19), explicit method overrides
    MethodImpl = 0x19,
    /// `ModuleRef` table (0x1A), references to other modules
    ModuleRef = 0x1A,
    /// `TypeSpec` table (0x1B), type specifications by signature
    TypeSpec = 0x1B,
    /// `ImplMap` table (0x1C), P/Invoke mappings
    ImplMap = 0x1C,
    /// `FieldRVA` table (0x1D), initial data of fields
    FieldRVA = 0x1D,
    /// `EncLog` table (0x1E), edit-and-continue log
    EncLog = 0x1E,
    /// `EncMap` table (0x1F), edit-and-continue token map
    EncMap = 0x1F,
    /// `Assembly` table (0x20), the current assembly manifest
    Assembly = 0x20,
    /// `AssemblyProcessor` table (0x21), unused by current runtimes
    AssemblyProcessor = 0x21,
    /// `AssemblyOS` table (0x22), unused by current runtimes
    AssemblyOS = 0x22,
    /// `AssemblyRef` table (0x23), referenced assemblies
    AssemblyRef = 0x23,
    /// `AssemblyRefProcessor` table (0x24), unused by current runtimes
    AssemblyRefProcessor = 0x24,
    /// `AssemblyRefOS` table (0x25), unused by current runtimes
    AssemblyRefOS = 0x25,
    /// `File` table (0x26), files of a multi-file assembly
    File = 0x26,
    /// `ExportedType` table (0x27), types forwarded or exported from other modules
    ExportedType = 0x27,
    /// `ManifestResource` table (0x28), embedded and linked resources
    ManifestResource = 0x28,
    /// `NestedClass` table (0x29), nesting relationships between types
    NestedClass = 0x29,
    /// `GenericParam` table (0x2A), generic parameters of types and methods
    GenericParam = 0x2A,
    /// `MethodSpec` table (0x2B), generic method instantiations
    MethodSpec = 0x2B,
    /// `GenericParamConstraint` table (0x2C), constraints on generic parameters
    GenericParamConstraint = 0x2C,
    /// `Document` table (0x30), portable PDB source documents
    Document = 0x30,
    /// `MethodDebugInformation` table (0x31), portable PDB sequence points
    MethodDebugInformation = 0x31,
    /// `LocalScope` table (0x32), portable PDB lexical scopes
    LocalScope = 0x32,
    /// `LocalVariable` table (0x33), portable PDB local variables
    LocalVariable = 0x33,
    /// `LocalConstant` table (0x34), portable PDB local constants
    LocalConstant = 0x34,
    /// `ImportScope` table (0x35), portable PDB namespace import scopes
    ImportScope = 0x35,
    /// `StateMachineMethod` table (0x36), portable PDB async/iterator kickoff mapping
    StateMachineMethod = 0x36,
    /// `CustomDebugInformation` table (0x37), portable PDB custom debug blobs
    CustomDebugInformation = 0x37,
}

impl TableId {
    /// Number of slots needed to index per-table data by table number.
    pub const SLOTS: usize = TableId::CustomDebugInformation as usize + 1;

    /// Bit of this table inside the `valid` / `sorted` header vectors.
    #[must_use]
    pub fn mask(self) -> u64 {
        1_u64 << (self as u8)
    }

    /// Maps a raw table number back to its identifier.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<TableId> {
        use strum::IntoEnumIterator;

        TableId::iter().find(|id| *id as u8 == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn table_numbers() {
        assert_eq!(TableId::COUNT, 53);
        assert_eq!(TableId::SLOTS, 0x38);
        assert_eq!(TableId::GenericParamConstraint as u8, 0x2C);
        assert_eq!(TableId::Document as u8, 0x30);

        for id in TableId::iter() {
            assert_eq!(TableId::from_u8(id as u8), Some(id));
        }
        assert_eq!(TableId::from_u8(0x2D), None);
    }
}
