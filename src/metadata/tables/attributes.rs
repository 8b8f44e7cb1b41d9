//! Tables attaching blobs to other entities: constants, custom attributes, marshalling
//! descriptors and declarative security. All of them are sorted by their owner.

metadata_row! {
    /// The Constant table stores compile-time constant values of fields, parameters and
    /// properties. `TableId` = 0x0B
    ///
    /// Sorted by `parent`.
    pub struct ConstantRaw => Constant, sorted_by(parent) {
        /// a 1-byte element type code of the value, followed by a padding byte
        pub base: padded_u8,
        /// a `HasConstant` coded index
        pub parent: coded(HasConstant),
        /// an index into the Blob heap
        pub value: blob,
    }
}

metadata_row! {
    /// The CustomAttribute table attaches attribute instances to entities. `TableId` = 0x0C
    ///
    /// Sorted by `parent`.
    pub struct CustomAttributeRaw => CustomAttribute, sorted_by(parent) {
        /// a `HasCustomAttribute` coded index
        pub parent: coded(HasCustomAttribute),
        /// a `CustomAttributeType` coded index of the attribute constructor
        pub constructor: coded(CustomAttributeType),
        /// an index into the Blob heap
        pub value: blob,
    }
}

metadata_row! {
    /// The FieldMarshal table holds native marshalling descriptors. `TableId` = 0x0D
    ///
    /// Sorted by `parent`.
    pub struct FieldMarshalRaw => FieldMarshal, sorted_by(parent) {
        /// a `HasFieldMarshal` coded index
        pub parent: coded(HasFieldMarshal),
        /// an index into the Blob heap
        pub native_type: blob,
    }
}

metadata_row! {
    /// The DeclSecurity table holds declarative security permission sets. `TableId` = 0x0E
    ///
    /// Sorted by `parent`.
    pub struct DeclSecurityRaw => DeclSecurity, sorted_by(parent) {
        /// a 2-byte `SecurityAction` value
        pub action: u16,
        /// a `HasDeclSecurity` coded index
        pub parent: coded(HasDeclSecurity),
        /// an index into the Blob heap
        pub permission_set: blob,
    }
}
