//! Type definition and type reference tables.

metadata_row! {
    /// The TypeRef table references types defined in other scopes. `TableId` = 0x01
    pub struct TypeRefRaw => TypeRef {
        /// a `ResolutionScope` coded index: `Module`, `ModuleRef`, `AssemblyRef` or the
        /// enclosing `TypeRef` of a nested type
        pub resolution_scope: coded(ResolutionScope),
        /// an index into the String heap
        pub type_name: string,
        /// an index into the String heap
        pub type_namespace: string,
    }
}

metadata_row! {
    /// The TypeDef table defines the types of this module. `TableId` = 0x02
    ///
    /// `field_list` and `method_list` start the contiguous runs of fields and methods
    /// owned by the type; the run ends where the next type's run starts.
    pub struct TypeDefRaw => TypeDef {
        /// a 4-byte bitmask of type `TypeAttributes`, §II.23.1.15
        pub flags: u32,
        /// an index into the String heap
        pub type_name: string,
        /// an index into the String heap
        pub type_namespace: string,
        /// a `TypeDefOrRef` coded index of the base type, null for interfaces and `System.Object`
        pub extends: coded(TypeDefOrRef),
        /// first row of the owned field run
        pub field_list: rid(Field),
        /// first row of the owned method run
        pub method_list: rid(MethodDef),
    }
}

metadata_row! {
    /// The TypeSpec table holds types described by a signature blob. `TableId` = 0x1B
    pub struct TypeSpecRaw => TypeSpec {
        /// an index into the Blob heap
        pub signature: blob,
    }
}

metadata_row! {
    /// The InterfaceImpl table records the interfaces a type implements. `TableId` = 0x09
    ///
    /// Sorted by `class`, then by `interface`.
    pub struct InterfaceImplRaw => InterfaceImpl, sorted_by(class, interface) {
        /// the implementing type
        pub class: rid(TypeDef),
        /// a `TypeDefOrRef` coded index of the interface
        pub interface: coded(TypeDefOrRef),
    }
}

metadata_row! {
    /// The NestedClass table links nested types to their enclosing type. `TableId` = 0x29
    ///
    /// Sorted by `nested_class`.
    pub struct NestedClassRaw => NestedClass, sorted_by(nested_class) {
        /// the nested type
        pub nested_class: rid(TypeDef),
        /// the enclosing type
        pub enclosing_class: rid(TypeDef),
    }
}

metadata_row! {
    /// The ClassLayout table specifies explicit packing and size of types. `TableId` = 0x0F
    ///
    /// Sorted by `parent`.
    pub struct ClassLayoutRaw => ClassLayout, sorted_by(parent) {
        /// a 2-byte packing size, a power of two up to 128 or zero
        pub packing_size: u16,
        /// a 4-byte total size of the type
        pub class_size: u32,
        /// the laid out type
        pub parent: rid(TypeDef),
    }
}
