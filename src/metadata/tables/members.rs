//! Field, method and parameter tables, and the member reference tables built on them.

metadata_row! {
    /// The Field table defines fields for types in the `TypeDef` table. `TableId` = 0x04
    pub struct FieldRaw => Field {
        /// a 2-byte bitmask of type `FieldAttributes`, §II.23.1.5
        pub flags: u16,
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap
        pub signature: blob,
    }
}

metadata_row! {
    /// The MethodDef table defines methods for types in the `TypeDef` table. `TableId` = 0x06
    pub struct MethodDefRaw => MethodDef {
        /// a 4-byte RVA of the method body, zero for abstract and runtime methods
        pub rva: u32,
        /// a 2-byte bitmask of type `MethodImplAttributes`, §II.23.1.10
        pub impl_flags: u16,
        /// a 2-byte bitmask of type `MethodAttributes`, §II.23.1.10
        pub flags: u16,
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap
        pub signature: blob,
        /// first row of the owned parameter run
        pub param_list: rid(Param),
    }
}

metadata_row! {
    /// The Param table describes method parameters and the return value. `TableId` = 0x08
    pub struct ParamRaw => Param {
        /// a 2-byte bitmask of type `ParamAttributes`, §II.23.1.13
        pub flags: u16,
        /// a 2-byte position, zero for the return value
        pub sequence: u16,
        /// an index into the String heap
        pub name: string,
    }
}

metadata_row! {
    /// The MemberRef table references fields and methods of other types. `TableId` = 0x0A
    pub struct MemberRefRaw => MemberRef {
        /// a `MemberRefParent` coded index
        pub class: coded(MemberRefParent),
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap
        pub signature: blob,
    }
}

metadata_row! {
    /// The StandAloneSig table holds signatures not owned by a member, like local
    /// variable signatures. `TableId` = 0x11
    pub struct StandAloneSigRaw => StandAloneSig {
        /// an index into the Blob heap
        pub signature: blob,
    }
}

metadata_row! {
    /// The MethodImpl table records explicit overrides. `TableId` = 0x19
    ///
    /// Sorted by `class`.
    pub struct MethodImplRaw => MethodImpl, sorted_by(class) {
        /// the type holding the override
        pub class: rid(TypeDef),
        /// a `MethodDefOrRef` coded index of the implementing method
        pub method_body: coded(MethodDefOrRef),
        /// a `MethodDefOrRef` coded index of the overridden method
        pub method_declaration: coded(MethodDefOrRef),
    }
}

metadata_row! {
    /// The MethodSpec table holds generic method instantiations. `TableId` = 0x2B
    pub struct MethodSpecRaw => MethodSpec {
        /// a `MethodDefOrRef` coded index of the generic method
        pub method: coded(MethodDefOrRef),
        /// an index into the Blob heap, the instantiation signature
        pub instantiation: blob,
    }
}

metadata_row! {
    /// The FieldLayout table specifies explicit field offsets. `TableId` = 0x10
    ///
    /// Sorted by `field`.
    pub struct FieldLayoutRaw => FieldLayout, sorted_by(field) {
        /// a 4-byte offset of the field inside its type
        pub field_offset: u32,
        /// the laid out field
        pub field: rid(Field),
    }
}

metadata_row! {
    /// The FieldRVA table maps fields to their initial data. `TableId` = 0x1D
    ///
    /// Sorted by `field`.
    pub struct FieldRvaRaw => FieldRVA, sorted_by(field) {
        /// a 4-byte RVA of the data
        pub rva: u32,
        /// the initialized field
        pub field: rid(Field),
    }
}

metadata_row! {
    /// The ImplMap table holds P/Invoke mappings. `TableId` = 0x1C
    ///
    /// Sorted by `member_forwarded`.
    pub struct ImplMapRaw => ImplMap, sorted_by(member_forwarded) {
        /// a 2-byte bitmask of type `PInvokeAttributes`, §II.23.1.8
        pub mapping_flags: u16,
        /// a `MemberForwarded` coded index, in practice always a `MethodDef`
        pub member_forwarded: coded(MemberForwarded),
        /// an index into the String heap, the exported name
        pub import_name: string,
        /// the native module
        pub import_scope: rid(ModuleRef),
    }
}
