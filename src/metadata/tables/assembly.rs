//! Assembly manifest tables.

use bitflags::bitflags;

bitflags! {
    /// Flags of the Assembly and AssemblyRef tables, §II.23.1.2
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AssemblyFlags: u32 {
        /// The blob holds the full public key instead of its token
        const PUBLIC_KEY = 0x0001;
        /// The assembly can be retargeted at runtime
        const RETARGETABLE = 0x0100;
        /// The JIT optimizer is disabled
        const DISABLE_JIT_COMPILE_OPTIMIZER = 0x4000;
        /// JIT tracking is enabled
        const ENABLE_JIT_COMPILE_TRACKING = 0x8000;
    }
}

metadata_row! {
    /// The Assembly table holds the manifest of the current assembly, zero or one row. `TableId` = 0x20
    pub struct AssemblyRaw => Assembly {
        /// a 4-byte hash algorithm id, `0x8004` for SHA-1
        pub hash_alg_id: u32,
        /// a 2-byte major version
        pub major_version: u16,
        /// a 2-byte minor version
        pub minor_version: u16,
        /// a 2-byte build number
        pub build_number: u16,
        /// a 2-byte revision number
        pub revision_number: u16,
        /// a 4-byte bitmask of type [`AssemblyFlags`]
        pub flags: u32,
        /// an index into the Blob heap, the public key
        pub public_key: blob,
        /// an index into the String heap
        pub name: string,
        /// an index into the String heap
        pub culture: string,
    }
}

metadata_row! {
    /// `TableId` = 0x21, ignored by the runtime
    pub struct AssemblyProcessorRaw => AssemblyProcessor {
        /// a 4-byte processor id
        pub processor: u32,
    }
}

metadata_row! {
    /// `TableId` = 0x22, ignored by the runtime
    pub struct AssemblyOsRaw => AssemblyOS {
        /// a 4-byte platform id
        pub os_platform_id: u32,
        /// a 4-byte major version
        pub os_major_version: u32,
        /// a 4-byte minor version
        pub os_minor_version: u32,
    }
}

metadata_row! {
    /// The AssemblyRef table references other assemblies. `TableId` = 0x23
    pub struct AssemblyRefRaw => AssemblyRef {
        /// a 2-byte major version
        pub major_version: u16,
        /// a 2-byte minor version
        pub minor_version: u16,
        /// a 2-byte build number
        pub build_number: u16,
        /// a 2-byte revision number
        pub revision_number: u16,
        /// a 4-byte bitmask of type [`AssemblyFlags`]
        pub flags: u32,
        /// an index into the Blob heap, public key or token
        pub public_key_or_token: blob,
        /// an index into the String heap
        pub name: string,
        /// an index into the String heap
        pub culture: string,
        /// an index into the Blob heap
        pub hash_value: blob,
    }
}

metadata_row! {
    /// `TableId` = 0x24, ignored by the runtime
    pub struct AssemblyRefProcessorRaw => AssemblyRefProcessor {
        /// a 4-byte processor id
        pub processor: u32,
        /// the owning assembly reference
        pub assembly_ref: rid(AssemblyRef),
    }
}

metadata_row! {
    /// `TableId` = 0x25, ignored by the runtime
    pub struct AssemblyRefOsRaw => AssemblyRefOS {
        /// a 4-byte platform id
        pub os_platform_id: u32,
        /// a 4-byte major version
        pub os_major_version: u32,
        /// a 4-byte minor version
        pub os_minor_version: u32,
        /// the owning assembly reference
        pub assembly_ref: rid(AssemblyRef),
    }
}

metadata_row! {
    /// The File table lists the files of a multi-file assembly. `TableId` = 0x26
    pub struct FileRaw => File {
        /// a 4-byte bitmask, `0x0001` marks a file without metadata
        pub flags: u32,
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap
        pub hash_value: blob,
    }
}

metadata_row! {
    /// The ExportedType table lists types defined in other modules of the assembly, and
    /// forwarded types. `TableId` = 0x27
    pub struct ExportedTypeRaw => ExportedType {
        /// a 4-byte bitmask of type `TypeAttributes`
        pub flags: u32,
        /// a 4-byte hint, the `TypeDef` row id in the defining module
        pub type_def_id: u32,
        /// an index into the String heap
        pub type_name: string,
        /// an index into the String heap
        pub type_namespace: string,
        /// an `Implementation` coded index
        pub implementation: coded(Implementation),
    }
}

metadata_row! {
    /// The ManifestResource table lists the resources of the assembly. `TableId` = 0x28
    pub struct ManifestResourceRaw => ManifestResource {
        /// a 4-byte offset into the resource section, zero for linked resources
        pub offset_field: u32,
        /// a 4-byte bitmask of type `ManifestResourceAttributes`
        pub flags: u32,
        /// an index into the String heap
        pub name: string,
        /// an `Implementation` coded index, null for resources embedded in this file
        pub implementation: coded(Implementation),
    }
}
