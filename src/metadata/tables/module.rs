//! Module-level tables: `Module`, `ModuleRef` and the edit-and-continue tables.

metadata_row! {
    /// The Module table describes the module being built. It holds exactly one row. `TableId` = 0x00
    pub struct ModuleRaw => Module {
        /// a 2-byte value, reserved, shall be zero
        pub generation: u16,
        /// an index into the String heap
        pub name: string,
        /// an index into the Guid heap, distinguishes two versions of the same module
        pub mvid: guid,
        /// an index into the Guid heap, reserved, shall be zero
        pub encid: guid,
        /// an index into the Guid heap, reserved, shall be zero
        pub encbaseid: guid,
    }
}

impl ModuleRaw {
    /// The row of a freshly built module: generation and edit-and-continue ids are zero.
    ///
    /// ## Arguments
    /// * `name` - Offset of the module name in the `#Strings` heap
    /// * `mvid` - Index of the module version id in the `#GUID` heap
    #[must_use]
    pub fn new(name: u32, mvid: u32) -> Self {
        ModuleRaw {
            generation: 0,
            name,
            mvid,
            encid: 0,
            encbaseid: 0,
        }
    }
}

metadata_row! {
    /// The ModuleRef table references other modules of the same assembly, usually native
    /// libraries targeted by P/Invoke. `TableId` = 0x1A
    pub struct ModuleRefRaw => ModuleRef {
        /// an index into the String heap
        pub name: string,
    }
}

metadata_row! {
    /// Edit-and-continue log. `TableId` = 0x1E
    pub struct EncLogRaw => EncLog {
        /// token of the changed entity
        pub token_value: u32,
        /// kind of the edit
        pub func_code: u32,
    }
}

metadata_row! {
    /// Edit-and-continue token map. `TableId` = 0x1F
    pub struct EncMapRaw => EncMap {
        /// original token
        pub token_value: u32,
    }
}
