//! Indirection tables of uncompressed (`#-`) metadata.
//!
//! Each row just forwards to a row of the target table, which allows the target rows
//! to be out of owner order.

metadata_row! {
    /// `TableId` = 0x03
    pub struct FieldPtrRaw => FieldPtr {
        /// the referenced field
        pub field: rid(Field),
    }
}

metadata_row! {
    /// `TableId` = 0x05
    pub struct MethodPtrRaw => MethodPtr {
        /// the referenced method
        pub method: rid(MethodDef),
    }
}

metadata_row! {
    /// `TableId` = 0x07
    pub struct ParamPtrRaw => ParamPtr {
        /// the referenced parameter
        pub param: rid(Param),
    }
}

metadata_row! {
    /// `TableId` = 0x13
    pub struct EventPtrRaw => EventPtr {
        /// the referenced event
        pub event: rid(Event),
    }
}

metadata_row! {
    /// `TableId` = 0x16
    pub struct PropertyPtrRaw => PropertyPtr {
        /// the referenced property
        pub property: rid(Property),
    }
}
