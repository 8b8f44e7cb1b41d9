//! Portable PDB tables (0x30 - 0x37).

use std::cmp::Ordering;

use crate::metadata::tables::SortedRow;

metadata_row! {
    /// The Document table lists source documents. `TableId` = 0x30
    pub struct DocumentRaw => Document {
        /// an index into the Blob heap, the encoded document name
        pub name: blob,
        /// an index into the Guid heap
        pub hash_algorithm: guid,
        /// an index into the Blob heap
        pub hash: blob,
        /// an index into the Guid heap
        pub language: guid,
    }
}

metadata_row! {
    /// Sequence points of a method, one row per `MethodDef`. `TableId` = 0x31
    pub struct MethodDebugInformationRaw => MethodDebugInformation {
        /// the single document, or null if the points span documents
        pub document: rid(Document),
        /// an index into the Blob heap
        pub sequence_points: blob,
    }
}

metadata_row! {
    /// The LocalScope table describes lexical scopes of method bodies. `TableId` = 0x32
    ///
    /// Sorted by `method`, then by `start_offset` ascending, then by `length` descending
    /// so that enclosing scopes precede nested ones.
    pub struct LocalScopeRaw => LocalScope {
        /// the method the scope belongs to
        pub method: rid(MethodDef),
        /// the active import scope
        pub import_scope: rid(ImportScope),
        /// first row of the owned variable run
        pub variable_list: rid(LocalVariable),
        /// first row of the owned constant run
        pub constant_list: rid(LocalConstant),
        /// a 4-byte IL offset of the first instruction
        pub start_offset: u32,
        /// a 4-byte length in IL bytes
        pub length: u32,
    }
}

impl SortedRow for LocalScopeRaw {
    fn compare(&self, other: &Self) -> Ordering {
        self.method
            .cmp(&other.method)
            .then_with(|| self.start_offset.cmp(&other.start_offset))
            .then_with(|| other.length.cmp(&self.length))
    }
}

metadata_row! {
    /// `TableId` = 0x33
    pub struct LocalVariableRaw => LocalVariable {
        /// a 2-byte bitmask, `0x0001` hides the variable from debuggers
        pub attributes: u16,
        /// a 2-byte slot index in the local signature
        pub index: u16,
        /// an index into the String heap
        pub name: string,
    }
}

metadata_row! {
    /// `TableId` = 0x34
    pub struct LocalConstantRaw => LocalConstant {
        /// an index into the String heap
        pub name: string,
        /// an index into the Blob heap
        pub signature: blob,
    }
}

metadata_row! {
    /// `TableId` = 0x35
    pub struct ImportScopeRaw => ImportScope {
        /// the enclosing scope, null for the root
        pub parent: rid(ImportScope),
        /// an index into the Blob heap
        pub imports: blob,
    }
}

metadata_row! {
    /// Maps compiler generated `MoveNext` methods to their kickoff method. `TableId` = 0x36
    ///
    /// Sorted by `move_next_method`.
    pub struct StateMachineMethodRaw => StateMachineMethod, sorted_by(move_next_method) {
        /// the state machine `MoveNext` method
        pub move_next_method: rid(MethodDef),
        /// the user-written async or iterator method
        pub kickoff_method: rid(MethodDef),
    }
}

metadata_row! {
    /// `TableId` = 0x37
    ///
    /// Sorted by `parent`.
    pub struct CustomDebugInformationRaw => CustomDebugInformation, sorted_by(parent) {
        /// a `HasCustomDebugInformation` coded index
        pub parent: coded(HasCustomDebugInformation),
        /// an index into the Guid heap, the kind of information
        pub kind: guid,
        /// an index into the Blob heap
        pub value: blob,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{
        read_rows, HeapSizes, RowWritable, SortedTable, TableBuffer, TableId, TableInfo,
        TableWrite,
    };

    fn scope(method: u32, start_offset: u32, length: u32) -> LocalScopeRaw {
        LocalScopeRaw {
            method,
            import_scope: 1,
            variable_list: 1,
            constant_list: 1,
            start_offset,
            length,
        }
    }

    #[test]
    fn nested_scopes_follow_enclosing() {
        let mut table = SortedTable::new();
        table.add_row(scope(2, 0, 10));
        table.add_row(scope(1, 4, 2));
        table.add_row(scope(1, 0, 4));
        table.add_row(scope(1, 0, 20));
        table.prepare();

        let order: Vec<(u32, u32, u32)> = table
            .iter()
            .map(|row| (row.method, row.start_offset, row.length))
            .collect();
        assert_eq!(order, vec![(1, 0, 20), (1, 0, 4), (1, 4, 2), (2, 0, 10)]);
    }

    #[test]
    fn crafted_short() {
        let data = vec![
            0x01, 0x00, // name
            0x01, 0x00, // hash_algorithm
            0x02, 0x00, // hash
            0x02, 0x00, // language
        ];
        let sizes = Arc::new(TableInfo::default());

        let rows = read_rows::<DocumentRaw>(&data, 0, 1, &sizes).unwrap();
        assert_eq!(rows[0].hash_algorithm, 1);
        assert_eq!(rows[0].language, 2);

        let mut buffer = TableBuffer::new(sizes);
        rows[0].row_write(&mut buffer).unwrap();
        assert_eq!(buffer.into_inner(), data);
    }

    #[test]
    fn crafted_long() {
        let sizes = TableInfo::new([(TableId::MethodDef, 0x1_0000)], HeapSizes::GUID);
        assert_eq!(LocalScopeRaw::row_size(&sizes), 4 + 2 + 2 + 2 + 4 + 4);
        assert_eq!(StateMachineMethodRaw::row_size(&sizes), 8);
        // HasCustomDebugInformation has 5 tag bits
        assert_eq!(CustomDebugInformationRaw::row_size(&sizes), 4 + 4 + 2);
    }
}
