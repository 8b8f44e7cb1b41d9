use std::sync::Arc;

use bitflags::bitflags;
use strum::{EnumCount, IntoEnumIterator};

use crate::metadata::tables::types::{CodedIndexType, TableId};

bitflags! {
    /// The `HeapSizes` byte of the tables stream header.
    ///
    /// A set flag means references into that heap are 4 bytes wide instead of 2. The
    /// flags are supplied by the heap layer; the table engine only consumes them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HeapSizes: u8 {
        /// `#Strings` heap exceeds 65,535 bytes
        const STRINGS = 0x01;
        /// `#GUID` heap exceeds 65,535 bytes
        const GUID = 0x02;
        /// `#Blob` heap exceeds 65,535 bytes
        const BLOB = 0x04;
    }
}

/// Holds information about the size that reference index fields have
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// The count of rows in this table
    pub rows: u32,
    /// Number of bits required to represent any valid row index
    pub bits: u8,
    /// If the count is > `u16::max`, the indexes of other tables into this table will be 4 bytes instead of 2
    pub is_large: bool,
}

impl TableRowInfo {
    /// Creates a new `TableRowInfo` instance with the given row count.
    ///
    /// # Arguments
    /// * `rows` - The number of rows in the table
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            // Safe: 32 - zeros is always <= 32, fits in u8
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// `TableInfo` holds the row counts of all tables and the heap size flags of one
/// metadata image, which together determine the width of every index column.
#[derive(Clone, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    heap_sizes: HeapSizes,
}

/// Cheap-copy reference to a `TableInfo` structure
pub type TableInfoRef = Arc<TableInfo>;

impl Default for TableInfo {
    fn default() -> Self {
        TableInfo::new(std::iter::empty(), HeapSizes::empty())
    }
}

impl TableInfo {
    /// Builds a `TableInfo` from `(table, row_count)` pairs and the heap size flags.
    ///
    /// Tables that are not listed have zero rows.
    pub fn new(rows: impl IntoIterator<Item = (TableId, u32)>, heap_sizes: HeapSizes) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::SLOTS],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            heap_sizes,
        };

        for (table, count) in rows {
            table_info.rows[table as usize] = TableRowInfo::new(count);
        }

        table_info.calculate_coded_index_bytes();
        table_info
    }

    /// Returns true, if a requested table has more than 65,535 rows and hence requires
    /// 4 byte references instead of 2 bytes
    ///
    /// ## Arguments
    /// * `id` - The `TableId` to query
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// The heap size flags this info was built with.
    #[must_use]
    pub fn heap_sizes(&self) -> HeapSizes {
        self.heap_sizes
    }

    /// Indicates the size of indexes referring into the '#Strings' heap. True means 4 bytes, False is 2 bytes
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.heap_sizes.contains(HeapSizes::STRINGS)
    }

    /// Indicates the size of indexes referring into the '#GUID' heap. True means 4 bytes, False is 2 bytes
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.heap_sizes.contains(HeapSizes::GUID)
    }

    /// Indicates the size of indexes referring into the '#Blob' heap. True means 4 bytes, False is 2 bytes
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.heap_sizes.contains(HeapSizes::BLOB)
    }

    /// Returns the size of '#Strings' heap indexes in bytes
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_str() {
            4
        } else {
            2
        }
    }

    /// Returns the size of '#GUID' heap indexes in bytes
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_guid() {
            4
        } else {
            2
        }
    }

    /// Returns the size of '#Blob' heap indexes in bytes
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_blob() {
            4
        } else {
            2
        }
    }

    /// Returns the row information of a specific table.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Returns the number of bytes of a plain row index into `table_id`.
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.is_large(table_id) {
            4
        } else {
            2
        }
    }

    /// Returns the byte size of a coded index column of the given kind.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        self.coded_indexes[coded_index_type as usize]
    }

    /// A coded index needs 4 bytes once `max_rows << tag_bits` no longer fits in 16 bits.
    fn calculate_coded_index_bytes(&mut self) {
        for ci_type in CodedIndexType::iter() {
            let max_rows = ci_type
                .tables()
                .iter()
                .flatten()
                .map(|table| self.rows[*table as usize].rows)
                .max()
                .unwrap_or(0);

            let shifted = u64::from(max_rows) << ci_type.tag_bits();
            self.coded_indexes[ci_type as usize] = if shifted > 0xFFFF { 4 } else { 2 };
        }
    }
}
