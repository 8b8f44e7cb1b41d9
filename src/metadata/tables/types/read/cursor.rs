use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::tables::types::{
        read::RowReadable, CodedIndex, CodedIndexType, TableId, TableInfo,
    },
    Result,
};

/// Decoding counterpart of [`crate::metadata::tables::TableBuffer`].
pub struct TableCursor<'a> {
    data: &'a [u8],
    offset: usize,
    info: &'a TableInfo,
}

impl<'a> TableCursor<'a> {
    /// Creates a cursor over `data`, starting at `offset`.
    #[must_use]
    pub fn new(data: &'a [u8], offset: usize, info: &'a TableInfo) -> Self {
        TableCursor { data, offset, info }
    }

    /// Current position inside the data.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reads a single byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_u8(&mut self) -> Result<u8> {
        read_le_at(self.data, &mut self.offset)
    }

    /// Reads a 2 byte value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_u16(&mut self) -> Result<u16> {
        read_le_at(self.data, &mut self.offset)
    }

    /// Reads a 4 byte value.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_u32(&mut self) -> Result<u32> {
        read_le_at(self.data, &mut self.offset)
    }

    /// Reads a plain row index into `table`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_rid(&mut self, table: TableId) -> Result<u32> {
        read_le_at_dyn(self.data, &mut self.offset, self.info.is_large(table))
    }

    /// Reads a coded index of kind `ci_type`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data and
    /// [`crate::Error::Malformed`] for invalid tags.
    pub fn read_coded(&mut self, ci_type: CodedIndexType) -> Result<CodedIndex> {
        let is_large = self.info.coded_index_bytes(ci_type) == 4;
        let value = read_le_at_dyn(self.data, &mut self.offset, is_large)?;
        CodedIndex::decode(ci_type, value)
    }

    /// Reads an offset into the `#Strings` heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_string(&mut self) -> Result<u32> {
        read_le_at_dyn(self.data, &mut self.offset, self.info.is_large_str())
    }

    /// Reads an offset into the `#Blob` heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_blob(&mut self) -> Result<u32> {
        read_le_at_dyn(self.data, &mut self.offset, self.info.is_large_blob())
    }

    /// Reads an index into the `#GUID` heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated data.
    pub fn read_guid(&mut self) -> Result<u32> {
        read_le_at_dyn(self.data, &mut self.offset, self.info.is_large_guid())
    }
}

/// Decodes `count` consecutive rows of type `R` starting at `offset`.
///
/// # Errors
/// Returns the first decoding error encountered.
pub fn read_rows<R: RowReadable>(
    data: &[u8],
    offset: usize,
    count: u32,
    info: &TableInfo,
) -> Result<Vec<R>> {
    let mut cursor = TableCursor::new(data, offset, info);
    (0..count).map(|_| R::row_read(&mut cursor)).collect()
}
