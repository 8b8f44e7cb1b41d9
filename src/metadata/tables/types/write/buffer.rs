use crate::{
    file::io::{write_le, write_le_dyn},
    metadata::tables::types::{CodedIndex, CodedIndexType, TableId, TableInfo, TableInfoRef},
    Error, Result,
};

/// Byte sink for serialized table rows.
///
/// Every column kind has its own writer; the width of index columns is taken from the
/// [`TableInfo`] the buffer was created with, so row encoders never deal with sizes.
pub struct TableBuffer {
    data: Vec<u8>,
    info: TableInfoRef,
}

impl TableBuffer {
    /// Creates an empty buffer writing against `info`.
    #[must_use]
    pub fn new(info: TableInfoRef) -> Self {
        TableBuffer {
            data: Vec::new(),
            info,
        }
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(info: TableInfoRef, capacity: usize) -> Self {
        TableBuffer {
            data: Vec::with_capacity(capacity),
            info,
        }
    }

    /// The size information used for index columns.
    #[must_use]
    pub fn info(&self) -> &TableInfo {
        &self.info
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing was written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the written bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        write_le(&mut self.data, value);
    }

    /// Writes a 2 byte value.
    pub fn write_u16(&mut self, value: u16) {
        write_le(&mut self.data, value);
    }

    /// Writes a 4 byte value.
    pub fn write_u32(&mut self, value: u32) {
        write_le(&mut self.data, value);
    }

    /// Writes a plain row index into `table`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `rid` does not fit a 2 byte column.
    pub fn write_rid(&mut self, table: TableId, rid: u32) -> Result<()> {
        let is_large = self.info.is_large(table);
        write_le_dyn(&mut self.data, rid, is_large)
    }

    /// Writes a coded index into a column of kind `ci_type`.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `index` was built for another kind.
    pub fn write_coded(&mut self, ci_type: CodedIndexType, index: &CodedIndex) -> Result<()> {
        if index.ci_type != ci_type {
            return Err(Error::CodedIndexMismatch {
                coded_index: ci_type,
                table: index.tag,
            });
        }

        let is_large = self.info.coded_index_bytes(ci_type) == 4;
        write_le_dyn(&mut self.data, index.encoded(), is_large)
    }

    /// Writes an offset into the `#Strings` heap.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `offset` does not fit a 2 byte column.
    pub fn write_string(&mut self, offset: u32) -> Result<()> {
        let is_large = self.info.is_large_str();
        write_le_dyn(&mut self.data, offset, is_large)
    }

    /// Writes an offset into the `#Blob` heap.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `offset` does not fit a 2 byte column.
    pub fn write_blob(&mut self, offset: u32) -> Result<()> {
        let is_large = self.info.is_large_blob();
        write_le_dyn(&mut self.data, offset, is_large)
    }

    /// Writes a 1-based index into the `#GUID` heap.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `index` does not fit a 2 byte column.
    pub fn write_guid(&mut self, index: u32) -> Result<()> {
        let is_large = self.info.is_large_guid();
        write_le_dyn(&mut self.data, index, is_large)
    }

    /// Appends raw bytes (stream headers and padding).
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Pads with zero bytes up to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        while self.data.len() % alignment != 0 {
            self.data.push(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::HeapSizes;

    #[test]
    fn column_widths_follow_info() {
        let info = Arc::new(TableInfo::new(
            [(TableId::Field, 70_000)],
            HeapSizes::GUID,
        ));
        let mut buffer = TableBuffer::new(info);

        buffer.write_rid(TableId::Field, 1).unwrap();
        assert_eq!(buffer.len(), 4);
        buffer.write_rid(TableId::MethodDef, 1).unwrap();
        assert_eq!(buffer.len(), 6);
        buffer.write_string(1).unwrap();
        assert_eq!(buffer.len(), 8);
        buffer.write_guid(1).unwrap();
        assert_eq!(buffer.len(), 12);

        let constant_parent =
            CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, 2).unwrap();
        buffer
            .write_coded(CodedIndexType::HasConstant, &constant_parent)
            .unwrap();
        assert_eq!(buffer.len(), 16);
        assert_eq!(&buffer.as_slice()[12..16], &[0x08, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn coded_kind_mismatch() {
        let mut buffer = TableBuffer::new(Arc::new(TableInfo::default()));
        let index = CodedIndex::new(CodedIndexType::HasFieldMarshal, TableId::Field, 1).unwrap();
        assert!(matches!(
            buffer.write_coded(CodedIndexType::HasConstant, &index),
            Err(Error::CodedIndexMismatch { .. })
        ));
    }

    #[test]
    fn alignment() {
        let mut buffer = TableBuffer::new(Arc::new(TableInfo::default()));
        buffer.write_u8(1);
        buffer.align(4);
        assert_eq!(buffer.into_inner(), vec![1, 0, 0, 0]);
    }
}
