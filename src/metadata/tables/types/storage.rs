//! In-memory row stores for the three kinds of metadata tables.
//!
//! - [`Table`] keeps insertion order. Owner rows of `Field`, `MethodDef` and `Param` store
//!   `(first_rid, count)` ranges into these tables, so their order must never change.
//! - [`SortedTable`] reorders its rows by a key once, right before serialization.
//! - [`SingletonTable`] holds exactly one row, like the `Module` table.
//!
//! All three implement [`TableWrite`], the object-safe view the table catalog uses to
//! sort and serialize the whole table set without knowing the row types.

use std::slice;

use crate::{
    metadata::tables::types::{
        write::{RowWritable, SortedRow, TableBuffer},
        TableId, TableInfo,
    },
    Error, Result,
};

/// Serialization interface shared by all table kinds.
pub trait TableWrite: Send {
    /// The table stored here.
    fn table_id(&self) -> TableId;

    /// Number of rows that will be written.
    fn row_count(&self) -> u32;

    /// True for tables whose on-disk order is defined by a key.
    fn is_sorted_table(&self) -> bool {
        false
    }

    /// Size of one row under `info`.
    fn row_size(&self, info: &TableInfo) -> u32;

    /// Brings the rows into their final order. Idempotent.
    fn prepare(&mut self) {}

    /// Writes all rows into `buffer`.
    ///
    /// # Errors
    /// Returns [`Error::TableNotSorted`] for a sorted table that was not prepared, and any
    /// column encoding error.
    fn write(&self, buffer: &mut TableBuffer) -> Result<()>;
}

#[allow(clippy::cast_possible_truncation)]
fn rid_of(len: usize) -> u32 {
    // Row ids are bounded far below u32::MAX by the coded index encoding
    len as u32
}

/// A table written in insertion order.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Table { rows: Vec::new() }
    }
}

impl<R: RowWritable> Table<R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row` and returns its 1-based row id.
    pub fn add_row(&mut self, row: R) -> u32 {
        self.rows.push(row);
        rid_of(self.rows.len())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> u32 {
        rid_of(self.rows.len())
    }

    /// Returns true if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True once references into this table need 4 bytes.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.len() > u32::from(u16::MAX)
    }

    /// The row with 1-based id `rid`.
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<&R> {
        let index = rid.checked_sub(1)?;
        self.rows.get(index as usize)
    }

    /// Mutable access to the row with 1-based id `rid`.
    pub fn get_mut(&mut self, rid: u32) -> Option<&mut R> {
        let index = rid.checked_sub(1)?;
        self.rows.get_mut(index as usize)
    }

    /// Iterates the rows in the order they will be written.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: RowWritable> TableWrite for Table<R> {
    fn table_id(&self) -> TableId {
        R::TABLE
    }

    fn row_count(&self) -> u32 {
        self.len()
    }

    fn row_size(&self, info: &TableInfo) -> u32 {
        R::row_size(info)
    }

    fn write(&self, buffer: &mut TableBuffer) -> Result<()> {
        for row in &self.rows {
            row.row_write(buffer)?;
        }
        Ok(())
    }
}

impl<'a, R: RowWritable> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A table written in ascending key order.
///
/// Row ids returned by [`SortedTable::add_row`] are provisional: they describe the
/// insertion position and become final only after [`SortedTable::sort`]. The sort is
/// stable, so rows with equal keys keep their insertion order.
#[derive(Debug, Clone)]
pub struct SortedTable<R> {
    rows: Vec<R>,
    sorted: bool,
}

impl<R> Default for SortedTable<R> {
    fn default() -> Self {
        SortedTable {
            rows: Vec::new(),
            sorted: true,
        }
    }
}

impl<R: SortedRow> SortedTable<R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row` and returns its provisional 1-based row id.
    pub fn add_row(&mut self, row: R) -> u32 {
        self.rows.push(row);
        self.sorted = self.rows.len() < 2;
        rid_of(self.rows.len())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> u32 {
        rid_of(self.rows.len())
    }

    /// Returns true if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True once references into this table need 4 bytes.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.len() > u32::from(u16::MAX)
    }

    /// True if no row was added since the last [`SortedTable::sort`].
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sorts the rows by key. Calling it again without adding rows changes nothing.
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }

        self.rows.sort_by(R::compare);
        self.sorted = true;
    }

    /// The row at 1-based position `rid` in the current order.
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<&R> {
        let index = rid.checked_sub(1)?;
        self.rows.get(index as usize)
    }

    /// Iterates the rows in their current order.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: SortedRow> TableWrite for SortedTable<R> {
    fn table_id(&self) -> TableId {
        R::TABLE
    }

    fn row_count(&self) -> u32 {
        self.len()
    }

    fn is_sorted_table(&self) -> bool {
        true
    }

    fn row_size(&self, info: &TableInfo) -> u32 {
        R::row_size(info)
    }

    fn prepare(&mut self) {
        self.sort();
    }

    fn write(&self, buffer: &mut TableBuffer) -> Result<()> {
        if !self.sorted {
            return Err(Error::TableNotSorted(R::TABLE));
        }

        for row in &self.rows {
            row.row_write(buffer)?;
        }
        Ok(())
    }
}

impl<'a, R: SortedRow> IntoIterator for &'a SortedTable<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A table with exactly one row.
#[derive(Debug, Clone)]
pub struct SingletonTable<R> {
    row: R,
}

impl<R: RowWritable> SingletonTable<R> {
    /// Creates the table holding `row`, which gets row id 1.
    pub fn new(row: R) -> Self {
        SingletonTable { row }
    }

    /// Always fails, the single row is supplied at construction.
    ///
    /// # Errors
    /// Returns [`Error::SingletonTable`].
    pub fn add_row(&mut self, _row: R) -> Result<u32> {
        Err(Error::SingletonTable(R::TABLE))
    }

    /// Always 1.
    #[must_use]
    pub fn len(&self) -> u32 {
        1
    }

    /// Never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The row.
    #[must_use]
    pub fn row(&self) -> &R {
        &self.row
    }

    /// Mutable access to the row.
    pub fn row_mut(&mut self) -> &mut R {
        &mut self.row
    }
}

impl<R: RowWritable> TableWrite for SingletonTable<R> {
    fn table_id(&self) -> TableId {
        R::TABLE
    }

    fn row_count(&self) -> u32 {
        1
    }

    fn row_size(&self, info: &TableInfo) -> u32 {
        R::row_size(info)
    }

    fn write(&self, buffer: &mut TableBuffer) -> Result<()> {
        self.row.row_write(buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::{cmp::Ordering, sync::Arc};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct KeyRow {
        key: u32,
        payload: u16,
    }

    impl RowWritable for KeyRow {
        const TABLE: TableId = TableId::FieldLayout;

        fn row_size(_sizes: &TableInfo) -> u32 {
            6
        }

        fn row_write(&self, buffer: &mut TableBuffer) -> Result<()> {
            buffer.write_u32(self.key);
            buffer.write_u16(self.payload);
            Ok(())
        }
    }

    impl SortedRow for KeyRow {
        fn compare(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn row(key: u32, payload: u16) -> KeyRow {
        KeyRow { key, payload }
    }

    #[test]
    fn insertion_order_and_rids() {
        let mut table = Table::new();
        assert_eq!(table.add_row(row(3, 0)), 1);
        assert_eq!(table.add_row(row(1, 0)), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().key, 3);
        assert!(table.get(0).is_none());
        assert!(table.get(3).is_none());

        table.get_mut(2).unwrap().payload = 9;
        assert_eq!(table.get(2).unwrap().payload, 9);
        assert!(!table.is_large());
    }

    #[test]
    fn large_boundary() {
        let mut table = Table::new();
        for i in 0..65_535 {
            table.add_row(row(i, 0));
        }
        assert!(!table.is_large());
        table.add_row(row(0, 0));
        assert!(table.is_large());
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let mut table = SortedTable::new();
        table.add_row(row(2, 1));
        table.add_row(row(1, 2));
        table.add_row(row(2, 3));
        table.add_row(row(1, 4));
        assert!(!table.is_sorted());

        table.sort();
        let order: Vec<u16> = table.iter().map(|r| r.payload).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);

        table.sort();
        let again: Vec<u16> = table.iter().map(|r| r.payload).collect();
        assert_eq!(order, again);

        table.add_row(row(0, 5));
        assert!(!table.is_sorted());
    }

    #[test]
    fn unsorted_write_fails() {
        let mut table = SortedTable::new();
        table.add_row(row(2, 0));
        table.add_row(row(1, 0));

        let mut buffer = TableBuffer::new(Arc::new(TableInfo::default()));
        assert!(matches!(
            table.write(&mut buffer),
            Err(Error::TableNotSorted(TableId::FieldLayout))
        ));

        table.prepare();
        table.write(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), &[1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn singleton_rejects_rows() {
        let mut table = SingletonTable::new(row(7, 0));
        assert_eq!(table.len(), 1);
        assert!(matches!(
            table.add_row(row(8, 0)),
            Err(Error::SingletonTable(TableId::FieldLayout))
        ));
        assert_eq!(table.row().key, 7);
    }
}
