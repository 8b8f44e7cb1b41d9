use std::cmp::Ordering;

use crate::{
    metadata::tables::types::{write::TableBuffer, TableId, TableInfo},
    Result,
};

/// Trait defining the interface for serializing metadata table rows.
///
/// This trait must be implemented by any type that represents a row in a metadata table.
/// It provides the row size and the serialization of one row into the shared
/// [`TableBuffer`] sink, which interprets each column kind (heap offset, plain row index,
/// coded index) against the [`TableInfo`] of the image being written.
///
/// Rows are plain values: they carry already-resolved heap offsets, row ids and coded
/// indices supplied by the layer that builds the module.
pub trait RowWritable: Sized + Send {
    /// The table this row type belongs to.
    const TABLE: TableId;

    /// Calculates the size in bytes of a single row for this table type.
    ///
    /// ## Arguments
    ///
    /// * `sizes` - Table size information containing heap sizes and table row counts
    ///   used to determine the appropriate index sizes
    fn row_size(sizes: &TableInfo) -> u32;

    /// Serializes one complete row into `buffer`, in the column order ECMA-335 defines.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::Error`] if a value does not fit its column, or a coded index was
    /// built for a different column kind.
    fn row_write(&self, buffer: &mut TableBuffer) -> Result<()>;
}

/// A row of a table whose on-disk order is defined by a key.
///
/// `compare` must be a total order over the key columns. Row ids and coded indices are
/// compared numerically on their raw encoded value.
pub trait SortedRow: RowWritable {
    /// Compares two rows by the table's designated key column(s).
    fn compare(&self, other: &Self) -> Ordering;
}
