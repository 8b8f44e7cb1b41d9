use crate::{metadata::tables::types::read::TableCursor, Result};

/// Trait for decoding a row back from its serialized form.
///
/// This is the exact inverse of [`crate::metadata::tables::RowWritable::row_write`] and is
/// used to verify written table regions.
pub trait RowReadable: Sized {
    /// Reads one complete row, advancing the cursor past it.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] for truncated data and
    /// [`crate::Error::Malformed`] for invalid coded index tags.
    fn row_read(cursor: &mut TableCursor<'_>) -> Result<Self>;
}
