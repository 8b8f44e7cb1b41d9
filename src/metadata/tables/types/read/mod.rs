//! Decoding of serialized table rows, the inverse of the write path.

mod cursor;
mod traits;

pub use cursor::{read_rows, TableCursor};
pub use traits::RowReadable;
