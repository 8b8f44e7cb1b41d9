//! Write infrastructure for serializing metadata table rows to binary format.
//!
//! # Key Components
//!
//! - [`RowWritable`] - Trait for serializing individual table rows
//! - [`SortedRow`] - Key comparison for tables whose on-disk order is prescribed
//! - [`TableBuffer`] - The sink rows are written into, resolving index column widths

mod buffer;
mod traits;

pub use buffer::TableBuffer;
pub use traits::{RowWritable, SortedRow};
