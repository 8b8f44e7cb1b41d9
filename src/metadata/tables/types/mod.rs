//! # Metadata Table Types Module
//!
//! This module provides the core infrastructure shared by every metadata table: the
//! addressing primitives, the size information that decides the width of index columns,
//! the row traits and the row stores.
//!
//! ## Key Components
//!
//! ### Addressing
//!
//! - [`TableId`]: Enumeration of all metadata table types
//! - [`CodedIndex`] and [`CodedIndexType`]: Compact cross-table references
//! - [`TableInfo`] and [`TableInfoRef`]: Row counts and heap flags of one image
//!
//! ### Rows and storage
//!
//! - [`RowWritable`] / [`RowReadable`]: Encoding and decoding of a single row
//! - [`SortedRow`]: Key order of sorted tables
//! - [`Table`], [`SortedTable`], [`SingletonTable`]: Row stores, unified by [`TableWrite`]
//! - [`TableBuffer`] / [`TableCursor`]: Column-aware byte sink and source
//!
//! ## References
//!
//! - [ECMA-335 Standard](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Partition II, Section 22

mod codedindex;
mod read;
mod storage;
mod tableid;
mod tableinfo;
mod write;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use read::{read_rows, RowReadable, TableCursor};
pub use storage::{SingletonTable, SortedTable, Table, TableWrite};
pub use tableid::TableId;
pub use tableinfo::{HeapSizes, TableInfo, TableInfoRef, TableRowInfo};
pub use write::{RowWritable, SortedRow, TableBuffer};
