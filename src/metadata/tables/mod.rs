//! Metadata tables: row definitions for every ECMA-335 and portable PDB table, the row
//! stores they live in, and serialization of the whole set into the `#~` stream.
//!
//! # Organization
//!
//! - [`types`]: addressing primitives, row traits, row stores and the column-aware buffer
//! - one module per table family, each row declared with the same column vocabulary
//! - [`MetadataTables`]: the full table set of a module
//!
//! # Sorted tables
//!
//! ECMA-335 II.22 requires the following tables to be ordered by a key. Their rows live in
//! [`SortedTable`] and are reordered, stably, right before serialization:
//!
//! | Table                    | Key                          |
//! |--------------------------|------------------------------|
//! | `ClassLayout`            | `Parent`                     |
//! | `Constant`               | `Parent`                     |
//! | `CustomAttribute`        | `Parent`                     |
//! | `DeclSecurity`           | `Parent`                     |
//! | `FieldLayout`            | `Field`                      |
//! | `FieldMarshal`           | `Parent`                     |
//! | `FieldRVA`               | `Field`                      |
//! | `GenericParam`           | `Owner`, `Number`            |
//! | `GenericParamConstraint` | `Owner`                      |
//! | `ImplMap`                | `MemberForwarded`            |
//! | `InterfaceImpl`          | `Class`, `Interface`         |
//! | `MethodImpl`             | `Class`                      |
//! | `MethodSemantics`        | `Association`                |
//! | `NestedClass`            | `NestedClass`                |
//! | `LocalScope`             | `Method`, `StartOffset`, `Length` descending |
//! | `StateMachineMethod`     | `MoveNextMethod`             |
//! | `CustomDebugInformation` | `Parent`                     |
//!
//! # Example
//!
//! ```rust
//! use cilmeta::prelude::*;
//!
//! let mut tables = MetadataTables::new(ModuleRaw::new(1, 1));
//! let field = tables.field.add_row(FieldRaw { flags: 0x0016, name: 5, signature: 1 });
//! tables.field_rva.add_row(FieldRvaRaw { rva: 0x2050, field });
//!
//! let stream = tables.write(HeapSizes::empty())?;
//! let header = TablesHeader::parse(&stream)?;
//! assert_eq!(header.row_count(TableId::FieldRVA), 1);
//! # Ok::<(), cilmeta::Error>(())
//! ```

#[macro_use]
mod macros;

mod assembly;
mod attributes;
mod catalog;
mod debug;
mod generics;
mod members;
mod module;
mod pointers;
mod semantics;
mod typedefs;
pub mod types;

pub use assembly::*;
pub use attributes::*;
pub use catalog::{MetadataTables, TablesHeader, TABLES_MAJOR_VERSION, TABLES_MINOR_VERSION};
pub use debug::*;
pub use generics::*;
pub use members::*;
pub use module::*;
pub use pointers::*;
pub use semantics::*;
pub use typedefs::*;
pub use types::*;
