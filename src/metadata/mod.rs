//! ECMA-335 metadata model for writing .NET modules.
//!
//! This module contains everything needed to assemble the metadata of a module in memory
//! and serialize it: the relational tables, the heaps they point into, the type reference
//! graph that signatures are encoded from, and the side models stored as blobs.
//!
//! # Key Components
//!
//! - [`tables`] - Row definitions, table storage and the `#~` stream writer
//! - [`streams`] - `#Strings`, `#Blob` and `#GUID` heap builders
//! - [`token`] - Metadata table row references used throughout .NET
//! - [`typesystem`] - Named types, generic parameters and type specifications
//! - [`identity`] - Assembly names, versions and strong name keys
//! - [`resolver`] - Assembly resolution with a shared cache
//!
//! # Examples
//!
//! ```rust
//! use cilmeta::metadata::{
//!     constant::ConstantValue,
//!     streams::{BlobHeapBuilder, StringsHeapBuilder},
//!     tables::{CodedIndex, CodedIndexType, FieldRaw, ModuleRaw, MetadataTables, TableId},
//! };
//!
//! let mut strings = StringsHeapBuilder::new();
//! let mut blobs = BlobHeapBuilder::new();
//! let mut tables = MetadataTables::new(ModuleRaw::new(strings.add("App.dll")?, 1));
//!
//! let rid = tables.field.add_row(FieldRaw { flags: 0x0051, name: strings.add("Limit")?, signature: 0 });
//! let parent = CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, rid)?;
//! tables.constant.add_row(ConstantValue::I4(10).to_row(parent, &mut blobs)?);
//!
//! assert_eq!(tables.constant.len(), 1);
//! # Ok::<(), cilmeta::Error>(())
//! ```

/// Default values for the `Constant` table
pub mod constant;
/// Implementation of custom attribute value encoding
pub mod customattributes;
/// Assembly names, versions and strong name identities
pub mod identity;
/// Implementation of the type marshalling for native code invokations
pub mod marshalling;
/// Implementation of the .NET resources
pub mod resources;
/// Assembly resolution and caching
pub mod resolver;
/// Implementation of the .NET security model
pub mod security;
/// Implementation of the metadata heaps
pub mod streams;
/// Implementation of the .NET metadata tables
pub mod tables;
/// Commonly used metadata token type
pub mod token;
/// Implementation of the .NET type reference graph
pub mod typesystem;
