// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # cilmeta
//!
//! Writer-side model of ECMA-335 metadata: the relational metadata tables, the
//! coded-index and row-id addressing that links them, the type reference graph used by
//! signatures, and an assembly resolution cache.
//!
//! ## Architecture
//!
//! - [`metadata::tables`] - row definitions for every ECMA-335 and portable PDB table, the
//!   generic storage engine (insertion-ordered, sorted and singleton tables) and the
//!   `#~` stream serializer
//! - [`metadata::streams`] - `#Strings`, `#Blob` and `#GUID` heap builders
//! - [`metadata::typesystem`] - named types, generic parameters and type specifications
//!   (pointer, byref, pinned, sentinel, modifiers, arrays, generic instances)
//! - [`metadata::marshalling`], [`metadata::security`], [`metadata::customattributes`],
//!   [`metadata::constant`], [`metadata::resources`] - side models that encode into blobs
//!   referenced from the tables
//! - [`metadata::resolver`] - assembly resolution with search paths and a disposing cache
//!
//! ## Example
//!
//! ```rust
//! use cilmeta::prelude::*;
//!
//! let mut strings = StringsHeapBuilder::new();
//! let mut guids = GuidHeapBuilder::new();
//! let module = ModuleRaw::new(
//!     strings.add("Demo.dll")?,
//!     guids.add(uguid::guid!("9b2d5c3a-0b8e-4d6f-a1c2-3e4f5a6b7c8d")),
//! );
//!
//! let mut tables = MetadataTables::new(module);
//! let field = tables.field.add_row(FieldRaw {
//!     flags: 0x0011,
//!     name: strings.add("Answer")?,
//!     signature: 0,
//! });
//! tables.constant.add_row(ConstantRaw {
//!     base: 0x08,
//!     parent: CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, field)?,
//!     value: 0,
//! });
//!
//! let stream = tables.write(HeapSizes::from_heaps(&strings, &BlobHeapBuilder::new(), &guids))?;
//! assert_eq!(stream.len() % 4, 0);
//! # Ok::<(), cilmeta::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Construction preconditions
//! fail at the call that violates them, never later at write time.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

/// ECMA-335 metadata model: tables, heaps, type references and side models.
pub mod metadata;

/// `cilmeta` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `cilmeta` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use file::io::{
    read_compressed_int, read_compressed_uint, write_compressed_int, write_compressed_uint, CilIO,
};
