//! # cilmeta Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the cilmeta library. Import this module to get quick access to the essential
//! types for building .NET metadata.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilmeta operations
pub use crate::Error;

/// The result type used throughout cilmeta
pub use crate::Result;

// ================================================================================================
// Metadata Tables
// ================================================================================================

/// The full table set and the `#~` stream header
pub use crate::metadata::tables::{MetadataTables, TablesHeader};

/// Table storage and row traits
pub use crate::metadata::tables::{
    read_rows, RowReadable, RowWritable, SingletonTable, SortedRow, SortedTable, Table,
    TableBuffer, TableCursor,
};

/// Table identifiers, coded indices and sizing
pub use crate::metadata::tables::{
    CodedIndex, CodedIndexType, HeapSizes, TableId, TableInfo, TableInfoRef,
};

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

// ================================================================================================
// Raw Metadata Table Types
// ================================================================================================

/// Module, type and member definitions
pub use crate::metadata::tables::{
    FieldRaw, FieldRvaRaw, MemberRefRaw, MethodDefRaw, ModuleRaw, ModuleRefRaw, ParamRaw,
    TypeDefRaw, TypeRefRaw, TypeSpecRaw,
};

/// Attribute style tables
pub use crate::metadata::tables::{
    ConstantRaw, CustomAttributeRaw, DeclSecurityRaw, FieldMarshalRaw,
};

/// Assembly manifest tables
pub use crate::metadata::tables::{AssemblyRaw, AssemblyRefRaw, FileRaw, ManifestResourceRaw};

// ================================================================================================
// Metadata Streams - Heaps
// ================================================================================================

/// Heap builders for `#Strings`, `#Blob` and `#GUID`
pub use crate::metadata::streams::{BlobHeapBuilder, GuidHeapBuilder, StringsHeapBuilder};

// ================================================================================================
// Type References
// ================================================================================================

/// Type reference graph
pub use crate::metadata::typesystem::{
    write_type_signature, ArrayDimension, ArrayShape, ElementType, GenericParameter,
    GenericParameterOwner, MemberReference, NamedType, SpecificationKind, TypeRefRc,
    TypeReference, TypeScope, TypeSpecification,
};

// ================================================================================================
// Side Models
// ================================================================================================

/// Constant values
pub use crate::metadata::constant::ConstantValue;

/// Custom attribute values
pub use crate::metadata::customattributes::{
    CustomAttributeArgument, CustomAttributeNamedArgument, CustomAttributeValue,
};

/// Native marshalling descriptors
pub use crate::metadata::marshalling::{MarshallingInfo, NativeType};

/// Declarative security
pub use crate::metadata::security::{SecurityAction, SecurityAttribute, SecurityDeclaration};

/// Manifest resources
pub use crate::metadata::resources::{Resource, ResourceSection, ResourceType};

// ================================================================================================
// Assembly Identity and Resolution
// ================================================================================================

/// Assembly names and strong name identities
pub use crate::metadata::identity::{
    AssemblyIdentity, AssemblyVersion, Identity, ProcessorArchitecture,
};

/// Assembly resolution
pub use crate::metadata::resolver::{
    AssemblyResolver, CachingAssemblyResolver, FileModule, ResolvedAssembly, SearchPathResolver,
};
