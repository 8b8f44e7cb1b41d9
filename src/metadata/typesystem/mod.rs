//! Type reference graph for signatures.
//!
//! Every type a CIL signature can mention is a [`TypeReference`]:
//!
//! - [`NamedType`]: a `TypeDef`, `TypeRef` or built-in type, identified by namespace, name
//!   and [`TypeScope`]
//! - [`GenericParameter`]: `!n` and `!!n`
//! - [`TypeSpecification`]: exactly one element type wrapped by a [`SpecificationKind`]
//!   (array, pointer, byref, pinned, sentinel, `modreq`, `modopt`, generic instance)
//!
//! Nodes are shared through [`TypeRefRc`], so the same element type can sit below any
//! number of specifications. Names of specifications are derived from the element type:
//! `Pointer(ByRef(Int32))` prints as `Int32&*`.
//!
//! [`write_type_signature`] encodes a node into a signature blob, and
//! [`resolution_failure`] builds the error for a type or member that could not be found.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use cilmeta::metadata::typesystem::{ElementType, NamedType, TypeReference, TypeScope};
//!
//! let list = Arc::new(TypeReference::from(NamedType::new(
//!     "System.Collections.Generic",
//!     "List`1",
//!     Some(TypeScope::Module("App.dll".to_string())),
//! )?));
//! let of_int = TypeReference::generic_instance(
//!     list,
//!     vec![TypeReference::primitive(ElementType::I4, None)],
//! )?;
//! assert_eq!(of_int.full_name(), "System.Collections.Generic.List`1<System.Int32>");
//! # Ok::<(), cilmeta::Error>(())
//! ```

mod elementtype;
mod member;
mod reference;
mod signature;

pub use elementtype::{ElementType, ELEMENT_TYPE};
pub use member::{resolution_failure, MemberReference, Unresolved};
pub use reference::{
    ArrayDimension, ArrayShape, GenericParameter, GenericParameterOwner, NamedType,
    SpecificationKind, TypeRefRc, TypeReference, TypeScope, TypeSpecification,
};
pub use signature::write_type_signature;
