use std::fmt;

use crate::{
    metadata::typesystem::{TypeRefRc, TypeReference, TypeScope},
    Error, Result,
};

/// A field or method referenced by name on its declaring type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberReference {
    /// The member name, `.ctor` for constructors
    pub name: String,
    /// The type declaring the member
    pub declaring_type: TypeRefRc,
}

impl MemberReference {
    /// Create a reference to `name` on `declaring_type`
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if `name` is empty.
    pub fn new(declaring_type: TypeRefRc, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Validation("member name cannot be empty".to_string()));
        }

        Ok(MemberReference {
            name,
            declaring_type,
        })
    }

    /// `Namespace.Type::Member`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.declaring_type.full_name(), self.name)
    }
}

impl fmt::Display for MemberReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Something a resolver can fail to find.
pub trait Unresolved {
    /// The printable reference
    fn reference(&self) -> String;
    /// The scope the reference was expected to live in
    fn faulting_scope(&self) -> Option<&TypeScope>;
}

impl Unresolved for TypeReference {
    fn reference(&self) -> String {
        self.full_name()
    }

    fn faulting_scope(&self) -> Option<&TypeScope> {
        self.scope()
    }
}

impl Unresolved for MemberReference {
    fn reference(&self) -> String {
        self.full_name()
    }

    fn faulting_scope(&self) -> Option<&TypeScope> {
        self.declaring_type.scope()
    }
}

/// Builds the [`Error::ResolutionFailed`] for `reference`, computing its scope now.
///
/// A reference without any scope has no place it could have been resolved in, which
/// is reported as [`Error::NotSupported`].
#[must_use]
pub fn resolution_failure(reference: &impl Unresolved) -> Error {
    match reference.faulting_scope() {
        Some(scope) => Error::ResolutionFailed {
            reference: reference.reference(),
            scope: scope.to_string(),
        },
        None => Error::NotSupported(format!(
            "'{}' has no resolution scope",
            reference.reference()
        )),
    }
}
