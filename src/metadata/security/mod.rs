//! Declarative security for the `DeclSecurity` table.
//!
//! A [`SecurityDeclaration`] pairs a [`SecurityAction`] with security attributes. It is
//! stored as a binary permission set blob (ECMA-335 II.23.1.3):
//!
//! ```text
//! '.' count { SerString(type) compressed(length) compressed(named count) NamedArg* }*
//! ```
//!
//! where each `NamedArg` uses the custom attribute encoding.

mod types;

pub use types::{SecurityAction, SecurityAttribute, SecurityDeclaration};

use crate::{
    file::io::write_compressed_uint,
    metadata::{
        customattributes::{write_named_argument, write_ser_string},
        streams::BlobHeapBuilder,
        tables::{CodedIndex, CodedIndexType, DeclSecurityRaw},
    },
    Error, Result,
};

/// Marker starting a binary permission set
pub const PERMISSION_SET_MARKER: u8 = b'.';

impl SecurityDeclaration {
    /// Encodes the binary permission set blob.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for names or argument lists too long to be encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cilmeta::metadata::security::{SecurityAction, SecurityAttribute, SecurityDeclaration};
    ///
    /// let mut declaration = SecurityDeclaration::new(SecurityAction::Demand);
    /// declaration.attributes.push(SecurityAttribute::new("P"));
    /// assert_eq!(declaration.encode_permission_set()?, [b'.', 0x01, 0x01, b'P', 0x01, 0x00]);
    /// # Ok::<(), cilmeta::Error>(())
    /// ```
    pub fn encode_permission_set(&self) -> Result<Vec<u8>> {
        let mut blob = vec![PERMISSION_SET_MARKER];
        write_compressed_uint(&mut blob, count(self.attributes.len())?)?;

        for attribute in &self.attributes {
            write_ser_string(&mut blob, Some(&attribute.attribute_type))?;

            let mut arguments = Vec::new();
            write_compressed_uint(&mut arguments, count(attribute.named_arguments.len())?)?;
            for named in &attribute.named_arguments {
                write_named_argument(&mut arguments, named)?;
            }

            write_compressed_uint(&mut blob, count(arguments.len())?)?;
            blob.extend_from_slice(&arguments);
        }

        Ok(blob)
    }

    /// Builds the `DeclSecurity` row attaching this declaration to `parent`.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `parent` is not a `HasDeclSecurity` index,
    /// and the errors of [`SecurityDeclaration::encode_permission_set`].
    pub fn to_row(&self, parent: CodedIndex, blobs: &mut BlobHeapBuilder) -> Result<DeclSecurityRaw> {
        if parent.ci_type != CodedIndexType::HasDeclSecurity {
            return Err(Error::CodedIndexMismatch {
                coded_index: CodedIndexType::HasDeclSecurity,
                table: parent.tag,
            });
        }

        Ok(DeclSecurityRaw {
            action: self.action.value(),
            parent,
            permission_set: blobs.add(&self.encode_permission_set()?)?,
        })
    }
}

fn count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| malformed_error!("Count {} is too large", len))
}
