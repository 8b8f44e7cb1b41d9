//! Custom attribute values and their blob encoding.
//!
//! A custom attribute row links an owner (`HasCustomAttribute`) to an attribute
//! constructor (`CustomAttributeType`) and a value blob with the following layout:
//!
//! - **Prolog** - the 0x0001 marker
//! - **Fixed Arguments** - constructor parameter values in declaration order
//! - **Named Arguments** - a 2-byte count, then field and property values with name/value pairs
//!
//! The named argument encoding is shared with the binary permission sets of
//! [`crate::metadata::security`].
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.3 - Custom Attributes

mod encoder;
mod types;

pub use encoder::{
    encode_custom_attribute_value, write_argument_type, write_named_argument,
    CUSTOM_ATTRIBUTE_PROLOG,
};
pub(crate) use encoder::write_ser_string;
pub use types::*;

use crate::{
    metadata::{
        streams::BlobHeapBuilder,
        tables::{CodedIndex, CodedIndexType, CustomAttributeRaw},
    },
    Error, Result,
};

impl CustomAttributeValue {
    /// Builds the `CustomAttribute` row applying this value to `parent` through `constructor`.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `parent` is not a `HasCustomAttribute` index
    /// or `constructor` is not a `CustomAttributeType` index, and the errors of
    /// [`encode_custom_attribute_value`].
    pub fn to_row(
        &self,
        parent: CodedIndex,
        constructor: CodedIndex,
        blobs: &mut BlobHeapBuilder,
    ) -> Result<CustomAttributeRaw> {
        for (index, expected) in [
            (&parent, CodedIndexType::HasCustomAttribute),
            (&constructor, CodedIndexType::CustomAttributeType),
        ] {
            if index.ci_type != expected {
                return Err(Error::CodedIndexMismatch {
                    coded_index: expected,
                    table: index.tag,
                });
            }
        }

        Ok(CustomAttributeRaw {
            parent,
            constructor,
            value: blobs.add(&encode_custom_attribute_value(self)?)?,
        })
    }
}
