//! Manifest resources and the managed resource section.
//!
//! Resources are embedded in the module, linked to another file of the assembly, or
//! forwarded to another assembly. Each becomes one `ManifestResource` row:
//!
//! - **Embedded** - `Offset` points into the resource section, `Implementation` is null
//! - **Linked** - `Offset` is 0, `Implementation` references a `File` row
//! - **Assembly linked** - `Offset` is 0, `Implementation` references an `AssemblyRef` row
//!
//! Embedded resource data is stored in the section as a 4-byte little-endian length
//! followed by the bytes, see [`ResourceSection`].
//!
//! # Key Types
//! - [`Resource`] - A resource and its location
//! - [`ResourceSection`] - The data of all embedded resources

mod types;

pub use types::*;

use tracing::trace;

use crate::{
    file::io::write_le,
    metadata::{
        streams::{BlobHeapBuilder, StringsHeapBuilder},
        tables::{CodedIndex, CodedIndexType, FileRaw, ManifestResourceRaw, TableId},
    },
    Error, Result,
};

/// `FileAttributes.ContainsNoMetadata`
pub const FILE_CONTAINS_NO_METADATA: u32 = 0x0001;

/// The managed resource section of a module: length prefixed resource blobs.
#[derive(Debug, Default)]
pub struct ResourceSection {
    data: Vec<u8>,
}

impl ResourceSection {
    /// An empty section
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `data` and returns the offset of its length prefix.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the section would exceed 4 GiB.
    pub fn store(&mut self, data: &[u8]) -> Result<u32> {
        let offset = u32::try_from(self.data.len())
            .map_err(|_| malformed_error!("Resource section is too large"))?;
        let length = u32::try_from(data.len())
            .map_err(|_| malformed_error!("Resource of {} bytes is too large", data.len()))?;

        write_le::<u32>(&mut self.data, length);
        self.data.extend_from_slice(data);
        Ok(offset)
    }

    /// The section bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the section in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no resource was stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Resource {
    /// Builds the `ManifestResource` row of this resource.
    ///
    /// Embedded data is appended to `section`. `implementation` is ignored for embedded
    /// resources, and must reference a `File` row for linked resources or an `AssemblyRef`
    /// row for assembly linked ones.
    ///
    /// # Errors
    /// Returns [`Error::CodedIndexMismatch`] if `implementation` references the wrong table,
    /// the errors of [`ResourceSection::store`], and [`Error::Malformed`] for a name the
    /// `#Strings` heap cannot hold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cilmeta::metadata::{
    ///     resources::{Resource, ResourceSection},
    ///     streams::StringsHeapBuilder,
    ///     tables::{CodedIndex, CodedIndexType},
    /// };
    ///
    /// let mut strings = StringsHeapBuilder::new();
    /// let mut section = ResourceSection::new();
    /// let resource = Resource::embedded("App.Data", vec![1, 2, 3]);
    /// let implementation = CodedIndex::null(CodedIndexType::Implementation);
    ///
    /// let row = resource.to_manifest_resource(&mut strings, &mut section, implementation)?;
    /// assert_eq!(row.offset_field, 0);
    /// assert_eq!(section.data(), &[3, 0, 0, 0, 1, 2, 3]);
    /// # Ok::<(), cilmeta::Error>(())
    /// ```
    pub fn to_manifest_resource(
        &self,
        strings: &mut StringsHeapBuilder,
        section: &mut ResourceSection,
        implementation: CodedIndex,
    ) -> Result<ManifestResourceRaw> {
        let (offset_field, implementation) = match &self.data {
            ResourceData::Embedded(data) => (
                section.store(data)?,
                CodedIndex::null(CodedIndexType::Implementation),
            ),
            ResourceData::Linked { .. } => (0, check_implementation(implementation, TableId::File)?),
            ResourceData::AssemblyLinked(_) => (
                0,
                check_implementation(implementation, TableId::AssemblyRef)?,
            ),
        };

        trace!(name = %self.name, kind = ?self.resource_type(), offset_field, "manifest resource");

        Ok(ManifestResourceRaw {
            offset_field,
            flags: self.attributes.bits(),
            name: strings.add(&self.name)?,
            implementation,
        })
    }

    /// Builds the `File` row a linked resource needs, `None` for other resources.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the file name or hash cannot be added to the heaps.
    pub fn to_file_row(
        &self,
        strings: &mut StringsHeapBuilder,
        blobs: &mut BlobHeapBuilder,
    ) -> Result<Option<FileRaw>> {
        match &self.data {
            ResourceData::Linked { file, hash } => Ok(Some(FileRaw {
                flags: FILE_CONTAINS_NO_METADATA,
                name: strings.add(file)?,
                hash_value: blobs.add(hash)?,
            })),
            _ => Ok(None),
        }
    }
}

fn check_implementation(implementation: CodedIndex, table: TableId) -> Result<CodedIndex> {
    if implementation.ci_type != CodedIndexType::Implementation
        || implementation.tag != table
        || implementation.is_null()
    {
        return Err(Error::CodedIndexMismatch {
            coded_index: CodedIndexType::Implementation,
            table: implementation.tag,
        });
    }

    Ok(implementation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::AssemblyIdentity;

    #[test]
    fn section_layout() {
        let mut section = ResourceSection::new();
        assert!(section.is_empty());
        assert_eq!(section.store(b"ab").unwrap(), 0);
        assert_eq!(section.store(b"").unwrap(), 6);
        assert_eq!(section.store(b"c").unwrap(), 10);
        assert_eq!(section.len(), 15);
        assert_eq!(&section.data()[..6], &[2, 0, 0, 0, b'a', b'b']);
    }

    #[test]
    fn visibility() {
        let resource = Resource::embedded("a", vec![]);
        assert!(resource.is_public());
        assert!(!resource.is_private());

        let resource = resource.private();
        assert!(resource.is_private());
        assert_eq!(resource.attributes.bits(), 2);
        assert_eq!(resource.resource_type(), ResourceType::Embedded);
    }

    #[test]
    fn linked_resource() {
        let mut strings = StringsHeapBuilder::new();
        let mut blobs = BlobHeapBuilder::new();
        let mut section = ResourceSection::new();
        let resource = Resource::linked("App.Images", "images.bin", vec![0xAA; 20]);

        let file = resource.to_file_row(&mut strings, &mut blobs).unwrap().unwrap();
        assert_eq!(file.flags, FILE_CONTAINS_NO_METADATA);
        assert_eq!(strings.get(file.name), Some("images.bin"));

        let implementation =
            CodedIndex::new(CodedIndexType::Implementation, TableId::File, 1).unwrap();
        let row = resource
            .to_manifest_resource(&mut strings, &mut section, implementation)
            .unwrap();
        assert_eq!(row.offset_field, 0);
        assert_eq!(row.implementation.tag, TableId::File);
        assert_eq!(strings.get(row.name), Some("App.Images"));
        assert!(section.is_empty());

        let wrong = CodedIndex::new(CodedIndexType::Implementation, TableId::AssemblyRef, 1).unwrap();
        assert!(matches!(
            resource.to_manifest_resource(&mut strings, &mut section, wrong),
            Err(Error::CodedIndexMismatch { .. })
        ));
    }

    #[test]
    fn assembly_linked_resource() {
        let mut strings = StringsHeapBuilder::new();
        let mut blobs = BlobHeapBuilder::new();
        let mut section = ResourceSection::new();
        let identity = AssemblyIdentity::parse("Satellite, Version=1.0.0.0").unwrap();
        let resource = Resource::assembly_linked("App.de.resources", identity);

        assert_eq!(resource.to_file_row(&mut strings, &mut blobs).unwrap(), None);

        let implementation =
            CodedIndex::new(CodedIndexType::Implementation, TableId::AssemblyRef, 2).unwrap();
        let row = resource
            .to_manifest_resource(&mut strings, &mut section, implementation)
            .unwrap();
        assert_eq!(row.implementation.row, 2);

        let null = CodedIndex::null(CodedIndexType::Implementation);
        assert!(resource
            .to_manifest_resource(&mut strings, &mut section, null)
            .is_err());
    }
}
