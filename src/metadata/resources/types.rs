use bitflags::bitflags;

use crate::metadata::identity::AssemblyIdentity;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// All possible flags for ManifestResourceAttributes
    pub struct ManifestResourceAttributes : u32 {
        /// The Resource is exported from the Assembly
        const PUBLIC = 0x0001;
        /// The Resource is private to the Assembly
        const PRIVATE = 0x0002;
        /// Mask selecting the visibility bits
        const VISIBILITY_MASK = 0x0007;
    }
}

/// Where the bytes of a resource live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Stored in the resource section of this module
    Embedded,
    /// Stored in a separate file of the assembly
    Linked,
    /// Stored in another assembly
    AssemblyLinked,
}

/// The location specific part of a [`Resource`]
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    /// The resource bytes
    Embedded(Vec<u8>),
    /// A file next to the manifest module
    Linked {
        /// File name, without a path
        file: String,
        /// SHA-1 hash of the file contents
        hash: Vec<u8>,
    },
    /// The assembly holding the resource
    AssemblyLinked(AssemblyIdentity),
}

/// A manifest resource of an assembly
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Name of the resource, for example `App.Strings.resources`
    pub name: String,
    /// Visibility flags
    pub attributes: ManifestResourceAttributes,
    /// Location and content
    pub data: ResourceData,
}

impl Resource {
    /// A public resource stored in this module
    pub fn embedded(name: impl Into<String>, data: Vec<u8>) -> Self {
        Resource {
            name: name.into(),
            attributes: ManifestResourceAttributes::PUBLIC,
            data: ResourceData::Embedded(data),
        }
    }

    /// A public resource stored in another file of the assembly
    pub fn linked(name: impl Into<String>, file: impl Into<String>, hash: Vec<u8>) -> Self {
        Resource {
            name: name.into(),
            attributes: ManifestResourceAttributes::PUBLIC,
            data: ResourceData::Linked {
                file: file.into(),
                hash,
            },
        }
    }

    /// A public resource stored in another assembly
    pub fn assembly_linked(name: impl Into<String>, assembly: AssemblyIdentity) -> Self {
        Resource {
            name: name.into(),
            attributes: ManifestResourceAttributes::PUBLIC,
            data: ResourceData::AssemblyLinked(assembly),
        }
    }

    /// The kind of storage
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        match self.data {
            ResourceData::Embedded(_) => ResourceType::Embedded,
            ResourceData::Linked { .. } => ResourceType::Linked,
            ResourceData::AssemblyLinked(_) => ResourceType::AssemblyLinked,
        }
    }

    /// Returns true if the resource is exported from the assembly
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.attributes & ManifestResourceAttributes::VISIBILITY_MASK
            == ManifestResourceAttributes::PUBLIC
    }

    /// Returns true if the resource is private to the assembly
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.attributes & ManifestResourceAttributes::VISIBILITY_MASK
            == ManifestResourceAttributes::PRIVATE
    }

    /// Makes the resource private
    #[must_use]
    pub fn private(mut self) -> Self {
        self.attributes = (self.attributes - ManifestResourceAttributes::VISIBILITY_MASK)
            | ManifestResourceAttributes::PRIVATE;
        self
    }
}
