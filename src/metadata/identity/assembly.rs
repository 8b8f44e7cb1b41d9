//! Assembly identity: name, version, culture, strong name and processor architecture.
//!
//! The display name format follows ECMA-335 II.6.3 and the runtime conventions:
//!
//! ```text
//! Name, Version=Major.Minor.Build.Revision, Culture=neutral, PublicKeyToken=b77a5c561934e089
//! ```
//!
//! The display name is the canonical key of an assembly, used verbatim (ordinal,
//! case-sensitive) by the resolver cache and in resolution error messages.

use std::{fmt, fmt::Write as _, str::FromStr};

use crate::{
    metadata::{
        identity::cryptographic::Identity,
        streams::{BlobHeapBuilder, StringsHeapBuilder},
        tables::{AssemblyFlags, AssemblyRefRaw},
    },
    Error, Result,
};

/// Complete identity information for a .NET assembly.
///
/// # Equality Semantics
///
/// The [`strong_name`](Self::strong_name) field is excluded from equality and hashing, so
/// a reference carrying a token and a definition carrying the full key compare equal.
/// Code that needs to tell them apart compares [`AssemblyIdentity::display_name`].
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::identity::{AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new("MyLibrary", AssemblyVersion::new(1, 0, 0, 0), None, None, None);
/// assert_eq!(
///     identity.display_name(),
///     "MyLibrary, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core").
    pub name: String,

    /// Four-part version number.
    pub version: AssemblyVersion,

    /// Culture of satellite assemblies, `None` for culture-neutral assemblies.
    pub culture: Option<String>,

    /// Public key or public key token, `None` for assemblies without a strong name.
    pub strong_name: Option<Identity>,

    /// Target processor architecture, if specified.
    pub processor_architecture: Option<ProcessorArchitecture>,
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.culture == other.culture
            && self.processor_architecture == other.processor_architecture
    }
}

impl Eq for AssemblyIdentity {}

impl std::hash::Hash for AssemblyIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.culture.hash(state);
        self.processor_architecture.hash(state);
    }
}

/// Four-part version numbering for .NET assemblies.
///
/// Versions order component-wise: major, minor, build, revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

/// Processor architecture specification for .NET assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorArchitecture {
    /// Architecture neutral managed code
    MSIL,
    /// 32-bit x86
    X86,
    /// Intel Itanium
    IA64,
    /// x86-64. "x64" is accepted as an alias when parsing.
    AMD64,
    /// 32-bit ARM
    ARM,
    /// 64-bit ARM
    ARM64,
}

impl AssemblyIdentity {
    /// Create a new assembly identity with the specified components.
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        strong_name: Option<Identity>,
        processor_architecture: Option<ProcessorArchitecture>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            culture,
            strong_name,
            processor_architecture,
        }
    }

    /// Parse an assembly display name.
    ///
    /// # Format
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cilmeta::metadata::identity::AssemblyIdentity;
    ///
    /// let full = AssemblyIdentity::parse(
    ///     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
    /// )?;
    /// assert_eq!(full.name, "mscorlib");
    /// assert_eq!(full.version.major, 4);
    /// # Ok::<(), cilmeta::Error>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the display name cannot be parsed.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut identity = AssemblyIdentity::new(name, AssemblyVersion::default(), None, None, None);
        for part in parts {
            if let Some(value) = part.strip_prefix("Version=") {
                identity.version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if value != "neutral" {
                    identity.culture = Some(value.to_string());
                }
            } else if let Some(value) = part.strip_prefix("PublicKeyToken=") {
                if value != "null" && !value.is_empty() {
                    let token_bytes = hex::decode(value).map_err(|e| {
                        malformed_error!("Invalid hex in PublicKeyToken '{}': {}", value, e)
                    })?;
                    identity.strong_name = Some(Identity::from(&token_bytes, false)?);
                }
            } else if let Some(value) = part.strip_prefix("PublicKey=") {
                let key = hex::decode(value)
                    .map_err(|e| malformed_error!("Invalid hex in PublicKey '{}': {}", value, e))?;
                identity.strong_name = Some(Identity::PubKey(key));
            } else if let Some(value) = part.strip_prefix("ProcessorArchitecture=") {
                identity.processor_architecture = Some(ProcessorArchitecture::parse(value)?);
            }
        }

        Ok(identity)
    }

    /// Generate the display name of this identity.
    ///
    /// Culture and public key token are always present (`neutral` / `null` when unset);
    /// a full public key is shown as its token.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 80);

        result.push_str(&self.name);
        let _ = write!(result, ", Version={}", self.version);
        let _ = write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        );

        result.push_str(", PublicKeyToken=");
        match &self.strong_name {
            Some(identity) => result.push_str(&hex::encode(identity.to_token())),
            None => result.push_str("null"),
        }

        if let Some(arch) = &self.processor_architecture {
            let _ = write!(result, ", ProcessorArchitecture={}", arch);
        }

        result
    }

    /// The public key token, if the identity is strong named.
    #[must_use]
    pub fn public_key_token(&self) -> Option<[u8; 8]> {
        self.strong_name.as_ref().map(Identity::to_token)
    }

    /// Check if this assembly is strong-named.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.strong_name.is_some()
    }

    /// Check if this assembly is culture-neutral.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }

    /// Builds the `AssemblyRef` row referencing this identity, adding its strings and
    /// blobs to the heaps.
    ///
    /// # Errors
    /// Returns an error if a string or blob cannot be added to the heaps.
    pub fn to_assembly_ref(
        &self,
        strings: &mut StringsHeapBuilder,
        blobs: &mut BlobHeapBuilder,
    ) -> Result<AssemblyRefRaw> {
        let (flags, public_key_or_token) = match &self.strong_name {
            Some(identity @ Identity::PubKey(_)) => {
                (AssemblyFlags::PUBLIC_KEY, blobs.add(identity.as_bytes())?)
            }
            Some(identity @ Identity::Token(_)) => {
                (AssemblyFlags::empty(), blobs.add(identity.as_bytes())?)
            }
            None => (AssemblyFlags::empty(), 0),
        };

        Ok(AssemblyRefRaw {
            major_version: self.version.major,
            minor_version: self.version.minor,
            build_number: self.version.build,
            revision_number: self.version.revision,
            flags: flags.bits(),
            public_key_or_token,
            name: strings.add(&self.name)?,
            culture: strings.add(self.culture.as_deref().unwrap_or_default())?,
            hash_value: 0,
        })
    }
}

impl AssemblyVersion {
    /// Create a new assembly version with the specified components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a dotted version with one to four components; missing ones are zero.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the version string has an invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl ProcessorArchitecture {
    /// Parse processor architecture from its display form, case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the architecture string is not recognized.
    pub fn parse(arch_str: &str) -> Result<Self> {
        match arch_str.trim().to_lowercase().as_str() {
            "msil" => Ok(Self::MSIL),
            "x86" => Ok(Self::X86),
            "ia64" => Ok(Self::IA64),
            "amd64" | "x64" => Ok(Self::AMD64),
            "arm" => Ok(Self::ARM),
            "arm64" => Ok(Self::ARM64),
            _ => Err(malformed_error!(
                "Unknown processor architecture: '{}'",
                arch_str.trim()
            )),
        }
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for ProcessorArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arch_str = match self {
            Self::MSIL => "MSIL",
            Self::X86 => "x86",
            Self::IA64 => "IA64",
            Self::AMD64 => "AMD64",
            Self::ARM => "ARM",
            Self::ARM64 => "ARM64",
        };
        write!(f, "{}", arch_str)
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for ProcessorArchitecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSCORLIB: &str =
        "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

    #[test]
    fn parse_full_name() {
        let identity = AssemblyIdentity::parse(MSCORLIB).unwrap();
        assert_eq!(identity.name, "mscorlib");
        assert_eq!(identity.version, AssemblyVersion::new(4, 0, 0, 0));
        assert!(identity.is_culture_neutral());
        assert_eq!(
            identity.public_key_token(),
            Some([0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89])
        );
        assert_eq!(identity.display_name(), MSCORLIB);
        assert_eq!(identity.to_string(), MSCORLIB);
    }

    #[test]
    fn parse_simple_name() {
        let identity: AssemblyIdentity = "Foo".parse().unwrap();
        assert_eq!(
            identity.display_name(),
            "Foo, Version=0.0.0.0, Culture=neutral, PublicKeyToken=null"
        );
    }

    #[test]
    fn parse_errors() {
        assert!(AssemblyIdentity::parse("").is_err());
        assert!(AssemblyIdentity::parse("Foo, Version=1.2.3.4.5").is_err());
        assert!(AssemblyIdentity::parse("Foo, PublicKeyToken=zz").is_err());
        assert!(AssemblyIdentity::parse("Foo, PublicKeyToken=0011").is_err());
        assert!(AssemblyIdentity::parse("Foo, ProcessorArchitecture=sparc").is_err());
    }

    #[test]
    fn culture_and_architecture() {
        let identity =
            AssemblyIdentity::parse("Foo.resources, Version=1.0, Culture=de-DE, ProcessorArchitecture=x64")
                .unwrap();
        assert_eq!(identity.culture.as_deref(), Some("de-DE"));
        assert_eq!(identity.processor_architecture, Some(ProcessorArchitecture::AMD64));
        assert_eq!(
            identity.display_name(),
            "Foo.resources, Version=1.0.0.0, Culture=de-DE, PublicKeyToken=null, ProcessorArchitecture=AMD64"
        );
    }

    #[test]
    fn equality_ignores_strong_name() {
        let with_token = AssemblyIdentity::parse(MSCORLIB).unwrap();
        let without = AssemblyIdentity::parse("mscorlib, Version=4.0.0.0").unwrap();
        assert_eq!(with_token, without);
        assert_ne!(with_token.display_name(), without.display_name());
    }

    #[test]
    fn assembly_ref_projection() {
        let identity = AssemblyIdentity::parse(MSCORLIB).unwrap();
        let mut strings = StringsHeapBuilder::new();
        let mut blobs = BlobHeapBuilder::new();

        let row = identity.to_assembly_ref(&mut strings, &mut blobs).unwrap();
        assert_eq!(row.major_version, 4);
        assert_eq!(row.flags, 0);
        assert_eq!(row.culture, 0);
        assert_eq!(strings.get(row.name), Some("mscorlib"));
        assert_eq!(&blobs.data()[1..], &[8, 0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]);
    }

    #[test]
    fn version_ordering() {
        assert!(AssemblyVersion::new(4, 5, 0, 0) > AssemblyVersion::new(4, 0, 9, 9));
        assert_eq!("2.1".parse::<AssemblyVersion>().unwrap(), AssemblyVersion::new(2, 1, 0, 0));
    }
}
