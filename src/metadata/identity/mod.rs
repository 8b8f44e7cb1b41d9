//! Assembly identity and strong-name handling.
//!
//! [`AssemblyIdentity`] is the unit of assembly resolution: it parses and renders display
//! names and projects into `AssemblyRef` rows. [`Identity`] holds the strong-name part,
//! either a full public key or its 8-byte token.

mod assembly;
mod cryptographic;

pub use assembly::{AssemblyIdentity, AssemblyVersion, ProcessorArchitecture};
pub use cryptographic::Identity;
