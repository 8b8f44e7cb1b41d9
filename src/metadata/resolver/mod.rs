//! Assembly resolution with search paths and a shared cache.
//!
//! Resolution maps an [`AssemblyIdentity`] to a loaded module. The base strategy,
//! [`SearchPathResolver`], searches `<search path>/<name><extension>` for every configured
//! search path and extension and memory-maps the first file found. The
//! [`CachingAssemblyResolver`] wraps any strategy and keeps resolved modules keyed by the
//! identity's display name until it is disposed.
//!
//! Failed resolutions are reported as [`crate::Error::AssemblyNotFound`] and never cached,
//! so a later attempt searches the paths again.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cilmeta::metadata::{
//!     identity::AssemblyIdentity,
//!     resolver::{AssemblyResolver, CachingAssemblyResolver, SearchPathResolver},
//! };
//!
//! let resolver = CachingAssemblyResolver::new(
//!     SearchPathResolver::new().with_search_path("/usr/lib/mono/4.5"),
//! );
//!
//! let name = AssemblyIdentity::parse("mscorlib, Version=4.0.0.0")?;
//! let module = resolver.resolve(&name)?;
//! assert!(std::sync::Arc::ptr_eq(&module, &resolver.resolve(&name)?));
//!
//! resolver.dispose();
//! # Ok::<(), cilmeta::Error>(())
//! ```

mod cache;
mod module;
mod search;

pub use cache::CachingAssemblyResolver;
pub use module::FileModule;
pub use search::SearchPathResolver;

use std::sync::Arc;

use crate::{metadata::identity::AssemblyIdentity, Result};

/// A module produced by an [`AssemblyResolver`]
pub trait ResolvedAssembly: Send + Sync {
    /// The identity the module was resolved or registered under
    fn identity(&self) -> &AssemblyIdentity;

    /// Releases the resources held by the module. Calling it again has no effect.
    fn dispose(&self);
}

/// A strategy mapping assembly names to modules
pub trait AssemblyResolver: Send + Sync {
    /// The module type produced
    type Assembly: ResolvedAssembly;

    /// Resolves `name` to a module.
    ///
    /// # Errors
    /// Returns [`crate::Error::AssemblyNotFound`] if no module matches `name`.
    fn resolve(&self, name: &AssemblyIdentity) -> Result<Arc<Self::Assembly>>;
}
