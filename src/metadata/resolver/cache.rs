use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{debug, trace};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        resolver::{AssemblyResolver, ResolvedAssembly},
    },
    Result,
};

/// Caches the modules produced by a base [`AssemblyResolver`].
///
/// Entries are keyed by [`AssemblyIdentity::display_name`], compared byte for byte. A
/// miss is resolved while the entry is locked, so concurrent requests for the same name
/// resolve it once. Failures are passed to the caller and not cached.
///
/// [`CachingAssemblyResolver::dispose`] disposes every cached module once and empties the
/// cache. Dropping the resolver disposes it as well.
pub struct CachingAssemblyResolver<R: AssemblyResolver> {
    base: R,
    cache: DashMap<String, Arc<R::Assembly>>,
}

impl<R: AssemblyResolver> CachingAssemblyResolver<R> {
    /// Wraps `base` with an empty cache
    pub fn new(base: R) -> Self {
        CachingAssemblyResolver {
            base,
            cache: DashMap::new(),
        }
    }

    /// The wrapped strategy
    pub fn base(&self) -> &R {
        &self.base
    }

    /// Adds a module built elsewhere. An existing entry for the same name is kept.
    ///
    /// Returns true if the module was inserted.
    pub fn register(&self, module: Arc<R::Assembly>) -> bool {
        let key = module.identity().display_name();
        match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                trace!(assembly = %entry.key(), "register ignored, already cached");
                false
            }
            Entry::Vacant(entry) => {
                debug!(assembly = %entry.key(), "registered assembly");
                entry.insert(module);
                true
            }
        }
    }

    /// Returns the cached module for `name`, without resolving it
    pub fn get(&self, name: &AssemblyIdentity) -> Option<Arc<R::Assembly>> {
        self.cache
            .get(&name.display_name())
            .map(|entry| entry.value().clone())
    }

    /// Returns true if a module is cached for `name`
    pub fn contains(&self, name: &AssemblyIdentity) -> bool {
        self.cache.contains_key(&name.display_name())
    }

    /// Number of cached modules
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Disposes every cached module and clears the cache.
    ///
    /// Modules resolved afterwards are cached again and disposed by the next call.
    pub fn dispose(&self) {
        let keys: Vec<String> = self.cache.iter().map(|entry| entry.key().clone()).collect();
        if keys.is_empty() {
            return;
        }

        debug!(count = keys.len(), "disposing assembly cache");
        for key in keys {
            if let Some((key, module)) = self.cache.remove(&key) {
                trace!(assembly = %key, "disposing assembly");
                module.dispose();
            }
        }
    }
}

impl<R: AssemblyResolver> AssemblyResolver for CachingAssemblyResolver<R> {
    type Assembly = R::Assembly;

    fn resolve(&self, name: &AssemblyIdentity) -> Result<Arc<R::Assembly>> {
        let key = name.display_name();
        if let Some(module) = self.cache.get(&key) {
            trace!(assembly = %key, "cache hit");
            return Ok(module.value().clone());
        }

        match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                trace!(assembly = %entry.key(), "cache hit");
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                debug!(assembly = %entry.key(), "cache miss");
                let module = self.base.resolve(name)?;
                entry.insert(module.clone());
                Ok(module)
            }
        }
    }
}

impl<R: AssemblyResolver> Drop for CachingAssemblyResolver<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
