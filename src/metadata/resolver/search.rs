use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, trace};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        resolver::{AssemblyResolver, FileModule},
    },
    Error, Result,
};

/// Resolves assemblies by searching a list of directories for `<name><extension>`.
///
/// Search paths are searched in order, and every extension is tried in order within
/// each path. Defaults to the search paths `.` and `bin` and the extensions `.exe`
/// and `.dll`.
///
/// # Examples
///
/// ```rust
/// use std::path::PathBuf;
/// use cilmeta::metadata::resolver::SearchPathResolver;
///
/// let resolver = SearchPathResolver::new()
///     .with_search_path("lib")
///     .with_extension(".winmd");
///
/// assert_eq!(resolver.search_paths().last(), Some(&PathBuf::from("lib")));
/// assert_eq!(resolver.extensions(), [".exe", ".dll", ".winmd"]);
/// ```
#[derive(Debug, Clone)]
pub struct SearchPathResolver {
    search_paths: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl SearchPathResolver {
    /// A resolver with the default search paths and extensions
    #[must_use]
    pub fn new() -> Self {
        SearchPathResolver {
            search_paths: vec![PathBuf::from("."), PathBuf::from("bin")],
            extensions: vec![".exe".to_string(), ".dll".to_string()],
        }
    }

    /// A resolver without search paths, trying only the default extensions
    #[must_use]
    pub fn empty() -> Self {
        SearchPathResolver {
            search_paths: Vec::new(),
            ..Self::new()
        }
    }

    /// Appends a directory to search.
    #[must_use]
    pub fn with_search_path(mut self, path: impl AsRef<Path>) -> Self {
        self.add_search_path(path);
        self
    }

    /// Appends a file extension to try, including the leading dot.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    /// Appends a directory to search, ignoring directories already present.
    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    /// Removes a directory, returning true if it was configured.
    pub fn remove_search_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let before = self.search_paths.len();
        self.search_paths.retain(|existing| existing != path);
        self.search_paths.len() != before
    }

    /// The directories searched, in order
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// The file extensions tried, in order
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        for directory in &self.search_paths {
            for extension in &self.extensions {
                let candidate = directory.join(format!("{name}{extension}"));
                trace!(candidate = %candidate.display(), "checking candidate");
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

impl Default for SearchPathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssemblyResolver for SearchPathResolver {
    type Assembly = FileModule;

    fn resolve(&self, name: &AssemblyIdentity) -> Result<Arc<FileModule>> {
        let Some(path) = self.locate(&name.name) else {
            debug!(assembly = %name, "assembly not found on any search path");
            return Err(Error::AssemblyNotFound(name.clone()));
        };

        debug!(assembly = %name, path = %path.display(), "resolved assembly");
        Ok(Arc::new(FileModule::open(name.clone(), path)?))
    }
}
