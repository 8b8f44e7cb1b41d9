use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use memmap2::Mmap;
use tracing::trace;

use crate::{
    metadata::{identity::AssemblyIdentity, resolver::ResolvedAssembly},
    Error, Result,
};

/// An assembly file mapped into memory.
///
/// The mapping is released by [`ResolvedAssembly::dispose`] or when the module is dropped.
/// Accessing the data of a disposed module fails with [`Error::InvalidOperation`].
#[derive(Debug)]
pub struct FileModule {
    identity: AssemblyIdentity,
    path: PathBuf,
    data: RwLock<Option<Mmap>>,
}

impl FileModule {
    /// Maps the file at `path` as the module of `identity`.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the file cannot be opened or mapped.
    pub fn open(identity: AssemblyIdentity, path: impl AsRef<Path>) -> Result<FileModule> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;

        // SAFETY: the mapping is read-only and owned by this module
        let mmap = unsafe { Mmap::map(&file) }?;

        trace!(path = %path.display(), len = mmap.len(), "mapped assembly file");
        Ok(FileModule {
            identity,
            path: path.to_path_buf(),
            data: RwLock::new(Some(mmap)),
        })
    }

    /// The file the module was loaded from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the module has been disposed
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.data.read().map_or(true, |data| data.is_none())
    }

    /// Size of the mapped file.
    ///
    /// # Errors
    /// See [`FileModule::with_data`].
    pub fn len(&self) -> Result<usize> {
        self.with_data(<[u8]>::len)
    }

    /// Calls `f` with the file contents.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the module was disposed and
    /// [`Error::LockError`] if the lock is poisoned.
    pub fn with_data<T>(&self, f: impl FnOnce(&[u8]) -> T) -> Result<T> {
        let data = self.data.read().map_err(|_| Error::LockError)?;
        match data.as_ref() {
            Some(mmap) => Ok(f(mmap)),
            None => Err(Error::InvalidOperation(format!(
                "module '{}' has been disposed",
                self.identity
            ))),
        }
    }
}

impl ResolvedAssembly for FileModule {
    fn identity(&self) -> &AssemblyIdentity {
        &self.identity
    }

    fn dispose(&self) {
        if let Ok(mut data) = self.data.write() {
            if data.take().is_some() {
                trace!(path = %self.path.display(), "unmapped assembly file");
            }
        }
    }
}
