//! Integration tests for assembly resolution through search paths and the cache.

use std::{fs, sync::Arc};

use cilmeta::prelude::*;

fn name(text: &str) -> AssemblyIdentity {
    AssemblyIdentity::parse(text).unwrap()
}

#[test]
fn cache_maps_files_once() -> Result<()> {
    let directory = tempfile::tempdir()?;
    fs::write(directory.path().join("Foo.dll"), b"MZ foo")?;

    let resolver =
        CachingAssemblyResolver::new(SearchPathResolver::empty().with_search_path(directory.path()));
    let foo = name("Foo, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null");

    let first = resolver.resolve(&foo)?;
    // Removing the file proves the second lookup never touches the disk
    fs::remove_file(directory.path().join("Foo.dll"))?;
    let second = resolver.resolve(&foo)?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.with_data(|data| data.to_vec())?, b"MZ foo");
    Ok(())
}

#[test]
fn dispose_releases_every_mapping() -> Result<()> {
    let directory = tempfile::tempdir()?;
    fs::write(directory.path().join("A.dll"), b"a")?;
    fs::write(directory.path().join("B.exe"), b"b")?;

    let resolver =
        CachingAssemblyResolver::new(SearchPathResolver::empty().with_search_path(directory.path()));
    let a = resolver.resolve(&name("A, Version=1.0.0.0"))?;
    let b = resolver.resolve(&name("B, Version=1.0.0.0"))?;
    assert_eq!(resolver.len(), 2);

    resolver.dispose();
    assert!(a.is_disposed());
    assert!(b.is_disposed());
    assert!(resolver.is_empty());
    assert!(matches!(a.len(), Err(Error::InvalidOperation(_))));

    // Resolving again maps a fresh module instead of reusing the disposed one
    let again = resolver.resolve(&name("A, Version=1.0.0.0"))?;
    assert!(!again.is_disposed());
    assert!(!Arc::ptr_eq(&a, &again));
    Ok(())
}

#[test]
fn missing_assemblies_report_the_full_name() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let resolver =
        CachingAssemblyResolver::new(SearchPathResolver::empty().with_search_path(directory.path()));
    let missing = name("Missing, Version=3.1.0.0, Culture=de, PublicKeyToken=b77a5c561934e089");

    let error = resolver.resolve(&missing).err().unwrap();
    assert_eq!(
        error.to_string(),
        "Failed to resolve assembly: 'Missing, Version=3.1.0.0, Culture=de, PublicKeyToken=b77a5c561934e089'"
    );

    // Not cached: once the file exists the same name resolves
    fs::write(directory.path().join("Missing.dll"), b"late")?;
    assert!(resolver.resolve(&missing).is_ok());
    Ok(())
}

#[test]
fn registered_modules_win_over_search_paths() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let elsewhere = tempfile::NamedTempFile::new()?;
    fs::write(elsewhere.path(), b"registered")?;
    fs::write(directory.path().join("Lib.dll"), b"found")?;

    let lib = name("Lib, Version=1.0.0.0");
    let resolver =
        CachingAssemblyResolver::new(SearchPathResolver::empty().with_search_path(directory.path()));
    assert!(resolver.register(Arc::new(FileModule::open(lib.clone(), elsewhere.path())?)));
    assert!(!resolver.register(Arc::new(FileModule::open(lib.clone(), elsewhere.path())?)));

    let module = resolver.resolve(&lib)?;
    assert_eq!(module.with_data(|data| data.to_vec())?, b"registered");
    assert_eq!(module.identity(), &lib);
    Ok(())
}
