// src/store/loader.rs

use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::store::model::{RawStoreFile, StoreFile};

/// Read a store file from the given path and return the raw `RawStoreFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (unique ids, DAG diagnostics, etc.). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawStoreFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawStoreFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a store file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Rejects structural corruption (duplicate ids, empty titles).
/// - Logs (but tolerates) dangling references and cycles, so a damaged
///   file can still be opened and repaired.
///
/// A missing file is treated as an empty store, so the first `taskdag add`
/// just works in a fresh directory.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<StoreFile> {
    let path = path.as_ref();
    if !path.exists() {
        return StoreFile::try_from(RawStoreFile::default());
    }

    let raw = load_from_path(path)?;
    let store = StoreFile::try_from(raw)?;
    Ok(store)
}
