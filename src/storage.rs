use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `body` verbatim to `storage_path/file_name`, creating the directory
/// first if it does not exist yet. An existing file is overwritten.
pub fn store_document(storage_path: &Path, file_name: &str, body: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(storage_path).map_err(|e| Error::io(storage_path, e))?;

    let target_path = storage_path.join(file_name);
    fs::write(&target_path, body).map_err(|e| Error::io(&target_path, e))?;
    Ok(target_path)
}

/// Returns the path of the pretty copy of `path`: the suffix goes between the
/// file stem and the extension, so `a.json` becomes `a-pretty.json`.
pub fn pretty_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(file_name)
}

/// Whether `path` is itself a pretty copy produced with `suffix`.
pub fn is_pretty_path(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}
