use crate::error::{Error, Result};
use crate::storage::{is_pretty_path, pretty_path};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

/// The result of a prettify pass over a directory.
#[derive(Debug, Default)]
pub struct PrettifyOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
}

/// Re-serializes a JSON document with 2-space indentation. Object keys keep
/// the order they were stored in and non-ASCII text is written as UTF-8.
pub fn prettify_json(content: &[u8]) -> serde_json::Result<String> {
    let value: serde_json::Value = serde_json::from_slice(content)?;
    serde_json::to_string_pretty(&value)
}

/// Whether `path` holds a pretty copy: it carries the suffix and its content
/// is already in pretty form. A fetched product whose name happens to end in
/// the suffix is stored compact and therefore not a copy.
pub fn is_pretty_copy(path: &Path, suffix: &str) -> bool {
    if !is_pretty_path(path, suffix) {
        return false;
    }
    match fs::read(path) {
        Ok(content) => prettify_json(&content).is_ok_and(|pretty| pretty.as_bytes() == content),
        Err(_) => false,
    }
}

/// Writes an indented copy of the JSON file at `path` next to it and returns
/// the path of the copy. The source file is never touched, and neither is an
/// existing file at the copy's path unless it is itself a pretty copy.
pub fn prettify_file(path: &Path, suffix: &str) -> Result<PathBuf> {
    let content = fs::read(path).map_err(|e| Error::io(path, e))?;
    let pretty = prettify_json(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let target = pretty_path(path, suffix);
    if target.exists() && !is_pretty_copy(&target, suffix) {
        return Err(Error::Collision(target));
    }
    fs::write(&target, pretty).map_err(|e| Error::io(&target, e))?;
    Ok(target)
}

/// Lists the `.json` files in `dir` that are not pretty copies, sorted by name,
/// along with the entries that could not be read. A missing directory has no
/// files; a directory that cannot be listed is reported as a single failure.
pub fn json_sources(dir: &Path, suffix: &str) -> (Vec<PathBuf>, Vec<(PathBuf, Error)>) {
    let mut sources = Vec::new();
    let mut failed = Vec::new();
    if !dir.exists() {
        return (sources, failed);
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            failed.push((dir.to_path_buf(), Error::io(dir, e)));
            return (sources, failed);
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                failed.push((dir.to_path_buf(), Error::io(dir, e)));
                continue;
            }
        };
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if path.is_file() && is_json && !is_pretty_copy(&path, suffix) {
            sources.push(path);
        }
    }
    sources.sort();
    (sources, failed)
}

/// Prettifies every saved JSON document in `dir`. Nothing here stops the run:
/// unreadable entries, unparsable files and name collisions are logged and
/// recorded as failures.
pub fn prettify_dir(dir: &Path, suffix: &str) -> PrettifyOutcome {
    println!(
        "{} ✨ Prettify JSON documents in {}...",
        style("[4/4]").dim(),
        style(dir.display()).cyan()
    );

    let (sources, listing_failures) = json_sources(dir, suffix);
    let mut outcome = PrettifyOutcome::default();
    for (path, e) in listing_failures {
        println!("      {} {}", style("[ERROR]").red(), e);
        outcome.failed.push((path, e));
    }

    for path in sources {
        match prettify_file(&path, suffix) {
            Ok(target) => {
                println!("      {} {}", style("✔").green(), target.display());
                outcome.written.push(target);
            }
            Err(e) => {
                println!("      {} {}", style("[ERROR]").red(), e);
                outcome.failed.push((path, e));
            }
        }
    }

    outcome
}
