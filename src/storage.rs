// File helpers shared by the idea store and project state
//
// Reads are whole-file; writes go to a sibling `.tmp` file which is synced
// and renamed over the target, so readers only ever see the old or the new
// document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{Error, Result};

/// Load a JSON document. A missing file is `Ok(None)`; a file that exists
/// but fails to parse is `CorruptStore`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };

    let value = serde_json::from_str(&contents).map_err(|e| Error::corrupt(path, e))?;
    debug!(path = %path.display(), "loaded json");
    Ok(Some(value))
}

/// Serialize `value` as pretty JSON with a trailing newline and write it atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|source| Error::Serialize { what, source })?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Write `contents` to `path` via temp file + rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = stage(path, contents)?;
    commit(&temp_path, path)
}

/// Write `contents` to the sibling `.tmp` of `path` and return the temp path.
///
/// Nothing at `path` changes until [`commit`]; call [`discard`] to drop it.
pub fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = path.with_extension("tmp");
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .map_err(|e| Error::io(&temp_path, e));

    if let Err(e) = written {
        discard(&temp_path);
        return Err(e);
    }

    debug!(path = %temp_path.display(), bytes = contents.len(), "staged file");
    Ok(temp_path)
}

/// Move a staged file into place.
pub fn commit(temp_path: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(temp_path, path) {
        discard(temp_path);
        return Err(Error::io(path, e));
    }
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// Remove a staged file, ignoring errors.
pub fn discard(temp_path: &Path) {
    let _ = fs::remove_file(temp_path);
}
