use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::signatures::SignaturesError;

/// Read a signatures document from disk.
pub fn read_document(path: impl AsRef<Path>) -> Result<String, SignaturesError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| SignaturesError::source_unavailable(&path.display().to_string(), e))
}

/// Write `data` to `path`, creating parent directories as needed.
///
/// The text lands in a uniquely named temporary file next to `path` and is
/// then persisted over it. Any failure removes the temporary file again.
pub fn write_document(path: impl AsRef<Path>, data: &str) -> Result<(), SignaturesError> {
    let path = path.as_ref();
    let target = path.display().to_string();
    let fail = |e: std::io::Error| SignaturesError::destination_unavailable(&target, e);

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(fail)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(fail)?;
    tmp.write_all(data.as_bytes()).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    // On error the returned `PersistError` drops its file, which deletes it.
    tmp.persist(path).map_err(|e| fail(e.error))?;

    tracing::debug!(path = %target, bytes = data.len(), "wrote signatures document");
    Ok(())
}
