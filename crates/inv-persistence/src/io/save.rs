//! Inventory saving with write-then-rename.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{PersistenceError, Result};

/// The authoritative inventory file and the handle held on it.
///
/// Every save goes through the same lock, so a save triggered by a scan and
/// one triggered by the operator can never interleave. The lock is held from
/// temp-file creation until the handle has been re-opened on the new file.
#[derive(Debug)]
pub struct InventoryFile {
    path: PathBuf,
    handle: Mutex<File>,
}

impl InventoryFile {
    /// Takes ownership of an already open handle on `path`.
    pub fn new(path: impl Into<PathBuf>, handle: File) -> Self {
        Self {
            path: path.into(),
            handle: Mutex::new(handle),
        }
    }

    /// Opens `path` for reading and takes ownership of the handle.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let handle = File::open(&path).map_err(|e| PersistenceError::io("open", &path, e))?;
        Ok(Self::new(path, handle))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replaces the file's content.
    ///
    /// Uses atomic write (temp file + rename) so that readers, and the file
    /// left behind after a crash, only ever see the old or the new content.
    /// On error the target file is untouched and the temp file is removed.
    pub fn save(&self, contents: &[u8]) -> Result<()> {
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        let reopened = replace_file(&self.path, contents)?;
        *handle = reopened;

        tracing::info!(path = %self.path.display(), bytes = contents.len(), "Saved inventory");
        Ok(())
    }

    /// Reads the current content through the owned handle.
    pub fn read_back(&self) -> Result<Vec<u8>> {
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        let mut contents = Vec::new();
        handle
            .seek(SeekFrom::Start(0))
            .and_then(|_| handle.read_to_end(&mut contents))
            .map_err(|e| PersistenceError::io("read", &self.path, e))?;
        Ok(contents)
    }
}

/// Writes `contents` next to `path` and renames it into place.
///
/// Returns a fresh read handle on the new file.
fn replace_file(path: &Path, contents: &[u8]) -> Result<File> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Same directory as the target, so the rename never crosses filesystems
    let mut temp = tempfile::Builder::new()
        .prefix(".inv-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| PersistenceError::io("create temporary", dir, e))?;

    temp.write_all(contents)
        .map_err(|e| PersistenceError::io("write", temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| PersistenceError::io("set permissions on", temp.path(), e))?;
    }

    temp.as_file()
        .sync_all()
        .map_err(|e| PersistenceError::io("sync", temp.path(), e))?;

    let temp_path = temp.path().to_path_buf();
    temp.persist(path)
        .map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e.error,
        })?;

    sync_dir(dir);

    File::open(path).map_err(|e| PersistenceError::io("reopen", path, e))
}

/// Flushes the directory entry so the rename itself survives power loss.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(error) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(dir = %dir.display(), %error, "Could not sync directory after rename");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
