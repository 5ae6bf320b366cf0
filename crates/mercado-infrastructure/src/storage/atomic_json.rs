//! Atomic JSON file writes and an exclusive store lock.
//!
//! A group of documents is written in two phases: every document is first
//! staged into a synced temp file next to its target, then all temp files
//! are renamed into place. A failure while staging leaves the store
//! untouched; a failure while renaming leaves the files renamed so far in
//! place.

use mercado_core::error::{MercadoError, Result};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// A fully written temp file waiting to replace its target.
#[derive(Debug)]
pub struct StagedFile {
    tmp_path: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    /// Serializes `value` into `.<name>.tmp` beside `target` and fsyncs it.
    pub fn stage(target: &Path, value: &Value) -> Result<Self> {
        let parent = target
            .parent()
            .ok_or_else(|| MercadoError::io("Path has no parent directory"))?;
        let file_name = target
            .file_name()
            .ok_or_else(|| MercadoError::io("Path has no file name"))?;

        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
        let json = serde_json::to_string_pretty(value)?;

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;

        Ok(Self {
            tmp_path,
            target: target.to_path_buf(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Renames the temp file over the target. The temp file is removed if
    /// the rename fails.
    pub fn publish(self) -> Result<()> {
        if let Err(e) = fs::rename(&self.tmp_path, &self.target) {
            let _ = fs::remove_file(&self.tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Removes the temp file (best effort).
    pub fn discard(self) {
        let _ = fs::remove_file(&self.tmp_path);
    }
}

/// Publishes `staged` in order.
///
/// Stops at the first failed rename and discards the temp files that were
/// not published yet. Files renamed before the failure stay in place.
pub fn publish_all(staged: Vec<StagedFile>) -> Result<()> {
    let mut pending = staged.into_iter();
    while let Some(file) = pending.next() {
        let target = file.target().to_path_buf();
        if let Err(e) = file.publish() {
            pending.for_each(StagedFile::discard);
            return Err(MercadoError::data_access(format!(
                "Failed to publish {}: {}",
                target.display(),
                e
            )));
        }
    }
    Ok(())
}

/// Exclusive advisory lock on a store directory.
///
/// The lock file itself is permanent; closing the handle on drop releases
/// the lock. Removing the file would let a waiter and a newcomer lock two
/// different inodes at once.
pub struct StoreLock {
    _file: File,
}

impl StoreLock {
    pub fn acquire(root: &Path) -> Result<Self> {
        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        let lock_path = root.join(".store.lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                MercadoError::data_access(format!("Failed to lock document store: {}", e))
            })?;
        }

        Ok(Self { _file: file })
    }
}
