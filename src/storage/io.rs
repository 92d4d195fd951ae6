//! File plumbing shared by the table and shard stores
//!
//! Reads take a shared advisory lock, writes go through a temp file with an
//! exclusive lock and finish with a rename, so a failed write leaves the
//! previous file contents untouched. Advisory locks serialize individual file
//! accesses only; multi-step read-modify-write atomicity is the caller's
//! responsibility via the lock registry.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::error::{Result, StoreError};

/// Reads the named table file, creating it as an empty array first if it does
/// not exist yet.
pub(crate) fn read_table(root: &Path, table: &str) -> Result<Vec<u8>> {
    ensure_table(root, table)?;

    let path = root.join(table);
    let mut file = File::open(&path).map_err(|e| StoreError::io(table, e))?;
    FileExt::lock_shared(&file).map_err(|e| StoreError::io(table, e))?;

    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| StoreError::io(table, e))?;

    // Lock is released when file is dropped
    Ok(data)
}

/// Replaces the named table file with `data` in one rename.
pub(crate) fn write_table(root: &Path, table: &str, data: &[u8]) -> Result<()> {
    fs::create_dir_all(root).map_err(|e| StoreError::io(table, e))?;

    let path = root.join(table);
    let temp_path = temp_path(&path);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| StoreError::io(table, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| StoreError::io(table, e))?;

        let mut writer = BufWriter::new(&file);
        writer.write_all(data).map_err(|e| StoreError::io(table, e))?;
        writer.flush().map_err(|e| StoreError::io(table, e))?;
    }

    fs::rename(&temp_path, &path).map_err(|e| StoreError::io(table, e))
}

/// Removes the named table file. With `missing_ok`, an absent file counts as
/// success.
pub(crate) fn remove_table(root: &Path, table: &str, missing_ok: bool) -> Result<()> {
    match fs::remove_file(root.join(table)) {
        Ok(()) => Ok(()),
        Err(e) if missing_ok && e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(table, e)),
    }
}

fn ensure_table(root: &Path, table: &str) -> Result<()> {
    let path = root.join(table);
    if path.exists() {
        return Ok(());
    }

    debug!(table, "table does not exist, creating");
    fs::create_dir_all(root).map_err(|e| StoreError::io(table, e))?;
    fs::write(&path, b"[]").map_err(|e| StoreError::io(table, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
