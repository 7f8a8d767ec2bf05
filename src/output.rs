//! Report destinations: a JSON file (with backup of previous contents) or
//! standard output.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

/// Copies a nonempty existing report to `<path>-backup-<uuid>` and returns
/// the backup path. Nothing is copied when `overwrite` is set or the file is
/// missing or empty.
pub fn backup_existing(path: &Path, overwrite: bool) -> Result<Option<PathBuf>> {
    if overwrite || !path.try_exists().context("Should be able to check existence of output file")? {
        return Ok(None);
    }
    let len = fs::metadata(path).context("Should be able to access output file metadata")?.len();
    if len == 0 {
        return Ok(None);
    }
    let backup = PathBuf::from(format!("{}-backup-{}", path.display(), Uuid::new_v4()));
    fs::copy(path, &backup)
        .with_context(|| format!("Should be able to back up existing file at {}", path.display()))?;
    log::debug!("backed up {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Writes `data` as one line of JSON to `path`, or to standard output.
pub fn write_json(path: Option<&Path>, data: &impl Serialize) -> Result<()> {
    let mut line = serde_json::to_vec(data).context("Should be able to serialize report as JSON")?;
    line.push(b'\n');
    match path {
        Some(path) => File::create(path)
            .and_then(|mut file| file.write_all(&line))
            .with_context(|| format!("Should be able to write report to {}", path.display())),
        None => io::stdout().write_all(&line)
            .context("Should be able to write report to standard output"),
    }
}
