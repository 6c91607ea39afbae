//! Byte-exact snapshot of the schematic taken before it is modified.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{LabelError, Result};

/// Appended to the full file name, so `board.kicad_sch` is backed up to
/// `board.kicad_sch.bak`.
pub const BACKUP_SUFFIX: &str = ".bak";

/// A completed backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to its backup location, replacing any earlier backup.
pub fn snapshot(path: &Path) -> Result<BackupArtifact> {
    let target = backup_path(path);
    let backup_error = |source| LabelError::Backup {
        path: path.to_path_buf(),
        source,
    };

    let contents = fs::read(path).map_err(backup_error)?;
    fs::write(&target, &contents).map_err(backup_error)?;

    info!(
        "Backed up {} to {} ({} bytes)",
        path.display(),
        target.display(),
        contents.len()
    );
    Ok(BackupArtifact {
        path: target,
        bytes: contents.len() as u64,
    })
}
