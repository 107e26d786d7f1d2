use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory {path:?} is unusable: {reason}")]
    DownloadDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn dir_error(dir: &Path, reason: impl ToString) -> PersistError {
    PersistError::DownloadDir {
        path: dir.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Creates the download directory if needed and rejects a path that is not a directory.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(dir_error(dir, "not a directory")),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| dir_error(dir, e))
        }
        Err(err) => Err(dir_error(dir, err)),
    }
}

/// Saves `content` as `{dir}/{filename}`.
///
/// Bytes land in a sibling temp file first and are renamed over the target,
/// so a previous download is either kept whole or replaced whole. The temp
/// file is removed on every error path.
pub fn save_download(
    dir: &Path,
    filename: &str,
    content: &[u8],
) -> Result<PathBuf, PersistError> {
    ensure_download_dir(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.as_file().sync_all()?;

    let target = dir.join(filename);
    staged.persist(&target).map_err(|err| PersistError::Io(err.error))?;
    Ok(target)
}
