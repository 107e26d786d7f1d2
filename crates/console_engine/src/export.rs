use std::path::PathBuf;

use console_logging::console_info;

use crate::persist::{save_download, PersistError};
use crate::{ApiError, ResultRecord, VerificationApi};

/// Name the exported file is saved under.
pub const EXPORT_FILENAME: &str = "verified_emails.csv";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub download_dir: PathBuf,
    pub filename: String,
}

impl ExportOptions {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            download_dir,
            filename: EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Persist(#[from] PersistError),
}

/// Fetches the export payload for `results` and saves it as a download.
pub async fn save_export(
    api: &dyn VerificationApi,
    results: &[ResultRecord],
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let payload = api.export(results).await?;
    let path = save_download(&options.download_dir, &options.filename, &payload)?;
    console_info!(
        "Saved export rows={} bytes={} path={:?}",
        results.len(),
        payload.len(),
        path
    );
    Ok(path)
}
