//! Verification console engine: backend API client and effect execution.
mod api;
mod engine;
mod export;
mod persist;
mod types;

pub use api::{ApiSettings, ReqwestApi, VerificationApi};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{save_export, ExportError, ExportOptions, EXPORT_FILENAME};
pub use persist::{ensure_download_dir, save_download, PersistError};
pub use types::{ApiError, EngineEvent, FailureKind, LogRecord, ResultRecord, UsageRecord};
