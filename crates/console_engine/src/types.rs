use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::export::ExportError;

/// One entry of the verify response, and of the export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub details: String,
}

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsageRecord {
    pub credits_used: u64,
    pub credits_total: u64,
    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogRecord {
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug)]
pub enum EngineEvent {
    VerifyCompleted(Result<Vec<ResultRecord>, ApiError>),
    ExportCompleted(Result<PathBuf, ExportError>),
    StatsRefreshed(Result<UsageRecord, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// HTTP 403 with the backend's `error` message, if it sent one.
    QuotaExceeded(Option<String>),
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    /// The request task ended without producing an answer.
    Interrupted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::QuotaExceeded(_) => write!(f, "quota exceeded"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid response body"),
            FailureKind::Interrupted => write!(f, "interrupted"),
        }
    }
}
