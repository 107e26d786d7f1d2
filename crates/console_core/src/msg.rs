use crate::{UsageStats, VerificationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input area; carries the whole new text.
    InputChanged(String),
    /// User asked to verify the current input.
    VerifyClicked,
    /// User asked to reset the session.
    ClearClicked,
    /// User asked to export the held results.
    ExportClicked,
    /// User acknowledged the current alert.
    AlertDismissed,
    /// User moved focus between the input area and the results table.
    FocusToggled,
    /// User scrolled the results table by a number of rows.
    ResultsScrolled(isize),
    /// Backend answered (or failed to answer) a verify request.
    VerifyFinished(VerifyOutcome),
    /// Export round trip ended.
    ExportFinished(ExportOutcome),
    /// Fresh usage stats arrived from the poller or a post-verify refresh.
    StatsLoaded(UsageStats),
    /// UI tick to coalesce rendering.
    Tick,
    /// Fallback for unmapped input.
    NoOp,
}

/// Every way a verify request can end. Exactly one is delivered per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// HTTP 200 with a decoded result set.
    Completed(Vec<VerificationResult>),
    /// HTTP 403; carries the backend's `error` message when it sent one.
    QuotaExceeded(Option<String>),
    /// Any other non-success HTTP status.
    Failed,
    /// Transport, decode, or task failure.
    Errored(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { path: String },
    Failed(String),
}
