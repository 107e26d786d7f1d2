use crate::state::{Alert, Focus};
use crate::{Bucket, VerificationResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    /// Loader message while a verify request is in flight.
    pub loader: Option<String>,
    pub alert: Option<Alert>,
    pub results_visible: bool,
    pub rows: Vec<ResultRowView>,
    pub summary: ResultSummary,
    pub results_offset: usize,
    pub focus: Focus,
    pub usage_panel: bool,
    pub usage: Option<UsageView>,
    pub recent: Vec<ActivityRowView>,
    pub status_line: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub email: String,
    pub status: String,
    pub status_class: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRowView {
    pub email: String,
    pub status: String,
    pub status_class: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageView {
    /// `"<used> / <total>"`.
    pub text: String,
    pub percent: u16,
}

/// Counter values shown above the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultSummary {
    pub valid: usize,
    pub risky: usize,
    pub invalid: usize,
    /// Rows whose status fell outside the known set; counted in no bucket.
    pub unrecognized: usize,
}

impl ResultSummary {
    pub fn tally(results: &[VerificationResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut summary, result| {
                match result.status.bucket() {
                    Some(Bucket::Valid) => summary.valid += 1,
                    Some(Bucket::Risky) => summary.risky += 1,
                    Some(Bucket::Invalid) => summary.invalid += 1,
                    None => summary.unrecognized += 1,
                }
                summary
            })
    }
}
