use std::fmt;

/// Maximum number of candidates accepted in one verify request.
pub const BATCH_LIMIT: usize = 1000;

/// Backend classification of one candidate.
///
/// The four known labels are matched exactly. Anything else is kept verbatim
/// in `Unrecognized` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Valid,
    Risky,
    Invalid,
    Error,
    Unrecognized(String),
}

/// Summary counter a status contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Valid,
    Risky,
    Invalid,
}

impl Status {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Valid" => Status::Valid,
            "Risky" => Status::Risky,
            "Invalid" => Status::Invalid,
            "Error" => Status::Error,
            other => Status::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Status::Valid => "Valid",
            Status::Risky => "Risky",
            Status::Invalid => "Invalid",
            Status::Error => "Error",
            Status::Unrecognized(label) => label,
        }
    }

    /// Style class used by the renderer, e.g. `status-valid`.
    pub fn css_class(&self) -> String {
        format!("status-{}", self.label().to_lowercase())
    }

    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Status::Valid => Some(Bucket::Valid),
            Status::Risky => Some(Bucket::Risky),
            Status::Invalid | Status::Error => Some(Bucket::Invalid),
            Status::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub email: String,
    pub status: Status,
    pub details: String,
}

impl VerificationResult {
    pub fn new(email: impl Into<String>, status: Status, details: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            status,
            details: details.into(),
        }
    }
}

/// One line of the backend's recent verification history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub email: String,
    pub status: Status,
    pub details: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageStats {
    pub credits_used: u64,
    pub credits_total: u64,
    pub recent: Vec<ActivityEntry>,
}

impl UsageStats {
    /// Share of credits consumed, clamped to `0..=100`. A zero total reads as 0.
    pub fn percent_used(&self) -> u16 {
        if self.credits_total == 0 {
            return 0;
        }
        let percent = self.credits_used.saturating_mul(100) / self.credits_total;
        percent.min(100) as u16
    }
}
