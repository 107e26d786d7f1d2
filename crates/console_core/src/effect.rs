use crate::VerificationResult;

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the raw, trimmed input text to the verify endpoint.
    Verify { emails: String, candidates: usize },
    /// Send the held result set to the export endpoint and save the file.
    Export { results: Vec<VerificationResult> },
    /// Fetch usage stats once, outside the regular polling interval.
    RefreshStats,
}
