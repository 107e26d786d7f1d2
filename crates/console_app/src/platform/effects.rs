use console_core::{
    ActivityEntry, Effect, ExportOutcome, Msg, Status, UsageStats, VerificationResult,
    VerifyOutcome,
};
use console_engine::{
    ApiError, EngineConfig, EngineEvent, EngineHandle, FailureKind, ResultRecord, UsageRecord,
};
use console_logging::{console_debug, console_info};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Verify { emails, candidates } => {
                    console_info!("Verify candidates={}", candidates);
                    self.engine.verify(emails);
                }
                Effect::Export { results } => {
                    console_info!("Export rows={}", results.len());
                    self.engine.export(to_records(&results));
                }
                Effect::RefreshStats => self.engine.refresh_stats(),
            }
        }
    }

    /// Drains pending engine events without blocking.
    pub fn poll_messages(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::VerifyCompleted(result) => Some(Msg::VerifyFinished(map_verify(result))),
        EngineEvent::ExportCompleted(result) => Some(Msg::ExportFinished(match result {
            Ok(path) => ExportOutcome::Saved {
                path: path.display().to_string(),
            },
            Err(err) => ExportOutcome::Failed(err.to_string()),
        })),
        EngineEvent::StatsRefreshed(Ok(record)) => Some(Msg::StatsLoaded(map_usage(record))),
        EngineEvent::StatsRefreshed(Err(err)) => {
            // Already logged by the engine; stale usage is fine.
            console_debug!("Dropping stats failure: {}", err);
            None
        }
    }
}

fn map_verify(result: Result<Vec<ResultRecord>, ApiError>) -> VerifyOutcome {
    match result {
        Ok(records) => VerifyOutcome::Completed(from_records(records)),
        Err(err) => match err.kind {
            FailureKind::QuotaExceeded(message) => VerifyOutcome::QuotaExceeded(message),
            FailureKind::HttpStatus(_) => VerifyOutcome::Failed,
            _ => VerifyOutcome::Errored(err.to_string()),
        },
    }
}

fn from_records(records: Vec<ResultRecord>) -> Vec<VerificationResult> {
    records
        .into_iter()
        .map(|record| VerificationResult {
            status: Status::from_label(&record.status),
            email: record.email,
            details: record.details,
        })
        .collect()
}

fn to_records(results: &[VerificationResult]) -> Vec<ResultRecord> {
    results
        .iter()
        .map(|result| ResultRecord {
            email: result.email.clone(),
            status: result.status.label().to_string(),
            details: result.details.clone(),
        })
        .collect()
}

fn map_usage(record: UsageRecord) -> UsageStats {
    UsageStats {
        credits_used: record.credits_used,
        credits_total: record.credits_total,
        recent: record
            .logs
            .into_iter()
            .map(|log| ActivityEntry {
                status: Status::from_label(&log.status),
                email: log.email,
                details: log.details,
                time: log.time,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, status: &str) -> ResultRecord {
        ResultRecord {
            email: email.to_string(),
            status: status.to_string(),
            details: "ok".to_string(),
        }
    }

    fn api_error(kind: FailureKind) -> ApiError {
        // ApiError::new is crate-private to the engine.
        ApiError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn verify_errors_map_to_outcomes() {
        assert_eq!(
            map_verify(Err(api_error(FailureKind::QuotaExceeded(Some(
                "Trial limit reached.".to_string()
            ))))),
            VerifyOutcome::QuotaExceeded(Some("Trial limit reached.".to_string()))
        );
        assert_eq!(
            map_verify(Err(api_error(FailureKind::HttpStatus(500)))),
            VerifyOutcome::Failed
        );
        assert_eq!(
            map_verify(Err(api_error(FailureKind::Network))),
            VerifyOutcome::Errored("network error: boom".to_string())
        );
    }

    #[test]
    fn records_round_trip_through_status_labels() {
        let records = vec![record("a@x.com", "Valid"), record("b@x.com", "Catch-All")];
        let results = from_records(records.clone());

        assert_eq!(results[0].status, Status::Valid);
        assert_eq!(
            results[1].status,
            Status::Unrecognized("Catch-All".to_string())
        );
        assert_eq!(to_records(&results), records);
    }

    #[test]
    fn stats_failures_produce_no_message() {
        assert_eq!(
            map_event(EngineEvent::StatsRefreshed(Err(api_error(
                FailureKind::Timeout
            )))),
            None
        );
    }
}
