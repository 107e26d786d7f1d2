use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use console_logging::{console_debug, console_error, console_info, console_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, ReqwestApi, VerificationApi};
use crate::export::{save_export, ExportOptions};
use crate::{ApiError, EngineEvent, FailureKind, ResultRecord};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub export: ExportOptions,
    pub poll_interval: Duration,
}

impl EngineConfig {
    pub fn new(api: ApiSettings, download_dir: PathBuf) -> Self {
        Self {
            api,
            export: ExportOptions::new(download_dir),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

enum EngineCommand {
    Verify { emails: String },
    Export { results: Vec<ResultRecord> },
    RefreshStats,
}

/// Runs backend calls on a dedicated runtime thread and reports back through events.
///
/// Dropping the handle stops the stats poller and lets the worker thread exit.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        let api = ReqwestApi::new(&config.api)?;
        console_info!("Engine using backend {}", api.base_url());
        Ok(Self::with_api(Arc::new(api), config))
    }

    pub fn with_api(api: Arc<dyn VerificationApi>, config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let poll_interval = if config.poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            config.poll_interval
        };
        let export = Arc::new(config.export);
        let poller_token = shutdown.clone();
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            let event_tx = worker_tx;
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    console_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };

            runtime.spawn(poll_stats(
                api.clone(),
                poll_interval,
                event_tx.clone(),
                poller_token,
            ));

            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let export = export.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), &export, command, event_tx).await;
                });
            }
            console_debug!("Engine command channel closed");
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx,
            shutdown,
        }
    }

    /// Queues a verify. If the worker is gone the failure is reported as an event,
    /// so every call still gets exactly one `VerifyCompleted`.
    pub fn verify(&self, emails: impl Into<String>) {
        let command = EngineCommand::Verify {
            emails: emails.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            console_error!("Engine worker is not running; verify dropped");
            let _ = self.event_tx.send(EngineEvent::VerifyCompleted(Err(ApiError::new(
                FailureKind::Interrupted,
                "engine is not running",
            ))));
        }
    }

    pub fn export(&self, results: Vec<ResultRecord>) {
        let _ = self.cmd_tx.send(EngineCommand::Export { results });
    }

    pub fn refresh_stats(&self) {
        let _ = self.cmd_tx.send(EngineCommand::RefreshStats);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Guarantees exactly one `VerifyCompleted` per verify command, even if the
/// task is torn down before the backend answers.
struct VerifyReply {
    event_tx: Option<mpsc::Sender<EngineEvent>>,
}

impl VerifyReply {
    fn new(event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            event_tx: Some(event_tx),
        }
    }

    fn send(mut self, result: Result<Vec<ResultRecord>, ApiError>) {
        if let Some(tx) = self.event_tx.take() {
            let _ = tx.send(EngineEvent::VerifyCompleted(result));
        }
    }
}

impl Drop for VerifyReply {
    fn drop(&mut self) {
        if let Some(tx) = self.event_tx.take() {
            console_warn!("Verify request ended without a response");
            let _ = tx.send(EngineEvent::VerifyCompleted(Err(ApiError::new(
                FailureKind::Interrupted,
                "request was interrupted",
            ))));
        }
    }
}

async fn handle_command(
    api: &dyn VerificationApi,
    export: &ExportOptions,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Verify { emails } => {
            let reply = VerifyReply::new(event_tx);
            console_info!("Verify request bytes={}", emails.len());
            let result = api.verify(&emails).await;
            match &result {
                Ok(records) => console_info!("Verify completed results={}", records.len()),
                Err(err) => console_warn!("Verify failed: {}", err),
            }
            reply.send(result);
        }
        EngineCommand::Export { results } => {
            let result = save_export(api, &results, export).await;
            if let Err(err) = &result {
                console_warn!("Export failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::ExportCompleted(result));
        }
        EngineCommand::RefreshStats => {
            let result = fetch_stats(api).await;
            let _ = event_tx.send(EngineEvent::StatsRefreshed(result));
        }
    }
}

async fn fetch_stats(api: &dyn VerificationApi) -> Result<crate::UsageRecord, ApiError> {
    let result = api.stats().await;
    if let Err(err) = &result {
        console_warn!("Failed to update metrics: {}", err);
    }
    result
}

/// Refreshes usage on a fixed interval. The first tick fires immediately.
async fn poll_stats(
    api: Arc<dyn VerificationApi>,
    period: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }
        let result = fetch_stats(api.as_ref()).await;
        if event_tx.send(EngineEvent::StatsRefreshed(result)).is_err() {
            break;
        }
    }
    console_debug!("Stats poller stopped");
}
