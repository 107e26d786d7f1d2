//! Verification console core: pure state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod parse;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{ActivityEntry, Bucket, Status, UsageStats, VerificationResult, BATCH_LIMIT};
pub use msg::{ExportOutcome, Msg, VerifyOutcome};
pub use parse::parse_candidates;
pub use state::{Alert, AlertKind, AppState, Focus};
pub use update::update;
pub use view_model::{ActivityRowView, AppViewModel, ResultRowView, ResultSummary, UsageView};
