use crate::state::AlertKind;
use crate::{parse_candidates, AppState, Effect, ExportOutcome, Msg, VerifyOutcome, BATCH_LIMIT};

const EMPTY_INPUT_PROMPT: &str = "Please enter some emails first.";
const BATCH_LIMIT_PROMPT: &str = "Batch limit exceeded. Max 1,000 emails per request.";
const QUOTA_FALLBACK: &str = "Trial limit reached.";
const VERIFY_FAILED: &str = "Error: Verification failed";
const EXPORT_FILENAME: &str = "verified_emails.csv";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::VerifyClicked => {
            // Single-flight: the loader stays up until the outcome arrives.
            if state.is_loading() {
                return (state, Vec::new());
            }
            let text = state
                .input()
                .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                .to_string();
            if text.is_empty() {
                state.raise_alert(AlertKind::Validation, EMPTY_INPUT_PROMPT);
                return (state, Vec::new());
            }
            let candidates = parse_candidates(&text).len();
            if candidates > BATCH_LIMIT {
                state.raise_alert(AlertKind::Validation, BATCH_LIMIT_PROMPT);
                return (state, Vec::new());
            }
            state.show_loader(format!("Verifying {candidates} mailboxes..."));
            vec![Effect::Verify {
                emails: text,
                candidates,
            }]
        }
        Msg::VerifyFinished(outcome) => {
            state.hide_loader();
            match outcome {
                VerifyOutcome::Completed(results) => {
                    let count = results.len();
                    state.show_results(results);
                    state.set_status_line(format!("Verified {count} mailboxes"));
                    vec![Effect::RefreshStats]
                }
                VerifyOutcome::QuotaExceeded(message) => {
                    let text = message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| QUOTA_FALLBACK.to_string());
                    state.raise_alert(AlertKind::Quota, text);
                    Vec::new()
                }
                VerifyOutcome::Failed => {
                    state.raise_alert(AlertKind::Failure, VERIFY_FAILED);
                    Vec::new()
                }
                VerifyOutcome::Errored(message) => {
                    state.raise_alert(AlertKind::Failure, format!("Error: {message}"));
                    Vec::new()
                }
            }
        }
        Msg::ClearClicked => {
            state.clear_session();
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.results().is_empty() {
                Vec::new()
            } else {
                vec![Effect::Export {
                    results: state.results().to_vec(),
                }]
            }
        }
        Msg::ExportFinished(outcome) => {
            match outcome {
                ExportOutcome::Saved { path } => {
                    state.set_status_line(format!("Saved {EXPORT_FILENAME} to {path}"));
                }
                ExportOutcome::Failed(message) => {
                    state.raise_alert(AlertKind::Export, format!("Export error: {message}"));
                }
            }
            Vec::new()
        }
        Msg::StatsLoaded(stats) => {
            state.apply_usage(stats);
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::FocusToggled => {
            state.toggle_focus();
            Vec::new()
        }
        Msg::ResultsScrolled(delta) => {
            state.scroll_results(delta);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
