use crate::view_model::{
    ActivityRowView, AppViewModel, ResultRowView, ResultSummary, UsageView,
};
use crate::{UsageStats, VerificationResult};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Validation,
    Quota,
    Failure,
    Export,
}

/// Blocking message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    results: Vec<VerificationResult>,
    results_visible: bool,
    results_offset: usize,
    focus: Focus,
    loader: Option<String>,
    alert: Option<Alert>,
    status_line: Option<String>,
    usage_panel: bool,
    usage: Option<UsageStats>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            results: Vec::new(),
            results_visible: false,
            results_offset: 0,
            focus: Focus::Input,
            loader: None,
            alert: None,
            status_line: None,
            usage_panel: true,
            usage: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a console without a usage panel; incoming stats are dropped.
    pub fn with_usage_panel(enabled: bool) -> Self {
        Self {
            usage_panel: enabled,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .results
            .iter()
            .map(|result| ResultRowView {
                email: result.email.clone(),
                status: result.status.label().to_string(),
                status_class: result.status.css_class(),
                details: result.details.clone(),
            })
            .collect();

        let (usage, recent) = match &self.usage {
            Some(stats) => (
                Some(UsageView {
                    text: format!("{} / {}", stats.credits_used, stats.credits_total),
                    percent: stats.percent_used(),
                }),
                stats
                    .recent
                    .iter()
                    .map(|entry| ActivityRowView {
                        email: entry.email.clone(),
                        status: entry.status.label().to_string(),
                        status_class: entry.status.css_class(),
                        time: entry.time.clone(),
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };

        AppViewModel {
            input: self.input.clone(),
            loader: self.loader.clone(),
            alert: self.alert.clone(),
            results_visible: self.results_visible,
            rows,
            summary: ResultSummary::tally(&self.results),
            results_offset: self.results_offset,
            focus: self.focus,
            usage_panel: self.usage_panel,
            usage,
            recent,
            status_line: self.status_line.clone(),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The held result set, as last received from the backend.
    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn show_loader(&mut self, message: String) {
        self.loader = Some(message);
        self.dirty = true;
    }

    pub(crate) fn hide_loader(&mut self) {
        if self.loader.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn raise_alert(&mut self, kind: AlertKind, text: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            text: text.into(),
        });
        self.dirty = true;
    }

    pub(crate) fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn set_status_line(&mut self, text: impl Into<String>) {
        self.status_line = Some(text.into());
        self.dirty = true;
    }

    /// Replaces the held results wholesale and reveals them.
    pub(crate) fn show_results(&mut self, results: Vec<VerificationResult>) {
        self.results = results;
        self.results_visible = true;
        self.results_offset = 0;
        self.focus = Focus::Results;
        self.dirty = true;
    }

    pub(crate) fn clear_session(&mut self) {
        self.input.clear();
        self.results_visible = false;
        self.results.clear();
        self.results_offset = 0;
        self.focus = Focus::Input;
        self.dirty = true;
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.results_visible => Focus::Results,
            Focus::Input => return,
            Focus::Results => Focus::Input,
        };
        self.dirty = true;
    }

    pub(crate) fn scroll_results(&mut self, delta: isize) {
        if !self.results_visible || self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        let next = self.results_offset.saturating_add_signed(delta).min(last);
        if next != self.results_offset {
            self.results_offset = next;
            self.dirty = true;
        }
    }

    /// No-op when the console has no usage panel to update.
    pub(crate) fn apply_usage(&mut self, stats: UsageStats) {
        if self.usage_panel && self.usage.as_ref() != Some(&stats) {
            self.usage = Some(stats);
            self.dirty = true;
        }
    }
}
