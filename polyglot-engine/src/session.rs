use crate::error::ActionError;
use polyglot_core::summary::SummaryRule;
use polyglot_core::types::{LanguageCode, SessionId, TargetLanguage};
use serde::{Deserialize, Serialize};

/// A user-triggered action that calls out to a capability provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Send,
    Summarize,
    Translate,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Send => "send",
            Action::Summarize => "summarize",
            Action::Translate => "translate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    Idle,
    Submitted,
    Detected,
    Summarizing,
    Translating,
    Error,
}

pub fn stage_label(stage: SessionStage) -> &'static str {
    match stage {
        SessionStage::Idle => "idle",
        SessionStage::Submitted => "submitted",
        SessionStage::Detected => "detected",
        SessionStage::Summarizing => "summarizing",
        SessionStage::Translating => "translating",
        SessionStage::Error => "error",
    }
}

/// What happened when an action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    Failed(ActionError),
    // Preconditions not met; nothing was touched.
    Skipped,
    // Another action was in flight; nothing was touched.
    Busy,
}

/// Which controls the front end should show and enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub send_enabled: bool,
    pub summarize_visible: bool,
    pub summarize_enabled: bool,
    pub translate_visible: bool,
    pub translate_enabled: bool,
    pub target_selector_visible: bool,
    pub translate_label: &'static str,
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: SessionId,
    pub raw_input: String,
    pub submitted_text: Option<String>,
    pub detected_language: Option<LanguageCode>,
    pub summary_text: Option<String>,
    pub translated_text: Option<String>,
    pub target_language: TargetLanguage,
    pub in_flight: Option<Action>,
    pub last_error: Option<ActionError>,
}

impl SessionState {
    pub fn new(target_language: TargetLanguage) -> Self {
        Self {
            session_id: SessionId::new(),
            raw_input: String::new(),
            submitted_text: None,
            detected_language: None,
            summary_text: None,
            translated_text: None,
            target_language,
            in_flight: None,
            last_error: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.map(ActionError::message)
    }

    pub fn stage(&self) -> SessionStage {
        match self.in_flight {
            Some(Action::Send) => SessionStage::Submitted,
            Some(Action::Summarize) => SessionStage::Summarizing,
            Some(Action::Translate) => SessionStage::Translating,
            None if self.last_error.is_some() => SessionStage::Error,
            None if self.submitted_text.is_none() => SessionStage::Idle,
            None if self.detected_language.is_some() => SessionStage::Detected,
            None => SessionStage::Submitted,
        }
    }

    pub fn can_summarize(&self, rule: &SummaryRule) -> bool {
        rule.allows(
            self.detected_language.as_ref(),
            self.submitted_text.as_deref(),
        )
    }

    pub fn affordances(&self, rule: &SummaryRule) -> Affordances {
        let busy = self.is_busy();
        let submitted = self.submitted_text.is_some();
        let summarize_visible = self.can_summarize(rule);

        Affordances {
            send_enabled: !busy,
            summarize_visible,
            summarize_enabled: summarize_visible && !busy,
            translate_visible: submitted,
            translate_enabled: submitted && !busy,
            target_selector_visible: submitted,
            translate_label: if busy { "Translating..." } else { "Translate" },
            show_progress: busy,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TargetLanguage::default())
    }
}
