use polyglot_engine::session::{Action, Affordances, SessionState};
use std::fmt::Write as _;

pub fn progress_line(action: Action) -> String {
    match action {
        Action::Send => "… detecting language".to_string(),
        Action::Summarize => "… summarizing".to_string(),
        Action::Translate => "… translating".to_string(),
    }
}

/// Render the session the way a chat transcript would show it.
pub fn render(state: &SessionState, affordances: &Affordances) -> String {
    let mut out = String::new();

    let Some(text) = state.submitted_text.as_deref() else {
        if let Some(msg) = state.error_message() {
            let _ = writeln!(out, "! {msg}");
        }
        let _ = writeln!(out, "(nothing sent yet)");
        return out;
    };

    let _ = writeln!(out, "> {text}");
    if let Some(lang) = &state.detected_language {
        let _ = writeln!(out, "  Detected Language: {lang}");
    }
    if let Some(summary) = &state.summary_text {
        let _ = writeln!(out, "Summary:");
        for line in summary.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    if let Some(translated) = &state.translated_text {
        let _ = writeln!(out, "Translated Text:");
        for line in translated.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    if let Some(msg) = state.error_message() {
        let _ = writeln!(out, "! {msg}");
    }

    let mut actions = Vec::new();
    if affordances.summarize_visible {
        actions.push(with_state("/summarize", affordances.summarize_enabled));
    }
    if affordances.translate_visible {
        actions.push(with_state(
            &format!(
                "/translate [{}] to {}",
                affordances.translate_label,
                state.target_language.label()
            ),
            affordances.translate_enabled,
        ));
    }
    if affordances.target_selector_visible {
        actions.push("/target <code>".to_string());
    }
    if !actions.is_empty() {
        let _ = writeln!(out, "  {}", actions.join("   "));
    }

    out
}

fn with_state(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        format!("{label} (disabled)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_core::summary::SummaryRule;
    use polyglot_core::types::{LanguageCode, TargetLanguage};
    use polyglot_engine::error::ActionError;

    fn rule() -> SummaryRule {
        SummaryRule::default()
    }

    #[test]
    fn empty_session_has_placeholder() {
        let s = SessionState::default();
        let out = render(&s, &s.affordances(&rule()));
        assert!(out.contains("nothing sent yet"));
        assert!(!out.contains("/translate"));
    }

    #[test]
    fn shows_detection_translation_and_actions() {
        let mut s = SessionState::new(TargetLanguage::Pt);
        s.submitted_text = Some("Bonjour le monde".into());
        s.detected_language = Some(LanguageCode::new("fr"));
        s.translated_text = Some("Olá mundo".into());

        let out = render(&s, &s.affordances(&rule()));
        assert!(out.contains("> Bonjour le monde"));
        assert!(out.contains("Detected Language: fr"));
        assert!(out.contains("Translated Text:\n  Olá mundo"));
        assert!(out.contains("/translate [Translate] to Portuguese"));
        assert!(!out.contains("/summarize"));
    }

    #[test]
    fn busy_session_disables_actions() {
        let mut s = SessionState::default();
        s.submitted_text = Some("Hola".into());
        s.in_flight = Some(Action::Translate);

        let out = render(&s, &s.affordances(&rule()));
        assert!(out.contains("[Translating...]"));
        assert!(out.contains("(disabled)"));
    }

    #[test]
    fn shows_error_message() {
        let mut s = SessionState::default();
        s.last_error = Some(ActionError::EmptyInput);
        let out = render(&s, &s.affordances(&rule()));
        assert!(out.contains("! Please enter some text."));
    }
}
