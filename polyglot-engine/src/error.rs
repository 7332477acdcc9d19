use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced to the user. The display strings are the exact messages
/// the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    #[error("Please enter some text.")]
    EmptyInput,
    #[error("Failed to detect language.")]
    DetectionFailed,
    #[error("Summarizer API is not available.")]
    SummarizerUnavailable,
    #[error("Failed to summarize text.")]
    SummarizationFailed,
    #[error("Language pair not supported for translation.")]
    TranslationUnsupportedPair,
    #[error("Failed to translate text.")]
    TranslationFailed,
}

impl ActionError {
    /// Retrying the same input cannot succeed until the host changes.
    ///
    /// Informational only: the controller treats every failure the same way.
    pub fn is_permanent(self) -> bool {
        matches!(
            self,
            ActionError::SummarizerUnavailable | ActionError::TranslationUnsupportedPair
        )
    }

    pub fn message(self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed() {
        assert_eq!(ActionError::EmptyInput.message(), "Please enter some text.");
        assert_eq!(
            ActionError::TranslationUnsupportedPair.message(),
            "Language pair not supported for translation."
        );
        assert_eq!(
            ActionError::SummarizerUnavailable.message(),
            "Summarizer API is not available."
        );
    }

    #[test]
    fn classifies_permanent_failures() {
        assert!(ActionError::SummarizerUnavailable.is_permanent());
        assert!(ActionError::TranslationUnsupportedPair.is_permanent());
        assert!(!ActionError::DetectionFailed.is_permanent());
        assert!(!ActionError::TranslationFailed.is_permanent());
        assert!(!ActionError::EmptyInput.is_permanent());
    }
}
