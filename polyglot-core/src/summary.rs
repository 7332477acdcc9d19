use crate::text::char_count;
use crate::types::LanguageCode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUMMARY_LANGUAGE: &str = "en";
pub const DEFAULT_SUMMARY_MIN_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    KeyPoints,
    Tldr,
    Teaser,
    Headline,
}

impl SummaryType {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::KeyPoints => "key-points",
            SummaryType::Tldr => "tldr",
            SummaryType::Teaser => "teaser",
            SummaryType::Headline => "headline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    Markdown,
    PlainText,
}

impl SummaryFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryFormat::Markdown => "markdown",
            SummaryFormat::PlainText => "plain-text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

/// Options passed to the summarizer capability when a handle is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizerOptions {
    #[serde(rename = "type")]
    pub kind: SummaryType,
    pub format: SummaryFormat,
    pub length: SummaryLength,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            kind: SummaryType::KeyPoints,
            format: SummaryFormat::Markdown,
            length: SummaryLength::Medium,
        }
    }
}

/// When a submitted text qualifies for summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRule {
    pub language: LanguageCode,
    // Strictly greater-than: a text of exactly `min_chars` does not qualify.
    pub min_chars: usize,
}

impl Default for SummaryRule {
    fn default() -> Self {
        Self {
            language: LanguageCode::new(DEFAULT_SUMMARY_LANGUAGE),
            min_chars: DEFAULT_SUMMARY_MIN_CHARS,
        }
    }
}

impl SummaryRule {
    pub fn allows(&self, detected: Option<&LanguageCode>, text: Option<&str>) -> bool {
        let (Some(detected), Some(text)) = (detected, text) else {
            return false;
        };
        *detected == self.language && char_count(text) > self.min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_key_points_markdown_medium() {
        let opts = SummarizerOptions::default();
        assert_eq!(opts.kind.as_str(), "key-points");
        assert_eq!(opts.format.as_str(), "markdown");
        assert_eq!(opts.length.as_str(), "medium");
    }

    #[test]
    fn options_serialize_with_type_key() {
        let json = serde_json::to_value(SummarizerOptions::default()).unwrap();
        assert_eq!(json["type"], "key-points");
        assert_eq!(json["format"], "markdown");
        assert_eq!(json["length"], "medium");
    }

    #[test]
    fn rule_requires_english_and_length_above_threshold() {
        let rule = SummaryRule::default();
        let en = LanguageCode::new("en");
        let fr = LanguageCode::new("fr");
        let long = "a".repeat(151);
        let exact = "a".repeat(150);

        assert!(rule.allows(Some(&en), Some(&long)));
        assert!(!rule.allows(Some(&en), Some(&exact)));
        assert!(!rule.allows(Some(&fr), Some(&long)));
        assert!(!rule.allows(None, Some(&long)));
        assert!(!rule.allows(Some(&en), None));
    }

    #[test]
    fn rule_counts_characters_not_bytes() {
        let rule = SummaryRule::default();
        let en = LanguageCode::new("en");
        // 100 two-byte characters: 200 bytes but only 100 chars.
        let text = "é".repeat(100);
        assert!(!rule.allows(Some(&en), Some(&text)));
    }
}
