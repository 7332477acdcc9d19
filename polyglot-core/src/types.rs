use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An ISO-like language code as reported by a detector (`en`, `fr`, `pt-BR`, ...).
///
/// Codes are trimmed and lower-cased on construction so comparisons against
/// constants such as `"en"` are stable regardless of provider casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported target language: {0}")]
pub struct UnknownTargetLanguage(pub String);

/// The fixed set of languages the user may translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    En,
    Es,
    Pt,
    Fr,
    Ru,
    Tr,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::En,
        TargetLanguage::Es,
        TargetLanguage::Pt,
        TargetLanguage::Fr,
        TargetLanguage::Ru,
        TargetLanguage::Tr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::En => "en",
            TargetLanguage::Es => "es",
            TargetLanguage::Pt => "pt",
            TargetLanguage::Fr => "fr",
            TargetLanguage::Ru => "ru",
            TargetLanguage::Tr => "tr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetLanguage::En => "English",
            TargetLanguage::Es => "Spanish",
            TargetLanguage::Pt => "Portuguese",
            TargetLanguage::Fr => "French",
            TargetLanguage::Ru => "Russian",
            TargetLanguage::Tr => "Turkish",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }

    pub fn language_code(self) -> LanguageCode {
        LanguageCode::new(self.code())
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::Es
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = UnknownTargetLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownTargetLanguage(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_are_normalized() {
        let code = LanguageCode::new("  EN ");
        assert_eq!(code.as_str(), "en");
        assert!(code == "en");
        assert!(!LanguageCode::new("fr").is_empty());
        assert!(LanguageCode::new("   ").is_empty());
    }

    #[test]
    fn target_language_defaults_to_spanish() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::Es);
    }

    #[test]
    fn parses_target_codes_case_insensitively() {
        assert_eq!("FR".parse::<TargetLanguage>(), Ok(TargetLanguage::Fr));
        assert_eq!(TargetLanguage::from_code(" tr "), Some(TargetLanguage::Tr));
        assert_eq!(
            "de".parse::<TargetLanguage>(),
            Err(UnknownTargetLanguage("de".into()))
        );
    }

    #[test]
    fn target_set_is_fixed() {
        let codes: Vec<&str> = TargetLanguage::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes, ["en", "es", "pt", "fr", "ru", "tr"]);
    }

    #[test]
    fn target_serializes_as_code() {
        let json = serde_json::to_string(&TargetLanguage::Pt).unwrap();
        assert_eq!(json, "\"pt\"");
        let back: TargetLanguage = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(back, TargetLanguage::Ru);
    }
}
