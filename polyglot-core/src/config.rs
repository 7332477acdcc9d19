use crate::summary::{
    DEFAULT_SUMMARY_LANGUAGE, DEFAULT_SUMMARY_MIN_CHARS, SummarizerOptions, SummaryRule,
};
use crate::types::{LanguageCode, TargetLanguage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("provider model must not be empty")]
    EmptyModel,
    #[error("provider request timeout must be greater than zero")]
    ZeroRequestTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub default_target_language: TargetLanguage,
    #[serde(default)]
    pub summarizer: SummarizerOptions,
    #[serde(default = "default_summary_language")]
    pub summary_language: LanguageCode,
    #[serde(default = "default_summary_min_chars")]
    pub summary_min_chars: usize,
    #[serde(default)]
    pub provider: ProviderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_target_language: TargetLanguage::default(),
            summarizer: SummarizerOptions::default(),
            summary_language: default_summary_language(),
            summary_min_chars: default_summary_min_chars(),
            provider: ProviderSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn summary_rule(&self) -> SummaryRule {
        SummaryRule {
            language: self.summary_language.clone(),
            min_chars: self.summary_min_chars,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_summary_language() -> LanguageCode {
    LanguageCode::new(DEFAULT_SUMMARY_LANGUAGE)
}

fn default_summary_min_chars() -> usize {
    DEFAULT_SUMMARY_MIN_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.default_target_language, TargetLanguage::Es);
        assert_eq!(cfg.summary_min_chars, 150);
        assert_eq!(cfg.provider.request_timeout_secs, 60);
    }

    #[test]
    fn partial_provider_section_keeps_other_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"provider":{"model":"llama3"},"default_target_language":"fr"}"#)
                .unwrap();
        assert_eq!(cfg.provider.model, "llama3");
        assert_eq!(cfg.provider.base_url, "http://localhost:11434/v1");
        assert_eq!(cfg.default_target_language, TargetLanguage::Fr);
    }

    #[test]
    fn validate_rejects_bad_provider_settings() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.validate(), Ok(()));

        cfg.provider.model = "  ".into();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyModel));

        cfg.provider.model = "m".into();
        cfg.provider.request_timeout_secs = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroRequestTimeout));
    }

    #[test]
    fn summary_rule_follows_config() {
        let cfg = AppConfig {
            summary_min_chars: 10,
            ..Default::default()
        };
        let rule = cfg.summary_rule();
        assert_eq!(rule.min_chars, 10);
        assert!(rule.language == "en");
    }
}
