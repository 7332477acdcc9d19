use async_trait::async_trait;
use polyglot_core::availability::Availability;
use polyglot_core::summary::SummarizerOptions;
use polyglot_core::types::LanguageCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    pub detected_language: LanguageCode,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizerCapabilities {
    pub available: Availability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

// Detector: `create()` fails when the capability is absent on the host.
#[async_trait]
pub trait LanguageDetectorProvider: Send + Sync {
    async fn create(&self) -> anyhow::Result<Box<dyn LanguageDetector>>;
}

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Candidates ordered best-first.
    async fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedLanguage>>;
}

#[async_trait]
pub trait SummarizerProvider: Send + Sync {
    async fn capabilities(&self) -> anyhow::Result<SummarizerCapabilities>;
    async fn create(&self, options: &SummarizerOptions) -> anyhow::Result<Box<dyn Summarizer>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

pub trait TranslatorCapabilities: Send + Sync {
    fn language_pair_available(&self, source: &LanguageCode, target: &LanguageCode)
    -> Availability;
}

#[async_trait]
pub trait TranslatorProvider: Send + Sync {
    async fn capabilities(&self) -> anyhow::Result<Box<dyn TranslatorCapabilities>>;
    async fn create(&self, pair: &LanguagePair) -> anyhow::Result<Box<dyn Translator>>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> anyhow::Result<String>;
}
