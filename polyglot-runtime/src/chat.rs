//! Capability host backed by an OpenAI-compatible chat-completions endpoint.
//!
//! The model does the actual detection, summarization and translation; this
//! module only phrases the requests and interprets the replies.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use polyglot_core::availability::Availability;
use polyglot_core::config::ProviderSettings;
use polyglot_core::summary::{SummarizerOptions, SummaryFormat, SummaryLength, SummaryType};
use polyglot_core::types::{LanguageCode, TargetLanguage};
use polyglot_engine::traits::{
    DetectedLanguage, LanguageDetector, LanguageDetectorProvider, LanguagePair, Summarizer,
    SummarizerCapabilities, SummarizerProvider, Translator, TranslatorCapabilities,
    TranslatorProvider,
};
use polyglot_providers::openai_compatible::{
    ChatMessage, OpenAiCompatibleChatConfig, build_chat_completions_request,
};
use polyglot_providers::parse::{parse_language_code, parse_openai_chat_completion};
use polyglot_providers::runtime::{self, HttpTimeouts};

const DETECT_SYSTEM_PROMPT: &str = "Identify the language of the user's text. \
Reply with its ISO 639-1 code only (for example: en). No other words.";

// `OpenAiCompatibleChatConfig` redacts the API key in its `Debug` output.
#[derive(Debug, Clone)]
pub struct ChatBackend {
    chat: OpenAiCompatibleChatConfig,
    timeouts: HttpTimeouts,
}

impl ChatBackend {
    pub fn from_settings(settings: &ProviderSettings, api_key: impl Into<String>) -> Self {
        Self {
            chat: OpenAiCompatibleChatConfig {
                base_url: settings.base_url.clone(),
                api_key: api_key.into(),
                model: settings.model.clone(),
            },
            timeouts: HttpTimeouts {
                connect: Duration::from_secs(settings.connect_timeout_secs),
                request: Duration::from_secs(settings.request_timeout_secs),
            },
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.chat.base_url.trim().is_empty()
    }

    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
        if !self.is_configured() {
            bail!("no chat endpoint configured");
        }

        let req = build_chat_completions_request(
            &self.chat,
            &[ChatMessage::system(system), ChatMessage::user(user)],
        );
        let resp = runtime::execute(&req, self.timeouts)
            .await?
            .ensure_success("chat completion")?;
        let text = parse_openai_chat_completion(&resp.body)?;
        Ok(text.trim().to_string())
    }
}

/// Implements all three capability providers on one backend.
#[derive(Debug, Clone)]
pub struct ChatHost {
    backend: Arc<ChatBackend>,
}

impl ChatHost {
    pub fn new(backend: ChatBackend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

#[async_trait::async_trait]
impl LanguageDetectorProvider for ChatHost {
    async fn create(&self) -> anyhow::Result<Box<dyn LanguageDetector>> {
        if !self.backend.is_configured() {
            bail!("language detection unavailable: no chat endpoint configured");
        }
        Ok(Box::new(ChatDetector {
            backend: self.backend.clone(),
        }))
    }
}

#[async_trait::async_trait]
impl SummarizerProvider for ChatHost {
    async fn capabilities(&self) -> anyhow::Result<SummarizerCapabilities> {
        let available = if self.backend.is_configured() {
            Availability::Readily
        } else {
            Availability::No
        };
        Ok(SummarizerCapabilities { available })
    }

    async fn create(&self, options: &SummarizerOptions) -> anyhow::Result<Box<dyn Summarizer>> {
        Ok(Box::new(ChatSummarizer {
            backend: self.backend.clone(),
            system_prompt: summary_instructions(options),
        }))
    }
}

#[async_trait::async_trait]
impl TranslatorProvider for ChatHost {
    async fn capabilities(&self) -> anyhow::Result<Box<dyn TranslatorCapabilities>> {
        Ok(Box::new(ChatLanguagePairs {
            backend: self.backend.clone(),
        }))
    }

    async fn create(&self, pair: &LanguagePair) -> anyhow::Result<Box<dyn Translator>> {
        Ok(Box::new(ChatTranslator {
            backend: self.backend.clone(),
            system_prompt: translation_instructions(pair),
        }))
    }
}

struct ChatDetector {
    backend: Arc<ChatBackend>,
}

#[async_trait::async_trait]
impl LanguageDetector for ChatDetector {
    async fn detect(&self, text: &str) -> anyhow::Result<Vec<DetectedLanguage>> {
        let reply = self.backend.complete(DETECT_SYSTEM_PROMPT, text).await?;
        let code = parse_language_code(&reply).context("interpret detection reply")?;
        // The model gives a single answer and no score.
        Ok(vec![DetectedLanguage {
            detected_language: code,
            confidence: 1.0,
        }])
    }
}

struct ChatSummarizer {
    backend: Arc<ChatBackend>,
    system_prompt: String,
}

#[async_trait::async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        self.backend.complete(&self.system_prompt, text).await
    }
}

struct ChatLanguagePairs {
    backend: Arc<ChatBackend>,
}

impl TranslatorCapabilities for ChatLanguagePairs {
    fn language_pair_available(
        &self,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Availability {
        if !self.backend.is_configured() {
            return Availability::No;
        }
        // The model translates from any language; only same-language pairs are refused.
        match (primary_subtag(source), primary_subtag(target)) {
            (Some(src), Some(dst)) if src != dst => Availability::Readily,
            _ => Availability::No,
        }
    }
}

struct ChatTranslator {
    backend: Arc<ChatBackend>,
    system_prompt: String,
}

#[async_trait::async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, text: &str) -> anyhow::Result<String> {
        self.backend.complete(&self.system_prompt, text).await
    }
}

/// Primary subtag of a well-formed code (`pt-br` -> `pt`).
fn primary_subtag(code: &LanguageCode) -> Option<&str> {
    let primary = code.as_str().split('-').next()?;
    let well_formed =
        (2..=3).contains(&primary.len()) && primary.bytes().all(|b| b.is_ascii_lowercase());
    well_formed.then_some(primary)
}

fn language_name(code: &LanguageCode) -> String {
    TargetLanguage::from_code(code.as_str())
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn summary_instructions(options: &SummarizerOptions) -> String {
    let shape = match options.kind {
        SummaryType::KeyPoints => "the key points of the text as a bulleted list",
        SummaryType::Tldr => "a short overview of the text",
        SummaryType::Teaser => "an intriguing teaser for the text",
        SummaryType::Headline => "a single headline for the text",
    };
    let length = match options.length {
        SummaryLength::Short => "Keep it short (about 3 bullets or one sentence).",
        SummaryLength::Medium => "Keep it medium length (about 5 bullets or a few sentences).",
        SummaryLength::Long => "It may be long (about 7 bullets or a paragraph).",
    };
    let format = match options.format {
        SummaryFormat::Markdown => "Format the answer as Markdown.",
        SummaryFormat::PlainText => "Use plain text without any Markdown.",
    };
    format!("Summarize the user's text. Produce {shape}. {length} {format} Reply with the summary only.")
}

pub fn translation_instructions(pair: &LanguagePair) -> String {
    format!(
        "Translate the user's text from {} to {}. Reply with the translation only.",
        language_name(&pair.source_language),
        language_name(&pair.target_language)
    )
}
