use anyhow::{Context, anyhow};
use polyglot_core::types::LanguageCode;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

pub fn parse_openai_chat_completion(body: &[u8]) -> anyhow::Result<String> {
    let resp: OpenAiChatResponse = serde_json::from_slice(body).context("decode chat JSON")?;
    let content = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no content in chat completion response"))?;
    Ok(content)
}

fn bare_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,4})?$").expect("valid bare code regex")
    })
}

fn quoted_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Chatty models wrap the code: `fr`, "fr", (fr), [fr].
        Regex::new(r#"[`"'(\[]([A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,4})?)[`"')\]]"#)
            .expect("valid quoted code regex")
    })
}

/// Extracts a language code from a model reply that was asked to answer
/// with the code only.
pub fn parse_language_code(reply: &str) -> anyhow::Result<LanguageCode> {
    let trimmed = reply
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '*'))
        .trim();

    let raw = if bare_code_re().is_match(trimmed) {
        trimmed
    } else {
        quoted_code_re()
            .captures(reply)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("no language code in reply: {trimmed:?}"))?
    };

    Ok(LanguageCode::new(raw.replace('_', "-")))
}
