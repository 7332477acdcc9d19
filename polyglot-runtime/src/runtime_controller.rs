use std::sync::Arc;

use anyhow::Context;
use polyglot_core::config::AppConfig;
use polyglot_engine::controller::{ControllerConfig, SessionController};

use crate::chat::{ChatBackend, ChatHost};

/// Build a ready session controller from config, with the chat endpoint
/// serving all three capabilities.
///
/// This keeps the front end thin.
pub fn build_controller_from_config(
    cfg: &AppConfig,
    api_key: impl Into<String>,
) -> anyhow::Result<SessionController> {
    cfg.validate().context("invalid config")?;

    let host = Arc::new(ChatHost::new(ChatBackend::from_settings(
        &cfg.provider,
        api_key,
    )));
    log::info!(
        "using chat endpoint {} (model {})",
        cfg.provider.base_url,
        cfg.provider.model
    );

    Ok(SessionController::new(
        ControllerConfig::from(cfg),
        host.clone(),
        host.clone(),
        host,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_core::types::{LanguageCode, TargetLanguage};
    use polyglot_engine::error::ActionError;
    use polyglot_engine::session::ActionOutcome;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": content}}]
        }))
    }

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.provider.request_timeout_secs = 0;
        assert!(build_controller_from_config(&cfg, "").is_err());
    }

    #[tokio::test]
    async fn session_runs_end_to_end_against_chat_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("ISO 639-1"))
            .respond_with(reply("en"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("to Portuguese"))
            .respond_with(reply("Olá mundo"))
            .mount(&server)
            .await;

        let mut cfg = AppConfig::default();
        cfg.provider.base_url = server.uri();
        cfg.default_target_language = TargetLanguage::Pt;

        let controller = build_controller_from_config(&cfg, "k").unwrap();
        controller.set_input("Hello world");
        assert_eq!(controller.send().await, ActionOutcome::Completed);
        assert_eq!(
            controller.snapshot().detected_language,
            Some(LanguageCode::new("en"))
        );

        assert_eq!(controller.translate().await, ActionOutcome::Completed);
        assert_eq!(
            controller.snapshot().translated_text.as_deref(),
            Some("Olá mundo")
        );

        // Same source and target is not a supported pair.
        controller.set_target_language(TargetLanguage::En);
        assert_eq!(
            controller.translate().await,
            ActionOutcome::Failed(ActionError::TranslationUnsupportedPair)
        );
    }

    #[tokio::test]
    async fn translates_from_languages_outside_target_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("ISO 639-1"))
            .respond_with(reply("de"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("from de to Spanish"))
            .respond_with(reply("Hola mundo"))
            .expect(1)
            .mount(&server)
            .await;

        let mut cfg = AppConfig::default();
        cfg.provider.base_url = server.uri();

        let controller = build_controller_from_config(&cfg, "").unwrap();
        controller.set_input("Hallo Welt");
        assert_eq!(controller.send().await, ActionOutcome::Completed);
        assert_eq!(controller.snapshot().target_language, TargetLanguage::Es);

        assert_eq!(controller.translate().await, ActionOutcome::Completed);
        let state = controller.snapshot();
        assert_eq!(state.translated_text.as_deref(), Some("Hola mundo"));
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn endpoint_failure_becomes_detection_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let mut cfg = AppConfig::default();
        cfg.provider.base_url = server.uri();

        let controller = build_controller_from_config(&cfg, "").unwrap();
        controller.set_input("Hello world");
        assert_eq!(
            controller.send().await,
            ActionOutcome::Failed(ActionError::DetectionFailed)
        );
        assert!(!controller.snapshot().is_busy());
    }
}
