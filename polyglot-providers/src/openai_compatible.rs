use crate::request::HttpRequest;
use serde_json::json;

// Low temperature keeps detection and translation replies terse and stable.
const TEMPERATURE: f32 = 0.2;

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiCompatibleChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for OpenAiCompatibleChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleChatConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

pub fn build_chat_completions_request(
    cfg: &OpenAiCompatibleChatConfig,
    messages: &[ChatMessage],
) -> HttpRequest {
    let url = join_url(&cfg.base_url, "/chat/completions");

    let payload = json!({
        "model": cfg.model,
        "messages": messages.iter().map(|m| json!({"role": m.role, "content": m.content})).collect::<Vec<_>>(),
        "temperature": TEMPERATURE,
    });

    // Local servers (Ollama, llama.cpp) accept unauthenticated requests.
    HttpRequest::post_json(url, &payload).with_bearer(&cfg.api_key)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(api_key: &str) -> OpenAiCompatibleChatConfig {
        OpenAiCompatibleChatConfig {
            base_url: "https://api.example.com/v1/".into(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".into(),
        }
    }

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("https://api.example.com/", "/chat/completions"),
            "https://api.example.com/chat/completions"
        );
        assert_eq!(
            join_url("https://api.example.com", "chat/completions"),
            "https://api.example.com/chat/completions"
        );
    }

    #[test]
    fn builds_authorized_json_request() {
        let req = build_chat_completions_request(
            &cfg("k"),
            &[ChatMessage::system("be brief"), ChatMessage::user("hi")],
        );

        assert_eq!(req.url, "https://api.example.com/v1/chat/completions");
        assert_eq!(req.header("authorization"), Some("Bearer k"));
        let v: serde_json::Value = serde_json::from_str(&req.json_body).unwrap();
        assert_eq!(v["model"], "gpt-4o-mini");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "hi");
    }

    #[test]
    fn omits_authorization_without_key() {
        let req = build_chat_completions_request(&cfg("  "), &[ChatMessage::user("hi")]);
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn debug_redacts_api_key() {
        let s = format!("{:?}", cfg("sk-live-42"));
        assert!(!s.contains("sk-live-42"));
        assert!(s.contains("[REDACTED]"));
    }
}
