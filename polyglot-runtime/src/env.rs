use polyglot_core::config::AppConfig;
use std::path::PathBuf;

pub const ENV_CONFIG_PATH: &str = "POLYGLOT_CONFIG";
pub const ENV_API_KEY: &str = "POLYGLOT_API_KEY";
pub const ENV_BASE_URL: &str = "POLYGLOT_BASE_URL";
pub const ENV_MODEL: &str = "POLYGLOT_MODEL";

pub const DEFAULT_CONFIG_FILE: &str = "polyglot.json";

/// Process environment settings layered over the config file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub config_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl std::fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("config_path", &self.config_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            config_path: get(ENV_CONFIG_PATH).map(PathBuf::from),
            api_key: get(ENV_API_KEY),
            base_url: get(ENV_BASE_URL),
            model: get(ENV_MODEL),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn api_key(&self) -> String {
        self.api_key.clone().unwrap_or_default()
    }

    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            cfg.provider.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            cfg.provider.model = model.clone();
        }
    }
}
