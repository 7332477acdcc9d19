use anyhow::Context;
use polyglot_core::config::AppConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<AppConfig> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        Ok(cfg)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(&self) -> anyhow::Result<AppConfig> {
        if !self.path.exists() {
            log::info!("no config at {}; using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        self.load()
    }

    /// Re-reads the file, applies `f` and writes the result back. Settings
    /// that only live in memory (env overrides) are never persisted.
    pub fn update(&self, f: impl FnOnce(&mut AppConfig)) -> anyhow::Result<AppConfig> {
        let mut cfg = self.load_or_default()?;
        f(&mut cfg);
        self.save(&cfg)?;
        Ok(cfg)
    }

    pub fn save(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        crate::files::write_replacing(&self.path, &json)
            .with_context(|| format!("save config: {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_core::summary::SummaryLength;
    use polyglot_core::types::TargetLanguage;

    #[test]
    fn round_trips_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("polyglot.json"));

        let mut cfg = AppConfig::default();
        cfg.default_target_language = TargetLanguage::Pt;
        cfg.summarizer.length = SummaryLength::Short;
        cfg.provider.model = "llama3.1".into();

        store.save(&cfg).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("absent.json"));

        assert!(store.load().is_err());
        assert_eq!(store.load_or_default().unwrap(), AppConfig::default());
    }

    #[test]
    fn update_changes_only_the_edited_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("nested").join("polyglot.json"));

        let mut cfg = AppConfig::default();
        cfg.provider.model = "llama3.1".into();
        store.save(&cfg).unwrap();

        let updated = store
            .update(|c| c.default_target_language = TargetLanguage::Fr)
            .unwrap();
        assert_eq!(updated.default_target_language, TargetLanguage::Fr);
        assert_eq!(updated.provider.model, "llama3.1");
        assert_eq!(store.load().unwrap(), updated);
    }

    #[test]
    fn update_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("polyglot.json"));

        store
            .update(|c| c.default_target_language = TargetLanguage::Ru)
            .unwrap();
        assert_eq!(
            store.load().unwrap().default_target_language,
            TargetLanguage::Ru
        );
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polyglot.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = ConfigStore::at_path(path).load_or_default().unwrap_err();
        assert!(format!("{err:#}").contains("decode config JSON"));
    }
}
