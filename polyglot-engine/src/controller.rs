use crate::error::ActionError;
use crate::session::{Action, ActionOutcome, Affordances, SessionState, stage_label};
use crate::traits::{
    LanguageDetectorProvider, LanguagePair, SummarizerProvider, TranslatorProvider,
};
use anyhow::{Context, anyhow, bail};
use polyglot_core::config::AppConfig;
use polyglot_core::summary::{SummarizerOptions, SummaryRule};
use polyglot_core::text::{has_content, preview_text};
use polyglot_core::types::{LanguageCode, TargetLanguage};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

const LOG_PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub summarizer: SummarizerOptions,
    pub summary_rule: SummaryRule,
    pub default_target: TargetLanguage,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            summarizer: SummarizerOptions::default(),
            summary_rule: SummaryRule::default(),
            default_target: TargetLanguage::default(),
        }
    }
}

impl From<&AppConfig> for ControllerConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            summarizer: cfg.summarizer,
            summary_rule: cfg.summary_rule(),
            default_target: cfg.default_target_language,
        }
    }
}

struct Inner {
    cfg: ControllerConfig,
    detector: Arc<dyn LanguageDetectorProvider>,
    summarizer: Arc<dyn SummarizerProvider>,
    translator: Arc<dyn TranslatorProvider>,

    // Never held across an `.await`.
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionState>,
}

/// Owns the session state and sequences calls to the capability providers.
///
/// Cloning is cheap and every clone drives the same session. At most one
/// action is in flight at a time; a trigger that arrives while another action
/// is running is ignored and reported as [`ActionOutcome::Busy`].
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    pub fn new(
        cfg: ControllerConfig,
        detector: Arc<dyn LanguageDetectorProvider>,
        summarizer: Arc<dyn SummarizerProvider>,
        translator: Arc<dyn TranslatorProvider>,
    ) -> Self {
        let state = SessionState::new(cfg.default_target);
        let (updates, _) = watch::channel(state.clone());
        log::info!("session {} created", state.session_id);

        Self {
            inner: Arc::new(Inner {
                cfg,
                detector,
                summarizer,
                translator,
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn affordances(&self) -> Affordances {
        self.lock().affordances(&self.inner.cfg.summary_rule)
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.updates.subscribe()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.raw_input = text);
    }

    pub fn set_target_language(&self, target: TargetLanguage) {
        self.update(|s| {
            if s.target_language != target {
                log::info!("target language: {} -> {}", s.target_language, target);
                s.target_language = target;
            }
        });
    }

    /// Submits the current input and detects its language.
    pub async fn send(&self) -> ActionOutcome {
        let begun = self.update(|s| {
            if s.is_busy() {
                return Err(ActionOutcome::Busy);
            }
            if !has_content(&s.raw_input) {
                s.last_error = Some(ActionError::EmptyInput);
                return Err(ActionOutcome::Failed(ActionError::EmptyInput));
            }

            s.last_error = None;
            s.in_flight = Some(Action::Send);
            s.submitted_text = Some(s.raw_input.clone());
            s.detected_language = None;
            s.summary_text = None;
            s.translated_text = None;
            Ok(s.raw_input.clone())
        });
        let text = match begun {
            Ok(text) => text,
            Err(outcome) => return self.not_started(Action::Send, outcome),
        };

        let guard = InFlight::new(self, Action::Send);
        log::debug!(
            "detecting language of {:?}",
            preview_text(&text, LOG_PREVIEW_CHARS)
        );

        match self.detect_language(&text).await {
            Ok(code) => {
                log::info!("detected language: {code}");
                guard.finish(|s| s.detected_language = Some(code));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(guard, ActionError::DetectionFailed, Some(e)),
        }
    }

    /// Summarizes the submitted text when it qualifies; otherwise a no-op.
    pub async fn summarize(&self) -> ActionOutcome {
        let rule = &self.inner.cfg.summary_rule;
        let begun = self.update(|s| {
            if s.is_busy() {
                return Err(ActionOutcome::Busy);
            }
            if !s.can_summarize(rule) {
                return Err(ActionOutcome::Skipped);
            }
            let text = s.submitted_text.clone().unwrap_or_default();

            s.last_error = None;
            s.in_flight = Some(Action::Summarize);
            Ok(text)
        });
        let text = match begun {
            Ok(text) => text,
            Err(outcome) => return self.not_started(Action::Summarize, outcome),
        };

        let guard = InFlight::new(self, Action::Summarize);

        let caps = match self.inner.summarizer.capabilities().await {
            Ok(caps) => caps,
            Err(e) => return self.fail(guard, ActionError::SummarizationFailed, Some(e)),
        };
        if !caps.available.is_usable() {
            log::warn!("summarizer availability: {}", caps.available.as_str());
            return self.fail(guard, ActionError::SummarizerUnavailable, None);
        }

        match self.run_summarizer(&text).await {
            Ok(summary) => {
                log::info!("summary ready ({} chars)", summary.chars().count());
                guard.finish(|s| s.summary_text = Some(summary));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(guard, ActionError::SummarizationFailed, Some(e)),
        }
    }

    /// Translates the submitted text from the detected language into the
    /// selected target language.
    pub async fn translate(&self) -> ActionOutcome {
        let begun = self.update(|s| {
            if s.is_busy() {
                return Err(ActionOutcome::Busy);
            }
            let Some(text) = s.submitted_text.clone() else {
                return Err(ActionOutcome::Skipped);
            };

            s.last_error = None;
            s.in_flight = Some(Action::Translate);
            Ok((text, s.detected_language.clone(), s.target_language))
        });
        let (text, detected, target) = match begun {
            Ok(v) => v,
            Err(outcome) => return self.not_started(Action::Translate, outcome),
        };

        let guard = InFlight::new(self, Action::Translate);

        // Without a detected source there is no pair to ask about.
        let Some(source) = detected else {
            log::warn!("translate requested before a language was detected");
            return self.fail(guard, ActionError::TranslationUnsupportedPair, None);
        };
        let pair = LanguagePair {
            source_language: source,
            target_language: target.language_code(),
        };

        let caps = match self.inner.translator.capabilities().await {
            Ok(caps) => caps,
            Err(e) => return self.fail(guard, ActionError::TranslationFailed, Some(e)),
        };
        let available =
            caps.language_pair_available(&pair.source_language, &pair.target_language);
        if !available.is_usable() {
            log::warn!(
                "language pair {} -> {} not available",
                pair.source_language,
                pair.target_language
            );
            return self.fail(guard, ActionError::TranslationUnsupportedPair, None);
        }

        match self.run_translator(&pair, &text).await {
            Ok(translated) => {
                log::info!(
                    "translated {} -> {}",
                    pair.source_language,
                    pair.target_language
                );
                guard.finish(|s| s.translated_text = Some(translated));
                ActionOutcome::Completed
            }
            Err(e) => self.fail(guard, ActionError::TranslationFailed, Some(e)),
        }
    }

    async fn detect_language(&self, text: &str) -> anyhow::Result<LanguageCode> {
        let detector = self
            .inner
            .detector
            .create()
            .await
            .context("create language detector")?;
        let ranked = detector.detect(text).await.context("detect language")?;
        let best = ranked
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("detector returned no candidates"))?;
        if best.detected_language.is_empty() {
            bail!("detector returned an empty language code");
        }
        Ok(best.detected_language)
    }

    async fn run_summarizer(&self, text: &str) -> anyhow::Result<String> {
        let summarizer = self
            .inner
            .summarizer
            .create(&self.inner.cfg.summarizer)
            .await
            .context("create summarizer")?;
        summarizer.summarize(text).await.context("summarize")
    }

    async fn run_translator(&self, pair: &LanguagePair, text: &str) -> anyhow::Result<String> {
        let translator = self
            .inner
            .translator
            .create(pair)
            .await
            .context("create translator")?;
        translator.translate(text).await.context("translate")
    }

    fn fail(
        &self,
        guard: InFlight<'_>,
        error: ActionError,
        cause: Option<anyhow::Error>,
    ) -> ActionOutcome {
        match cause {
            Some(cause) => log::error!("{} failed: {error} ({cause:#})", guard.action.label()),
            None => log::warn!("{} failed: {error}", guard.action.label()),
        }
        guard.finish(|s| s.last_error = Some(error));
        ActionOutcome::Failed(error)
    }

    fn not_started(&self, action: Action, outcome: ActionOutcome) -> ActionOutcome {
        match outcome {
            ActionOutcome::Busy => {
                log::debug!("{} ignored: another action is in flight", action.label())
            }
            ActionOutcome::Skipped => {
                log::debug!("{} skipped: preconditions not met", action.label())
            }
            ActionOutcome::Failed(e) => log::warn!("{} rejected: {e}", action.label()),
            ActionOutcome::Completed => {}
        }
        outcome
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.lock();
        let prev = state.stage();
        let out = f(&mut state);

        let next = state.stage();
        if prev != next {
            log::info!("session stage: {} -> {}", stage_label(prev), stage_label(next));
        }

        // Publish under the lock so subscribers never observe updates out of order.
        self.inner.updates.send_replace(state.clone());
        out
    }
}

/// Marks an action as in flight and releases it on every exit path,
/// including when the action's future is dropped before it settles.
struct InFlight<'a> {
    controller: &'a SessionController,
    action: Action,
    released: bool,
}

impl<'a> InFlight<'a> {
    fn new(controller: &'a SessionController, action: Action) -> Self {
        Self {
            controller,
            action,
            released: false,
        }
    }

    fn finish(mut self, f: impl FnOnce(&mut SessionState)) {
        self.released = true;
        let action = self.action;
        self.controller.update(|s| {
            f(s);
            release(s, action);
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        log::warn!("{} abandoned before completion", self.action.label());
        let action = self.action;
        self.controller.update(|s| release(s, action));
    }
}

fn release(state: &mut SessionState, action: Action) {
    if state.in_flight == Some(action) {
        state.in_flight = None;
    }
}
