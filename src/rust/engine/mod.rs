//! The composition root: three classifiers, the confidence gate and the
//! reply selector, assembled once and shared read-only.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ClassifierError};
use crate::config::{TrainingConfig, VectorizerConfig};

pub mod corpus;
mod gate;
mod responses;

pub use gate::{ConfidenceGate, GateDecision, DEFAULT_CONFIDENCE_THRESHOLD, FALLBACK_EMOTION};
pub use responses::{ReplySource, ResponseCatalog, ResponseSelector, SeededReplySource, ThreadRngSource};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("Response catalog mismatch: {0}")]
    CatalogMismatch(String),
    #[error("Confidence threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f32),
}

/// Category and severity of a complaint report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportClassification {
    pub category: String,
    pub severity: String,
}

/// The reply to a chat message and the emotion it was chosen for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub emotion: String,
    /// Probability of the top predicted emotion, even when it was demoted
    pub confidence: f32,
}

/// Settings for assembling an [`IntelEngine`] from the built-in corpora.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub report_vectorizer: VectorizerConfig,
    pub report_training: TrainingConfig,
    pub emotion_vectorizer: VectorizerConfig,
    pub emotion_training: TrainingConfig,
    pub confidence_threshold: f32,
    /// Seed for reply selection; `None` draws from the thread RNG
    pub reply_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            report_vectorizer: VectorizerConfig::report(),
            report_training: TrainingConfig::report(),
            emotion_vectorizer: VectorizerConfig::emotion(),
            emotion_training: TrainingConfig::emotion(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            reply_seed: None,
        }
    }
}

/// Classifies complaint reports and answers chat messages.
#[derive(Debug, Clone)]
pub struct IntelEngine {
    category: Classifier,
    severity: Classifier,
    emotion: Classifier,
    gate: ConfidenceGate,
    selector: ResponseSelector,
}

impl IntelEngine {
    /// Trains every classifier on the built-in corpora.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        check_threshold(config.confidence_threshold)?;
        info!("Training classifiers on the built-in corpora");

        // Category and severity each fit their own vectorizer.
        let category = Classifier::builder()
            .with_name("category")
            .with_vectorizer_config(config.report_vectorizer.clone())
            .with_training_config(config.report_training.clone())
            .add_examples(corpus::category_examples())?
            .build()?;
        let severity = Classifier::builder()
            .with_name("severity")
            .with_vectorizer_config(config.report_vectorizer)
            .with_training_config(config.report_training)
            .add_examples(corpus::severity_examples())?
            .build()?;
        let emotion = Classifier::builder()
            .with_name("emotion")
            .with_vectorizer_config(config.emotion_vectorizer)
            .with_training_config(config.emotion_training)
            .add_examples(corpus::emotion_examples())?
            .build()?;

        let source: Arc<dyn ReplySource> = match config.reply_seed {
            Some(seed) => Arc::new(SeededReplySource::new(seed)),
            None => Arc::new(ThreadRngSource),
        };

        Self::from_parts(
            category,
            severity,
            emotion,
            ConfidenceGate::with_threshold(config.confidence_threshold),
            ResponseSelector::new(ResponseCatalog::tactical(), source),
        )
    }

    /// Assembles an engine from already trained parts.
    ///
    /// # Errors
    /// `CatalogMismatch` unless the emotion labels and the catalog keys are
    /// the same set, every entry has at least one reply, and the fallback
    /// label is among them. `InvalidThreshold` if the gate threshold is not
    /// a finite value in `[0, 1]`.
    pub fn from_parts(
        category: Classifier,
        severity: Classifier,
        emotion: Classifier,
        gate: ConfidenceGate,
        selector: ResponseSelector,
    ) -> Result<Self, EngineError> {
        check_threshold(gate.threshold())?;
        check_catalog(&emotion, selector.catalog())?;
        info!(
            "Engine ready: {} categories, {} severities, {} emotions, confidence threshold {}",
            category.labels().len(),
            severity.labels().len(),
            emotion.labels().len(),
            gate.threshold()
        );
        Ok(Self {
            category,
            severity,
            emotion,
            gate,
            selector,
        })
    }

    /// Predicts the category and severity of a complaint report.
    pub fn classify_report(&self, description: &str) -> ReportClassification {
        let text = description.to_lowercase();
        ReportClassification {
            category: self.category.predict(&text),
            severity: self.severity.predict(&text),
        }
    }

    /// Detects the tone of a chat message and picks a reply for it.
    pub fn respond_to_chat(&self, message: &str) -> ChatReply {
        let text = message.to_lowercase();
        let probabilities = self.emotion.predict_probabilities(&text);
        let decision = self.gate.gate(&probabilities);
        if decision.demoted {
            debug!(
                "Demoted {} (confidence {:.3}) to {}",
                probabilities.top().0,
                decision.confidence,
                decision.label
            );
        }
        ChatReply {
            reply: self.selector.select_reply(&decision.label).to_string(),
            emotion: decision.label,
            confidence: decision.confidence,
        }
    }

    pub fn category_classifier(&self) -> &Classifier {
        &self.category
    }

    pub fn severity_classifier(&self) -> &Classifier {
        &self.severity
    }

    pub fn emotion_classifier(&self) -> &Classifier {
        &self.emotion
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        self.selector.catalog()
    }
}

fn check_threshold(threshold: f32) -> Result<(), EngineError> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(EngineError::InvalidThreshold(threshold))
    }
}

fn check_catalog(emotion: &Classifier, catalog: &ResponseCatalog) -> Result<(), EngineError> {
    let emotions: BTreeSet<&str> = emotion.labels().iter().map(String::as_str).collect();
    let keys: BTreeSet<&str> = catalog.labels().collect();
    if emotions != keys {
        return Err(EngineError::CatalogMismatch(format!(
            "emotion labels {:?} differ from catalog keys {:?}",
            emotions, keys
        )));
    }
    if let Some(empty) = keys
        .iter()
        .find(|label| catalog.replies(label).map_or(true, <[String]>::is_empty))
    {
        return Err(EngineError::CatalogMismatch(format!(
            "no replies for emotion '{}'",
            empty
        )));
    }
    if !keys.contains(FALLBACK_EMOTION) {
        return Err(EngineError::CatalogMismatch(format!(
            "fallback emotion '{}' is missing",
            FALLBACK_EMOTION
        )));
    }
    Ok(())
}
