use crate::classifier::ClassProbabilities;

/// Label every weak prediction falls back to.
pub const FALLBACK_EMOTION: &str = "NEUTRAL";

/// Default minimum top probability needed to keep a predicted emotion.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Demotes low-confidence emotion predictions to [`FALLBACK_EMOTION`].
///
/// A prediction is kept only when its probability is strictly greater than
/// the threshold, so a message the model is unsure about gets a neutral
/// reply instead of an emotionally charged one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f32,
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Result of passing a probability vector through the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    /// The label to act on
    pub label: String,
    /// Probability of the top predicted label, kept even when demoted
    pub confidence: f32,
    /// `true` when the top label was replaced by the fallback
    pub demoted: bool,
}

impl ConfidenceGate {
    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Picks the final label from `probabilities`.
    ///
    /// Ties at the maximum resolve to the label that sorts first.
    pub fn gate(&self, probabilities: &ClassProbabilities) -> GateDecision {
        let (top, confidence) = probabilities.top();
        if confidence > self.threshold {
            GateDecision {
                label: top.to_string(),
                confidence,
                demoted: false,
            }
        } else {
            GateDecision {
                label: FALLBACK_EMOTION.to_string(),
                confidence,
                demoted: top != FALLBACK_EMOTION,
            }
        }
    }
}
