use std::collections::HashMap;
use std::sync::Arc;

use super::embedding::TfidfVectorizer;
use super::model::{FeedForwardNetwork, TrainingSummary};
use super::utils::argmax;

/// A thread-safe text classifier: TF-IDF features fed to a feed-forward network.
///
/// A classifier is trained once by its builder and never changes afterwards.
/// Prediction is total: every string, including the empty string, maps to
/// one of the labels it was trained on.
///
/// # Thread Safety
///
/// This type is `Send + Sync`; wrap it in an `Arc` to share it across threads.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use triage::{Classifier, LabeledExample};
///
/// let classifier = Classifier::builder()
///     .add_examples(vec![
///         LabeledExample::new("pothole on the main road", "Roads"),
///         LabeledExample::new("broken street light", "Electricity"),
///     ])?
///     .build()?;
///
/// let label = classifier.predict("another pothole");
/// assert!(classifier.labels().contains(&label));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    labels: Arc<[String]>,
    vectorizer: Arc<TfidfVectorizer>,
    network: Arc<FeedForwardNetwork>,
    training: TrainingSummary,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    pub(crate) fn from_trained(
        labels: Vec<String>,
        vectorizer: TfidfVectorizer,
        network: FeedForwardNetwork,
        training: TrainingSummary,
    ) -> Self {
        Self {
            labels: labels.into(),
            vectorizer: Arc::new(vectorizer),
            network: Arc::new(network),
            training,
        }
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            num_classes: self.labels.len(),
            class_labels: self.labels.to_vec(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            hidden_layers: self.network.hidden_layers(),
            training: self.training.clone(),
        }
    }

    /// The closed label set, sorted.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the most probable label for `text`.
    ///
    /// Ties resolve to the label that sorts first.
    pub fn predict(&self, text: &str) -> String {
        self.predict_probabilities(text).top().0.to_string()
    }

    /// Returns the probability of every label for `text`.
    ///
    /// A text that shares no term with the training vocabulary is scored
    /// from the zero vector.
    pub fn predict_probabilities(&self, text: &str) -> ClassProbabilities {
        let features = self.vectorizer.transform(text);
        let values = self.network.predict_proba(&features).to_vec();
        ClassProbabilities {
            labels: Arc::clone(&self.labels),
            values,
        }
    }
}

/// Per-class probabilities in the classifier's sorted label order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    labels: Arc<[String]>,
    values: Vec<f32>,
}

impl ClassProbabilities {
    /// Pairs `labels` with `values`. Returns `None` if the lengths differ or
    /// there are no labels.
    pub fn new(labels: Vec<String>, values: Vec<f32>) -> Option<Self> {
        if labels.is_empty() || labels.len() != values.len() {
            return None;
        }
        Some(Self {
            labels: labels.into(),
            values,
        })
    }

    /// The most probable label and its probability. Ties resolve to the
    /// earliest label.
    pub fn top(&self) -> (&str, f32) {
        let index = argmax(&self.values).unwrap_or(0);
        (self.labels[index].as_str(), self.values[index])
    }

    pub fn get(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|index| self.values[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn to_map(&self) -> HashMap<String, f32> {
        self.iter().map(|(label, p)| (label.to_string(), p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["ANGRY", "HELPFUL", "NEUTRAL", "WORRIED"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_top_breaks_ties_to_first_label() {
        let probabilities = ClassProbabilities::new(labels(), vec![0.1, 0.4, 0.4, 0.1]).unwrap();
        assert_eq!(probabilities.top(), ("HELPFUL", 0.4));
    }

    #[test]
    fn test_lookup_and_map() {
        let probabilities = ClassProbabilities::new(labels(), vec![0.7, 0.1, 0.1, 0.1]).unwrap();
        assert_eq!(probabilities.get("ANGRY"), Some(0.7));
        assert_eq!(probabilities.get("CALM"), None);
        assert_eq!(probabilities.to_map().len(), 4);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(ClassProbabilities::new(labels(), vec![1.0]).is_none());
        assert!(ClassProbabilities::new(vec![], vec![]).is_none());
    }
}
