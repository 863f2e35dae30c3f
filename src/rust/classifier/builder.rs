use std::collections::BTreeSet;

use log::info;

use super::classifier::Classifier;
use super::embedding::TfidfVectorizer;
use super::error::ClassifierError;
use super::model::FeedForwardNetwork;
use crate::config::{TrainingConfig, VectorizerConfig};

/// One training pair: a text and the label it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub text: String,
    pub label: String,
}

impl LabeledExample {
    /// Creates a new labeled example
    ///
    /// # Example
    /// ```
    /// use triage::LabeledExample;
    ///
    /// let example = LabeledExample::new("broken street light", "Electricity");
    /// assert_eq!(example.label, "Electricity");
    /// ```
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// A builder for training a Classifier with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    name: Option<String>,
    examples: Vec<LabeledExample>,
    vectorizer_config: VectorizerConfig,
    training_config: TrainingConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder with default configuration
    ///
    /// # Example
    /// ```
    /// use triage::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the classifier in log output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets how text is turned into features
    pub fn with_vectorizer_config(mut self, config: VectorizerConfig) -> Self {
        self.vectorizer_config = config;
        self
    }

    /// Sets the network shape and optimiser settings
    pub fn with_training_config(mut self, config: TrainingConfig) -> Self {
        self.training_config = config;
        self
    }

    /// Adds one training example
    ///
    /// # Errors
    /// - `ValidationError` if the text or label is empty or only whitespace
    pub fn add_example(mut self, example: LabeledExample) -> Result<Self, ClassifierError> {
        if example.label.trim().is_empty() {
            return Err(ClassifierError::ValidationError("Label cannot be empty".into()));
        }
        if example.text.trim().is_empty() {
            return Err(ClassifierError::ValidationError(format!(
                "Example text for label '{}' cannot be empty",
                example.label
            )));
        }
        self.examples.push(example);
        Ok(self)
    }

    /// Adds several training examples, stopping at the first invalid one
    pub fn add_examples<I>(self, examples: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = LabeledExample>,
    {
        examples
            .into_iter()
            .try_fold(self, |builder, example| builder.add_example(example))
    }

    /// Fits the vectorizer and trains the network
    ///
    /// # Errors
    /// - `BuildError` if there are no examples
    /// - `BuildError` if the examples span fewer than two distinct labels
    /// - `BuildError` if the examples yield an empty vocabulary
    /// - `ValidationError` if either configuration is invalid
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let name = self.name.as_deref().unwrap_or("classifier");
        if self.examples.is_empty() {
            return Err(ClassifierError::BuildError(format!(
                "{}: no training examples",
                name
            )));
        }

        let labels: Vec<String> = self
            .examples
            .iter()
            .map(|e| e.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Err(ClassifierError::BuildError(format!(
                "{}: at least 2 distinct labels are required, got {}",
                name,
                labels.len()
            )));
        }
        self.training_config.validate()?;

        let texts: Vec<&str> = self.examples.iter().map(|e| e.text.as_str()).collect();
        let targets: Vec<usize> = self
            .examples
            .iter()
            .filter_map(|e| labels.binary_search(&e.label).ok())
            .collect();

        let vectorizer = TfidfVectorizer::fit(&texts, self.vectorizer_config)?;
        let features = vectorizer.transform_batch(&texts);
        let (network, training) =
            FeedForwardNetwork::fit(&features, &targets, labels.len(), &self.training_config)?;

        info!(
            "{} trained: {} examples, {} labels, {} features, {} epochs (converged: {})",
            name,
            texts.len(),
            labels.len(),
            vectorizer.vocabulary_size(),
            training.iterations,
            training.converged
        );

        Ok(Classifier::from_trained(labels, vectorizer, network, training))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_example_validation() {
        let result = ClassifierBuilder::new().add_example(LabeledExample::new("text", " "));
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));

        let result = ClassifierBuilder::new().add_example(LabeledExample::new("", "label"));
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_build_requires_two_labels() {
        let result = ClassifierBuilder::new()
            .add_examples(vec![
                LabeledExample::new("pothole on the road", "Roads"),
                LabeledExample::new("uneven road surface", "Roads"),
            ])
            .and_then(ClassifierBuilder::build);
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_build_requires_examples() {
        let result = ClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }
}
