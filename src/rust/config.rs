use crate::classifier::ClassifierError;

/// Settings for the TF-IDF text vectorizer.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    /// Inclusive `(min_n, max_n)` range of word n-grams to extract
    pub ngram_range: (usize, usize),
    /// Drop English stopwords before n-grams are formed
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            stop_words: false,
        }
    }
}

impl VectorizerConfig {
    /// Unigrams and bigrams with English stopwords removed, used for complaint reports.
    pub fn report() -> Self {
        Self {
            ngram_range: (1, 2),
            stop_words: true,
        }
    }

    /// Unigrams and bigrams with every word kept.
    ///
    /// Negations and intensifiers carry most of the tone of a chat message,
    /// so nothing is filtered.
    pub fn emotion() -> Self {
        Self::default()
    }

    pub(crate) fn validate(&self) -> Result<(), ClassifierError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::ValidationError(format!(
                "Invalid n-gram range ({}, {})",
                min_n, max_n
            )));
        }
        Ok(())
    }
}

/// Settings for training the feed-forward network behind a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Sizes of the hidden ReLU layers, input side first
    pub hidden_layers: Vec<usize>,
    /// Upper bound on full-batch training epochs
    pub max_iter: usize,
    /// Seed for weight initialisation
    pub seed: u64,
    pub learning_rate: f32,
    /// L2 penalty strength
    pub alpha: f32,
    /// Minimum loss improvement that resets the no-change counter
    pub tol: f32,
    /// Epochs without `tol` improvement tolerated before stopping
    pub n_iter_no_change: usize,
    /// Give every layer a bias term. Without one, a text with no known
    /// term scores every class equally.
    pub intercept: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![100],
            max_iter: 200,
            seed: 42,
            learning_rate: 1e-3,
            alpha: 1e-4,
            tol: 1e-4,
            n_iter_no_change: 10,
            intercept: true,
        }
    }
}

impl TrainingConfig {
    /// Two hidden layers of 50 and 25 units, up to 1000 epochs.
    pub fn report() -> Self {
        Self {
            hidden_layers: vec![50, 25],
            max_iter: 1000,
            ..Self::default()
        }
    }

    /// Two hidden layers of 30 and 15 units, up to 1000 epochs, no bias terms.
    ///
    /// A message sharing no word with the training corpus then gets a flat
    /// distribution, which the confidence gate turns into NEUTRAL.
    pub fn emotion() -> Self {
        Self {
            hidden_layers: vec![30, 15],
            max_iter: 1000,
            intercept: false,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ClassifierError> {
        if self.hidden_layers.iter().any(|&size| size == 0) {
            return Err(ClassifierError::ValidationError(
                "Hidden layer sizes must be positive".into(),
            ));
        }
        if self.max_iter == 0 {
            return Err(ClassifierError::ValidationError(
                "max_iter must be at least 1".into(),
            ));
        }
        if !(self.learning_rate > 0.0) || !self.learning_rate.is_finite() {
            return Err(ClassifierError::ValidationError(format!(
                "Learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.alpha < 0.0 || self.tol < 0.0 {
            return Err(ClassifierError::ValidationError(
                "alpha and tol must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(TrainingConfig::report().hidden_layers, vec![50, 25]);
        assert_eq!(TrainingConfig::emotion().hidden_layers, vec![30, 15]);
        assert!(TrainingConfig::report().intercept);
        assert!(!TrainingConfig::emotion().intercept);
        assert!(VectorizerConfig::report().stop_words);
        assert!(!VectorizerConfig::emotion().stop_words);
    }

    #[test]
    fn test_invalid_configs() {
        let config = TrainingConfig {
            hidden_layers: vec![10, 0],
            ..TrainingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ClassifierError::ValidationError(_))));

        let config = TrainingConfig {
            learning_rate: 0.0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VectorizerConfig {
            ngram_range: (2, 1),
            stop_words: false,
        };
        assert!(config.validate().is_err());
    }
}
