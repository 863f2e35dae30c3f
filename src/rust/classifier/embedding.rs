use std::collections::{BTreeSet, HashMap};

use log::warn;
use ndarray::{Array1, Array2};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use super::error::ClassifierError;
use super::stopwords::is_stop_word;
use super::utils::normalize_vector;
use crate::config::VectorizerConfig;

/// Converts text into TF-IDF weighted word n-gram vectors.
///
/// The pipeline is:
/// 1. Lower-case the text
/// 2. Split it with the `Whitespace` pre-tokenizer (`\w+|[^\w\s]+`) and keep
///    word tokens of at least two characters
/// 3. Optionally drop English stopwords
/// 4. Join consecutive tokens into n-grams over the configured range
/// 5. Weight raw counts by smoothed idf and scale to unit L2 norm
///
/// The vocabulary is sorted, so feature indices depend only on the corpus.
#[derive(Debug, Clone)]
pub(crate) struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and idf weights of `documents`.
    ///
    /// # Errors
    /// - `ValidationError` if the configuration is invalid
    /// - `BuildError` if no document yields a single term
    pub(crate) fn fit<S: AsRef<str>>(
        documents: &[S],
        config: VectorizerConfig,
    ) -> Result<Self, ClassifierError> {
        config.validate()?;

        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| analyze(doc.as_ref(), &config))
            .collect();

        let terms: BTreeSet<&str> = analyzed
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            return Err(ClassifierError::BuildError(
                "Empty vocabulary; the training documents only contain stopwords or no words at all"
                    .into(),
            ));
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &analyzed {
            let unique: BTreeSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for index in unique {
                document_frequency[index] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = Array1::from_iter(
            document_frequency
                .iter()
                .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0),
        );

        Ok(Self {
            config,
            vocabulary,
            idf,
        })
    }

    pub(crate) fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub(crate) fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[cfg(test)]
    pub(crate) fn idf(&self) -> &Array1<f32> {
        &self.idf
    }

    /// Maps `text` to a unit-length feature vector. Text sharing no term
    /// with the vocabulary maps to the zero vector.
    pub(crate) fn transform(&self, text: &str) -> Array1<f32> {
        let mut counts = Array1::<f32>::zeros(self.vocabulary.len());
        for term in analyze(text, &self.config) {
            if let Some(&index) = self.vocabulary.get(&term) {
                counts[index] += 1.0;
            }
        }
        normalize_vector(&(counts * &self.idf))
    }

    /// Stacks the vectors of `documents` into an `(n_documents, n_features)` matrix.
    pub(crate) fn transform_batch<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f32> {
        let mut matrix = Array2::zeros((documents.len(), self.vocabulary.len()));
        for (mut row, doc) in matrix.rows_mut().into_iter().zip(documents) {
            row.assign(&self.transform(doc.as_ref()));
        }
        matrix
    }
}

/// Lower-cased word tokens of `text`, two characters or longer.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let mut pretokenized = PreTokenizedString::from(text.to_lowercase());
    if let Err(e) = Whitespace::default().pre_tokenize(&mut pretokenized) {
        warn!("Pre-tokenization failed, treating text as empty: {}", e);
        return Vec::new();
    }
    pretokenized
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(token, _, _)| token)
        .filter(|token| token.chars().count() >= 2 && token.chars().all(is_word_char))
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn analyze(text: &str, config: &VectorizerConfig) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|token| !config.stop_words || !is_stop_word(token))
        .collect();

    let (min_n, max_n) = config.ngram_range;
    let mut terms = Vec::new();
    for n in min_n..=max_n {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}
