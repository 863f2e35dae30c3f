mod error;
mod embedding;
mod model;
pub mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod stopwords;
mod utils;

pub use error::ClassifierError;
pub use classifier::{Classifier, ClassProbabilities};
pub use builder::{ClassifierBuilder, LabeledExample};
pub use model::TrainingSummary;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Number of classes the classifier is trained on
    pub num_classes: usize,
    /// Labels of the classes, sorted
    pub class_labels: Vec<String>,
    /// Number of distinct n-gram features
    pub vocabulary_size: usize,
    /// Sizes of the hidden layers
    pub hidden_layers: Vec<usize>,
    /// How training went
    pub training: TrainingSummary,
}
