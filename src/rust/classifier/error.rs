/// Represents the different types of errors that can occur while building a text classifier.
///
/// Prediction itself has no failure path: once a classifier exists, every
/// string input maps to one of its labels.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The training data or configuration cannot produce a model
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}
