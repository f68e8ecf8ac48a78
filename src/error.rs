//! Error types for the encoders and topology measures.

use thiserror::Error;

/// The main error type for antero operations.
#[derive(Error, Debug)]
pub enum AnteroError {
    /// Categories were read before the encoder was fitted.
    #[error("Encoder not fitted: {0}")]
    NotFitted(&'static str),

    /// Input has a shape the operation does not accept.
    #[error("Shape error: {0}")]
    Shape(String),

    /// Operation is redundant for the categorical scheme.
    #[error("Unsupported operation `{operation}`: use {alternative} instead")]
    Unsupported {
        /// The rejected operation.
        operation: &'static str,
        /// The native equivalent to call instead.
        alternative: &'static str,
    },

    /// A label code does not index a fitted category.
    #[error("Label out of range: {label} >= {n_categories}")]
    LabelOutOfRange {
        /// The offending label.
        label: usize,
        /// Number of fitted categories.
        n_categories: usize,
    },

    /// A label is not a valid non-negative integer code.
    #[error("Invalid label: {0}")]
    InvalidLabel(f64),

    /// A categorical code is outside `[-1, n)`.
    #[error("Invalid categorical code: {0}")]
    InvalidCode(i64),

    /// Categories of a categorical scheme are not unique.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Weight grid or data incompatible with a SOM measure.
    #[error("SOM error: {0}")]
    Som(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for antero operations.
pub type Result<T> = std::result::Result<T, AnteroError>;

impl From<ndarray::ShapeError> for AnteroError {
    fn from(err: ndarray::ShapeError) -> Self {
        AnteroError::Shape(err.to_string())
    }
}
