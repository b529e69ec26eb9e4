//! Error types for betukereso-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported by the practice engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot draw {requested} graphemes from a pool of {available}")]
    InsufficientPoolSize { requested: usize, available: usize },

    #[error("invalid evaluator input: {0}")]
    InvalidEvaluatorInput(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_error_names_both_sizes() {
        let error = EngineError::InsufficientPoolSize {
            requested: 60,
            available: 46,
        };
        assert_eq!(error.to_string(), "cannot draw 60 graphemes from a pool of 46");
    }

    #[test]
    fn evaluator_error_display() {
        let error = EngineError::InvalidEvaluatorInput("verdict for find-letter".to_string());
        assert_eq!(
            error.to_string(),
            "invalid evaluator input: verdict for find-letter"
        );
    }
}
