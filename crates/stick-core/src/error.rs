//! Error types for non-parametric statistical analysis
//!
//! Provides a unified error type for all stick-* crates.

use thiserror::Error;

/// Core error type for non-parametric statistical operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Too few groups, treatments or blocks for a test
    #[error("{test} requires at least {expected} groups, got {actual}")]
    InsufficientGroups {
        test: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Paired samples of different lengths
    #[error("Paired samples must have equal length: first has {first}, second has {second}")]
    LengthMismatch { first: usize, second: usize },

    /// NaN or infinite values where finite numbers are required
    #[error("Non-finite value: {0} contains NaN or infinite values")]
    NonFinite(String),

    /// Unknown alternative, rank method, correction method, ...
    #[error("Unsupported {option}: '{value}'")]
    UnsupportedOption { option: &'static str, value: String },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an empty sample
    pub fn empty_sample(context: &str) -> Self {
        Self::InvalidInput(format!("{context} must not be empty"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::NonFinite(context.to_string())
    }

    /// Create an error for an unrecognised configuration value
    pub fn unsupported(option: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedOption {
            option,
            value: value.into(),
        }
    }

    /// Create an error for too few groups
    pub fn too_few_groups(test: &'static str, expected: usize, actual: usize) -> Self {
        Self::InsufficientGroups {
            test,
            expected,
            actual,
        }
    }

    /// Whether this error is an input-validation failure (as opposed to
    /// configuration or computation)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InsufficientData { .. }
                | Self::InsufficientGroups { .. }
                | Self::LengthMismatch { .. }
                | Self::NonFinite(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be in (0, 1)".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be in (0, 1)");

        let err = Error::InsufficientData { expected: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 observations, got 1"
        );

        let err = Error::too_few_groups("Jonckheere-Terpstra test", 3, 2);
        assert_eq!(
            err.to_string(),
            "Jonckheere-Terpstra test requires at least 3 groups, got 2"
        );

        let err = Error::LengthMismatch { first: 4, second: 3 };
        assert_eq!(
            err.to_string(),
            "Paired samples must have equal length: first has 4, second has 3"
        );
    }

    #[test]
    fn test_unsupported_names_offending_value() {
        let err = Error::unsupported("alternative", "sideways");
        assert_eq!(err.to_string(), "Unsupported alternative: 'sideways'");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::empty_sample("first sample");
        assert_eq!(err.to_string(), "Invalid input: first sample must not be empty");
        assert!(err.is_validation());

        let err = Error::non_finite("second sample");
        assert_eq!(
            err.to_string(),
            "Non-finite value: second sample contains NaN or infinite values"
        );
        assert!(err.is_validation());
    }
}
