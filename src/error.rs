//! Error types for the anofox-timescales library.

use thiserror::Error;

/// Result type alias for timescale analysis operations.
pub type Result<T> = std::result::Result<T, TimescalesError>;

/// Errors that can occur while analyzing a lightcurve.
///
/// Every variant signals a systematic data-quality problem rather than a
/// transient fault, so callers usually skip the offending series or escalate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimescalesError {
    /// Too few points, too few distinct times, or a series with no variance.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// An input required to be in ascending order is not.
    #[error("not sorted: {0}")]
    NotSorted(String),

    /// A grid required to be evenly spaced is not.
    #[error("not uniform: {0}")]
    NotUniform(String),

    /// A frequency grid contains a zero or negative entry.
    #[error("non-positive frequency {value} at index {index}")]
    NegativeFrequency { index: usize, value: f64 },

    /// Grid bounds or step are inconsistent.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Mismatched lengths or an out-of-range parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = TimescalesError::DegenerateInput("only one unique time".to_string());
        assert_eq!(err.to_string(), "degenerate input: only one unique time");

        let err = TimescalesError::NotSorted("times is unsorted".to_string());
        assert_eq!(err.to_string(), "not sorted: times is unsorted");

        let err = TimescalesError::NegativeFrequency {
            index: 3,
            value: -0.5,
        };
        assert_eq!(err.to_string(), "non-positive frequency -0.5 at index 3");

        let err = TimescalesError::InvalidRange("f_min > f_max".to_string());
        assert_eq!(err.to_string(), "invalid range: f_min > f_max");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = TimescalesError::NotUniform("offsets".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, TimescalesError::NotSorted("offsets".to_string()));
    }
}
