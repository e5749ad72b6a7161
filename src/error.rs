//! Error types for parallel set operations.
//!
//! Only conditions that can be detected without inspecting the inputs are
//! reported here. Unsorted inputs and inconsistent comparators are a caller
//! responsibility, exactly as for the sequential algorithms; a comparator that
//! panics aborts the whole operation and the panic resumes on the calling
//! thread.

use std::error::Error;
use std::fmt;

/// Errors that can occur when configuring or running a parallel set operation.
///
/// # Examples
///
/// ```rust
/// use setpath::{Intersection, SetOperationConfig, SetOperationError, set_operation};
///
/// let left = [1, 2, 3];
/// let right = [1, 2, 3];
/// let mut output = [0; 2];
///
/// let result = set_operation(&left, &right, &mut output, Intersection, &SetOperationConfig::new());
/// assert_eq!(
///     result,
///     Err(SetOperationError::OutputTooSmall { required: 3, available: 2 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperationError {
    /// The requested number of workers was zero.
    InvalidParallelism,

    /// The requested minimum partition size was zero.
    ///
    /// Every partition must cover at least one input element.
    InvalidPartitionSize,

    /// The output slice cannot hold the result.
    ///
    /// Detected after the count phase and before any element is written, so
    /// the output is left untouched.
    OutputTooSmall {
        /// Number of elements the operation produces.
        required: usize,
        /// Length of the output slice supplied by the caller.
        available: usize,
    },
}

impl fmt::Display for SetOperationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParallelism => {
                write!(formatter, "parallelism must be greater than 0")
            }
            Self::InvalidPartitionSize => {
                write!(formatter, "minimum partition size must be greater than 0")
            }
            Self::OutputTooSmall {
                required,
                available,
            } => {
                write!(
                    formatter,
                    "output too small: result needs {required} elements but only {available} are available"
                )
            }
        }
    }
}

impl Error for SetOperationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SetOperationError::InvalidParallelism, "parallelism must be greater than 0")]
    #[case(
        SetOperationError::InvalidPartitionSize,
        "minimum partition size must be greater than 0"
    )]
    #[case(
        SetOperationError::OutputTooSmall { required: 7, available: 3 },
        "output too small: result needs 7 elements but only 3 are available"
    )]
    fn test_display(#[case] error: SetOperationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_is_std_error() {
        let error: Box<dyn Error> = Box::new(SetOperationError::InvalidParallelism);
        assert!(error.source().is_none());
    }
}
