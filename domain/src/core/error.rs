//! Verifier error types

use thiserror::Error;

/// Terminal error of one verifier invocation
///
/// A verification either succeeds (no error value) or ends with exactly
/// one of these. The configuration error is detected before any operation
/// is launched; the quorum failures surface the instant the observed
/// counts make the requested condition impossible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The requested quorum is larger than the number of operations supplied
    #[error("requested quorum of {requested} exceeds the {available} operations supplied")]
    QuorumExceedsOperations { requested: usize, available: usize },

    /// Too many operations failed for the quorum to still be met
    #[error("too many operations failed")]
    TooManyFailures,

    /// More operations succeeded than an exact quorum allows
    #[error("too many operations succeeded")]
    TooManySuccesses,

    /// The caller-supplied cancellation signal fired before a verdict
    #[error("verification cancelled")]
    Cancelled,
}

impl VerifyError {
    /// Check if this error represents an external cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VerifyError::Cancelled)
    }

    /// Check if this error is a quorum verdict, as opposed to a
    /// configuration error or cancellation
    pub fn is_quorum_failure(&self) -> bool {
        matches!(
            self,
            VerifyError::TooManyFailures | VerifyError::TooManySuccesses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_operations_display() {
        let error = VerifyError::QuorumExceedsOperations {
            requested: 4,
            available: 3,
        };
        assert_eq!(
            error.to_string(),
            "requested quorum of 4 exceeds the 3 operations supplied"
        );
    }

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(VerifyError::Cancelled.to_string(), "verification cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(VerifyError::Cancelled.is_cancelled());
        assert!(!VerifyError::TooManyFailures.is_cancelled());
        assert!(!VerifyError::TooManySuccesses.is_cancelled());
    }

    #[test]
    fn test_is_quorum_failure_check() {
        assert!(VerifyError::TooManyFailures.is_quorum_failure());
        assert!(VerifyError::TooManySuccesses.is_quorum_failure());
        assert!(!VerifyError::Cancelled.is_quorum_failure());
        assert!(
            !VerifyError::QuorumExceedsOperations {
                requested: 2,
                available: 1
            }
            .is_quorum_failure()
        );
    }
}
