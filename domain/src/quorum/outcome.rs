//! Operation outcome value object

use serde::{Deserialize, Serialize};

/// The classified result reported by a single operation
///
/// An operation reports exactly one outcome; the tally consumes it the
/// instant it arrives. A raw failure signal that the configured failure
/// classifier chooses to ignore is reported here as `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The operation finished without a counted failure
    Success,
    /// The operation reported a failure signal that counts
    Failure,
}

impl Outcome {
    /// Classify a raw result, counting every error as a failure
    pub fn from_result<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Check if this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Check if this outcome is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}
