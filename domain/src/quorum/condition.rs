//! Quorum conditions
//!
//! A condition is a pure function of `(total, successes, failures)` that
//! decides whether the verdict of a verification is already determined.
//! Conditions are monotonic: both counters only ever grow, so once a
//! condition returns a determined verdict it returns the same verdict for
//! every later state.

use crate::core::error::VerifyError;
use serde::{Deserialize, Serialize};

/// Why a quorum became impossible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpossibleReason {
    /// The remaining operations cannot make up for the failures observed
    TooManyFailures,
    /// More operations succeeded than an exact condition expects
    TooManySuccesses,
}

impl From<ImpossibleReason> for VerifyError {
    fn from(reason: ImpossibleReason) -> Self {
        match reason {
            ImpossibleReason::TooManyFailures => VerifyError::TooManyFailures,
            ImpossibleReason::TooManySuccesses => VerifyError::TooManySuccesses,
        }
    }
}

/// Verdict of evaluating a condition at the current counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Not yet determined; keep consuming outcomes
    Undetermined,
    /// The condition holds, regardless of operations still outstanding
    Satisfied,
    /// The condition can no longer hold, regardless of stragglers
    Impossible(ImpossibleReason),
}

impl Verdict {
    /// Check if this verdict ends the verification
    pub fn is_determined(&self) -> bool {
        !matches!(self, Verdict::Undetermined)
    }
}

/// Condition family deciding when a quorum verdict is final
///
/// # Example
///
/// ```
/// use verifier_domain::quorum::{QuorumCondition, Verdict};
///
/// let quorum = QuorumCondition::Threshold { required: 2 };
/// assert_eq!(quorum.evaluate(3, 1, 1), Verdict::Undetermined);
/// assert_eq!(quorum.evaluate(3, 2, 0), Verdict::Satisfied);
///
/// let exact = QuorumCondition::Exact { expected: 1 };
/// assert_eq!(exact.evaluate(3, 1, 1), Verdict::Undetermined); // must wait out the last one
/// assert_eq!(exact.evaluate(3, 1, 2), Verdict::Satisfied);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumCondition {
    /// At least `required` operations must succeed.
    ///
    /// Decidable purely from running counts: satisfied the moment
    /// `required` successes exist, impossible the moment the operations
    /// still outstanding cannot reach the threshold.
    Threshold { required: usize },

    /// Exactly `expected` operations must succeed.
    ///
    /// Fails fast on overshoot (one success too many) or undershoot (one
    /// failure too many), but the success path requires every operation
    /// to report.
    Exact { expected: usize },
}

impl QuorumCondition {
    /// Evaluate the condition at the given counts.
    ///
    /// `successes + failures` must not exceed `total`; counts above the
    /// relevant budget are treated as impossible either way.
    pub fn evaluate(&self, total: usize, successes: usize, failures: usize) -> Verdict {
        match *self {
            QuorumCondition::Threshold { required } => {
                if successes >= required {
                    Verdict::Satisfied
                } else if failures > total.saturating_sub(required) {
                    // the remaining operations cannot reach the threshold
                    // even if every one of them succeeds
                    Verdict::Impossible(ImpossibleReason::TooManyFailures)
                } else {
                    Verdict::Undetermined
                }
            }
            QuorumCondition::Exact { expected } => {
                if successes > expected {
                    Verdict::Impossible(ImpossibleReason::TooManySuccesses)
                } else if failures > total.saturating_sub(expected) {
                    Verdict::Impossible(ImpossibleReason::TooManyFailures)
                } else if successes + failures == total {
                    // successes <= expected and failures <= total - expected
                    // leave exactly one full-completion state:
                    // successes == expected
                    Verdict::Satisfied
                } else {
                    Verdict::Undetermined
                }
            }
        }
    }

    /// Whether the success path of this condition requires every
    /// operation to report
    pub fn requires_full_completion(&self) -> bool {
        matches!(self, QuorumCondition::Exact { .. })
    }

    /// Get a human-readable description of this condition
    pub fn description(&self) -> String {
        match *self {
            QuorumCondition::Threshold { required } => {
                format!("at least {} successes", required)
            }
            QuorumCondition::Exact { expected } => format!("exactly {} successes", expected),
        }
    }
}

impl std::fmt::Display for QuorumCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_satisfied_early() {
        let quorum = QuorumCondition::Threshold { required: 1 };

        assert_eq!(quorum.evaluate(3, 0, 0), Verdict::Undetermined);
        assert_eq!(quorum.evaluate(3, 1, 0), Verdict::Satisfied);
        // stays satisfied as stragglers report
        assert_eq!(quorum.evaluate(3, 1, 2), Verdict::Satisfied);
    }

    #[test]
    fn test_threshold_impossible_when_budget_spent() {
        let quorum = QuorumCondition::Threshold { required: 2 };

        // 3 operations, need 2: a single failure is survivable
        assert_eq!(quorum.evaluate(3, 0, 1), Verdict::Undetermined);
        assert_eq!(
            quorum.evaluate(3, 0, 2),
            Verdict::Impossible(ImpossibleReason::TooManyFailures)
        );
    }

    #[test]
    fn test_threshold_zero_is_satisfied_by_nothing() {
        let quorum = QuorumCondition::Threshold { required: 0 };
        assert_eq!(quorum.evaluate(3, 0, 0), Verdict::Satisfied);
    }

    #[test]
    fn test_exact_overshoot() {
        let exact = QuorumCondition::Exact { expected: 1 };

        assert_eq!(exact.evaluate(3, 1, 0), Verdict::Undetermined);
        assert_eq!(
            exact.evaluate(3, 2, 0),
            Verdict::Impossible(ImpossibleReason::TooManySuccesses)
        );
    }

    #[test]
    fn test_exact_undershoot() {
        let exact = QuorumCondition::Exact { expected: 1 };

        assert_eq!(exact.evaluate(3, 0, 2), Verdict::Undetermined);
        assert_eq!(
            exact.evaluate(3, 0, 3),
            Verdict::Impossible(ImpossibleReason::TooManyFailures)
        );
    }

    #[test]
    fn test_exact_requires_full_completion_for_success() {
        let exact = QuorumCondition::Exact { expected: 2 };

        // the target count alone is not enough while operations remain
        assert_eq!(exact.evaluate(3, 2, 0), Verdict::Undetermined);
        assert_eq!(exact.evaluate(3, 2, 1), Verdict::Satisfied);
    }

    #[test]
    fn test_exact_zero_accepts_only_failures() {
        let none = QuorumCondition::Exact { expected: 0 };

        assert_eq!(none.evaluate(2, 0, 1), Verdict::Undetermined);
        assert_eq!(none.evaluate(2, 0, 2), Verdict::Satisfied);
        assert_eq!(
            none.evaluate(2, 1, 0),
            Verdict::Impossible(ImpossibleReason::TooManySuccesses)
        );
    }

    #[test]
    fn test_monotonic_once_determined() {
        let quorum = QuorumCondition::Threshold { required: 2 };

        // walk every reachable state after the first determined one and
        // check the verdict never reverts
        for first_s in 0..=3usize {
            for first_f in 0..=(3 - first_s) {
                let verdict = quorum.evaluate(3, first_s, first_f);
                if !verdict.is_determined() {
                    continue;
                }
                for extra_s in 0..=(3 - first_s - first_f) {
                    for extra_f in 0..=(3 - first_s - first_f - extra_s) {
                        let later = quorum.evaluate(3, first_s + extra_s, first_f + extra_f);
                        assert_eq!(later, verdict, "verdict flipped at +{extra_s}/+{extra_f}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_requires_full_completion() {
        assert!(!QuorumCondition::Threshold { required: 2 }.requires_full_completion());
        assert!(QuorumCondition::Exact { expected: 2 }.requires_full_completion());
    }

    #[test]
    fn test_serialization_round_trip() {
        let quorum = QuorumCondition::Exact { expected: 2 };
        let json = serde_json::to_string(&quorum).unwrap();
        let back: QuorumCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quorum);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            QuorumCondition::Threshold { required: 2 }.to_string(),
            "at least 2 successes"
        );
        assert_eq!(
            QuorumCondition::Exact { expected: 0 }.to_string(),
            "exactly 0 successes"
        );
    }
}
