//! Failure classification
//!
//! A classifier decides whether a raw failure signal counts as a real
//! failure or is ignored and treated as success. It supports alternate
//! failure semantics (treat a "not found" as acceptable, count only
//! timeouts, …) without changing the engine.

use std::fmt;
use std::sync::Arc;

use verifier_domain::Outcome;

/// Pluggable predicate mapping raw failure signals to counted outcomes.
///
/// Stored per [`Verifier`](crate::Verifier) instance, never in global
/// state, so independent verifiers cannot race on it. The default counts
/// every raw error as a real failure.
pub struct FailureClassifier<E> {
    is_real_failure: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> FailureClassifier<E> {
    /// Create a classifier from a predicate returning `true` when the
    /// signal counts as a real failure
    pub fn new(is_real_failure: impl Fn(&E) -> bool + Send + Sync + 'static) -> Self {
        Self {
            is_real_failure: Arc::new(is_real_failure),
        }
    }

    /// Classify a raw operation result into a counted outcome.
    ///
    /// A failure signal the predicate rejects is counted as a success.
    pub fn classify(&self, raw: Result<(), E>) -> Outcome {
        match raw {
            Ok(()) => Outcome::Success,
            Err(signal) if (self.is_real_failure)(&signal) => Outcome::Failure,
            Err(_) => Outcome::Success,
        }
    }
}

impl<E> Default for FailureClassifier<E> {
    fn default() -> Self {
        Self::new(|_| true)
    }
}

impl<E> Clone for FailureClassifier<E> {
    fn clone(&self) -> Self {
        Self {
            is_real_failure: Arc::clone(&self.is_real_failure),
        }
    }
}

impl<E> fmt::Debug for FailureClassifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureClassifier").finish_non_exhaustive()
    }
}
