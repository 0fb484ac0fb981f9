//! Verifier facade and dispatcher
//!
//! The verifier launches every operation concurrently under one shared
//! cancellable scope, funnels raw results into the quorum tally as they
//! arrive and returns the instant the policy outcome is mathematically
//! determined. Stragglers keep running in the background; their outcomes
//! are discarded.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use verifier_domain::{QuorumCondition, QuorumPolicy, QuorumTally, Verdict, VerifyError};

use crate::classifier::FailureClassifier;
use crate::operation::Operation;

/// Concurrent quorum verifier
///
/// A verifier holds per-instance configuration only (the caller's
/// cancellation token and the failure classifier); every invocation gets
/// its own tally and its own execution scope, so one instance can verify
/// disjoint operation sets concurrently.
///
/// # Example
///
/// ```
/// use verifier_runtime::{Verifier, operation};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let verifier = Verifier::<String>::new();
/// let result = verifier
///     .at_least(
///         1,
///         vec![
///             operation(|_scope| async move { Ok(()) }),
///             operation(|_scope| async move { Err("replica unreachable".to_string()) }),
///         ],
///     )
///     .await;
/// assert!(result.is_ok());
/// # }
/// ```
pub struct Verifier<E> {
    cancellation: Option<CancellationToken>,
    classifier: FailureClassifier<E>,
}

impl<E: Send + 'static> Verifier<E> {
    /// Create a verifier with no external cancellation and the default
    /// classifier (every raw error counts as a failure)
    pub fn new() -> Self {
        Self {
            cancellation: None,
            classifier: FailureClassifier::default(),
        }
    }

    /// Attach the caller's cancellation token.
    ///
    /// When the token fires before a verdict, the invocation returns
    /// [`VerifyError::Cancelled`] without consulting the tally. Deadlines
    /// stay with the caller: wrap an invocation in
    /// `tokio::time::timeout` to get the timeout's own error back,
    /// unchanged.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Install a failure classifier; raw failure signals the predicate
    /// rejects are counted as successes
    pub fn with_classifier(
        mut self,
        is_real_failure: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.classifier = FailureClassifier::new(is_real_failure);
        self
    }

    /// Verify that every operation succeeds
    pub async fn all(&self, operations: Vec<Operation<E>>) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::All, operations).await
    }

    /// Verify that at least `count` operations succeed
    pub async fn at_least(
        &self,
        count: usize,
        operations: Vec<Operation<E>>,
    ) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::AtLeast(count), operations).await
    }

    /// Verify that at least one operation succeeds
    pub async fn one_of(&self, operations: Vec<Operation<E>>) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::OneOf, operations).await
    }

    /// Verify that exactly `count` operations succeed
    pub async fn exactly(
        &self,
        count: usize,
        operations: Vec<Operation<E>>,
    ) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::Exactly(count), operations).await
    }

    /// Verify that exactly one operation succeeds
    pub async fn only_one(&self, operations: Vec<Operation<E>>) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::OnlyOne, operations).await
    }

    /// Verify that no operation succeeds
    pub async fn no_one(&self, operations: Vec<Operation<E>>) -> Result<(), VerifyError> {
        self.verify(QuorumPolicy::NoOne, operations).await
    }

    /// Run `operations` under `policy` and return the decision.
    ///
    /// Configuration errors (a quorum larger than the operation count)
    /// are detected here; no operation is launched in that case.
    pub async fn verify(
        &self,
        policy: QuorumPolicy,
        operations: Vec<Operation<E>>,
    ) -> Result<(), VerifyError> {
        let condition = policy.condition(operations.len())?;
        self.dispatch(condition, operations).await
    }

    /// Launch every operation and drive the tally until the verdict is
    /// determined or the caller's token fires, whichever happens first.
    async fn dispatch(
        &self,
        condition: QuorumCondition,
        operations: Vec<Operation<E>>,
    ) -> Result<(), VerifyError> {
        let total = operations.len();
        if total == 0 {
            return Ok(());
        }

        let mut tally = QuorumTally::new(total, condition);
        match tally.verdict() {
            // a zero threshold is satisfied before anything runs
            Verdict::Satisfied => return Ok(()),
            Verdict::Impossible(reason) => return Err(reason.into()),
            Verdict::Undetermined => {}
        }

        debug!(total, %condition, "dispatching operations");

        // One shared scope per invocation, derived from the caller's
        // token. Cancelling it is the only stop signal stragglers get.
        let scope = match &self.cancellation {
            Some(token) => token.child_token(),
            None => CancellationToken::new(),
        };

        // Buffered to `total` so a worker can always hand off its outcome
        // and exit, even after the decision loop stopped listening.
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Result<(), E>>(total);
        for op in operations {
            let scope = scope.clone();
            let outcome_tx = outcome_tx.clone();
            tokio::spawn(async move {
                let raw = op(scope).await;
                let _ = outcome_tx.send(raw).await;
            });
        }
        drop(outcome_tx);

        loop {
            let raw = if let Some(token) = &self.cancellation {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        // the child scope follows the parent token
                        debug!("caller cancellation observed before a verdict");
                        return Err(VerifyError::Cancelled);
                    }
                    raw = outcome_rx.recv() => raw,
                }
            } else {
                outcome_rx.recv().await
            };

            let Some(raw) = raw else {
                // Unreachable with a monotonic condition: the tally
                // reaches a verdict at full completion at the latest.
                warn!("outcome channel closed before a verdict");
                scope.cancel();
                return Err(VerifyError::Cancelled);
            };

            match tally.record(self.classifier.classify(raw)) {
                Verdict::Satisfied => {
                    debug!(
                        successes = tally.successes(),
                        failures = tally.failures(),
                        remaining = tally.remaining(),
                        "quorum satisfied"
                    );
                    scope.cancel();
                    return Ok(());
                }
                Verdict::Impossible(reason) => {
                    debug!(
                        successes = tally.successes(),
                        failures = tally.failures(),
                        remaining = tally.remaining(),
                        ?reason,
                        "quorum impossible"
                    );
                    scope.cancel();
                    return Err(reason.into());
                }
                Verdict::Undetermined => {}
            }
        }
    }
}

impl<E: Send + 'static> Default for Verifier<E> {
    fn default() -> Self {
        Self::new()
    }
}
