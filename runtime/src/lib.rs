//! Runtime layer for the quorum verifier
//!
//! This crate runs a set of independent, cancellable, fallible operations
//! concurrently and decides overall success or failure the instant enough
//! outcomes have arrived to make the decision final, without waiting for
//! the stragglers.
//!
//! The counting mathematics live in `verifier-domain`; this crate owns the
//! dispatch loop: one tokio task per operation, a shared cancellable scope
//! derived from the caller's token, and a decision loop that feeds
//! arriving outcomes into the quorum tally.
//!
//! # Example
//!
//! ```
//! use verifier_runtime::{operation, Verifier};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let verifier = Verifier::<std::io::Error>::new();
//! let result = verifier
//!     .one_of(vec![
//!         operation(|_scope| async move { Ok(()) }),
//!         operation(|_scope| async move { Err(std::io::Error::other("unreachable host")) }),
//!     ])
//!     .await;
//! assert!(result.is_ok());
//! # }
//! ```

pub mod classifier;
pub mod operation;
pub mod sequence;
pub mod verifier;

// Re-export commonly used types
pub use classifier::FailureClassifier;
pub use operation::{Operation, operation};
pub use sequence::from_sequence;
pub use verifier::Verifier;

// Re-export the domain surface alongside the runtime
pub use verifier_domain::{
    ImpossibleReason, Outcome, QuorumCondition, QuorumPolicy, QuorumTally, Verdict, VerifyError,
};
