//! Core domain concepts shared across the quorum subdomain.
//!
//! - [`error::VerifyError`] — the decision taxonomy of a verifier invocation

pub mod error;
