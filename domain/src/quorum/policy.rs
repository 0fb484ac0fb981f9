//! Named quorum policies
//!
//! A policy names the condition a caller wants; resolving it against the
//! number of supplied operations yields the concrete [`QuorumCondition`]
//! the engine evaluates. Resolution is also where configuration is
//! validated: a quorum larger than the operation count is rejected before
//! anything is launched.

use crate::core::error::VerifyError;
use crate::quorum::condition::QuorumCondition;
use serde::{Deserialize, Serialize};

/// Named quorum policy
///
/// The derived policies are defined by delegation, so their equivalences
/// are structural: `All` is `AtLeast(total)`, `OneOf` is `AtLeast(1)`,
/// `OnlyOne` is `Exactly(1)` and `NoOne` is `Exactly(0)`.
///
/// # Example
///
/// ```
/// use verifier_domain::quorum::{QuorumCondition, QuorumPolicy};
///
/// let policy = QuorumPolicy::AtLeast(2);
/// assert_eq!(
///     policy.condition(3).unwrap(),
///     QuorumCondition::Threshold { required: 2 }
/// );
/// assert!(QuorumPolicy::AtLeast(4).condition(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuorumPolicy {
    /// Every operation must succeed
    #[default]
    All,

    /// At least this many operations must succeed
    AtLeast(usize),

    /// At least one operation must succeed
    OneOf,

    /// Exactly this many operations must succeed
    Exactly(usize),

    /// Exactly one operation must succeed
    OnlyOne,

    /// No operation may succeed
    NoOne,
}

impl QuorumPolicy {
    /// Resolve this policy against the number of supplied operations.
    ///
    /// Returns [`VerifyError::QuorumExceedsOperations`] when the policy's
    /// count exceeds `total`; no operation is launched in that case.
    pub fn condition(&self, total: usize) -> Result<QuorumCondition, VerifyError> {
        match *self {
            QuorumPolicy::All => QuorumPolicy::AtLeast(total).condition(total),
            QuorumPolicy::OneOf => QuorumPolicy::AtLeast(1).condition(total),
            QuorumPolicy::OnlyOne => QuorumPolicy::Exactly(1).condition(total),
            QuorumPolicy::NoOne => QuorumPolicy::Exactly(0).condition(total),
            QuorumPolicy::AtLeast(count) => {
                if count > total {
                    Err(VerifyError::QuorumExceedsOperations {
                        requested: count,
                        available: total,
                    })
                } else {
                    Ok(QuorumCondition::Threshold { required: count })
                }
            }
            QuorumPolicy::Exactly(count) => {
                if count > total {
                    Err(VerifyError::QuorumExceedsOperations {
                        requested: count,
                        available: total,
                    })
                } else {
                    Ok(QuorumCondition::Exact { expected: count })
                }
            }
        }
    }

    /// Get a human-readable description of this policy
    pub fn description(&self) -> String {
        match self {
            QuorumPolicy::All => "all operations must succeed".to_string(),
            QuorumPolicy::AtLeast(n) => format!("at least {} operations must succeed", n),
            QuorumPolicy::OneOf => "at least one operation must succeed".to_string(),
            QuorumPolicy::Exactly(n) => format!("exactly {} operations must succeed", n),
            QuorumPolicy::OnlyOne => "exactly one operation must succeed".to_string(),
            QuorumPolicy::NoOne => "no operation may succeed".to_string(),
        }
    }
}

impl std::fmt::Display for QuorumPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(QuorumPolicy::All),
            "oneof" | "one_of" => Ok(QuorumPolicy::OneOf),
            "onlyone" | "only_one" => Ok(QuorumPolicy::OnlyOne),
            "noone" | "no_one" => Ok(QuorumPolicy::NoOne),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after atleast:")?
                    .parse()
                    .map_err(|_| "Invalid number for atleast")?;
                Ok(QuorumPolicy::AtLeast(n))
            }
            s if s.starts_with("exactly:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after exactly:")?
                    .parse()
                    .map_err(|_| "Invalid number for exactly")?;
                Ok(QuorumPolicy::Exactly(n))
            }
            _ => Err(format!(
                "Unknown quorum policy: {}. Valid: all, oneof, onlyone, noone, atleast:N, exactly:N",
                s
            )),
        }
    }
}
