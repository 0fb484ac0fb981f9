//! Sequence adapter
//!
//! Converts an ordered sequence of values plus a per-element check
//! function into operations, one per element.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::operation::{Operation, operation};

/// Build one operation per element of `values`.
///
/// Each element is moved into its own operation, so no two operations
/// observe the same element. The check function receives the shared
/// execution scope of the invocation alongside the element.
///
/// # Example
///
/// ```
/// use verifier_runtime::{Verifier, from_sequence};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let verifier = Verifier::new();
/// let checks = from_sequence(vec![2, 4, 6], |_scope, n| async move {
///     if n % 2 == 0 {
///         Ok(())
///     } else {
///         Err(format!("{n} is odd"))
///     }
/// });
/// assert!(verifier.all(checks).await.is_ok());
/// # }
/// ```
pub fn from_sequence<T, F, Fut, E>(
    values: impl IntoIterator<Item = T>,
    check: F,
) -> Vec<Operation<E>>
where
    T: Send + 'static,
    F: Fn(CancellationToken, T) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    values
        .into_iter()
        .map(|value| {
            let check = check.clone();
            operation(move |scope| check(scope, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_each_operation_owns_its_element() {
        let ops = from_sequence(vec![1, 2, 3], |_scope, n: u32| async move {
            if n > 0 { Ok(()) } else { Err("zero".to_string()) }
        });
        assert_eq!(ops.len(), 3);

        for op in ops {
            assert_eq!(op(CancellationToken::new()).await, Ok(()));
        }
    }

    #[tokio::test]
    async fn test_elements_are_not_shared_across_operations() {
        // every element must be observed exactly once
        let ops = from_sequence(vec![10u32, 20, 30], |_scope, n| async move {
            Err(n.to_string())
        });

        let mut observed = Vec::new();
        for op in ops {
            let Err(signal) = op(CancellationToken::new()).await else {
                panic!("check returns its element as the signal");
            };
            observed.push(signal);
        }
        observed.sort();
        assert_eq!(observed, vec!["10", "20", "30"]);
    }
}
