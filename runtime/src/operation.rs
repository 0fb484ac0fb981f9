//! Operation type
//!
//! An operation is one unit of concurrently-executed, cancellable,
//! fallible work. The dispatcher invokes it exactly once with the shared
//! execution scope of the invocation; the operation reports success or a
//! raw failure signal of type `E`.

use std::future::Future;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// One unit of cancellable, fallible work.
///
/// The [`CancellationToken`] handed to an operation is the shared
/// execution scope of its invocation. It fires (cooperatively, never
/// forcibly) once a verdict is reached; an operation that ignores it
/// simply keeps running in the background and its eventual outcome is
/// discarded.
pub type Operation<E> =
    Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, Result<(), E>> + Send>;

/// Box an async closure into an [`Operation`].
///
/// # Example
///
/// ```
/// use verifier_runtime::operation;
///
/// let op = operation::<_, _, String>(|scope| async move {
///     if scope.is_cancelled() {
///         return Err("stopped before starting".to_string());
///     }
///     Ok(())
/// });
/// # drop(op);
/// ```
pub fn operation<F, Fut, E>(f: F) -> Operation<E>
where
    F: FnOnce(CancellationToken) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    Box::new(move |scope| Box::pin(f(scope)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_operation_receives_the_scope() {
        let op = operation::<_, _, String>(|scope: CancellationToken| async move {
            if scope.is_cancelled() {
                Err("cancelled".to_string())
            } else {
                Ok(())
            }
        });

        let live = CancellationToken::new();
        assert_eq!(op(live).await, Ok(()));

        let op = operation::<_, _, String>(|scope: CancellationToken| async move {
            if scope.is_cancelled() {
                Err("cancelled".to_string())
            } else {
                Ok(())
            }
        });
        let stopped = CancellationToken::new();
        stopped.cancel();
        assert_eq!(op(stopped).await, Err("cancelled".to_string()));
    }
}
