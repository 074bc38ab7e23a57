use std::future::Future;
use std::pin::Pin;

/// A unit of work submitted to the pool.
///
/// A task is a deferred computation with no inputs or outputs visible to the
/// pool: whatever state it needs is captured at submission time, and whatever
/// outcome it produces (acknowledging a message, logging a failure) is its
/// own responsibility. The pool carries no result or error channel back to
/// the submitter.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
