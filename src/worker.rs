use crate::task::Task;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

/// The queue receiver shared by all executors of one pool.
pub(crate) type SharedQueue = Arc<Mutex<mpsc::Receiver<Task>>>;

/// The executor loop: repeatedly takes one task from the shared queue and
/// runs it to completion, until the queue is closed and drained or the
/// shutdown signal fires. Cancellation is not preemptive inside a task; an
/// executor that already dequeued a task finishes it before exiting.
pub(crate) async fn run(queue: SharedQueue, shutdown: CancellationToken) {
  trace!("worker started");

  loop {
    let task = tokio::select! {
      biased;

      _ = shutdown.cancelled() => {
        debug!("shutdown signalled, worker stopping");
        break;
      }

      task = recv_next(&queue) => match task {
        Some(task) => task,
        None => {
          debug!("task queue closed and drained, worker stopping");
          break;
        }
      },
    };

    // A panicking task must not take down the executor loop; the failure is
    // logged and the loop moves on to the next task.
    if AssertUnwindSafe(task).catch_unwind().await.is_err() {
      error!("task panicked during execution");
    }
  }

  trace!("worker stopped");
}

// Holding the queue lock across `recv` is fine: `recv` is cancel-safe, so a
// worker yanked out of this future by the shutdown branch of the select has
// not consumed a task, and the lock is released when the future drops.
async fn recv_next(queue: &SharedQueue) -> Option<Task> {
  queue.lock().await.recv().await
}
