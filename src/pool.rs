use crate::error::PoolError;
use crate::task::Task;
use crate::worker;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, info_span, Instrument};

/// A fixed-size pool of executors draining one bounded FIFO task queue.
///
/// The pool sits between an unbounded producer (any number of callers may
/// submit concurrently) and a fixed set of executors. The queue is the single
/// point of synchronization: each task is delivered to exactly one executor
/// exactly once, and a full queue suspends the submitter instead of dropping
/// or buffering without bound.
pub struct WorkerPool {
  // `wait` takes the sender out of this Option; that take is the one-time
  // open -> closed transition of the queue.
  task_tx: Mutex<Option<mpsc::Sender<Task>>>,
  tracker: TaskTracker,
  shutdown: CancellationToken,
  workers: usize,
}

impl WorkerPool {
  /// Creates the pool and immediately spawns `workers` executors bound to
  /// `shutdown`, all draining a queue of capacity `queue_capacity`. Both
  /// counts are clamped to a minimum of 1. Returns without blocking; must be
  /// called from within a Tokio runtime.
  pub fn new(shutdown: CancellationToken, workers: usize, queue_capacity: usize) -> Self {
    let workers = workers.max(1);
    let (task_tx, task_rx) = mpsc::channel::<Task>(queue_capacity.max(1));
    let queue: worker::SharedQueue = Arc::new(tokio::sync::Mutex::new(task_rx));

    let tracker = TaskTracker::new();
    for worker_id in 0..workers {
      tracker.spawn(
        worker::run(queue.clone(), shutdown.clone())
          .instrument(info_span!("worker", id = worker_id)),
      );
    }
    // Every executor is spawned up front, so the tracker can be closed right
    // away; `wait` then completes once all of them have exited.
    tracker.close();
    info!(workers, queue_capacity, "worker pool started");

    Self {
      task_tx: Mutex::new(Some(task_tx)),
      tracker,
      shutdown,
      workers,
    }
  }

  /// Number of executors spawned at construction.
  pub fn worker_count(&self) -> usize {
    self.workers
  }

  /// Whether the shared cancellation signal has fired.
  pub fn is_cancelled(&self) -> bool {
    self.shutdown.is_cancelled()
  }

  /// Submits a task to the queue. Suspends while the queue is at capacity.
  ///
  /// Returns [`PoolError::QueueClosed`] once `wait` has closed the queue.
  /// Callers must stop submitting before (or concurrently-safely with)
  /// calling [`wait`](Self::wait): a submission still suspended on a full
  /// queue after cancellation has stopped every executor resolves only when
  /// the queue itself is torn down.
  pub async fn add_task(&self, task: Task) -> Result<(), PoolError> {
    let task_tx = match &*self.task_tx.lock() {
      Some(task_tx) => task_tx.clone(),
      None => return Err(PoolError::QueueClosed),
    };
    task_tx.send(task).await.map_err(|_| PoolError::QueueClosed)
  }

  /// Closes the task queue and suspends until every executor has exited,
  /// either by draining the closed queue or by observing cancellation.
  ///
  /// Only the first call performs the close; duplicate or concurrent callers
  /// all suspend until the executors are fully accounted for. Tasks already
  /// queued when `wait` is called are still executed (unless cancellation
  /// fires first).
  pub async fn wait(&self) {
    if self.task_tx.lock().take().is_some() {
      debug!("task queue closed, draining");
    }
    self.tracker.wait().await;
  }
}
