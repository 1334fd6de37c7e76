//! Background conversion worker.
//!
//! A [`ConversionJob`] is an ephemeral snapshot of unprocessed queue paths
//! plus a fixed [`ReduceOptions`]. Spawning it starts exactly one background
//! thread (not a pool) that walks the items strictly in order, reduces each
//! one, and reports back over a channel:
//!
//! - [`WorkerEvent::ItemConverted`] after every attempted item, carrying the
//!   per-item outcome. Failures are recoverable and never stop the batch.
//! - [`WorkerEvent::Finished`] exactly once, after the loop, with the batch
//!   totals.
//!
//! Events arrive in the order items complete; there is no concurrency within
//! a job, so no reordering. All blocking work (decode, resize, encode,
//! write) happens on the worker thread; the consumer drains the receiver
//! from its own loop and applies state there. The channel is the only thing
//! the two threads share besides the cancel flag.
//!
//! ## Cancellation
//!
//! Cancellation is cooperative at item granularity: the worker polls a
//! shared [`CancelFlag`] before starting each item and stops advancing when
//! it is set. An in-flight item is never interrupted mid-operation, and
//! events already emitted for completed items remain valid.

use crate::imaging::ImageBackend;
use crate::reduce::{ReduceError, ReduceOptions, reduce_image};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Notification sent from the worker thread to the interactive side.
#[derive(Debug)]
pub enum WorkerEvent {
    /// One item was attempted. `outcome` is the output path on success, or
    /// the per-item error on failure.
    ItemConverted {
        path: PathBuf,
        outcome: Result<PathBuf, ReduceError>,
    },
    /// The job loop ended (all items attempted, or cancelled). Sent exactly
    /// once, after the last `ItemConverted`.
    Finished(BatchSummary),
}

/// Totals for one finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    /// True when the loop stopped before attempting every item.
    pub cancelled: bool,
}

/// Shared stop signal, polled by the worker before each item.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One conversion run over a snapshot of unprocessed paths with a fixed
/// parameter set. Constructed per run and discarded when the run ends.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    items: Vec<PathBuf>,
    options: ReduceOptions,
}

impl ConversionJob {
    /// `items` should contain only unprocessed paths; the worker attempts
    /// every path it is given. Skip logic lives with the queue owner.
    pub fn new(items: Vec<PathBuf>, options: ReduceOptions) -> Self {
        Self { items, options }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start the job on a new background thread and hand back the channel
    /// and cancel flag.
    pub fn spawn<B>(self, backend: Arc<B>) -> JobHandle
    where
        B: ImageBackend + Send + Sync + 'static,
    {
        let (sender, events) = channel();
        let cancel = CancelFlag::new();
        let thread_cancel = cancel.clone();
        let thread = std::thread::spawn(move || {
            run_job(
                backend.as_ref(),
                &self.items,
                &self.options,
                &thread_cancel,
                &sender,
            )
        });
        JobHandle {
            events,
            cancel,
            thread,
        }
    }
}

/// Handle to a running job: event receiver, cancel flag, thread handle.
pub struct JobHandle {
    pub events: Receiver<WorkerEvent>,
    cancel: CancelFlag,
    thread: JoinHandle<BatchSummary>,
}

impl JobHandle {
    /// Request cooperative cancellation. The worker stops before the next
    /// item; the current item (if any) still completes and is reported.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker thread and return its totals.
    pub fn join(self) -> BatchSummary {
        self.thread.join().unwrap_or_default()
    }
}

/// The worker loop. Runs on the caller's thread; [`ConversionJob::spawn`]
/// calls this from the background thread. Kept free-standing and generic so
/// tests can drive it synchronously with a mock backend.
pub fn run_job<B: ImageBackend>(
    backend: &B,
    items: &[PathBuf],
    options: &ReduceOptions,
    cancel: &CancelFlag,
    events: &Sender<WorkerEvent>,
) -> BatchSummary {
    debug!(items = items.len(), "conversion job started");
    let mut summary = BatchSummary::default();

    for path in items {
        if cancel.is_cancelled() {
            debug!("cancel observed, stopping before next item");
            summary.cancelled = true;
            break;
        }

        let outcome = reduce_image(backend, path, options);
        match &outcome {
            Ok(output) => {
                summary.converted += 1;
                debug!(source = %path.display(), output = %output.display(), "item converted");
            }
            Err(e) => {
                summary.failed += 1;
                warn!(source = %path.display(), error = %e, "item failed");
            }
        }

        let event = WorkerEvent::ItemConverted {
            path: path.clone(),
            outcome,
        };
        if events.send(event).is_err() {
            // Receiver gone: nobody is listening, stop advancing.
            summary.cancelled = true;
            break;
        }
    }

    debug!(
        converted = summary.converted,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "conversion job finished"
    );
    let _ = events.send(WorkerEvent::Finished(summary));
    summary
}
