//! Conversion controller: owns the queue, starts and cancels jobs, applies
//! worker notifications.
//!
//! The controller is the piece an interactive frontend embeds. It runs on
//! the interactive thread and is the only writer of queue state; the worker
//! thread communicates exclusively through the event channel, so there is no
//! shared mutable state between the two sides beyond the cancel flag.
//!
//! The expected embedding loop:
//!
//! 1. user drops files → [`ConversionController::add_file`]
//! 2. user starts a run → [`ConversionController::start_conversion`]
//! 3. every frame/tick → [`ConversionController::pump_events`], then repaint
//!    rows from [`ConversionController::queue`] and the progress counter
//! 4. user cancels → [`ConversionController::cancel`]
//!
//! Per-item visual state is resolved through an injected [`StatusIcons`]
//! bundle rather than process-wide cached resources, so the frontend decides
//! where icons come from.

use crate::imaging::{ImageBackend, supported_input_extensions};
use crate::queue::{ImageQueue, QueuedImage};
use crate::reduce::ReduceOptions;
use crate::worker::{ConversionJob, JobHandle, WorkerEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ControllerError {
    /// Every queued item is already processed (or the queue is empty).
    #[error("no unprocessed images in the queue")]
    NothingToConvert,
    /// A job is active; one worker at a time.
    #[error("a conversion job is already running")]
    JobRunning,
}

/// Icon resources for the two per-item visual states, injected at
/// construction.
#[derive(Debug, Clone)]
pub struct StatusIcons {
    pub checked: PathBuf,
    pub unchecked: PathBuf,
}

/// Lifecycle of the current (or last) job.
///
/// `Idle → Running → {Cancelling → Stopped} | {Completed}`; starting a new
/// job from a terminal state goes back through `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running,
    Cancelling,
    /// Cancelled before attempting every item.
    Stopped,
    /// All items attempted (some may have failed).
    Completed,
}

/// Progress counter for the current (or last) job.
///
/// `completed` advances on every notification, success or failure, so the
/// bar reaches 100% even when items fail; `failed` tracks the subset that
/// did not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.completed * 100 / self.total) as u32
        }
    }
}

/// Owns the queue and the at-most-one active conversion job.
pub struct ConversionController<B: ImageBackend + Send + Sync + 'static> {
    backend: Arc<B>,
    icons: StatusIcons,
    queue: ImageQueue,
    job: Option<JobHandle>,
    state: JobState,
    progress: Progress,
}

impl<B: ImageBackend + Send + Sync + 'static> ConversionController<B> {
    pub fn new(backend: B, icons: StatusIcons) -> Self {
        Self {
            backend: Arc::new(backend),
            icons,
            queue: ImageQueue::new(),
            job: None,
            state: JobState::Idle,
            progress: Progress::default(),
        }
    }

    /// Add a dropped file to the queue. Returns `false` for duplicates and
    /// for paths without a supported image extension.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !has_supported_extension(&path) {
            debug!(path = %path.display(), "ignoring file without supported image extension");
            return false;
        }
        let added = self.queue.add(path);
        if !added {
            debug!("ignoring duplicate queue entry");
        }
        added
    }

    /// Remove the selected queue entries.
    pub fn remove_selected(&mut self, indices: &[usize]) {
        self.queue.remove_selected(indices);
    }

    pub fn queue(&self) -> &ImageQueue {
        &self.queue
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Whether a worker is active (running or draining after a cancel).
    pub fn is_job_active(&self) -> bool {
        matches!(self.state, JobState::Running | JobState::Cancelling)
    }

    /// Icon to show next to a queue entry.
    pub fn icon_for(&self, item: &QueuedImage) -> &Path {
        if item.processed {
            &self.icons.checked
        } else {
            &self.icons.unchecked
        }
    }

    /// Start a conversion over the currently unprocessed items. Returns the
    /// number of items handed to the worker.
    ///
    /// Errors with [`ControllerError::JobRunning`] while a job is active and
    /// with [`ControllerError::NothingToConvert`] when there is nothing to
    /// do — in both cases no worker is spawned.
    pub fn start_conversion(&mut self, options: ReduceOptions) -> Result<usize, ControllerError> {
        if self.is_job_active() {
            return Err(ControllerError::JobRunning);
        }

        let pending = self.queue.pending();
        if pending.is_empty() {
            return Err(ControllerError::NothingToConvert);
        }

        let job = ConversionJob::new(pending, options);
        let total = job.len();
        debug!(items = total, "starting conversion");

        self.progress = Progress {
            completed: 0,
            failed: 0,
            total,
        };
        self.job = Some(job.spawn(self.backend.clone()));
        self.state = JobState::Running;
        Ok(total)
    }

    /// Request cancellation of the active job. No-op when nothing runs.
    pub fn cancel(&mut self) {
        if self.state == JobState::Running {
            if let Some(job) = &self.job {
                debug!("cancellation requested");
                job.cancel();
                self.state = JobState::Cancelling;
            }
        }
    }

    /// Drain pending worker events and apply them: mark successfully
    /// converted items processed, advance the progress counter, and settle
    /// the job state on the final event. Call this from the interactive
    /// loop. Returns the drained events so the frontend can repaint the
    /// affected rows.
    pub fn pump_events(&mut self) -> Vec<WorkerEvent> {
        let events: Vec<WorkerEvent> = match &self.job {
            Some(job) => job.events.try_iter().collect(),
            None => return Vec::new(),
        };

        for event in &events {
            match event {
                WorkerEvent::ItemConverted { path, outcome } => {
                    self.progress.completed += 1;
                    match outcome {
                        Ok(_) => {
                            // Only the controller flips the processed flag.
                            self.queue.mark_processed(path);
                        }
                        Err(e) => {
                            self.progress.failed += 1;
                            warn!(path = %path.display(), error = %e, "conversion failed, item left unprocessed");
                        }
                    }
                }
                WorkerEvent::Finished(summary) => {
                    self.state = if summary.cancelled {
                        JobState::Stopped
                    } else {
                        JobState::Completed
                    };
                    debug!(state = ?self.state, "conversion settled");
                    if let Some(job) = self.job.take() {
                        let _ = job.join();
                    }
                }
            }
        }
        events
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| supported_input_extensions().contains(&ext.as_str()))
}
