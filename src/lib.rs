//! # pixreduce
//!
//! Batch image reducer: drop a list of image files in a queue, pick a scale
//! and a JPEG quality, and convert them to reduced copies in a subfolder
//! next to each source — with per-item progress and cancellation, off the
//! interactive thread.
//!
//! This crate is the engine for an interactive frontend (the windowing,
//! drag-and-drop wiring, and widgets live elsewhere). The frontend owns an
//! event loop; pixreduce owns the queue, the conversion pipeline, and the
//! single background worker.
//!
//! # Architecture
//!
//! ```text
//! frontend loop ──► ConversionController ──spawn──► worker thread
//!        ▲                 │  queue, state               │ reduce_image per item
//!        │                 │                             │ (decode → Lanczos3 → JPEG)
//!        └── pump_events ◄─┴────── mpsc channel ◄────────┘ ItemConverted*, Finished
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pure-Rust pixel work: backend trait, dimension math, Lanczos3 resize + JPEG encode |
//! | [`reduce`] | The per-image operation: output path layout, degenerate-dimension checks, backend call |
//! | [`queue`] | Path-deduplicated list of queued files with per-item processed flags |
//! | [`worker`] | One background thread per job: ordered item loop, event channel, cooperative cancel |
//! | [`controller`] | Interactive-side owner: starts/cancels jobs, applies events, tracks progress |
//! | [`config`] | Optional `config.toml` with quality / scale / output folder |
//!
//! # Design Decisions
//!
//! ## One Worker, Strict Order
//!
//! A job runs on exactly one background thread and walks its items in queue
//! order. Notifications arrive in completion order over an `mpsc` channel,
//! so the consumer never has to reorder or lock: the queue stays on the
//! interactive side, the worker gets a path snapshot, and the channel is the
//! only bridge between the two.
//!
//! ## Per-Item Failure, Whole-Batch Survival
//!
//! Decode, resize, and write failures are per-item results, not batch
//! aborts. A failed item is reported and left unprocessed, which makes it
//! eligible for the next run — retry is implicit, not a mechanism.
//!
//! ## JPEG Output, Original Filename
//!
//! Every output is a JPEG written as `<dir>/<folder>/<original filename>`,
//! extension included, overwriting previous copies. Keeping the name
//! verbatim makes the mapping between source and copy obvious at a glance
//! in a file manager.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, JPEG
//! encoding) — pure Rust, no system dependencies, statically linked. Pixel
//! work sits behind the [`imaging::ImageBackend`] trait so the worker and
//! controller are tested with a recording mock instead of real pixels.

pub mod config;
pub mod controller;
pub mod imaging;
pub mod queue;
pub mod reduce;
pub mod worker;

pub use config::Settings;
pub use controller::{ControllerError, ConversionController, JobState, Progress, StatusIcons};
pub use imaging::{ImageBackend, Quality, RustBackend, Scale};
pub use queue::{ImageQueue, QueuedImage};
pub use reduce::{ReduceError, ReduceOptions, reduce_image};
pub use worker::{BatchSummary, CancelFlag, ConversionJob, JobHandle, WorkerEvent};
