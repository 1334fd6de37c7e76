//! The queue of images awaiting (or having undergone) conversion.
//!
//! Each entry is a filesystem path plus a `processed` flag. The path is the
//! unique key: adding the same path twice leaves exactly one entry. Entries
//! are never removed automatically — only an explicit remove takes them out,
//! so a successfully converted item stays visible with its flag set, and a
//! failed item stays eligible for a later run.
//!
//! The queue lives on the interactive side. A conversion job gets a snapshot
//! of the unprocessed paths ([`ImageQueue::pending`]); only the controller
//! flips `processed`, in response to worker notifications.

use std::path::{Path, PathBuf};

/// A single queued file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedImage {
    pub path: PathBuf,
    /// Set once the item has been successfully converted at least once.
    pub processed: bool,
}

/// Ordered, path-deduplicated list of queued files.
#[derive(Debug, Clone, Default)]
pub struct ImageQueue {
    items: Vec<QueuedImage>,
}

impl ImageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path if not already queued. Returns whether it was added.
    /// New entries start unprocessed.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.items.iter().any(|item| item.path == path) {
            return false;
        }
        self.items.push(QueuedImage {
            path,
            processed: false,
        });
        true
    }

    /// Remove the entries at the given indices. Out-of-range indices are
    /// ignored; remaining entries keep their relative order.
    pub fn remove_selected(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.items.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            self.items.remove(index);
        }
    }

    /// Mark the entry with the given path as processed. Returns whether an
    /// entry was found.
    pub fn mark_processed(&mut self, path: &Path) -> bool {
        match self.items.iter_mut().find(|item| item.path == path) {
            Some(item) => {
                item.processed = true;
                true
            }
            None => false,
        }
    }

    /// Snapshot of the unprocessed paths, in queue order. This is what a
    /// conversion job iterates; the queue itself never crosses threads.
    pub fn pending(&self) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter(|item| !item.processed)
            .map(|item| item.path.clone())
            .collect()
    }

    pub fn items(&self) -> &[QueuedImage] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&QueuedImage> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
