//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and reduce.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Everything is statically linked into the binary.

use super::params::ReduceParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// A backend can report source dimensions and execute a resize-and-reencode,
/// so the rest of the codebase is backend-agnostic. The worker loop and the
/// controller are tested against a mock that records operations instead of
/// touching pixels.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding the full image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a reduce operation: decode, resize to the exact target
    /// dimensions, re-encode as JPEG at the given quality, write to
    /// `params.output` (overwriting).
    fn reduce(&self, params: &ReduceParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations without doing pixel work.
    /// Uses Mutex (not RefCell) so it is Sync and can cross the worker
    /// thread boundary.
    ///
    /// `reduce` writes an empty file at the output path so callers that
    /// verify the output exists behave as they would with the real backend.
    /// Sources listed in `fail_sources` fail both identify and reduce,
    /// simulating an unreadable or undecodable file.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub fail_sources: Mutex<Vec<PathBuf>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Reduce {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    /// Dimensions returned by `identify` when no scripted result is queued.
    pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions {
        width: 800,
        height: 600,
    };

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Mark a source path as failing (identify and reduce both error).
        pub fn fail_for(self, source: impl Into<PathBuf>) -> Self {
            self.fail_sources.lock().unwrap().push(source.into());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn should_fail(&self, path: &Path) -> bool {
            self.fail_sources.lock().unwrap().iter().any(|p| p == path)
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            if self.should_fail(path) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock decode failure: {}",
                    path.display()
                )));
            }

            Ok(self
                .identify_results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(DEFAULT_DIMENSIONS))
        }

        fn reduce(&self, params: &ReduceParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Reduce {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });

            if self.should_fail(&params.source) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock reduce failure: {}",
                    params.source.display()
                )));
            }

            std::fs::write(&params.output, b"")?;
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_falls_back_to_default_dimensions() {
        let backend = MockBackend::new();
        let dims = backend.identify(Path::new("/test/any.jpg")).unwrap();
        assert_eq!(dims, DEFAULT_DIMENSIONS);
    }

    #[test]
    fn mock_records_reduce_and_touches_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.jpg");
        let backend = MockBackend::new();

        backend
            .reduce(&ReduceParams {
                source: "/source.jpg".into(),
                output: output.clone(),
                width: 200,
                height: 150,
                quality: super::super::params::Quality::new(90),
            })
            .unwrap();

        assert!(output.exists());
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Reduce {
                width: 200,
                height: 150,
                quality: 90,
                ..
            }
        ));
    }

    #[test]
    fn mock_fails_scripted_sources() {
        let backend = MockBackend::new().fail_for("/bad.png");

        assert!(backend.identify(Path::new("/bad.png")).is_err());
        assert!(backend.identify(Path::new("/good.jpg")).is_ok());
    }
}
