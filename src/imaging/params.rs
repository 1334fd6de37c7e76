//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`reduce`](crate::reduce) module (which
//! decides what output to create) and the [`backend`](super::backend) (which
//! does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`Scale`] — Resize factor. Strictly positive; values above 1.0 upscale.
//! - [`ReduceParams`] — Full specification for one resize-and-reencode:
//!   source, output path, target dimensions, quality.

use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Resize factor applied to both dimensions.
///
/// A factor of 0.5 halves width and height; factors above 1.0 upscale.
/// The factor must be finite and strictly positive — a factor small enough
/// to round a dimension down to zero is caught later, at reduce time, where
/// the actual source dimensions are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    /// Create a scale from a raw factor. Returns `None` for factors that are
    /// not finite or not strictly positive.
    pub fn new(factor: f64) -> Option<Self> {
        (factor.is_finite() && factor > 0.0).then_some(Self(factor))
    }

    /// Create a scale from the percent representation shown to users
    /// (1–100, clamped). 50 means "half size".
    pub fn from_percent(percent: u32) -> Self {
        Self(percent.clamp(1, 100) as f64 / 100.0)
    }

    pub fn factor(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Parameters for a single resize-and-reencode operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_75() {
        assert_eq!(Quality::default().value(), 75);
    }

    #[test]
    fn scale_rejects_non_positive_factors() {
        assert!(Scale::new(0.0).is_none());
        assert!(Scale::new(-0.5).is_none());
        assert!(Scale::new(f64::NAN).is_none());
        assert!(Scale::new(f64::INFINITY).is_none());
    }

    #[test]
    fn scale_accepts_upscale_factors() {
        assert_eq!(Scale::new(2.0).unwrap().factor(), 2.0);
    }

    #[test]
    fn scale_from_percent_maps_and_clamps() {
        assert_eq!(Scale::from_percent(50).factor(), 0.5);
        assert_eq!(Scale::from_percent(100).factor(), 1.0);
        assert_eq!(Scale::from_percent(0).factor(), 0.01);
        assert_eq!(Scale::from_percent(400).factor(), 1.0);
    }

    #[test]
    fn scale_default_is_half() {
        assert_eq!(Scale::default().factor(), 0.5);
    }
}
