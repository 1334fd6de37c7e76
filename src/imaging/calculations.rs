//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Scale;

/// Calculate output dimensions for a scaled resize.
///
/// Both edges are multiplied by the scale factor and rounded to the nearest
/// pixel, so a 400x300 source at scale 0.5 becomes 200x150.
///
/// A small enough factor can round a dimension down to zero (e.g. a 3px edge
/// at scale 0.1). The result is returned as-is; rejecting degenerate
/// dimensions is the caller's responsibility, where the error can name the
/// offending source file.
///
/// # Examples
/// ```
/// # use pixreduce::imaging::{Scale, scaled_dimensions};
/// let half = Scale::new(0.5).unwrap();
/// assert_eq!(scaled_dimensions((400, 300), half), (200, 150));
///
/// // Rounding is to the nearest pixel, not truncation
/// assert_eq!(scaled_dimensions((3, 3), half), (2, 2));
/// ```
pub fn scaled_dimensions(original: (u32, u32), scale: Scale) -> (u32, u32) {
    let (width, height) = original;
    let factor = scale.factor();
    (
        (width as f64 * factor).round() as u32,
        (height as f64 * factor).round() as u32,
    )
}
