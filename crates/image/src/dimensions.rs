//! Thumbnail dimension calculation.
//!
//! The height is derived from an integer divisor rather than an exact ratio:
//! `divisor = max(1, source_width / target_width)` and
//! `height = round(source_height / divisor)`. Width is always forced to the
//! target width, so sources narrower than the target are upscaled.

use serde::{Deserialize, Serialize};

/// Fixed thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 100;

/// Target dimensions for one resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeSpec {
    /// Output width
    pub target_width: u32,
    /// Output height derived from the source height and divisor
    pub computed_height: u32,
    /// Integer scale factor, never below 1
    pub divisor: u32,
}

impl ResizeSpec {
    /// Returns true if either output dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.target_width == 0 || self.computed_height == 0
    }
}

/// Integer divisor between source and target width, clamped to at least 1.
pub fn divisor(source_width: u32, target_width: u32) -> u32 {
    source_width.checked_div(target_width).unwrap_or(0).max(1)
}

/// Calculate thumbnail dimensions.
///
/// # Arguments
/// * `source_width` - Width of the decoded source
/// * `source_height` - Height of the decoded source
/// * `target_width` - Width of the thumbnail
///
/// # Returns
/// `(target_width, target_height)`
///
/// # Example
/// ```
/// use thumbnailer_image::compute_target_dimensions;
///
/// assert_eq!(compute_target_dimensions(1000, 500, 100), (100, 50));
/// // Narrower than the target: divisor clamps to 1, height is kept.
/// assert_eq!(compute_target_dimensions(150, 100, 100), (100, 100));
/// ```
pub fn compute_target_dimensions(source_width: u32, source_height: u32, target_width: u32) -> (u32, u32) {
    let spec = resize_spec(source_width, source_height, target_width);
    (spec.target_width, spec.computed_height)
}

/// Same as [`compute_target_dimensions`] but keeps the divisor for logging.
pub fn resize_spec(source_width: u32, source_height: u32, target_width: u32) -> ResizeSpec {
    let divisor = divisor(source_width, target_width);
    // f64::round rounds half away from zero.
    let computed_height = (f64::from(source_height) / f64::from(divisor)).round() as u32;

    ResizeSpec {
        target_width,
        computed_height,
        divisor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_width_keeps_height() {
        assert_eq!(compute_target_dimensions(100, 50, 100), (100, 50));
    }

    #[test]
    fn test_downscale_by_ten() {
        let spec = resize_spec(1000, 500, 100);
        assert_eq!(spec.divisor, 10);
        assert_eq!((spec.target_width, spec.computed_height), (100, 50));
    }

    #[test]
    fn test_fractional_divisor_floors() {
        let spec = resize_spec(150, 100, 100);
        assert_eq!(spec.divisor, 1);
        assert_eq!(spec.computed_height, 100);
    }

    #[test]
    fn test_smaller_source_upscales_width() {
        assert_eq!(compute_target_dimensions(40, 30, 100), (100, 30));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // divisor 10: 2.5 -> 3, 4.5 -> 5
        assert_eq!(compute_target_dimensions(1000, 25, 100), (100, 3));
        assert_eq!(compute_target_dimensions(1000, 45, 100), (100, 5));
    }

    #[test]
    fn test_tiny_height_degenerates() {
        let spec = resize_spec(1000, 4, 100);
        assert_eq!(spec.computed_height, 0);
        assert!(spec.is_degenerate());
    }

    #[test]
    fn test_zero_target_width_clamps_divisor() {
        assert_eq!(divisor(500, 0), 1);
    }

    proptest! {
        #[test]
        fn prop_divisor_is_at_least_one(w in 0u32..100_000, t in 1u32..2_000) {
            prop_assert!(divisor(w, t) >= 1);
        }

        #[test]
        fn prop_width_is_always_target(w in 1u32..20_000, h in 1u32..20_000, t in 1u32..2_000) {
            let (tw, _) = compute_target_dimensions(w, h, t);
            prop_assert_eq!(tw, t);
        }

        #[test]
        fn prop_height_never_exceeds_source(w in 1u32..20_000, h in 1u32..20_000, t in 1u32..2_000) {
            let (_, th) = compute_target_dimensions(w, h, t);
            prop_assert!(th <= h);
        }
    }
}
