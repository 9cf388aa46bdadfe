use serde::{Deserialize, Serialize};

use crate::error::{MinimapError, MinimapResult};

/// Selected window expressed as a fraction of the full horizontal extent.
///
/// Both ends live in `[0, 1]` with `from <= to`. Drag-produced ranges also
/// keep `to - from >= MIN_SPAN`; programmatic assignments are only checked
/// for bounds and order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRange {
    pub from: f64,
    pub to: f64,
}

impl NormalizedRange {
    /// Narrowest window a drag can produce.
    pub const MIN_SPAN: f64 = 0.1;

    pub fn new(from: f64, to: f64) -> MinimapResult<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(MinimapError::InvalidRange { from, to });
        }
        if !(0.0..=1.0).contains(&from) || !(0.0..=1.0).contains(&to) || from > to {
            return Err(MinimapError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn full() -> Self {
        Self { from: 0.0, to: 1.0 }
    }

    /// Builds a range from already-clamped drag output, absorbing float noise
    /// at the `[0, 1]` edges.
    #[must_use]
    pub(crate) fn from_clamped(from: f64, to: f64) -> Self {
        let to = to.clamp(0.0, 1.0);
        let from = from.clamp(0.0, to);
        Self { from, to }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.to - self.from
    }

    /// Projects the range onto a surface of `surface_width` pixels.
    ///
    /// Returns `(left, width)` in pixels.
    #[must_use]
    pub fn pixel_extent(self, surface_width: f64) -> (f64, f64) {
        (self.from * surface_width, self.span() * surface_width)
    }

    /// Maps both ends into data space: `min + (max - min) * value`.
    #[must_use]
    pub fn map_to_domain(self, min: f64, max: f64) -> (f64, f64) {
        let span = max - min;
        (min + span * self.from, min + span * self.to)
    }
}

impl Default for NormalizedRange {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::NormalizedRange;
    use crate::error::MinimapError;

    #[test]
    fn rejects_out_of_bounds_and_inverted_ranges() {
        for (from, to) in [(-0.1, 0.5), (0.2, 1.1), (0.7, 0.3), (f64::NAN, 0.5)] {
            let err = NormalizedRange::new(from, to).expect_err("range must be rejected");
            assert!(matches!(err, MinimapError::InvalidRange { .. }));
        }
    }

    #[test]
    fn accepts_narrow_programmatic_ranges() {
        let range = NormalizedRange::new(0.5, 0.52).expect("bounds and order are valid");
        assert!(range.span() < NormalizedRange::MIN_SPAN);
    }

    #[test]
    fn pixel_extent_and_domain_mapping_are_linear() {
        let range = NormalizedRange::new(0.25, 0.75).expect("valid");
        assert_eq!(range.pixel_extent(400.0), (100.0, 200.0));
        assert_eq!(range.map_to_domain(1_000.0, 2_000.0), (1_250.0, 1_750.0));
    }

    #[test]
    fn from_clamped_absorbs_edge_noise() {
        let range = NormalizedRange::from_clamped(-1e-17, 0.1);
        assert_eq!(range.from, 0.0);
        assert_eq!(range.to, 0.1);
    }
}
