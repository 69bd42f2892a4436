#![forbid(unsafe_code)]

//! Constant-speed marquee over a duplicated content run.
//!
//! The track holds the source items repeated [`copies`](MarqueeSpec::copies)
//! times and slides left at `speed` pixels per second. When the offset
//! reaches one run width it snaps back to zero, which is invisible because
//! the next copy sits exactly where the first one started.

use std::time::Duration;

use super::{MotionDriver, MotionError};
use crate::animation::phase;

/// Upper bound on [`MarqueeSpec::copies`]. Specs needing more are rejected
/// by [`MarqueeSpec::validate`].
pub const MAX_COPIES: usize = 256;

/// Geometry and speed of a marquee.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarqueeSpec {
    /// Number of distinct source items.
    pub item_count: usize,
    /// Width of one item including its gap, pixels.
    pub item_extent: f32,
    /// Scroll speed, pixels per second.
    pub speed: f32,
    /// Visible width of the track, pixels.
    pub viewport: f32,
}

impl MarqueeSpec {
    /// Create a spec.
    #[must_use]
    pub fn new(item_count: usize, item_extent: f32, speed: f32, viewport: f32) -> Self {
        Self {
            item_count,
            item_extent,
            speed,
            viewport,
        }
    }

    /// Check that the marquee can move.
    pub fn validate(&self) -> Result<(), MotionError> {
        if self.item_count == 0 {
            return Err(MotionError::EmptyContent);
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.item_extent) || !positive(self.speed) {
            return Err(MotionError::InvalidSpeed);
        }
        let ratio = self.viewport / self.single_width();
        if ratio.is_nan() || ratio > (MAX_COPIES - 1) as f32 {
            return Err(MotionError::ExtentTooSmall);
        }
        Ok(())
    }

    /// Width of one copy of the source run.
    #[must_use]
    pub fn single_width(&self) -> f32 {
        self.item_count as f32 * self.item_extent
    }

    /// Copies needed so the viewport is covered at every offset.
    ///
    /// At least two and at most [`MAX_COPIES`].
    #[must_use]
    pub fn copies(&self) -> usize {
        let single = self.single_width();
        if !(single > 0.0) || !(self.viewport > 0.0) {
            return 2;
        }
        let ratio = self.viewport / single;
        if ratio >= (MAX_COPIES - 1) as f32 {
            return MAX_COPIES;
        }
        (ratio.ceil() as usize + 1).clamp(2, MAX_COPIES)
    }

    /// The rendered track: `items` repeated [`copies`](Self::copies) times.
    #[must_use]
    pub fn run<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let copies = self.copies();
        let mut out = Vec::with_capacity(items.len() * copies);
        for _ in 0..copies {
            out.extend_from_slice(items);
        }
        out
    }
}

impl MotionDriver for MarqueeSpec {
    /// Time for the track to move by one run width.
    fn cycle(&self) -> Duration {
        if self.validate().is_err() {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(f64::from(self.single_width()) / f64::from(self.speed))
            .unwrap_or(Duration::ZERO)
    }

    /// Offset in `(-single_width, 0]`.
    fn offset(&self, elapsed: Duration) -> f32 {
        -(phase(elapsed, self.cycle()) * self.single_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logos() -> MarqueeSpec {
        MarqueeSpec::new(6, 160.0, 60.0, 1280.0)
    }

    #[test]
    fn six_logos_render_at_least_twelve_items() {
        let spec = MarqueeSpec::new(6, 160.0, 60.0, 900.0);
        let names = ["Vortex", "Quantum", "Stellar", "Apex", "NovaWorks", "Zenith"];
        let run = spec.run(&names);
        assert_eq!(run.len(), 12);
        assert_eq!(run[6], "Vortex");
    }

    #[test]
    fn wide_viewport_needs_more_copies() {
        let spec = logos();
        // single 960 < 1280 viewport: three copies keep the viewport covered.
        assert_eq!(spec.copies(), 3);
        assert!((spec.copies() - 1) as f32 * spec.single_width() >= spec.viewport);
    }

    #[test]
    fn hairline_extent_is_capped_and_rejected() {
        let spec = MarqueeSpec::new(6, 1e-30, 60.0, 672.0);
        assert_eq!(spec.validate(), Err(MotionError::ExtentTooSmall));
        assert_eq!(spec.copies(), MAX_COPIES);
        assert_eq!(spec.run(&[1, 2, 3, 4, 5, 6]).len(), 6 * MAX_COPIES);

        let thin = MarqueeSpec::new(6, 0.001, 60.0, 672.0);
        assert_eq!(thin.validate(), Err(MotionError::ExtentTooSmall));
        assert_eq!(thin.copies(), MAX_COPIES);
    }

    #[test]
    fn copy_limit_boundary() {
        // ratio exactly MAX_COPIES - 1 is still accepted.
        let edge = MarqueeSpec::new(1, 4.0, 60.0, 4.0 * (MAX_COPIES - 1) as f32);
        assert_eq!(edge.validate(), Ok(()));
        assert_eq!(edge.copies(), MAX_COPIES);
        let over = MarqueeSpec::new(1, 4.0, 60.0, 4.0 * MAX_COPIES as f32);
        assert_eq!(over.validate(), Err(MotionError::ExtentTooSmall));
    }

    #[test]
    fn cycle_is_single_width_over_speed() {
        assert_eq!(logos().cycle(), Duration::from_secs(16));
    }

    #[test]
    fn offset_wraps_to_zero() {
        let spec = logos();
        assert_eq!(spec.offset(Duration::ZERO), 0.0);
        assert!((spec.offset(Duration::from_secs(4)) + 240.0).abs() < 1e-3);
        assert_eq!(spec.offset(Duration::from_secs(16)), 0.0);
        assert_eq!(
            spec.offset(Duration::from_millis(2500)),
            spec.offset(Duration::from_millis(18_500))
        );
    }

    #[test]
    fn offset_stays_in_range() {
        let spec = logos();
        for ms in (0..40_000).step_by(333) {
            let o = spec.offset(Duration::from_millis(ms));
            assert!(o <= 0.0 && o > -spec.single_width(), "offset {o} at {ms}ms");
        }
    }

    #[test]
    fn validation() {
        assert_eq!(
            MarqueeSpec::new(0, 10.0, 10.0, 10.0).validate(),
            Err(MotionError::EmptyContent)
        );
        assert_eq!(
            MarqueeSpec::new(3, 10.0, 0.0, 10.0).validate(),
            Err(MotionError::InvalidSpeed)
        );
        assert_eq!(MarqueeSpec::new(3, 10.0, -1.0, 10.0).cycle(), Duration::ZERO);
    }
}
