#![forbid(unsafe_code)]

//! Autoplaying coverflow carousel.
//!
//! The carousel position is a fractional slide index that advances by one
//! slide every `slide_duration` and wraps after the last slide. Off-center
//! slides are rotated, shifted and pushed back in proportion to their
//! circular distance from the position; the centered slide is undistorted.

use std::time::Duration;

use super::{MotionDriver, MotionError};
use crate::animation::phase;

/// Falloff applied to off-center slides.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverflowParams {
    /// Degrees of Y rotation per slide of distance.
    /// Default: 10.0
    pub rotate: f32,
    /// Pixels of horizontal shift per slide of distance.
    /// Default: 20.0
    pub stretch: f32,
    /// Pixels pushed back along Z per slide of distance.
    /// Default: 200.0
    pub depth: f32,
    /// Multiplier applied to the distance before the falloff.
    /// Default: 1.0
    pub modifier: f32,
    /// Scale of a slide one step away (1.0 disables scaling).
    /// Default: 1.0
    pub scale: f32,
}

impl Default for CoverflowParams {
    fn default() -> Self {
        Self {
            rotate: 10.0,
            stretch: 20.0,
            depth: 200.0,
            modifier: 1.0,
            scale: 1.0,
        }
    }
}

/// Transform of one slide at a given carousel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTransform {
    /// Slide index.
    pub index: usize,
    /// Signed falloff multiplier (0 when centered, positive left of center).
    pub offset: f32,
    /// Rotation about Y, degrees.
    pub rotate_y: f32,
    /// Horizontal shift, pixels.
    pub translate_x: f32,
    /// Depth shift, pixels (never positive).
    pub translate_z: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Stacking order; nearer slides stack higher.
    pub z_index: i32,
}

/// Slide count, pacing and falloff of a coverflow carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverflowSpec {
    /// Number of slides.
    pub slide_count: usize,
    /// Time to traverse one slide.
    pub slide_duration: Duration,
    /// Slide centered at start.
    pub initial_slide: usize,
    /// Falloff parameters.
    pub params: CoverflowParams,
}

impl CoverflowSpec {
    /// Create a spec with default falloff.
    #[must_use]
    pub fn new(slide_count: usize, slide_duration: Duration, initial_slide: usize) -> Self {
        Self {
            slide_count,
            slide_duration,
            initial_slide,
            params: CoverflowParams::default(),
        }
    }

    /// Replace the falloff parameters.
    #[must_use]
    pub fn params(mut self, params: CoverflowParams) -> Self {
        self.params = params;
        self
    }

    /// Check that the carousel can move.
    pub fn validate(&self) -> Result<(), MotionError> {
        if self.slide_count == 0 {
            return Err(MotionError::EmptyContent);
        }
        if self.slide_duration.is_zero() {
            return Err(MotionError::InvalidDuration);
        }
        Ok(())
    }

    /// Position shown at rest: the initial slide, wrapped into range.
    #[must_use]
    pub fn rest_position(&self) -> f32 {
        if self.slide_count == 0 {
            return 0.0;
        }
        (self.initial_slide % self.slide_count) as f32
    }

    /// Fractional slide position after `elapsed` autoplay, in `[0, slide_count)`.
    #[must_use]
    pub fn position_at(&self, elapsed: Duration) -> f32 {
        if self.slide_count == 0 {
            return 0.0;
        }
        let m = self.slide_count as f32;
        let advanced = phase(elapsed, self.cycle()) * m;
        let p = (self.rest_position() + advanced).rem_euclid(m);
        // rem_euclid can round up to m itself for values just below m.
        if p >= m { 0.0 } else { p }
    }

    /// Slide nearest to `position`.
    #[must_use]
    pub fn active_index(&self, position: f32) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        (position.round() as usize) % self.slide_count
    }

    /// Transforms of every slide for a carousel at `position`.
    #[must_use]
    pub fn slide_transforms(&self, position: f32) -> Vec<SlideTransform> {
        let m = self.slide_count as f32;
        let p = self.params;
        (0..self.slide_count)
            .map(|index| {
                let raw = position - index as f32;
                let distance = (raw + m / 2.0).rem_euclid(m) - m / 2.0;
                let mult = distance * p.modifier;
                let reach = mult.abs();
                SlideTransform {
                    index,
                    offset: mult,
                    rotate_y: p.rotate * mult,
                    translate_x: p.stretch * mult,
                    translate_z: -p.depth * reach,
                    scale: 1.0 - (1.0 - p.scale) * reach,
                    z_index: -(reach.round() as i32),
                }
            })
            .collect()
    }
}

impl MotionDriver for CoverflowSpec {
    /// Full rotation through every slide.
    fn cycle(&self) -> Duration {
        let count = u32::try_from(self.slide_count).unwrap_or(u32::MAX);
        self.slide_duration.saturating_mul(count)
    }

    fn offset(&self, elapsed: Duration) -> f32 {
        self.position_at(elapsed)
    }
}
