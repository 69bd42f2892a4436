#![forbid(unsafe_code)]

//! Pointer parallax: pointer position over a region as a bounded tilt vector.
//!
//! Feed pointer events via [`ParallaxTracker::on_move`] and
//! [`ParallaxTracker::on_leave`]; read the result from
//! [`ParallaxTracker::vector`]. A [`TiltMapping`] turns the vector into the
//! rotation a consumer applies.
//!
//! # Invariants
//!
//! 1. Each axis of the vector is bounded by `half_extent / divisor`.
//! 2. Right after `on_leave` the vector is exactly `{0, 0}`.
//! 3. Trackers share nothing: each region owns its own instance.
//!
//! The tracker never eases. Smoothing, if any, belongs to the consumer's
//! transition duration.

use crate::geometry::Region;

/// Pointer displacement scaled by the region's sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerVector {
    /// Horizontal component (positive = right of center).
    pub x: f32,
    /// Vertical component (positive = below center).
    pub y: f32,
}

impl PointerVector {
    /// The neutral vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// How pointer displacement is scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sensitivity {
    /// Divide displacement by a fixed constant on both axes.
    Divisor(f32),
    /// Scale each axis so that the region's edge maps to this many degrees.
    MaxTilt(f32),
}

impl Sensitivity {
    /// Per-axis divisors for a region.
    fn divisors(self, region: &Region) -> (f32, f32) {
        match self {
            Self::Divisor(d) => (d, d),
            Self::MaxTilt(deg) => {
                let (hx, hy) = region.half_extent();
                (hx / deg, hy / deg)
            }
        }
    }
}

/// Tracks one bounded region.
#[derive(Debug, Clone)]
pub struct ParallaxTracker {
    region: Region,
    sensitivity: Sensitivity,
    vector: PointerVector,
}

impl ParallaxTracker {
    /// Create a tracker over `region`.
    #[must_use]
    pub fn new(region: Region, sensitivity: Sensitivity) -> Self {
        Self {
            region,
            sensitivity,
            vector: PointerVector::ZERO,
        }
    }

    /// Update the tracked bounds (layout change). The vector is kept.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Tracked bounds.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    /// Largest magnitude each axis can reach.
    #[must_use]
    pub fn bound(&self) -> PointerVector {
        let (hx, hy) = self.region.half_extent();
        let (dx, dy) = self.sensitivity.divisors(&self.region);
        PointerVector::new(axis(hx, dx), axis(hy, dy))
    }

    /// Pointer moved to `(x, y)` in page coordinates.
    ///
    /// Positions outside the region are clamped to its edge.
    pub fn on_move(&mut self, x: f32, y: f32) -> PointerVector {
        if self.region.is_empty() || !x.is_finite() || !y.is_finite() {
            return self.vector;
        }
        let (cx, cy) = self.region.center();
        let (dx, dy) = self.sensitivity.divisors(&self.region);
        let bound = self.bound();
        self.vector = PointerVector::new(
            axis(x - cx, dx).clamp(-bound.x, bound.x),
            axis(y - cy, dy).clamp(-bound.y, bound.y),
        );
        crate::trace!(x = self.vector.x, y = self.vector.y, "pointer vector");
        self.vector
    }

    /// Pointer left the region: snap back to neutral.
    pub fn on_leave(&mut self) {
        self.vector = PointerVector::ZERO;
    }

    /// Current vector.
    #[must_use]
    pub fn vector(&self) -> PointerVector {
        self.vector
    }
}

fn axis(displacement: f32, divisor: f32) -> f32 {
    if divisor > 0.0 && divisor.is_finite() {
        displacement / divisor
    } else {
        0.0
    }
}

/// Rotation derived from a pointer vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x: f32,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y: f32,
}

/// How a consumer maps the vector to rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltMapping {
    /// Hero scene: the inner layer turns away from the pointer,
    /// `rotateY(-x) rotateX(y)`, inside a fixed outer perspective.
    Scene,
    /// Profile card: the card leans toward the pointer,
    /// `rotateX(-y) rotateY(x)`.
    Card,
}

impl TiltMapping {
    /// Map a vector to rotation.
    #[must_use]
    pub fn tilt(self, v: PointerVector) -> Tilt {
        match self {
            Self::Scene => Tilt {
                rotate_x: v.y,
                rotate_y: -v.x,
            },
            Self::Card => Tilt {
                rotate_x: -v.y,
                rotate_y: v.x,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> ParallaxTracker {
        ParallaxTracker::new(Region::from_size(1600.0, 900.0), Sensitivity::Divisor(40.0))
    }

    #[test]
    fn center_is_neutral() {
        let mut t = hero();
        assert_eq!(t.on_move(800.0, 450.0), PointerVector::ZERO);
    }

    #[test]
    fn displacement_divided_per_axis() {
        let mut t = hero();
        let v = t.on_move(1000.0, 250.0);
        assert_eq!(v, PointerVector::new(5.0, -5.0));
    }

    #[test]
    fn bound_is_half_extent_over_divisor() {
        let t = hero();
        assert_eq!(t.bound(), PointerVector::new(20.0, 11.25));
    }

    #[test]
    fn outside_region_is_clamped() {
        let mut t = hero();
        let v = t.on_move(5000.0, -300.0);
        assert_eq!(v, PointerVector::new(20.0, -11.25));
    }

    #[test]
    fn leave_resets_exactly() {
        let mut t = hero();
        t.on_move(10.0, 10.0);
        t.on_leave();
        assert!(t.vector().is_zero());
    }

    #[test]
    fn region_offset_respected() {
        let mut t = ParallaxTracker::new(Region::new(200.0, 100.0, 400.0, 600.0), Sensitivity::Divisor(40.0));
        assert_eq!(t.on_move(400.0, 400.0), PointerVector::ZERO);
    }

    #[test]
    fn max_tilt_reaches_limit_on_edge() {
        let mut card = ParallaxTracker::new(Region::new(0.0, 0.0, 384.0, 520.0), Sensitivity::MaxTilt(12.5));
        let v = card.on_move(384.0, 0.0);
        assert!((v.x - 12.5).abs() < 1e-4);
        assert!((v.y + 12.5).abs() < 1e-4);
        let tilt = TiltMapping::Card.tilt(v);
        // Pointer top-right: card leans back on X and turns right on Y.
        assert!((tilt.rotate_x - 12.5).abs() < 1e-4);
        assert!((tilt.rotate_y - 12.5).abs() < 1e-4);
    }

    #[test]
    fn scene_mapping_inverts_horizontal() {
        let tilt = TiltMapping::Scene.tilt(PointerVector::new(3.0, -2.0));
        assert_eq!(tilt, Tilt { rotate_x: -2.0, rotate_y: -3.0 });
    }

    #[test]
    fn independent_trackers() {
        let mut a = hero();
        let b = hero();
        a.on_move(0.0, 0.0);
        assert!(!a.vector().is_zero());
        assert!(b.vector().is_zero());
    }

    #[test]
    fn empty_region_ignores_moves() {
        let mut t = ParallaxTracker::new(Region::default(), Sensitivity::Divisor(40.0));
        assert_eq!(t.on_move(50.0, 50.0), PointerVector::ZERO);
    }
}
