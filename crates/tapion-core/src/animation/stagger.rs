#![forbid(unsafe_code)]

//! Stagger utilities: the cascade delay policy for reveal groups.
//!
//! Every per-item reveal delay on the page comes from [`delay`] (or a
//! [`Cascade`], which packages its arguments). Sections choose a base
//! offset and a step; items never carry hand-written delay literals.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use tapion_core::animation::stagger::{Cascade, delay};
//!
//! let steps = Cascade::linear(Duration::from_millis(1400), Duration::from_millis(150));
//! assert_eq!(steps.delay_for(2), Duration::from_millis(1700));
//! assert_eq!(delay(Duration::from_millis(4600), 3, Duration::from_millis(50)),
//!            Duration::from_millis(4750));
//! ```
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. First offset is always `Duration::ZERO`.
//! 3. Offsets are monotonically non-decreasing for every mode whose easing
//!    is monotonic.
//! 4. For `Linear`, offset[i] = i * step, so `Cascade::delays` agrees with
//!    [`delay`] item by item.
//! 5. For `EaseIn`/`EaseOut`/`EaseInOut`, offsets follow the corresponding
//!    easing curve scaled to `(count - 1) * step`.
//!
//! # Failure Modes
//!
//! - Zero count: returns empty vec.
//! - Count of 1: returns `[Duration::ZERO]`.
//! - Zero step: all offsets equal the base.

use std::time::Duration;

use super::{EasingFn, ease_in, ease_in_out, ease_out};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How to distribute delay offsets across items.
#[derive(Debug, Clone, Copy)]
pub enum StaggerMode {
    /// Equal spacing: offset[i] = i * step.
    Linear,
    /// Slow start, accelerating gaps (quadratic ease-in).
    EaseIn,
    /// Fast start, decelerating gaps (quadratic ease-out).
    EaseOut,
    /// Slow start and end, faster middle (quadratic ease-in-out).
    EaseInOut,
    /// Custom easing function applied to normalized position.
    Custom(EasingFn),
}

/// A cascade policy: the first item waits `base`, each later item waits
/// `step` more (distributed by `mode`).
#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    /// Delay of the first item, relative to the reveal flip.
    pub base: Duration,
    /// Spacing between successive items.
    pub step: Duration,
    /// Distribution of the spacing.
    pub mode: StaggerMode,
}

impl Cascade {
    /// Equal spacing starting at `base`.
    #[must_use]
    pub const fn linear(base: Duration, step: Duration) -> Self {
        Self {
            base,
            step,
            mode: StaggerMode::Linear,
        }
    }

    /// A single offset shared by every item (no cascade).
    #[must_use]
    pub const fn fixed(base: Duration) -> Self {
        Self::linear(base, Duration::ZERO)
    }

    /// Replace the distribution mode (builder).
    #[must_use]
    pub const fn mode(mut self, mode: StaggerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Delay for the item at `index` under linear spacing.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        delay(self.base, index, self.step)
    }

    /// Delays for `count` items, honoring the distribution mode.
    #[must_use]
    pub fn delays(&self, count: usize) -> Vec<Duration> {
        stagger_offsets(count, self.step, self.mode)
            .into_iter()
            .map(|offset| self.base.saturating_add(offset))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// The cascade delay for the item at `index`: `base + index * step`.
///
/// Saturates instead of overflowing for absurd indices.
#[must_use]
pub fn delay(base: Duration, index: usize, step: Duration) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    base.saturating_add(step.saturating_mul(index))
}

/// Compute stagger delay offsets for `count` items.
///
/// Each offset represents when that item's animation should begin.
/// The first item always starts at `Duration::ZERO`, and the last item
/// starts at `(count - 1) * step`.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration, mode: StaggerMode) -> Vec<Duration> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Duration::ZERO];
    }

    // Exact integer arithmetic for Linear avoids float drift.
    let easing: EasingFn = match mode {
        StaggerMode::Linear => {
            return (0..count).map(|i| delay(Duration::ZERO, i, step)).collect();
        }
        StaggerMode::EaseIn => ease_in,
        StaggerMode::EaseOut => ease_out,
        StaggerMode::EaseInOut => ease_in_out,
        StaggerMode::Custom(f) => f,
    };

    let total_nanos = step.as_nanos() as f64 * (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            let eased = easing(t);
            let nanos = (total_nanos * eased as f64) as u64;
            Duration::from_nanos(nanos)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
