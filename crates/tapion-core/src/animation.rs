#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f32` values (0.0–1.0).
//! Reveal transitions are built from [`Fade`] wrapped in [`Delayed`]; the
//! continuous loops use [`phase`] to stay periodic without accumulating
//! floating-point drift.
//!
//! Animations are clock-agnostic. The host decides how much time has
//! passed and forwards it through [`Animation::tick`].

pub mod stagger;

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Named timing curve.
///
/// Unlike a bare [`EasingFn`], a curve knows its CSS keyword so that
/// presentations can be handed to a browser host unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Curve {
    /// Constant velocity.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end. Used by every entrance reveal.
    #[default]
    EaseOut,
    /// Slow start and end. Used by disclosure panels.
    EaseInOut,
}

impl Curve {
    /// The easing function implementing this curve.
    #[must_use]
    pub fn easing(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
        }
    }

    /// CSS `transition-timing-function` keyword.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Linear interpolation between `from` and `to` at progress `t` (clamped).
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Position within a repeating cycle, in [0.0, 1.0).
///
/// Computed from integer nanoseconds so that `phase(t) == phase(t + period)`
/// holds exactly, no matter how long the loop has been running.
/// A zero period yields 0.0.
#[must_use]
pub fn phase(elapsed: Duration, period: Duration) -> f32 {
    let period_ns = period.as_nanos();
    if period_ns == 0 {
        return 0.0;
    }
    let within = elapsed.as_nanos() % period_ns;
    (within as f64 / period_ns as f64) as f32
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance by `dt` of host time.
    fn tick(&mut self, dt: Duration);

    /// Whether the end state is reached.
    fn is_complete(&self) -> bool;

    /// Current eased value.
    fn value(&self) -> f32;
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// Progress from 0.0 to 1.0 over a fixed duration, shaped by an easing fn.
///
/// Elapsed time accumulates as a [`Duration`], so many small ticks land on
/// the same value as one large tick.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Linear fade over `duration`. A zero duration completes on the first
    /// non-empty tick.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
            easing: linear,
        }
    }

    /// Replace the easing (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    fn progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }
}

// ---------------------------------------------------------------------------
// Delayed
// ---------------------------------------------------------------------------

/// Holds at 0.0 for `delay`, then plays the inner animation.
///
/// A zero delay starts on the first tick, including a zero-length one.
/// Time past the delay is forwarded, so a late first tick lands mid-play.
#[derive(Debug, Clone, Copy)]
pub struct Delayed<A> {
    delay: Duration,
    waited: Duration,
    inner: A,
    started: bool,
}

impl<A: Animation> Delayed<A> {
    /// Wait `delay`, then play `inner`.
    pub fn new(delay: Duration, inner: A) -> Self {
        Self {
            delay,
            waited: Duration::ZERO,
            inner,
            started: false,
        }
    }

    /// Whether the delay has elapsed.
    pub fn has_started(&self) -> bool {
        self.started
    }
}

impl<A: Animation> Animation for Delayed<A> {
    fn tick(&mut self, dt: Duration) {
        if self.started {
            self.inner.tick(dt);
            return;
        }
        self.waited = self.waited.saturating_add(dt);
        if self.waited >= self.delay {
            self.started = true;
            let late = self.waited - self.delay;
            if !late.is_zero() {
                self.inner.tick(late);
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.started && self.inner.is_complete()
    }

    fn value(&self) -> f32 {
        if self.started { self.inner.value() } else { 0.0 }
    }
}

/// Shorthand for [`Delayed::new`].
pub fn delay<A: Animation>(d: Duration, a: A) -> Delayed<A> {
    Delayed::new(d, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn easings_are_clamped_and_pinned() {
        for f in [linear, ease_in, ease_out, ease_in_out] {
            assert_eq!(f(0.0), 0.0);
            assert_eq!(f(1.0), 1.0);
            assert_eq!(f(-3.0), 0.0);
            assert_eq!(f(7.0), 1.0);
        }
        assert!(ease_out(0.5) > linear(0.5));
        assert!(ease_in(0.5) < linear(0.5));
        assert!(close(ease_in_out(0.5), 0.5));
    }

    #[test]
    fn curve_css_keywords() {
        assert_eq!(Curve::Linear.css(), "linear");
        assert_eq!(Curve::EaseOut.css(), "ease-out");
        assert_eq!(Curve::EaseInOut.css(), "ease-in-out");
        assert_eq!(Curve::default(), Curve::EaseOut);
    }

    #[test]
    fn curve_easing_matches_function() {
        assert_eq!(Curve::EaseIn.easing()(0.5), ease_in(0.5));
        assert_eq!(Curve::EaseInOut.easing()(0.25), ease_in_out(0.25));
    }

    #[test]
    fn lerp_clamps_progress() {
        assert!(close(lerp(40.0, 0.0, 0.5), 20.0));
        assert_eq!(lerp(40.0, 0.0, 2.0), 0.0);
        assert_eq!(lerp(40.0, 0.0, -1.0), 40.0);
    }

    // ---- phase ----

    #[test]
    fn phase_wraps_exactly() {
        let period = ms(2500);
        let t = ms(1234);
        assert_eq!(phase(t, period), phase(t + period, period));
        assert_eq!(phase(t, period), phase(t + period * 1000, period));
    }

    #[test]
    fn phase_is_zero_at_cycle_boundaries() {
        let period = Duration::from_secs(3);
        assert_eq!(phase(Duration::ZERO, period), 0.0);
        assert_eq!(phase(period * 7, period), 0.0);
    }

    #[test]
    fn phase_zero_period() {
        assert_eq!(phase(ms(1000), Duration::ZERO), 0.0);
    }

    // ---- entrance transitions ----

    #[test]
    fn seven_hundred_ms_entrance() {
        let mut fade = Fade::new(ms(700)).easing(ease_out);
        assert_eq!(fade.value(), 0.0);
        fade.tick(ms(350));
        assert!(close(fade.value(), 0.75));
        fade.tick(ms(350));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn frame_ticks_match_one_large_tick() {
        let mut stepped = Fade::new(ms(700));
        for _ in 0..25 {
            stepped.tick(ms(16));
        }
        let mut jumped = Fade::new(ms(700));
        jumped.tick(ms(400));
        assert_eq!(stepped.value(), jumped.value());
    }

    #[test]
    fn zero_length_fade_completes() {
        let mut fade = Fade::new(Duration::ZERO);
        fade.tick(ms(1));
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn cascade_item_holds_then_plays() {
        // Third item of a 100ms-step cascade.
        let mut item = delay(ms(200), Fade::new(ms(700)));
        item.tick(ms(150));
        assert!(!item.has_started());
        assert_eq!(item.value(), 0.0);
        item.tick(ms(50));
        assert!(item.has_started());
        item.tick(ms(700));
        assert!(item.is_complete());
        assert_eq!(item.value(), 1.0);
    }

    #[test]
    fn late_tick_lands_mid_transition() {
        let mut item = delay(ms(100), Fade::new(ms(1000)));
        item.tick(ms(200));
        assert!(item.has_started());
        assert!(close(item.value(), 0.1));
    }

    #[test]
    fn zero_delay_starts_on_zero_tick() {
        let mut item = delay(Duration::ZERO, Fade::new(ms(100)));
        assert!(!item.has_started());
        item.tick(Duration::ZERO);
        assert!(item.has_started());
        assert_eq!(item.value(), 0.0);
    }

    #[test]
    fn ticks_past_the_end_stay_at_rest() {
        let mut fade = Fade::new(ms(100));
        fade.tick(ms(1000));
        fade.tick(ms(1000));
        assert_eq!(fade.value(), 1.0);
    }
}
