#![forbid(unsafe_code)]

//! Continuous motion loops: finite content made to look infinite.
//!
//! Both variants ([`marquee`] and [`carousel`]) are periodic functions of
//! elapsed time. The visual state at `t` and at `t + cycle` is identical,
//! so a loop never special-cases its wraparound.
//!
//! The motion primitive itself is injected through a [`MotionFactory`].
//! A [`MotionLoop`] asks its factory for a driver shortly after mount; if
//! the factory fails, the loop degrades to a static presentation of the
//! same content instead of failing the view.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --mount--> Pending --poll (due)--> Running
//!                    |                  \-> Static (factory failed)
//!                    \--teardown--> TornDown <--teardown-- Running / Static
//! ```
//!
//! # Invariants
//!
//! 1. `teardown()` is unconditional, idempotent and never panics, whatever
//!    the state (including before the driver was built).
//! 2. A torn-down loop never builds a driver.
//! 3. A running driver is destroyed exactly once.

pub mod carousel;
pub mod marquee;

use std::fmt;
use std::time::Duration;

use crate::timer::Timeout;

pub use carousel::{CoverflowParams, CoverflowSpec, SlideTransform};
pub use marquee::MarqueeSpec;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a motion driver could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionError {
    /// The motion primitive is not available in this host.
    Unavailable(String),
    /// There is nothing to loop.
    EmptyContent,
    /// Speed or extent is zero, negative or not finite.
    InvalidSpeed,
    /// A zero traversal duration.
    InvalidDuration,
    /// Items are so narrow that covering the viewport needs too many copies.
    ExtentTooSmall,
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(what) => write!(f, "motion primitive unavailable: {what}"),
            Self::EmptyContent => f.write_str("motion loop has no content"),
            Self::InvalidSpeed => f.write_str("motion speed and extent must be positive"),
            Self::InvalidDuration => f.write_str("motion duration must be non-zero"),
            Self::ExtentTooSmall => f.write_str("marquee items too narrow to cover the viewport"),
        }
    }
}

impl std::error::Error for MotionError {}

// ---------------------------------------------------------------------------
// Driver and factory seams
// ---------------------------------------------------------------------------

/// A running periodic motion.
pub trait MotionDriver: fmt::Debug {
    /// Length of one seamless cycle.
    fn cycle(&self) -> Duration;

    /// Track offset after `elapsed` running time.
    ///
    /// Must satisfy `offset(t) == offset(t + cycle())`.
    fn offset(&self, elapsed: Duration) -> f32;

    /// Release resources held by the driver. Called once on teardown.
    fn destroy(&mut self) {}
}

/// What a loop asks its factory to build.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionSpec {
    /// Constant-speed horizontal marquee.
    Marquee(MarqueeSpec),
    /// Autoplaying coverflow carousel.
    Coverflow(CoverflowSpec),
}

impl MotionSpec {
    /// Offset shown when the loop is not animating.
    #[must_use]
    pub fn rest_offset(&self) -> f32 {
        match self {
            Self::Marquee(_) => 0.0,
            Self::Coverflow(spec) => spec.rest_position(),
        }
    }

    /// Validate without building a driver.
    pub fn validate(&self) -> Result<(), MotionError> {
        match self {
            Self::Marquee(spec) => spec.validate(),
            Self::Coverflow(spec) => spec.validate(),
        }
    }
}

/// Constructs motion drivers. Injected into every [`MotionLoop`].
pub trait MotionFactory {
    /// Build a driver for `spec`.
    fn create(&self, spec: &MotionSpec) -> Result<Box<dyn MotionDriver>, MotionError>;
}

impl<F> MotionFactory for F
where
    F: Fn(&MotionSpec) -> Result<Box<dyn MotionDriver>, MotionError>,
{
    fn create(&self, spec: &MotionSpec) -> Result<Box<dyn MotionDriver>, MotionError> {
        self(spec)
    }
}

/// Built-in factory: drives specs with their own periodic functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMotion;

impl MotionFactory for StandardMotion {
    fn create(&self, spec: &MotionSpec) -> Result<Box<dyn MotionDriver>, MotionError> {
        spec.validate()?;
        Ok(match spec {
            MotionSpec::Marquee(m) => Box::new(m.clone()),
            MotionSpec::Coverflow(c) => Box::new(c.clone()),
        })
    }
}

/// Factory for hosts without a motion primitive. Always fails, so loops
/// render statically.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMotion;

impl MotionFactory for NoMotion {
    fn create(&self, _spec: &MotionSpec) -> Result<Box<dyn MotionDriver>, MotionError> {
        Err(MotionError::Unavailable("no motion primitive installed".into()))
    }
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Lifecycle state of a [`MotionLoop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    /// Not mounted.
    Idle,
    /// Mounted; driver construction scheduled.
    Pending,
    /// Driver running since `started_at`.
    Running {
        /// Monotonic start time.
        started_at: Duration,
    },
    /// Driver construction failed; content shown at rest.
    Static {
        /// Construction error.
        reason: MotionError,
    },
    /// Torn down; inert.
    TornDown,
}

/// Sampled loop output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Track offset (pixels for marquees, slide position for carousels).
    pub offset: f32,
    /// Whether the loop is animating.
    pub animated: bool,
}

/// A continuous loop bound to its owning view's lifetime.
pub struct MotionLoop<F> {
    name: String,
    spec: MotionSpec,
    factory: F,
    init: Timeout,
    driver: Option<Box<dyn MotionDriver>>,
    state: LoopState,
}

impl<F> fmt::Debug for MotionLoop<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionLoop")
            .field("name", &self.name)
            .field("spec", &self.spec)
            .field("state", &self.state)
            .finish()
    }
}

impl<F: MotionFactory> MotionLoop<F> {
    /// Create an unmounted loop.
    #[must_use]
    pub fn new(name: impl Into<String>, spec: MotionSpec, factory: F) -> Self {
        Self {
            name: name.into(),
            spec,
            factory,
            init: Timeout::new(),
            driver: None,
            state: LoopState::Idle,
        }
    }

    /// Schedule driver construction `init_delay` after `now`.
    ///
    /// Only valid from [`LoopState::Idle`]; otherwise ignored.
    pub fn mount(&mut self, now: Duration, init_delay: Duration) {
        if self.state != LoopState::Idle {
            return;
        }
        self.init.arm(now, init_delay);
        self.state = LoopState::Pending;
        crate::debug!(loop_name = %self.name, "motion loop mounted");
    }

    /// Build the driver once its construction is due.
    ///
    /// Returns `true` if the state changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some((due, _late)) = self.init.poll(now) else {
            return false;
        };
        match self.factory.create(&self.spec) {
            Ok(driver) => {
                crate::info!(
                    loop_name = %self.name,
                    cycle_ms = driver.cycle().as_millis() as u64,
                    "motion loop running"
                );
                self.driver = Some(driver);
                self.state = LoopState::Running { started_at: due };
            }
            Err(reason) => {
                crate::warn!(
                    loop_name = %self.name,
                    error = %reason,
                    "motion loop degraded to static presentation"
                );
                self.state = LoopState::Static { reason };
            }
        }
        true
    }

    /// Sample the loop at `now`.
    #[must_use]
    pub fn sample(&self, now: Duration) -> MotionSample {
        match (&self.state, &self.driver) {
            (LoopState::Running { started_at }, Some(driver)) => MotionSample {
                offset: driver.offset(now.saturating_sub(*started_at)),
                animated: true,
            },
            _ => MotionSample {
                offset: self.spec.rest_offset(),
                animated: false,
            },
        }
    }

    /// Release the pending timeout and the driver. Safe in every state.
    pub fn teardown(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        self.init.cancel();
        if let Some(mut driver) = self.driver.take() {
            driver.destroy();
        }
        crate::debug!(loop_name = %self.name, "motion loop torn down");
        self.state = LoopState::TornDown;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Whether a driver is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Loop name (for logs).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The spec this loop animates.
    #[must_use]
    pub fn spec(&self) -> &MotionSpec {
        &self.spec
    }

    /// Cycle of the running driver.
    #[must_use]
    pub fn cycle(&self) -> Option<Duration> {
        self.driver.as_ref().map(|d| d.cycle())
    }

    /// Pending construction deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.init.deadline()
    }
}

impl<F> Drop for MotionLoop<F> {
    fn drop(&mut self) {
        self.init.cancel();
        if let Some(mut driver) = self.driver.take() {
            driver.destroy();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const MS_100: Duration = Duration::from_millis(100);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn logos() -> MotionSpec {
        MotionSpec::Marquee(MarqueeSpec::new(6, 160.0, 40.0, 640.0))
    }

    #[derive(Debug)]
    struct Counted {
        destroyed: Rc<Cell<u32>>,
    }

    impl MotionDriver for Counted {
        fn cycle(&self) -> Duration {
            Duration::from_secs(1)
        }
        fn offset(&self, elapsed: Duration) -> f32 {
            crate::animation::phase(elapsed, self.cycle())
        }
        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    #[test]
    fn builds_driver_after_init_delay() {
        let mut l = MotionLoop::new("logos", logos(), StandardMotion);
        l.mount(Duration::ZERO, MS_100);
        assert_eq!(l.state(), &LoopState::Pending);
        assert!(!l.poll(ms(50)));
        assert!(!l.sample(ms(50)).animated);
        assert!(l.poll(ms(120)));
        assert_eq!(l.state(), &LoopState::Running { started_at: MS_100 });
        let s = l.sample(ms(1100));
        assert!(s.animated);
        assert!((s.offset + 40.0).abs() < 1e-3);
    }

    #[test]
    fn factory_failure_degrades_to_static() {
        let mut l = MotionLoop::new("themes", logos(), NoMotion);
        l.mount(Duration::ZERO, MS_100);
        assert!(l.poll(MS_100));
        assert!(matches!(l.state(), LoopState::Static { .. }));
        assert_eq!(
            l.sample(ms(5000)),
            MotionSample {
                offset: 0.0,
                animated: false
            }
        );
    }

    #[test]
    fn invalid_spec_degrades_to_static() {
        let spec = MotionSpec::Marquee(MarqueeSpec::new(0, 160.0, 40.0, 640.0));
        let mut l = MotionLoop::new("empty", spec, StandardMotion);
        l.mount(Duration::ZERO, Duration::ZERO);
        l.poll(Duration::ZERO);
        assert_eq!(
            l.state(),
            &LoopState::Static {
                reason: MotionError::EmptyContent
            }
        );
    }

    #[test]
    fn teardown_before_init_cancels_silently() {
        let built = Rc::new(Cell::new(false));
        let flag = built.clone();
        let factory = move |_: &MotionSpec| -> Result<Box<dyn MotionDriver>, MotionError> {
            flag.set(true);
            Err(MotionError::Unavailable("unused".into()))
        };
        let mut l = MotionLoop::new("early", logos(), factory);
        l.mount(Duration::ZERO, MS_100);
        l.teardown();
        assert!(!l.poll(ms(1000)));
        assert!(!built.get());
        assert_eq!(l.state(), &LoopState::TornDown);
    }

    #[test]
    fn teardown_destroys_driver_once() {
        let destroyed = Rc::new(Cell::new(0));
        let counter = destroyed.clone();
        let factory = move |_: &MotionSpec| -> Result<Box<dyn MotionDriver>, MotionError> {
            Ok(Box::new(Counted {
                destroyed: counter.clone(),
            }))
        };
        let mut l = MotionLoop::new("counted", logos(), factory);
        l.mount(Duration::ZERO, Duration::ZERO);
        l.poll(Duration::ZERO);
        assert!(l.is_running());
        l.teardown();
        l.teardown();
        drop(l);
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn teardown_without_mount_is_safe() {
        let mut l = MotionLoop::new("never", logos(), NoMotion);
        l.teardown();
        assert_eq!(l.state(), &LoopState::TornDown);
        l.mount(Duration::ZERO, MS_100);
        assert_eq!(l.state(), &LoopState::TornDown);
    }

    #[test]
    fn drop_destroys_running_driver() {
        let destroyed = Rc::new(Cell::new(0));
        let counter = destroyed.clone();
        {
            let factory = move |_: &MotionSpec| -> Result<Box<dyn MotionDriver>, MotionError> {
                Ok(Box::new(Counted {
                    destroyed: counter.clone(),
                }))
            };
            let mut l = MotionLoop::new("scoped", logos(), factory);
            l.mount(Duration::ZERO, Duration::ZERO);
            l.poll(Duration::ZERO);
        }
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            MotionError::Unavailable("swiper".into()).to_string(),
            "motion primitive unavailable: swiper"
        );
        assert_eq!(MotionError::EmptyContent.to_string(), "motion loop has no content");
    }
}
