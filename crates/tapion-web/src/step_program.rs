#![forbid(unsafe_code)]

//! Step-based program runner for the landing page.
//!
//! [`StepProgram`] drives a [`Model`] through mount / event / timer / commit
//! cycles without threads or blocking. The host (JavaScript) controls the
//! loop:
//!
//! 1. Push events via [`StepProgram::push_event`].
//! 2. Advance time via [`StepProgram::advance_time`].
//! 3. Call [`StepProgram::step`] to process one batch of events and commit.
//! 4. Read the committed frame via [`StepProgram::take_outputs`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use tapion_web::page::LandingPage;
//! use tapion_web::step_program::StepProgram;
//! use tapion_web::HostEvent;
//!
//! let mut prog = StepProgram::new(LandingPage::bundled().unwrap());
//! prog.mount();
//!
//! // Host-driven frame loop
//! prog.push_event(HostEvent::Toggle { index: 0 });
//! prog.advance_time(Duration::from_millis(16));
//! let result = prog.step();
//!
//! if result.rendered {
//!     let outputs = prog.take_outputs();
//!     assert_eq!(outputs.last_frame.unwrap().open_panel, Some(0));
//! }
//! ```

use core::time::Duration;

use tracing::debug;

use crate::program::{Cmd, Model};
use crate::{DeterministicClock, HostEvent, WebEventSource, WebOutputs, WebPresenter};

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the model is mounted after this step.
    pub mounted: bool,
    /// Whether a frame was committed during this step.
    pub rendered: bool,
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Current frame index (monotonically increasing).
    pub frame_idx: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Host-driven, non-blocking runner.
///
/// # Lifecycle
///
/// 1. [`StepProgram::new`]: wrap the model.
/// 2. [`StepProgram::mount`] (or a pushed [`HostEvent::Mount`]): arm the
///    model's timers and commit the first frame.
/// 3. [`StepProgram::step`]: call repeatedly from `requestAnimationFrame`.
/// 4. [`StepProgram::unmount`] (or [`HostEvent::Unmount`], or drop): release
///    every timer and driver. Idempotent.
pub struct StepProgram<M: Model> {
    model: M,
    clock: DeterministicClock,
    events: WebEventSource,
    presenter: WebPresenter<M::Frame>,
    lifecycle: Lifecycle,
    dirty: bool,
    frame_idx: u64,
}

impl<M: Model> StepProgram<M> {
    /// Create a runner around `model`, clock at zero.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            clock: DeterministicClock::new(),
            events: WebEventSource::new(),
            presenter: WebPresenter::new(),
            lifecycle: Lifecycle::Created,
            dirty: true,
            frame_idx: 0,
        }
    }

    /// Mount the model and commit the first frame.
    ///
    /// # Panics
    ///
    /// Panics if the program was already mounted (or unmounted).
    pub fn mount(&mut self) {
        assert!(
            self.lifecycle == Lifecycle::Created,
            "StepProgram::mount() called twice"
        );
        self.mount_model();
        self.model.poll(self.clock.now());
        self.render_frame();
    }

    /// Process pending events, fire due timers, and commit a frame when the
    /// view changed or is animating.
    pub fn step(&mut self) -> StepResult {
        let mut events_processed: u32 = 0;
        while let Some(event) = self.events.read_event() {
            events_processed += 1;
            self.handle_event(event);
            if self.lifecycle == Lifecycle::Unmounted {
                self.events.drain_events().for_each(drop);
                break;
            }
        }

        let rendered = if self.lifecycle == Lifecycle::Mounted {
            let now = self.clock.now();
            self.dirty |= self.model.poll(now);
            if self.dirty || self.model.is_animating(now) {
                self.render_frame();
                true
            } else {
                false
            }
        } else {
            false
        };

        StepResult {
            mounted: self.lifecycle == Lifecycle::Mounted,
            rendered,
            events_processed,
            frame_idx: self.frame_idx,
        }
    }

    /// Release the model's timers and drivers. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        let cmd = self.model.unmount();
        self.execute_cmd(cmd);
        debug!(frames = self.frame_idx, "step program unmounted");
    }

    /// Push a host event. Processed on the next [`step`](Self::step).
    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_event(event);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Current host time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest pending model timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.model.next_deadline()
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs<M::Frame> {
        self.presenter.take_outputs()
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs<M::Frame> {
        self.presenter.outputs()
    }

    /// Access the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably access the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the model is mounted.
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Current frame index.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    // --- Private helpers ---

    fn mount_model(&mut self) {
        self.lifecycle = Lifecycle::Mounted;
        let cmd = self.model.mount(self.clock.now());
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    fn handle_event(&mut self, event: HostEvent) {
        match (event, self.lifecycle) {
            (HostEvent::Mount, Lifecycle::Created) => self.mount_model(),
            (HostEvent::Mount, _) => {}
            (HostEvent::Unmount, _) => self.unmount(),
            (_, Lifecycle::Mounted) => {
                let cmd = self.model.update(event, self.clock.now());
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            // Input before mount or after unmount has nothing to drive.
            _ => {}
        }
    }

    fn render_frame(&mut self) {
        let frame = self.model.view(self.clock.now());
        self.presenter.present(frame);
        self.dirty = false;
        self.frame_idx += 1;
    }

    fn execute_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Log(text) => self.presenter.write_log(&text),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
        }
    }
}

impl<M: Model> Drop for StepProgram<M> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ---- Test model ----

    #[derive(Default)]
    struct Blinker {
        mounted_at: Option<Duration>,
        on_at: Option<Duration>,
        toggles: usize,
        unmounts: usize,
    }

    impl Model for Blinker {
        type Frame = (bool, usize);

        fn mount(&mut self, now: Duration) -> Cmd {
            self.mounted_at = Some(now);
            Cmd::log("mounted")
        }

        fn update(&mut self, event: HostEvent, _now: Duration) -> Cmd {
            match event {
                HostEvent::Toggle { .. } => {
                    self.toggles += 1;
                    Cmd::none()
                }
                _ => Cmd::batch(vec![Cmd::log("a"), Cmd::log("b")]),
            }
        }

        fn poll(&mut self, now: Duration) -> bool {
            match (self.mounted_at, self.on_at) {
                (Some(m), None) if now >= m + Duration::from_millis(100) => {
                    self.on_at = Some(now);
                    true
                }
                _ => false,
            }
        }

        fn is_animating(&self, _now: Duration) -> bool {
            false
        }

        fn view(&self, _now: Duration) -> (bool, usize) {
            (self.on_at.is_some(), self.toggles)
        }

        fn unmount(&mut self) -> Cmd {
            self.unmounts += 1;
            Cmd::log("unmounted")
        }
    }

    #[test]
    fn mount_commits_first_frame() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        assert!(prog.is_mounted());
        assert_eq!(prog.frame_idx(), 1);
        assert_eq!(prog.outputs().last_frame, Some((false, 0)));
        assert_eq!(prog.outputs().logs, vec!["mounted".to_string()]);
    }

    #[test]
    #[should_panic(expected = "called twice")]
    fn mount_twice_panics() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        prog.mount();
    }

    #[test]
    fn idle_steps_do_not_render() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        prog.advance_time(Duration::from_millis(16));
        let r = prog.step();
        assert_eq!(
            r,
            StepResult {
                mounted: true,
                rendered: false,
                events_processed: 0,
                frame_idx: 1
            }
        );
    }

    #[test]
    fn timer_change_renders() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        prog.set_time(Duration::from_millis(100));
        assert!(prog.step().rendered);
        assert_eq!(prog.outputs().last_frame, Some((true, 0)));
    }

    #[test]
    fn mount_event_mounts() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.push_event(HostEvent::Toggle { index: 0 });
        prog.push_event(HostEvent::Mount);
        prog.push_event(HostEvent::Toggle { index: 0 });
        let r = prog.step();
        assert_eq!(r.events_processed, 3);
        assert!(r.rendered);
        // The toggle before mount had nothing to drive.
        assert_eq!(prog.model().toggles, 1);
    }

    #[test]
    fn unmount_event_stops_processing() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        prog.push_event(HostEvent::Unmount);
        prog.push_event(HostEvent::Toggle { index: 0 });
        let r = prog.step();
        assert!(!r.mounted);
        assert!(!r.rendered);
        assert_eq!(r.events_processed, 1);
        assert_eq!(prog.model().toggles, 0);
        assert_eq!(prog.model().unmounts, 1);

        prog.unmount();
        assert_eq!(prog.model().unmounts, 1);
        assert_eq!(prog.step().events_processed, 0);
    }

    #[test]
    fn batch_logs_in_order() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.mount();
        prog.take_outputs();
        prog.push_event(HostEvent::Tick);
        prog.step();
        assert_eq!(prog.outputs().logs, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unmount_before_mount_is_safe() {
        let mut prog = StepProgram::new(Blinker::default());
        prog.unmount();
        assert!(!prog.is_mounted());
        assert_eq!(prog.model().unmounts, 1);
    }
}
