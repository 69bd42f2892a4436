#![forbid(unsafe_code)]

//! Model contract driven by [`StepProgram`](crate::step_program::StepProgram).

use core::time::Duration;

use crate::HostEvent;

/// Side effect requested by a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No operation.
    #[default]
    None,
    /// Write a line to the host log.
    Log(String),
    /// Execute several commands in order.
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// No operation.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Host log line.
    #[must_use]
    pub fn log(text: impl Into<String>) -> Self {
        Self::Log(text.into())
    }

    /// Combine commands, dropping no-ops.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }
}

/// A view whose state is a function of host time and host events.
///
/// Every method receives the host's monotonic `now`; models never read a
/// clock of their own.
pub trait Model {
    /// Snapshot committed to the presenter.
    type Frame: Clone + core::fmt::Debug;

    /// The view entered the page. Arm timers here.
    fn mount(&mut self, now: Duration) -> Cmd {
        let _ = now;
        Cmd::none()
    }

    /// Handle one inbound event.
    fn update(&mut self, event: HostEvent, now: Duration) -> Cmd;

    /// Fire due timers. Returns `true` if the visual state changed.
    fn poll(&mut self, now: Duration) -> bool;

    /// Whether frames differ from one instant to the next.
    fn is_animating(&self, now: Duration) -> bool;

    /// Earliest pending timer, for hosts that sleep between steps.
    fn next_deadline(&self) -> Option<Duration> {
        None
    }

    /// Render a snapshot at `now`.
    fn view(&self, now: Duration) -> Self::Frame;

    /// The view left the page. Release every timer and driver.
    fn unmount(&mut self) -> Cmd {
        Cmd::none()
    }
}
