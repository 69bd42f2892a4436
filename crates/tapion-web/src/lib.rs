#![forbid(unsafe_code)]

//! `tapion-web` runs the Tapion landing page inside a web host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes pointer,
//!   toggle and lifecycle events.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! The crate does not bind to `wasm-bindgen`. It provides the page model and
//! a step runner that a thin JS shim can drive from `requestAnimationFrame`.

pub mod content;
pub mod page;
pub mod program;
pub mod step_program;

use core::time::Duration;
use std::collections::VecDeque;

use tapion_core::config::ConfigError;
use tapion_core::reveal::RevealError;

use crate::content::ContentError;

/// Web runner error type.
#[derive(Debug, Clone, PartialEq)]
pub enum WebError {
    /// Content could not be loaded.
    Content(ContentError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// A reveal section could not be composed.
    Reveal(RevealError),
}

impl core::fmt::Display for WebError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Content(e) => write!(f, "content: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Reveal(e) => write!(f, "reveal: {e}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Content(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Reveal(e) => Some(e),
        }
    }
}

impl From<ContentError> for WebError {
    fn from(e: ContentError) -> Self {
        Self::Content(e)
    }
}

impl From<ConfigError> for WebError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RevealError> for WebError {
    fn from(e: RevealError) -> Self {
        Self::Reveal(e)
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Element a pointer event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The hero scene.
    Hero,
    /// The profile card.
    ProfileCard,
}

/// Inbound host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The page became interactive.
    Mount,
    /// The page is being torn down.
    Unmount,
    /// Pointer moved over a target, in page coordinates.
    PointerMove {
        target: PointerTarget,
        x: f32,
        y: f32,
    },
    /// Pointer left a target.
    PointerLeave { target: PointerTarget },
    /// A disclosure header was clicked.
    Toggle { index: usize },
    /// Animation frame request with no input.
    Tick,
}

/// Host-driven event queue.
///
/// The host pushes [`HostEvent`]s; the runner drains them on each step.
#[derive(Debug, Clone, Default)]
pub struct WebEventSource {
    queue: VecDeque<HostEvent>,
}

impl WebEventSource {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the queue.
    pub fn push_event(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    /// Pop the oldest pending event.
    pub fn read_event(&mut self) -> Option<HostEvent> {
        self.queue.pop_front()
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.queue.drain(..)
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Captured presentation outputs for host consumption.
#[derive(Debug, Clone)]
pub struct WebOutputs<F> {
    /// Log lines written by the runner.
    pub logs: Vec<String>,
    /// Last committed frame.
    pub last_frame: Option<F>,
    /// Frames committed since the outputs were last taken.
    pub frames_presented: u64,
}

impl<F> Default for WebOutputs<F> {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            last_frame: None,
            frames_presented: 0,
        }
    }
}

/// Presenter that captures frames and logs for the host.
#[derive(Debug, Clone)]
pub struct WebPresenter<F> {
    outputs: WebOutputs<F>,
}

impl<F> Default for WebPresenter<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> WebPresenter<F> {
    /// Create an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outputs: WebOutputs::default(),
        }
    }

    /// Get captured outputs.
    #[must_use]
    pub const fn outputs(&self) -> &WebOutputs<F> {
        &self.outputs
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs<F> {
        std::mem::take(&mut self.outputs)
    }

    /// Commit a frame.
    pub fn present(&mut self, frame: F) {
        self.outputs.last_frame = Some(frame);
        self.outputs.frames_presented += 1;
    }

    /// Append a host log line.
    pub fn write_log(&mut self, text: &str) {
        self.outputs.logs.push(text.to_owned());
    }
}
