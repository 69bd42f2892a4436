#![forbid(unsafe_code)]

//! Core: presentation-animation engine for the landing page.
//!
//! Time is a `Duration` since mount, supplied by the host. Every component
//! is a deterministic function of that clock and of the inbound pointer
//! and toggle events; nothing here reads a wall clock or spawns work.

pub mod animation;
pub mod config;
pub mod disclosure;
pub mod geometry;
pub mod logging;
pub mod motion;
pub mod parallax;
pub mod presentation;
pub mod reveal;
pub mod timer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
