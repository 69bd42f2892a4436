#![forbid(unsafe_code)]

//! Pure projection from engine state to visual properties.
//!
//! Nothing here holds state. Each function maps a snapshot (reveal flag,
//! item delay, pointer vector, open panel, motion offset) to a
//! [`Presentation`], which a web host renders with [`Presentation::to_css`].
//!
//! Two reveal projections exist. [`reveal`] declares the target state and a
//! delayed transition, leaving the interpolation to the host's compositor.
//! [`reveal_frame`] samples the interpolation itself, for hosts that paint
//! every frame.

use std::fmt::Write as _;
use std::time::Duration;

use crate::animation::{Curve, lerp};
use crate::motion::SlideTransform;
use crate::parallax::{PointerVector, TiltMapping};
use crate::reveal::{RevealItem, RevealPhase};

/// Outer perspective wrapping the hero scene, pixels.
pub const SCENE_PERSPECTIVE: f32 = 2000.0;
/// Hero scene transform transition.
pub const SCENE_TRANSITION: Duration = Duration::from_millis(300);
/// Perspective of the profile card, pixels.
pub const CARD_PERSPECTIVE: f32 = 1000.0;
/// Resting scale of the profile card.
pub const CARD_SCALE: f32 = 1.05;
/// Profile card transform transition.
pub const CARD_TRANSITION: Duration = Duration::from_millis(100);

/// A 3D transform, applied in CSS order:
/// perspective, translate, rotations, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Perspective distance, if the element establishes its own.
    pub perspective: Option<f32>,
    /// Horizontal offset, pixels.
    pub translate_x: f32,
    /// Vertical offset, pixels. Positive moves down.
    pub translate_y: f32,
    /// Depth offset, pixels.
    pub translate_z: f32,
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x: f32,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y: f32,
    /// In-plane rotation, degrees.
    pub rotate_z: f32,
    /// Emit `rotateY` before `rotateX`.
    pub y_first: bool,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No transform.
    pub const IDENTITY: Self = Self {
        perspective: None,
        translate_x: 0.0,
        translate_y: 0.0,
        translate_z: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        rotate_z: 0.0,
        y_first: false,
        scale: 1.0,
    };

    /// Whether this transform leaves the element untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.perspective.is_none()
            && self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.translate_z == 0.0
            && self.rotate_x == 0.0
            && self.rotate_y == 0.0
            && self.rotate_z == 0.0
            && self.scale == 1.0
    }

    /// CSS `transform` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return "none".to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        if let Some(p) = self.perspective {
            parts.push(format!("perspective({p}px)"));
        }
        if self.translate_x != 0.0 || self.translate_y != 0.0 || self.translate_z != 0.0 {
            parts.push(format!(
                "translate3d({}px, {}px, {}px)",
                self.translate_x, self.translate_y, self.translate_z
            ));
        }
        let rx = format!("rotateX({}deg)", self.rotate_x);
        let ry = format!("rotateY({}deg)", self.rotate_y);
        match (self.rotate_x != 0.0, self.rotate_y != 0.0, self.y_first) {
            (true, true, true) => parts.extend([ry, rx]),
            (true, true, false) => parts.extend([rx, ry]),
            (true, false, _) => parts.push(rx),
            (false, true, _) => parts.push(ry),
            (false, false, _) => {}
        }
        if self.rotate_z != 0.0 {
            parts.push(format!("rotate({}deg)", self.rotate_z));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({})", self.scale));
        }
        parts.join(" ")
    }
}

/// A CSS transition declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Animated property (`all`, `transform`, `max-height`).
    pub property: &'static str,
    /// Length of the transition.
    pub duration: Duration,
    /// Wait before the transition starts.
    pub delay: Duration,
    /// Timing function.
    pub curve: Curve,
}

impl Transition {
    /// Transition with no delay.
    #[must_use]
    pub fn new(property: &'static str, duration: Duration, curve: Curve) -> Self {
        Self {
            property,
            duration,
            delay: Duration::ZERO,
            curve,
        }
    }

    /// Set the start delay (builder).
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// CSS `transition` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = format!(
            "{} {}ms {}",
            self.property,
            self.duration.as_millis(),
            self.curve.css()
        );
        if !self.delay.is_zero() {
            let _ = write!(out, " {}ms", self.delay.as_millis());
        }
        out
    }
}

/// Visual properties of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Opacity in [0.0, 1.0].
    pub opacity: f32,
    /// Transform, [`Transform::IDENTITY`] when untouched.
    pub transform: Transform,
    /// Transition to the state above, if the host should animate it.
    pub transition: Option<Transition>,
    /// Max-height clamp in pixels (disclosure panels only).
    pub max_height: Option<f32>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::IDENTITY,
            transition: None,
            max_height: None,
        }
    }
}

impl Presentation {
    /// Inline CSS declarations.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut out = format!("opacity: {}; transform: {}", self.opacity, self.transform.to_css());
        if let Some(t) = &self.transition {
            let _ = write!(out, "; transition: {}", t.to_css());
        }
        if let Some(h) = self.max_height {
            let _ = write!(out, "; max-height: {h}px; overflow: hidden");
        }
        out
    }
}

/// Target state of a reveal item with a delayed host transition.
#[must_use]
pub fn reveal(revealed: bool, item: &RevealItem) -> Presentation {
    let progress = if revealed { 1.0 } else { 0.0 };
    Presentation {
        transition: Some(
            Transition::new("all", item.transition, item.curve).delay(item.delay),
        ),
        ..reveal_at(progress, item)
    }
}

/// Sampled state of a reveal item in `phase`.
#[must_use]
pub fn reveal_frame(phase: RevealPhase, item: &RevealItem) -> Presentation {
    reveal_at(phase.progress(), item)
}

fn reveal_at(progress: f32, item: &RevealItem) -> Presentation {
    Presentation {
        opacity: progress,
        transform: Transform {
            translate_y: lerp(item.style.offset_y, 0.0, progress),
            scale: lerp(item.style.scale_from, 1.0, progress),
            ..Transform::IDENTITY
        },
        ..Presentation::default()
    }
}

/// Tilt of a tracked element.
#[must_use]
pub fn tilt(vector: PointerVector, mapping: TiltMapping) -> Presentation {
    let t = mapping.tilt(vector);
    let (transform, transition) = match mapping {
        TiltMapping::Scene => (
            Transform {
                rotate_x: t.rotate_x,
                rotate_y: t.rotate_y,
                y_first: true,
                ..Transform::IDENTITY
            },
            Transition::new("transform", SCENE_TRANSITION, Curve::EaseOut),
        ),
        TiltMapping::Card => (
            Transform {
                perspective: Some(CARD_PERSPECTIVE),
                rotate_x: t.rotate_x,
                rotate_y: t.rotate_y,
                scale: CARD_SCALE,
                ..Transform::IDENTITY
            },
            Transition::new("transform", CARD_TRANSITION, Curve::Linear),
        ),
    };
    Presentation {
        transform,
        transition: Some(transition),
        ..Presentation::default()
    }
}

/// Expandable panel of a disclosure.
#[must_use]
pub fn disclosure_panel(open: bool, bound: f32, duration: Duration) -> Presentation {
    Presentation {
        max_height: Some(if open { bound } else { 0.0 }),
        transition: Some(Transition::new("max-height", duration, Curve::EaseInOut)),
        ..Presentation::default()
    }
}

/// Toggle icon of a disclosure: flipped while open.
#[must_use]
pub fn disclosure_icon(open: bool, duration: Duration) -> Presentation {
    Presentation {
        transform: Transform {
            rotate_z: if open { 180.0 } else { 0.0 },
            ..Transform::IDENTITY
        },
        transition: Some(Transition::new("transform", duration, Curve::EaseInOut)),
        ..Presentation::default()
    }
}

/// Marquee track shifted by `offset` pixels.
#[must_use]
pub fn marquee_track(offset: f32) -> Presentation {
    Presentation {
        transform: Transform {
            translate_x: offset,
            ..Transform::IDENTITY
        },
        ..Presentation::default()
    }
}

/// Coverflow slide.
#[must_use]
pub fn slide(t: &SlideTransform) -> Presentation {
    Presentation {
        transform: Transform {
            translate_x: t.translate_x,
            translate_z: t.translate_z,
            rotate_y: t.rotate_y,
            scale: t.scale,
            ..Transform::IDENTITY
        },
        ..Presentation::default()
    }
}
