#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Every tunable timing and falloff constant lives in [`EngineConfig`].
//! Defaults reproduce the landing page as shipped. Values can be loaded
//! from JSON (with the `serde` feature) and overridden from `TAPION_*`
//! environment variables.

use std::fmt;
use std::time::Duration;

use crate::motion::carousel::CoverflowParams;

/// Error raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// An environment override was not a valid number.
    Env {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
    /// A value is outside its allowed range.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid engine config: {msg}"),
            Self::Env { var, value } => write!(f, "{var}={value:?} is not a valid number"),
            Self::Invalid(what) => write!(f, "invalid engine config: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for every engine component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Delay between mount and the reveal flip.
    /// Default: 100ms
    #[cfg_attr(feature = "serde", serde(rename = "reveal_latency_ms", with = "millis"))]
    pub reveal_latency: Duration,

    /// Duration of a standard entrance transition.
    /// Default: 700ms
    #[cfg_attr(feature = "serde", serde(rename = "reveal_transition_ms", with = "millis"))]
    pub reveal_transition: Duration,

    /// Divisor applied to pointer displacement for the hero scene.
    /// Default: 40.0
    pub pointer_sensitivity: f32,

    /// Tilt (degrees) of the profile card with the pointer on its edge.
    /// Default: 12.5
    pub card_max_tilt: f32,

    /// Logo marquee speed in pixels per second.
    /// Default: 60.0
    pub logo_marquee_speed: f32,

    /// Testimonial marquee speed in pixels per second.
    /// Default: 40.0
    pub testimonial_marquee_speed: f32,

    /// Time for the carousel to traverse one slide.
    /// Default: 3000ms
    #[cfg_attr(feature = "serde", serde(rename = "carousel_slide_ms", with = "millis"))]
    pub carousel_slide_duration: Duration,

    /// Slide centered when the carousel starts.
    /// Default: 2
    pub carousel_initial_slide: usize,

    /// Coverflow falloff applied to off-center slides.
    pub coverflow: CoverflowParams,

    /// Delay between mount and motion-loop construction.
    /// Default: 100ms
    #[cfg_attr(feature = "serde", serde(rename = "loop_init_delay_ms", with = "millis"))]
    pub loop_init_delay: Duration,

    /// Max-height an open disclosure panel animates toward.
    /// Default: 384.0
    pub disclosure_bound: f32,

    /// Duration of the disclosure expand/collapse transition.
    /// Default: 500ms
    #[cfg_attr(feature = "serde", serde(rename = "disclosure_transition_ms", with = "millis"))]
    pub disclosure_transition: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reveal_latency: Duration::from_millis(100),
            reveal_transition: Duration::from_millis(700),
            pointer_sensitivity: 40.0,
            card_max_tilt: 12.5,
            logo_marquee_speed: 60.0,
            testimonial_marquee_speed: 40.0,
            carousel_slide_duration: Duration::from_millis(3000),
            carousel_initial_slide: 2,
            coverflow: CoverflowParams::default(),
            loop_init_delay: Duration::from_millis(100),
            disclosure_bound: 384.0,
            disclosure_transition: Duration::from_millis(500),
        }
    }
}

impl EngineConfig {
    /// Set the reveal latency.
    #[must_use]
    pub fn reveal_latency(mut self, latency: Duration) -> Self {
        self.reveal_latency = latency;
        self
    }

    /// Set the hero pointer sensitivity.
    #[must_use]
    pub fn pointer_sensitivity(mut self, sensitivity: f32) -> Self {
        self.pointer_sensitivity = sensitivity;
        self
    }

    /// Set the carousel slide traversal time.
    #[must_use]
    pub fn carousel_slide_duration(mut self, duration: Duration) -> Self {
        self.carousel_slide_duration = duration;
        self
    }

    /// Set the slide centered at start.
    #[must_use]
    pub fn carousel_initial_slide(mut self, index: usize) -> Self {
        self.carousel_initial_slide = index;
        self
    }

    /// Check ranges. Speeds, sensitivity and transition durations must be
    /// strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pointer_sensitivity.is_finite() && self.pointer_sensitivity > 0.0) {
            return Err(ConfigError::Invalid("pointer_sensitivity must be > 0"));
        }
        if !(self.card_max_tilt.is_finite() && self.card_max_tilt >= 0.0) {
            return Err(ConfigError::Invalid("card_max_tilt must be >= 0"));
        }
        if !(self.logo_marquee_speed > 0.0 && self.testimonial_marquee_speed > 0.0) {
            return Err(ConfigError::Invalid("marquee speeds must be > 0"));
        }
        if self.carousel_slide_duration.is_zero() {
            return Err(ConfigError::Invalid("carousel_slide_duration must be non-zero"));
        }
        if self.reveal_transition.is_zero() || self.disclosure_transition.is_zero() {
            return Err(ConfigError::Invalid("transition durations must be non-zero"));
        }
        if !(self.disclosure_bound > 0.0) {
            return Err(ConfigError::Invalid("disclosure_bound must be > 0"));
        }
        Ok(())
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TAPION_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply `TAPION_*` overrides from an arbitrary lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(ms) = read_number::<u64>(&lookup, "TAPION_REVEAL_LATENCY_MS")? {
            self.reveal_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = read_number::<u64>(&lookup, "TAPION_REVEAL_TRANSITION_MS")? {
            self.reveal_transition = Duration::from_millis(ms);
        }
        if let Some(v) = read_number::<f32>(&lookup, "TAPION_POINTER_SENSITIVITY")? {
            self.pointer_sensitivity = v;
        }
        if let Some(v) = read_number::<f32>(&lookup, "TAPION_LOGO_MARQUEE_SPEED")? {
            self.logo_marquee_speed = v;
        }
        if let Some(v) = read_number::<f32>(&lookup, "TAPION_TESTIMONIAL_MARQUEE_SPEED")? {
            self.testimonial_marquee_speed = v;
        }
        if let Some(ms) = read_number::<u64>(&lookup, "TAPION_CAROUSEL_SLIDE_MS")? {
            self.carousel_slide_duration = Duration::from_millis(ms);
        }
        if let Some(v) = read_number::<usize>(&lookup, "TAPION_CAROUSEL_INITIAL_SLIDE")? {
            self.carousel_initial_slide = v;
        }
        if let Some(ms) = read_number::<u64>(&lookup, "TAPION_LOOP_INIT_DELAY_MS")? {
            self.loop_init_delay = Duration::from_millis(ms);
        }
        self.validate()?;
        Ok(self)
    }
}

fn read_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value: raw }),
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
