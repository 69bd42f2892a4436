#![forbid(unsafe_code)]

//! Reveal scheduler: staggered entrance transitions from a single flip.
//!
//! A page owns one [`RevealTrigger`]. It is armed on mount and flips once,
//! a fixed latency later. Every [`RevealItem`] reads that single flag and
//! offsets its own transition by its declared delay, so one state change
//! produces a cascade across dozens of elements.
//!
//! Item state is a pure function of `(revealed_at, now)`: no per-frame
//! bookkeeping, and the same query always yields the same answer.
//!
//! # Invariants
//!
//! 1. The trigger flips at most once and never flips back.
//! 2. Before the flip every item is [`RevealPhase::Hidden`], whatever its delay.
//! 3. After the flip, item `i` starts no earlier than `flip + delay[i]`.
//! 4. Every item eventually reaches [`RevealPhase::Revealed`].
//! 5. Order indices are unique within a group.
//!
//! # Failure Modes
//!
//! - Cancelled before the flip (view unmounted early): items stay hidden.
//!   Nothing renders after teardown, so this is not an error.

use std::fmt;
use std::time::Duration;

use crate::animation::stagger::Cascade;
use crate::animation::{Animation, Curve, Delayed, Fade, delay};
use crate::timer::Timeout;

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The page-wide "is revealed" flag.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    latency: Duration,
    timeout: Timeout,
    revealed_at: Option<Duration>,
}

/// Result of a trigger flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFlip {
    /// Monotonic time of the flip (the scheduled deadline).
    pub at: Duration,
    /// How late the poll observed it.
    pub overshoot: Duration,
}

impl RevealTrigger {
    /// Create an unarmed trigger that flips `latency` after mount.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            timeout: Timeout::new(),
            revealed_at: None,
        }
    }

    /// Schedule the flip. Ignored once armed or revealed.
    pub fn arm(&mut self, now: Duration) {
        if self.revealed_at.is_some() || self.timeout.is_pending() {
            return;
        }
        self.timeout.arm(now, self.latency);
        crate::debug!(latency_ms = self.latency.as_millis() as u64, "reveal trigger armed");
    }

    /// Flip if the latency has elapsed. Returns the flip exactly once.
    pub fn poll(&mut self, now: Duration) -> Option<RevealFlip> {
        let (at, overshoot) = self.timeout.poll(now)?;
        self.revealed_at = Some(at);
        crate::info!(at_ms = at.as_millis() as u64, "reveal trigger flipped");
        Some(RevealFlip { at, overshoot })
    }

    /// Drop a pending flip. Safe in every state; returns `true` if a flip
    /// was pending.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.timeout.cancel();
        if cancelled {
            crate::debug!("reveal trigger cancelled before flip");
        }
        cancelled
    }

    /// Whether the flag has flipped.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Time of the flip, if it happened.
    #[must_use]
    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }

    /// Whether a flip is scheduled but has not happened.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timeout.is_pending()
    }

    /// Next deadline the host should wake up for.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.deadline()
    }

    /// Configured latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Resting-state displacement an item starts from.
///
/// `offset_y` is in pixels (positive = below resting position), `scale_from`
/// is the starting scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// Vertical displacement while hidden.
    pub offset_y: f32,
    /// Scale while hidden.
    pub scale_from: f32,
}

impl RevealStyle {
    /// Opacity only.
    pub const FADE: Self = Self {
        offset_y: 0.0,
        scale_from: 1.0,
    };

    /// Fade in while rising `px` into place.
    #[must_use]
    pub const fn rise(px: f32) -> Self {
        Self {
            offset_y: px,
            scale_from: 1.0,
        }
    }

    /// Fade in while dropping `px` into place.
    #[must_use]
    pub const fn drop(px: f32) -> Self {
        Self {
            offset_y: -px,
            scale_from: 1.0,
        }
    }

    /// Fade in while growing from `scale`.
    #[must_use]
    pub const fn zoom(scale: f32) -> Self {
        Self {
            offset_y: 0.0,
            scale_from: scale,
        }
    }

    /// Add a starting scale to this style (builder).
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale_from = scale;
        self
    }
}

/// One element taking part in a reveal cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealItem {
    /// Stable identity (content key).
    pub id: String,
    /// Position within its group.
    pub order: usize,
    /// Transition start offset relative to the flip.
    pub delay: Duration,
    /// Transition length.
    pub transition: Duration,
    /// Timing curve.
    pub curve: Curve,
    /// Hidden-state displacement.
    pub style: RevealStyle,
}

impl RevealItem {
    /// Create an item with the default ease-out curve.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        order: usize,
        delay: Duration,
        transition: Duration,
        style: RevealStyle,
    ) -> Self {
        Self {
            id: id.into(),
            order,
            delay,
            transition,
            curve: Curve::EaseOut,
            style,
        }
    }

    /// Set the curve (builder).
    #[must_use]
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Instant at which this item starts transitioning, given a flip time.
    #[must_use]
    pub fn starts_at(&self, revealed_at: Duration) -> Duration {
        revealed_at.saturating_add(self.delay)
    }

    /// The transition as an animation, fresh from the flip.
    fn animation(&self) -> Delayed<Fade> {
        delay(
            self.delay,
            Fade::new(self.transition).easing(self.curve.easing()),
        )
    }

    /// Phase at `now` for a trigger that flipped at `revealed_at`.
    #[must_use]
    pub fn phase_at(&self, revealed_at: Option<Duration>, now: Duration) -> RevealPhase {
        let Some(flip) = revealed_at else {
            return RevealPhase::Hidden;
        };
        if now < flip {
            return RevealPhase::Hidden;
        }
        let mut anim = self.animation();
        anim.tick(now - flip);
        if !anim.has_started() {
            RevealPhase::Pending
        } else if anim.is_complete() {
            RevealPhase::Revealed
        } else {
            RevealPhase::Revealing(anim.value())
        }
    }
}

/// Where an item is in its entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPhase {
    /// The flag has not flipped.
    Hidden,
    /// Flipped, but the item's delay has not elapsed.
    Pending,
    /// Transitioning; eased progress in [0.0, 1.0).
    Revealing(f32),
    /// At rest and fully visible.
    Revealed,
}

impl RevealPhase {
    /// Whether the item has begun (or finished) its transition.
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Revealing(_) | Self::Revealed)
    }

    /// Eased progress toward the resting state.
    #[must_use]
    pub fn progress(self) -> f32 {
        match self {
            Self::Hidden | Self::Pending => 0.0,
            Self::Revealing(p) => p,
            Self::Revealed => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Error raised while composing a reveal group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealError {
    /// Two items share an order index.
    DuplicateOrder {
        /// Group name.
        group: String,
        /// Repeated index.
        order: usize,
    },
    /// Two items share an identity.
    DuplicateId {
        /// Group name.
        group: String,
        /// Repeated identity.
        id: String,
    },
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateOrder { group, order } => {
                write!(f, "reveal group {group:?}: order index {order} used twice")
            }
            Self::DuplicateId { group, id } => {
                write!(f, "reveal group {group:?}: item {id:?} used twice")
            }
        }
    }
}

impl std::error::Error for RevealError {}

/// An ordered set of items revealed by the same trigger.
#[derive(Debug, Clone, Default)]
pub struct RevealGroup {
    name: String,
    items: Vec<RevealItem>,
}

impl RevealGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Build a group whose delays follow `cascade`, in iteration order.
    pub fn cascade<I, S>(
        name: impl Into<String>,
        ids: I,
        cascade: Cascade,
        transition: Duration,
        style: RevealStyle,
    ) -> Result<Self, RevealError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let delays = cascade.delays(ids.len());
        let mut group = Self::new(name);
        for (order, (id, delay)) in ids.into_iter().zip(delays).enumerate() {
            group.push(RevealItem::new(id, order, delay, transition, style))?;
        }
        Ok(group)
    }

    /// Add an item, rejecting duplicate order indices and identities.
    pub fn push(&mut self, item: RevealItem) -> Result<(), RevealError> {
        if self.items.iter().any(|i| i.order == item.order) {
            return Err(RevealError::DuplicateOrder {
                group: self.name.clone(),
                order: item.order,
            });
        }
        if self.items.iter().any(|i| i.id == item.id) {
            return Err(RevealError::DuplicateId {
                group: self.name.clone(),
                id: item.id,
            });
        }
        let at = self.items.partition_point(|i| i.order < item.order);
        self.items.insert(at, item);
        Ok(())
    }

    /// Add an item (builder). See [`push`](Self::push).
    pub fn with(mut self, item: RevealItem) -> Result<Self, RevealError> {
        self.push(item)?;
        Ok(self)
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items sorted by order index.
    #[must_use]
    pub fn items(&self) -> &[RevealItem] {
        &self.items
    }

    /// Look up an item by identity.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RevealItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether delays are non-decreasing with order (a proper cascade).
    #[must_use]
    pub fn is_cascade(&self) -> bool {
        self.items.windows(2).all(|w| w[0].delay <= w[1].delay)
    }

    /// Phase of every item at `now`.
    #[must_use]
    pub fn phases(&self, trigger: &RevealTrigger, now: Duration) -> Vec<RevealPhase> {
        self.items
            .iter()
            .map(|i| i.phase_at(trigger.revealed_at(), now))
            .collect()
    }

    /// Whether every item is at rest.
    #[must_use]
    pub fn all_revealed(&self, trigger: &RevealTrigger, now: Duration) -> bool {
        self.items
            .iter()
            .all(|i| i.phase_at(trigger.revealed_at(), now) == RevealPhase::Revealed)
    }

    /// Time at which the last item comes to rest, once the trigger flipped.
    #[must_use]
    pub fn settles_at(&self, trigger: &RevealTrigger) -> Option<Duration> {
        let flip = trigger.revealed_at()?;
        Some(
            self.items
                .iter()
                .map(|i| i.starts_at(flip).saturating_add(i.transition))
                .max()
                .unwrap_or(flip),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_700: Duration = Duration::from_millis(700);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn flipped_trigger() -> RevealTrigger {
        let mut t = RevealTrigger::new(MS_100);
        t.arm(Duration::ZERO);
        t.poll(MS_100).unwrap();
        t
    }

    #[test]
    fn trigger_flips_once_after_latency() {
        let mut t = RevealTrigger::new(MS_100);
        t.arm(Duration::ZERO);
        assert!(t.is_pending());
        assert_eq!(t.poll(ms(99)), None);
        assert!(!t.is_revealed());
        let flip = t.poll(ms(130)).unwrap();
        assert_eq!(flip.at, MS_100);
        assert_eq!(flip.overshoot, ms(30));
        assert_eq!(t.poll(ms(500)), None);
        assert_eq!(t.revealed_at(), Some(MS_100));
    }

    #[test]
    fn rearm_after_flip_is_ignored() {
        let mut t = flipped_trigger();
        t.arm(ms(1000));
        assert!(!t.is_pending());
        assert_eq!(t.revealed_at(), Some(MS_100));
    }

    #[test]
    fn cancelled_trigger_never_reveals() {
        let mut t = RevealTrigger::new(MS_100);
        t.arm(Duration::ZERO);
        assert!(t.cancel());
        assert_eq!(t.poll(ms(10_000)), None);
        assert!(!t.is_revealed());
        assert!(!t.cancel());
    }

    #[test]
    fn cascade_scenario_visible_at_flip_offsets() {
        let group = RevealGroup::cascade(
            "scenario",
            ["a", "b", "c"],
            Cascade::linear(Duration::ZERO, MS_100),
            MS_700,
            RevealStyle::rise(16.0),
        )
        .unwrap();
        let t = flipped_trigger();
        let flip = t.revealed_at().unwrap();

        let visible = |now| -> Vec<bool> {
            group.phases(&t, now).into_iter().map(RevealPhase::is_visible).collect()
        };
        assert_eq!(visible(flip), vec![true, false, false]);
        assert_eq!(visible(flip + ms(99)), vec![true, false, false]);
        assert_eq!(visible(flip + ms(100)), vec![true, true, false]);
        assert_eq!(visible(flip + ms(200)), vec![true, true, true]);
    }

    #[test]
    fn nothing_visible_before_flip_regardless_of_delay() {
        let group = RevealGroup::new("g")
            .with(RevealItem::new("zero", 0, Duration::ZERO, MS_700, RevealStyle::FADE))
            .unwrap();
        let mut t = RevealTrigger::new(MS_100);
        t.arm(Duration::ZERO);
        assert_eq!(group.phases(&t, ms(50)), vec![RevealPhase::Hidden]);
        assert_eq!(group.phases(&t, ms(5000)), vec![RevealPhase::Hidden]);
    }

    #[test]
    fn pending_then_revealing_then_revealed() {
        let item = RevealItem::new("x", 0, ms(200), ms(400), RevealStyle::FADE);
        let flip = Some(MS_100);
        assert_eq!(item.phase_at(flip, ms(150)), RevealPhase::Pending);
        match item.phase_at(flip, ms(500)) {
            RevealPhase::Revealing(p) => assert!(p > 0.0 && p < 1.0),
            other => panic!("expected revealing, got {other:?}"),
        }
        assert_eq!(item.phase_at(flip, ms(700)), RevealPhase::Revealed);
    }

    #[test]
    fn settles_after_last_transition() {
        let group = RevealGroup::cascade(
            "steps",
            ["1", "2", "3", "4"],
            Cascade::linear(ms(1400), ms(150)),
            MS_700,
            RevealStyle::rise(32.0),
        )
        .unwrap();
        let t = flipped_trigger();
        let settle = group.settles_at(&t).unwrap();
        assert_eq!(settle, MS_100 + ms(1850) + MS_700);
        assert!(!group.all_revealed(&t, settle - ms(1)));
        assert!(group.all_revealed(&t, settle));
    }

    #[test]
    fn duplicate_order_rejected() {
        let err = RevealGroup::new("g")
            .with(RevealItem::new("a", 0, Duration::ZERO, MS_700, RevealStyle::FADE))
            .unwrap()
            .with(RevealItem::new("b", 0, MS_100, MS_700, RevealStyle::FADE))
            .unwrap_err();
        assert_eq!(
            err,
            RevealError::DuplicateOrder {
                group: "g".into(),
                order: 0
            }
        );
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = RevealGroup::cascade(
            "faq",
            ["q", "q"],
            Cascade::linear(Duration::ZERO, MS_100),
            MS_700,
            RevealStyle::FADE,
        )
        .unwrap_err();
        assert!(matches!(err, RevealError::DuplicateId { .. }));
        assert!(err.to_string().contains("\"q\""));
    }

    #[test]
    fn push_keeps_order_sorted() {
        let mut g = RevealGroup::new("g");
        g.push(RevealItem::new("c", 2, ms(200), MS_700, RevealStyle::FADE)).unwrap();
        g.push(RevealItem::new("a", 0, ms(0), MS_700, RevealStyle::FADE)).unwrap();
        g.push(RevealItem::new("b", 1, ms(100), MS_700, RevealStyle::FADE)).unwrap();
        let ids: Vec<&str> = g.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(g.is_cascade());
    }
}
