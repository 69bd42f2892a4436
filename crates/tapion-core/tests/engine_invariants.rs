//! Property tests for the engine invariants.

use std::time::Duration;

use proptest::prelude::*;
use tapion_core::animation::stagger::Cascade;
use tapion_core::disclosure::DisclosureSet;
use tapion_core::geometry::Region;
use tapion_core::motion::{CoverflowSpec, MarqueeSpec, MotionDriver};
use tapion_core::parallax::{ParallaxTracker, Sensitivity};
use tapion_core::reveal::{RevealGroup, RevealPhase, RevealStyle, RevealTrigger};

const MS_100: Duration = Duration::from_millis(100);
const MS_700: Duration = Duration::from_millis(700);

proptest! {
    #[test]
    fn marquee_is_periodic(
        count in 1usize..20,
        extent in 20u32..400,
        speed in 5u32..200,
        t_ms in 0u64..120_000,
    ) {
        let spec = MarqueeSpec::new(count, extent as f32, speed as f32, 1440.0);
        let t = Duration::from_millis(t_ms);
        let a = spec.offset(t);
        let b = spec.offset(t + spec.cycle());
        prop_assert_eq!(a, b);
        prop_assert!(a <= 0.0 && a >= -spec.single_width());
    }

    #[test]
    fn marquee_run_covers_viewport(count in 1usize..12, extent in 10u32..300, viewport in 1u32..4000) {
        let spec = MarqueeSpec::new(count, extent as f32, 30.0, viewport as f32);
        prop_assume!(spec.validate().is_ok());
        let copies = spec.copies();
        prop_assert!(copies >= 2);
        prop_assert!((copies - 1) as f32 * spec.single_width() >= viewport as f32);
    }

    #[test]
    fn carousel_is_periodic(
        slides in 1usize..16,
        per_slide_ms in 100u64..6000,
        initial in 0usize..16,
        t_ms in 0u64..300_000,
    ) {
        let spec = CoverflowSpec::new(slides, Duration::from_millis(per_slide_ms), initial);
        let t = Duration::from_millis(t_ms);
        let a = spec.offset(t);
        let b = spec.offset(t + spec.cycle());
        prop_assert_eq!(a, b);
        prop_assert!(a >= 0.0 && a < slides as f32);
    }

    #[test]
    fn pointer_vector_is_bounded(
        w in 1u32..3000,
        h in 1u32..3000,
        x in -5000i32..5000,
        y in -5000i32..5000,
        divisor in 1u32..100,
    ) {
        let mut tracker = ParallaxTracker::new(
            Region::from_size(w as f32, h as f32),
            Sensitivity::Divisor(divisor as f32),
        );
        let v = tracker.on_move(x as f32, y as f32);
        let bound = tracker.bound();
        prop_assert!(v.x.abs() <= bound.x, "x {} beyond {}", v.x, bound.x);
        prop_assert!(v.y.abs() <= bound.y, "y {} beyond {}", v.y, bound.y);
        tracker.on_leave();
        prop_assert!(tracker.vector().is_zero());
    }

    #[test]
    fn at_most_one_panel_open(len in 1usize..16, toggles in prop::collection::vec(0usize..16, 0..40)) {
        let mut set = DisclosureSet::new(len);
        for i in toggles {
            if let Ok(t) = set.try_toggle(i) {
                prop_assert_ne!(t.opened, t.closed);
            }
            let open = (0..len).filter(|&j| set.is_open(j)).count();
            prop_assert!(open <= 1);
        }
    }

    #[test]
    fn double_toggle_from_closed_is_identity(len in 1usize..16, i in 0usize..16) {
        prop_assume!(i < len);
        let mut set = DisclosureSet::new(len);
        set.toggle(i);
        set.toggle(i);
        prop_assert_eq!(set.open_index(), None);
    }

    #[test]
    fn reveal_never_precedes_flip_plus_delay(
        count in 1usize..12,
        base_ms in 0u64..3000,
        step_ms in 0u64..300,
        now_ms in 0u64..10_000,
    ) {
        let group = RevealGroup::cascade(
            "cards",
            (0..count).map(|i| format!("card-{i}")),
            Cascade::linear(Duration::from_millis(base_ms), Duration::from_millis(step_ms)),
            MS_700,
            RevealStyle::rise(32.0),
        ).unwrap();
        prop_assert!(group.is_cascade());

        let mut trigger = RevealTrigger::new(MS_100);
        trigger.arm(Duration::ZERO);
        let now = Duration::from_millis(now_ms);
        trigger.poll(now);

        for (item, phase) in group.items().iter().zip(group.phases(&trigger, now)) {
            match trigger.revealed_at() {
                None => prop_assert_eq!(phase, RevealPhase::Hidden),
                Some(flip) => {
                    if now < flip + item.delay {
                        prop_assert!(!phase.is_visible());
                    }
                }
            }
        }

        let settled = trigger.revealed_at().and_then(|_| group.settles_at(&trigger));
        if let Some(end) = settled {
            prop_assert!(group.all_revealed(&trigger, end));
        }
    }
}
