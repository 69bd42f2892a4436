#![forbid(unsafe_code)]

//! The landing page model.
//!
//! [`LandingPage`] wires the engine components to page content:
//!
//! - one page-wide [`RevealTrigger`] and a reveal group per section, with
//!   every delay derived from [`SECTIONS`] through the cascade policy;
//! - a hero scene tracker and a profile card tracker;
//! - the logo and testimonial marquees and the theme carousel;
//! - the FAQ accordion.
//!
//! Its visual state is a pure function of host time plus the events seen so
//! far. [`LandingPage::frame`] renders it as a [`PageFrame`].

use core::time::Duration;

use tapion_core::animation::stagger::{Cascade, delay};
use tapion_core::config::EngineConfig;
use tapion_core::disclosure::DisclosureSet;
use tapion_core::geometry::Region;
use tapion_core::motion::{
    CoverflowSpec, MarqueeSpec, MotionFactory, MotionLoop, MotionSpec, StandardMotion,
};
use tapion_core::parallax::{ParallaxTracker, Sensitivity, TiltMapping};
use tapion_core::presentation::{self, Presentation};
use tapion_core::reveal::{RevealGroup, RevealItem, RevealPhase, RevealStyle, RevealTrigger};
use tracing::{debug, info, warn};

use crate::content::{ContentProvider, LandingContent};
use crate::program::{Cmd, Model};
use crate::{HostEvent, PointerTarget, WebError};

/// FAQ toggle icon transition.
const FAQ_ICON_TRANSITION: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// Section table
// ---------------------------------------------------------------------------

/// Content-backed item lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentList {
    /// Card template previews.
    CardTemplates,
    /// Store template previews.
    StoreTemplates,
    /// "How it works" steps.
    Steps,
    /// Demo statistics.
    Stats,
    /// Pricing plans.
    Plans,
    /// Fee rows.
    Fees,
    /// FAQ entries.
    Faqs,
}

impl ContentList {
    fn len(self, content: &dyn ContentProvider) -> usize {
        match self {
            Self::CardTemplates => content.card_templates().len(),
            Self::StoreTemplates => content.store_templates().len(),
            Self::Steps => content.steps().len(),
            Self::Stats => content.stats().len(),
            Self::Plans => content.plans().len(),
            Self::Fees => content.fees().len(),
            Self::Faqs => content.faqs().len(),
        }
    }
}

/// Items of one section.
#[derive(Debug, Clone, Copy)]
pub enum SectionItems {
    /// Fixed page chrome, each item with its own style.
    Fixed(&'static [(&'static str, RevealStyle)]),
    /// One item per content entry, sharing a style.
    Content(ContentList, RevealStyle),
}

/// A reveal section: where its cascade starts and how it steps.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    /// Section name, also the reveal group name.
    pub name: &'static str,
    /// Delay of the first item after the flip, ms.
    pub base_ms: u64,
    /// Spacing between items, ms.
    pub step_ms: u64,
    /// Transition length, ms. `None` uses the configured reveal transition.
    pub transition_ms: Option<u64>,
    /// What gets revealed.
    pub items: SectionItems,
}

const RISE_SM: RevealStyle = RevealStyle::rise(16.0);
const RISE_MD: RevealStyle = RevealStyle::rise(32.0);
const RISE_LG: RevealStyle = RevealStyle::rise(40.0);
const FADE: RevealStyle = RevealStyle::FADE;
const POP: RevealStyle = RevealStyle::zoom(0.95);

/// Every reveal on the page, in document order.
///
/// Offsets are relative to the single page flip. Sections are independent
/// cascades: a later section may start before an earlier one finishes.
pub const SECTIONS: &[Section] = &[
    Section {
        name: "header",
        base_ms: 0,
        step_ms: 0,
        transition_ms: None,
        items: SectionItems::Fixed(&[("header", RevealStyle::drop(16.0))]),
    },
    Section {
        name: "hero",
        base_ms: 200,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[
            ("badge", RISE_SM),
            ("title", RISE_SM),
            ("subtitle", FADE),
            ("cta", POP),
            ("note", FADE),
        ]),
    },
    Section {
        name: "hero-cards",
        base_ms: 600,
        step_ms: 100,
        transition_ms: Some(1000),
        items: SectionItems::Fixed(&[
            ("card-1", RISE_LG),
            ("card-2", RISE_LG),
            ("card-3", RISE_LG),
            ("card-4", RISE_LG),
        ]),
    },
    Section {
        name: "trusted",
        base_ms: 700,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[("label", FADE), ("logo-marquee", FADE)]),
    },
    Section {
        name: "showcase",
        base_ms: 300,
        step_ms: 0,
        transition_ms: Some(1000),
        items: SectionItems::Fixed(&[("phone-frame", RISE_MD), ("carousel", RISE_MD)]),
    },
    Section {
        name: "templates",
        base_ms: 100,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[("label", FADE), ("title", RISE_SM)]),
    },
    Section {
        name: "card-templates",
        base_ms: 300,
        step_ms: 50,
        transition_ms: None,
        items: SectionItems::Content(ContentList::CardTemplates, RISE_SM),
    },
    Section {
        name: "store",
        base_ms: 900,
        step_ms: 0,
        transition_ms: None,
        items: SectionItems::Fixed(&[("title", RISE_SM)]),
    },
    Section {
        name: "store-templates",
        base_ms: 1000,
        step_ms: 50,
        transition_ms: None,
        items: SectionItems::Content(ContentList::StoreTemplates, RISE_SM),
    },
    Section {
        name: "how-it-works",
        base_ms: 1200,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[("title", RISE_SM), ("subtitle", FADE)]),
    },
    Section {
        name: "steps",
        base_ms: 1400,
        step_ms: 150,
        transition_ms: None,
        items: SectionItems::Content(ContentList::Steps, RISE_MD),
    },
    Section {
        name: "demo",
        base_ms: 2000,
        step_ms: 200,
        transition_ms: None,
        items: SectionItems::Fixed(&[("video", POP), ("stats-panel", RISE_MD)]),
    },
    Section {
        name: "stats",
        base_ms: 2300,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Content(ContentList::Stats, RISE_SM),
    },
    Section {
        name: "pricing",
        base_ms: 2800,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[("label", FADE), ("title", RISE_SM)]),
    },
    Section {
        name: "plans",
        base_ms: 3000,
        step_ms: 150,
        transition_ms: None,
        items: SectionItems::Content(ContentList::Plans, RISE_MD),
    },
    Section {
        name: "fees",
        base_ms: 3500,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Content(ContentList::Fees, RISE_MD),
    },
    Section {
        name: "testimonials",
        base_ms: 3900,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[
            ("badge", FADE),
            ("label", FADE),
            ("title", RISE_SM),
            ("marquee", FADE),
        ]),
    },
    Section {
        name: "faq",
        base_ms: 4400,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[("label", FADE), ("title", RISE_SM)]),
    },
    Section {
        name: "faqs",
        base_ms: 4600,
        step_ms: 50,
        transition_ms: None,
        items: SectionItems::Content(ContentList::Faqs, RISE_MD),
    },
    Section {
        name: "cta",
        base_ms: 5800,
        step_ms: 100,
        transition_ms: None,
        items: SectionItems::Fixed(&[
            ("title", RISE_SM),
            ("text", FADE),
            ("button", POP),
            ("note", FADE),
            ("footer", FADE),
        ]),
    },
    Section {
        name: "profile-card",
        base_ms: 0,
        step_ms: 0,
        transition_ms: Some(300),
        items: SectionItems::Fixed(&[("card", RevealStyle::rise(32.0).with_scale(0.95))]),
    },
    Section {
        name: "profile",
        base_ms: 0,
        step_ms: 100,
        transition_ms: Some(500),
        items: SectionItems::Fixed(&[
            ("avatar", RevealStyle::zoom(0.75)),
            ("name", RISE_SM),
            ("role", RISE_SM),
            ("bio", FADE),
            ("links", FADE),
        ]),
    },
];

fn build_section(
    section: &Section,
    content: &dyn ContentProvider,
    config: &EngineConfig,
) -> Result<RevealGroup, WebError> {
    let base = Duration::from_millis(section.base_ms);
    let step = Duration::from_millis(section.step_ms);
    let transition = section
        .transition_ms
        .map_or(config.reveal_transition, Duration::from_millis);
    let group = match section.items {
        SectionItems::Fixed(items) => {
            let mut group = RevealGroup::new(section.name);
            for (order, (id, style)) in items.iter().enumerate() {
                group.push(RevealItem::new(
                    *id,
                    order,
                    delay(base, order, step),
                    transition,
                    *style,
                ))?;
            }
            group
        }
        SectionItems::Content(list, style) => RevealGroup::cascade(
            section.name,
            (0..list.len(content)).map(|i| format!("{}-{i}", section.name)),
            Cascade::linear(base, step),
            transition,
            style,
        )?,
    };
    Ok(group)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Geometry supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Visible width of the logo track.
    pub logo_viewport: f32,
    /// Visible width of the testimonial track.
    pub testimonial_viewport: f32,
    /// Hero scene bounds.
    pub hero: Region,
    /// Profile card bounds.
    pub profile_card: Region,
    /// Width of one logo including its gap.
    pub logo_extent: f32,
    /// Width of one testimonial card including its margins.
    pub testimonial_extent: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            logo_viewport: 672.0,
            testimonial_viewport: 1440.0,
            hero: Region::from_size(1440.0, 900.0),
            profile_card: Region::new(528.0, 190.0, 384.0, 520.0),
            logo_extent: 180.0,
            testimonial_extent: 416.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// One revealable element.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFrame {
    /// Item id within its section.
    pub id: String,
    /// Entrance phase at the frame instant.
    pub phase: RevealPhase,
    /// Target state with its delayed transition.
    pub presentation: Presentation,
}

/// One reveal section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFrame {
    /// Section name from [`SECTIONS`].
    pub name: String,
    /// Items in order of appearance.
    pub items: Vec<ItemFrame>,
}

/// A marquee track.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeFrame {
    /// Duplicated content run.
    pub items: Vec<String>,
    /// Horizontal offset of the track, pixels (zero or negative).
    pub offset: f32,
    /// Whether the loop is running.
    pub animated: bool,
    /// Track transform.
    pub track: Presentation,
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    /// Image source.
    pub src: String,
    /// Stacking order; the centered slide is highest.
    pub z_index: i32,
    /// Coverflow transform and opacity.
    pub presentation: Presentation,
}

/// The theme carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselFrame {
    /// Continuous slide position.
    pub position: f32,
    /// Slide nearest to `position`.
    pub active: usize,
    /// Whether the loop is running.
    pub animated: bool,
    /// Slides in content order.
    pub slides: Vec<SlideFrame>,
}

/// One FAQ entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFrame {
    /// Whether this panel is the open one.
    pub open: bool,
    /// Answer body, clamped by max-height.
    pub panel: Presentation,
    /// Toggle icon rotation.
    pub icon: Presentation,
}

/// Snapshot of the whole page at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    /// Host time of the snapshot.
    pub at: Duration,
    /// Whether the page-wide reveal flag has flipped.
    pub revealed: bool,
    /// Reveal sections, in table order.
    pub sections: Vec<SectionFrame>,
    /// Hero scene tilt.
    pub hero: Presentation,
    /// Profile card tilt.
    pub profile_card: Presentation,
    /// Trusted-by logo track.
    pub logos: MarqueeFrame,
    /// Testimonial track.
    pub testimonials: MarqueeFrame,
    /// Theme carousel.
    pub carousel: CarouselFrame,
    /// FAQ panels, in content order.
    pub faq: Vec<PanelFrame>,
    /// Index of the open FAQ panel.
    pub open_panel: Option<usize>,
}

impl PageFrame {
    /// Look up a section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionFrame> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Look up an item as `section/id`.
    #[must_use]
    pub fn item(&self, section: &str, id: &str) -> Option<&ItemFrame> {
        self.section(section)?.items.iter().find(|i| i.id == id)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// The landing page.
#[derive(Debug)]
pub struct LandingPage<F> {
    config: EngineConfig,
    lifecycle: Lifecycle,
    trigger: RevealTrigger,
    sections: Vec<RevealGroup>,
    hero: ParallaxTracker,
    card: ParallaxTracker,
    logo_run: Vec<String>,
    testimonial_run: Vec<String>,
    slides: Vec<String>,
    logos: MotionLoop<F>,
    testimonials: MotionLoop<F>,
    carousel: MotionLoop<F>,
    faq: DisclosureSet,
}

impl LandingPage<StandardMotion> {
    /// The bundled page with default layout and configuration.
    pub fn bundled() -> Result<Self, WebError> {
        let content = LandingContent::bundled()?;
        Self::new(&content, Layout::default(), EngineConfig::default(), StandardMotion)
    }
}

impl<F: MotionFactory> LandingPage<F> {
    /// Compose the page. `factory` builds every motion loop.
    pub fn new(
        content: &dyn ContentProvider,
        layout: Layout,
        config: EngineConfig,
        factory: F,
    ) -> Result<Self, WebError>
    where
        F: Clone,
    {
        config.validate()?;

        let sections = SECTIONS
            .iter()
            .map(|s| build_section(s, content, &config))
            .collect::<Result<Vec<_>, _>>()?;

        let logo_spec = MarqueeSpec::new(
            content.logos().len(),
            layout.logo_extent,
            config.logo_marquee_speed,
            layout.logo_viewport,
        );
        let testimonial_spec = MarqueeSpec::new(
            content.testimonials().len(),
            layout.testimonial_extent,
            config.testimonial_marquee_speed,
            layout.testimonial_viewport,
        );
        let names: Vec<String> = content.testimonials().iter().map(|t| t.name.clone()).collect();
        let carousel_spec = CoverflowSpec::new(
            content.slides().len(),
            config.carousel_slide_duration,
            config.carousel_initial_slide,
        )
        .params(config.coverflow);

        Ok(Self {
            trigger: RevealTrigger::new(config.reveal_latency),
            sections,
            hero: ParallaxTracker::new(
                layout.hero,
                Sensitivity::Divisor(config.pointer_sensitivity),
            ),
            card: ParallaxTracker::new(
                layout.profile_card,
                Sensitivity::MaxTilt(config.card_max_tilt),
            ),
            logo_run: logo_spec.run(content.logos()),
            testimonial_run: testimonial_spec.run(&names),
            slides: content.slides().to_vec(),
            logos: MotionLoop::new("logos", MotionSpec::Marquee(logo_spec), factory.clone()),
            testimonials: MotionLoop::new(
                "testimonials",
                MotionSpec::Marquee(testimonial_spec),
                factory.clone(),
            ),
            carousel: MotionLoop::new("themes", MotionSpec::Coverflow(carousel_spec), factory),
            faq: DisclosureSet::new(content.faqs().len()),
            config,
            lifecycle: Lifecycle::Created,
        })
    }

    /// Reveal groups, in table order.
    #[must_use]
    pub fn sections(&self) -> &[RevealGroup] {
        &self.sections
    }

    /// The page-wide trigger.
    #[must_use]
    pub fn trigger(&self) -> &RevealTrigger {
        &self.trigger
    }

    /// The FAQ accordion.
    #[must_use]
    pub fn faq(&self) -> &DisclosureSet {
        &self.faq
    }

    /// The logo marquee loop.
    #[must_use]
    pub fn logos(&self) -> &MotionLoop<F> {
        &self.logos
    }

    /// The testimonial marquee loop.
    #[must_use]
    pub fn testimonials(&self) -> &MotionLoop<F> {
        &self.testimonials
    }

    /// The theme carousel loop.
    #[must_use]
    pub fn carousel(&self) -> &MotionLoop<F> {
        &self.carousel
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the page is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    fn loops_mut(&mut self) -> [&mut MotionLoop<F>; 3] {
        [&mut self.logos, &mut self.testimonials, &mut self.carousel]
    }

    fn tracker(&mut self, target: PointerTarget) -> &mut ParallaxTracker {
        match target {
            PointerTarget::Hero => &mut self.hero,
            PointerTarget::ProfileCard => &mut self.card,
        }
    }

    /// Route one inbound event.
    pub fn handle(&mut self, event: HostEvent, now: Duration) -> Cmd {
        match event {
            HostEvent::Mount => self.mount_at(now),
            HostEvent::Unmount => self.teardown(),
            _ if self.lifecycle == Lifecycle::Unmounted => Cmd::none(),
            HostEvent::PointerMove { target, x, y } => {
                self.tracker(target).on_move(x, y);
                Cmd::none()
            }
            HostEvent::PointerLeave { target } => {
                self.tracker(target).on_leave();
                Cmd::none()
            }
            HostEvent::Toggle { index } => match self.faq.try_toggle(index) {
                Ok(t) => {
                    debug!(opened = ?t.opened, closed = ?t.closed, "faq toggled");
                    Cmd::none()
                }
                Err(e) => {
                    warn!(error = %e, "faq toggle ignored");
                    Cmd::log(format!("ignored toggle: {e}"))
                }
            },
            HostEvent::Tick => Cmd::none(),
        }
    }

    fn mount_at(&mut self, now: Duration) -> Cmd {
        if self.lifecycle != Lifecycle::Created {
            return Cmd::none();
        }
        self.lifecycle = Lifecycle::Mounted;
        self.trigger.arm(now);
        let init_delay = self.config.loop_init_delay;
        for l in self.loops_mut() {
            l.mount(now, init_delay);
        }
        info!(
            now_ms = now.as_millis() as u64,
            sections = self.sections.len(),
            "landing page mounted"
        );
        Cmd::none()
    }

    fn teardown(&mut self) -> Cmd {
        if self.lifecycle == Lifecycle::Unmounted {
            return Cmd::none();
        }
        self.lifecycle = Lifecycle::Unmounted;
        let pending = self.trigger.cancel();
        for l in self.loops_mut() {
            l.teardown();
        }
        info!(reveal_cancelled = pending, "landing page unmounted");
        Cmd::none()
    }

    /// Fire due timers. Returns `true` if anything flipped or started.
    pub fn poll_timers(&mut self, now: Duration) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }
        let mut changed = self.trigger.poll(now).is_some();
        for l in self.loops_mut() {
            changed |= l.poll(now);
        }
        changed
    }

    /// Whether consecutive frames differ.
    #[must_use]
    pub fn animating(&self, now: Duration) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            return false;
        }
        if self.trigger.is_pending() {
            return true;
        }
        let revealing = self.trigger.is_revealed()
            && self.sections.iter().any(|s| !s.all_revealed(&self.trigger, now));
        revealing || self.logos.is_running() || self.testimonials.is_running() || self.carousel.is_running()
    }

    /// Earliest pending timer.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        [
            self.trigger.deadline(),
            self.logos.deadline(),
            self.testimonials.deadline(),
            self.carousel.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn marquee_frame(run: &[String], l: &MotionLoop<F>, now: Duration) -> MarqueeFrame {
        let sample = l.sample(now);
        MarqueeFrame {
            items: run.to_vec(),
            offset: sample.offset,
            animated: sample.animated,
            track: presentation::marquee_track(sample.offset),
        }
    }

    fn carousel_frame(&self, now: Duration) -> CarouselFrame {
        let sample = self.carousel.sample(now);
        let slides = match self.carousel.spec() {
            MotionSpec::Coverflow(spec) => spec
                .slide_transforms(sample.offset)
                .iter()
                .zip(&self.slides)
                .map(|(t, src)| SlideFrame {
                    src: src.clone(),
                    z_index: t.z_index,
                    presentation: presentation::slide(t),
                })
                .collect(),
            MotionSpec::Marquee(_) => Vec::new(),
        };
        let active = match self.carousel.spec() {
            MotionSpec::Coverflow(spec) => spec.active_index(sample.offset),
            MotionSpec::Marquee(_) => 0,
        };
        CarouselFrame {
            position: sample.offset,
            active,
            animated: sample.animated,
            slides,
        }
    }

    /// Render the page at `now`.
    #[must_use]
    pub fn frame(&self, now: Duration) -> PageFrame {
        let revealed = self.trigger.is_revealed();
        let flip = self.trigger.revealed_at();
        let sections = self
            .sections
            .iter()
            .map(|g| SectionFrame {
                name: g.name().to_string(),
                items: g
                    .items()
                    .iter()
                    .map(|item| ItemFrame {
                        id: item.id.clone(),
                        phase: item.phase_at(flip, now),
                        presentation: presentation::reveal(revealed, item),
                    })
                    .collect(),
            })
            .collect();

        let faq = (0..self.faq.len())
            .map(|i| {
                let open = self.faq.is_open(i);
                PanelFrame {
                    open,
                    panel: presentation::disclosure_panel(
                        open,
                        self.config.disclosure_bound,
                        self.config.disclosure_transition,
                    ),
                    icon: presentation::disclosure_icon(open, FAQ_ICON_TRANSITION),
                }
            })
            .collect();

        PageFrame {
            at: now,
            revealed,
            sections,
            hero: presentation::tilt(self.hero.vector(), TiltMapping::Scene),
            profile_card: presentation::tilt(self.card.vector(), TiltMapping::Card),
            logos: Self::marquee_frame(&self.logo_run, &self.logos, now),
            testimonials: Self::marquee_frame(&self.testimonial_run, &self.testimonials, now),
            carousel: self.carousel_frame(now),
            faq,
            open_panel: self.faq.open_index(),
        }
    }
}

impl<F: MotionFactory> Model for LandingPage<F> {
    type Frame = PageFrame;

    fn mount(&mut self, now: Duration) -> Cmd {
        self.mount_at(now)
    }

    fn update(&mut self, event: HostEvent, now: Duration) -> Cmd {
        self.handle(event, now)
    }

    fn poll(&mut self, now: Duration) -> bool {
        self.poll_timers(now)
    }

    fn is_animating(&self, now: Duration) -> bool {
        self.animating(now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.deadline()
    }

    fn view(&self, now: Duration) -> PageFrame {
        self.frame(now)
    }

    fn unmount(&mut self) -> Cmd {
        self.teardown()
    }
}
