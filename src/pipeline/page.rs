//! Page - the composition root.
//!
//! Owns every component of the portfolio page and routes events and timers
//! between them:
//!
//! ```text
//! PageEvent ─┬─ scroll ─→ ThrottleGate ─→ NavigationController ─→ ScrollTracker
//!            │                          │                       └→ RevealAnimator
//!            │                          └→ StatsCounter
//!            ├─ resize ─→ Debouncer ─→ layout::compute_sections ─→ relayout + re-anchor
//!            └─ click / navigate / submit / filter ...
//!
//! Scheduler ─→ typing steps, counter frames, message fade, smooth scroll frames
//! ```
//!
//! Time never comes from the clock inside the page: every entry point takes
//! the current `Instant`, so the whole page is deterministic under test.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::{Page, PageContent, PageEvent};
//!
//! let mut page = Page::mount(config, PageContent::portfolio(), Capabilities::full(), viewport, Instant::now())?;
//!
//! page.handle(PageEvent::ScrollTo(900.0), Instant::now());
//! page.tick(Instant::now());
//!
//! // Clears every pending timer; dropping the page does the same
//! page.teardown();
//! ```

use std::io;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::events::{PageEvent, PageTimer};
use crate::config::FolioConfig;
use crate::effects::{
    CursorFollower, LazyImages, ParticleField, StatsCounter, TiltEffect, TypingEffect,
};
use crate::error::Result;
use crate::form::{ContactForm, ContactSubmission};
use crate::layout::{compute_sections, Anchor, AnchoredBox, PageGeometry, SectionBlock};
use crate::showcase::{default_projects, Project, Showcase};
use crate::state::input::{self, InputMapper};
use crate::state::navigation::NavigationController;
use crate::state::smooth_scroll::SmoothScroll;
use crate::timing::{Debouncer, Scheduler, ThrottleGate};
use crate::types::{Capabilities, ElementBounds, NavLink, Point, Rect, ScrollBehavior, Viewport};

// =============================================================================
// Page Content
// =============================================================================

/// Everything a page is built from.
///
/// Document content (reveal targets, counters, cards, controls, images) is
/// pinned to a section with an [`Anchor`], so it follows its section through
/// every layout pass. Navbar geometry is viewport coordinates (the navbar is
/// fixed).
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub sections: Vec<SectionBlock>,
    pub links: Vec<NavLink>,
    /// Reveal targets as `(anchor, height)`. The list position is the index.
    pub reveal_targets: Vec<(Anchor, f64)>,
    /// Stats counters as `(label, anchor)`.
    pub counters: Vec<(String, Anchor)>,
    pub typing_texts: Vec<String>,
    pub projects: Vec<Project>,
    /// Project cards that tilt under the pointer.
    pub cards: Vec<AnchoredBox>,
    /// Buttons and tags in the document that scale the cursor.
    pub controls: Vec<AnchoredBox>,
    /// Navbar links that scale the cursor.
    pub navbar_controls: Vec<Rect>,
    /// Images as `(deferred source, box)`, loaded on first view.
    pub images: Vec<(String, AnchoredBox)>,
    pub menu: Option<Rect>,
    pub menu_toggle: Option<Rect>,
    /// Animated particle background behind the hero.
    pub particles: bool,
}

impl PageContent {
    /// The portfolio page: hero, about, research, projects, visualizations,
    /// notes and contact, with a mobile menu in the navbar.
    pub fn portfolio() -> Self {
        let sections = vec![
            SectionBlock::screen("home", 1.0),
            SectionBlock::fixed("about", 640.0),
            SectionBlock::fixed("research", 560.0),
            SectionBlock::fixed("projects", 880.0),
            SectionBlock::fixed("visualizations", 720.0),
            SectionBlock::fixed("notes", 480.0),
            SectionBlock::fixed("contact", 720.0),
        ];
        let links = vec![
            NavLink::new("home", "Home"),
            NavLink::new("about", "About"),
            NavLink::new("research", "Research"),
            NavLink::new("projects", "Projects"),
            NavLink::new("visualizations", "Visualizations"),
            NavLink::new("contact", "Contact"),
        ];
        let navbar_controls = (0..links.len())
            .map(|i| Rect::new(520.0 + 112.0 * i as f64, 20.0, 96.0, 24.0))
            .collect();

        // Hero buttons, skill tags, project filters, send button
        let mut controls = vec![
            AnchoredBox::new("home", 520.0, 440.0, 180.0, 48.0),
            AnchoredBox::new("home", 520.0, 660.0, 180.0, 48.0),
        ];
        controls.extend(
            (0..4).map(|i| AnchoredBox::new("about", 480.0, 64.0 + 120.0 * i as f64, 104.0, 32.0)),
        );
        controls.extend(
            (0..6).map(|i| AnchoredBox::new("projects", 40.0, 64.0 + 128.0 * i as f64, 112.0, 36.0)),
        );
        controls.push(AnchoredBox::new("contact", 600.0, 64.0, 200.0, 48.0));

        let card_x = [64.0, 428.0, 792.0];
        let cards = card_x
            .iter()
            .map(|&x| AnchoredBox::new("projects", 96.0, x, 340.0, 280.0))
            .collect();
        let images = ["bell-test", "ai-architecture", "fem-solver"]
            .iter()
            .zip(card_x)
            .map(|(name, x)| {
                (
                    format!("/images/projects/{name}.webp"),
                    AnchoredBox::new("projects", 96.0, x, 340.0, 160.0),
                )
            })
            .collect();

        Self {
            sections,
            links,
            reveal_targets: vec![
                (Anchor::new("about", 0.0), 120.0),
                (Anchor::new("about", 216.0), 360.0),
                (Anchor::new("research", 0.0), 400.0),
                (Anchor::new("projects", 0.0), 600.0),
                (Anchor::new("visualizations", 0.0), 500.0),
                (Anchor::new("contact", 0.0), 600.0),
            ],
            counters: ["12+", "40+", "8+"]
                .iter()
                .map(|label| (label.to_string(), Anchor::new("about", 416.0)))
                .collect(),
            typing_texts: vec![
                "Creative Developer & Designer".to_string(),
                "Frontend Specialist".to_string(),
                "UI/UX Enthusiast".to_string(),
                "Problem Solver".to_string(),
            ],
            projects: default_projects(),
            cards,
            controls,
            navbar_controls,
            images,
            menu: Some(Rect::new(0.0, 64.0, 1280.0, 320.0)),
            menu_toggle: Some(Rect::new(1216.0, 16.0, 40.0, 32.0)),
            particles: false,
        }
    }
}

/// Anchored content as registered, keyed by each component's index.
#[derive(Default)]
struct Placement {
    reveal: Vec<(usize, Anchor, f64)>,
    counters: Vec<(usize, Anchor)>,
    cards: Vec<(usize, AnchoredBox)>,
    images: Vec<(usize, AnchoredBox)>,
    controls: Vec<AnchoredBox>,
    /// `controls` resolved against the current geometry.
    control_rects: Vec<Rect>,
}

fn unplaced(kind: &'static str, anchor: &Anchor) {
    warn!(kind, section = %anchor.section, "content anchored to unknown section");
}

// =============================================================================
// Page
// =============================================================================

pub struct Page {
    config: FolioConfig,
    viewport: Viewport,
    blocks: Vec<SectionBlock>,
    geometry: PageGeometry,
    nav: NavigationController,
    gate: ThrottleGate,
    resize: Debouncer<(f64, f64)>,
    scheduler: Scheduler<PageTimer>,
    smooth: SmoothScroll,
    form: ContactForm,
    showcase: Showcase,
    typing: Option<TypingEffect>,
    counters: StatsCounter,
    tilt: TiltEffect,
    cursor: Option<CursorFollower>,
    particles: Option<ParticleField>,
    images: Option<LazyImages>,
    placement: Placement,
    navbar_controls: Vec<Rect>,
    /// Section a running smooth scroll is headed for.
    smooth_section: Option<String>,
    mounted: bool,
}

impl Page {
    /// Build the page and run the initial checks.
    ///
    /// Fails on an invalid config or a layout error. The initial scroll
    /// check runs directly, outside the throttle, the way a page load does.
    pub fn mount(
        config: FolioConfig,
        content: PageContent,
        capabilities: Capabilities,
        viewport: Viewport,
        now: Instant,
    ) -> Result<Self> {
        config.validate()?;

        let geometry = compute_sections(&content.sections, &viewport, &config)?;

        let mut placement = Placement::default();

        let mut nav = NavigationController::new(&config, capabilities);
        nav.register_sections(geometry.sections.clone());
        nav.register_links(content.links);
        nav.set_menu_geometry(content.menu, content.menu_toggle);

        let mut bounds = Vec::new();
        for (index, (anchor, height)) in content.reveal_targets.into_iter().enumerate() {
            match anchor.resolve(&geometry) {
                Some(top) => {
                    bounds.push(ElementBounds::new(index, top, height));
                    placement.reveal.push((index, anchor, height));
                }
                None => unplaced("reveal target", &anchor),
            }
        }
        if let Some(reveal) = nav.reveal_mut() {
            reveal.register(bounds, &viewport);
        }

        let mut counters = StatsCounter::new(&config);
        for (label, anchor) in content.counters {
            match anchor.resolve(&geometry) {
                Some(top) => placement.counters.push((counters.register(label, top), anchor)),
                None => unplaced("counter", &anchor),
            }
        }

        let mut tilt = TiltEffect::new();
        for card in content.cards {
            match card.resolve(&geometry) {
                Some(rect) => placement.cards.push((tilt.register(rect), card)),
                None => unplaced("card", &card.anchor),
            }
        }

        // Deferred sources need an intersection feed, same as reveal
        let images = capabilities.contains(Capabilities::REVEAL).then(|| {
            let mut images = LazyImages::new();
            for (src, image) in content.images {
                match image.resolve(&geometry) {
                    Some(rect) => {
                        let index = images.register(src, rect.y, rect.height);
                        placement.images.push((index, image));
                    }
                    None => unplaced("image", &image.anchor),
                }
            }
            images
        });

        for control in &content.controls {
            match control.resolve(&geometry) {
                Some(rect) => placement.control_rects.push(rect),
                None => unplaced("control", &control.anchor),
            }
        }
        placement.controls = content.controls;

        let mut navbar_controls = content.navbar_controls;
        navbar_controls.extend(content.menu_toggle);

        let typing = (!content.typing_texts.is_empty())
            .then(|| TypingEffect::from_config(content.typing_texts, &config));

        let desktop = config.is_desktop(viewport.width);
        let cursor = desktop.then(CursorFollower::new);
        let particles = (content.particles && desktop).then(|| {
            ParticleField::new(
                config.particle_count,
                viewport.width,
                viewport.height,
                config.particle_link_distance,
                &mut rand::thread_rng(),
            )
        });

        let mut page = Self {
            gate: ThrottleGate::new(config.throttle_interval()).with_trailing(config.trailing_scroll),
            resize: Debouncer::new(config.resize_debounce()),
            scheduler: Scheduler::new(),
            smooth: SmoothScroll::new(viewport.scroll_y, config.smooth_scroll_speed),
            form: ContactForm::new(),
            showcase: Showcase::new(content.projects),
            blocks: content.sections,
            config,
            viewport,
            geometry,
            nav,
            typing,
            counters,
            tilt,
            cursor,
            particles,
            images,
            placement,
            navbar_controls,
            smooth_section: None,
            mounted: true,
        };

        if let Some(typing) = page.typing.as_mut() {
            if let Some(delay) = typing.step() {
                page.scheduler.schedule_after(now, delay, PageTimer::TypingStep);
            }
        }
        if page.particles.is_some() {
            let frame = page.config.frame_interval();
            page.scheduler.schedule_after(now, frame, PageTimer::ParticleFrame);
        }
        page.apply_scroll(now);

        info!(
            sections = page.geometry.sections.len(),
            links = page.nav.links().len(),
            capabilities = ?page.nav.capabilities(),
            "page mounted"
        );
        for link in page.nav.dangling_links() {
            warn!(section = %link.section_id, "link has no matching section");
        }

        Ok(page)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle one event. Returns `false` once the page should stop
    /// (quit requested or already torn down).
    pub fn handle(&mut self, event: PageEvent, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }

        match event {
            PageEvent::ScrollTo(y) => self.user_scroll(y, now),
            PageEvent::ScrollBy(delta) => self.user_scroll(self.viewport.scroll_y + delta, now),
            PageEvent::Resize { width, height } => self.resize.trigger(now, (width, height)),
            PageEvent::Click(point) => {
                self.nav.handle_click(point);
            }
            PageEvent::PointerMove(point) => self.pointer_move(point),
            PageEvent::Navigate(section_id) => self.navigate(&section_id, now),
            PageEvent::NavigateNth(n) => match self.nav.links().get(n) {
                Some(link) => {
                    let section_id = link.section_id.clone();
                    self.navigate(&section_id, now);
                }
                None => debug!(n, "no nav link at index"),
            },
            PageEvent::ToggleMenu => {
                self.nav.toggle_menu();
            }
            PageEvent::Intersect {
                index,
                is_intersecting,
            } => {
                if let Some(reveal) = self.nav.reveal_mut() {
                    reveal.on_intersect(index, is_intersecting);
                }
            }
            PageEvent::ImageIntersect {
                index,
                is_intersecting,
            } => {
                if let Some(images) = self.images.as_mut() {
                    images.on_intersect(index, is_intersecting);
                }
            }
            PageEvent::Submit(submission) => self.submit(submission, now),
            PageEvent::FilterProjects(filter) => {
                self.showcase.set_filter(&filter);
            }
            PageEvent::ToggleTheme => {
                self.showcase.toggle_theme();
            }
            PageEvent::Quit => return false,
        }

        true
    }

    /// The user moved the page. Cancels any smooth scroll in flight.
    fn user_scroll(&mut self, y: f64, now: Instant) {
        let y = self.clamp_scroll(y);
        self.smooth.jump_to(y);
        self.smooth_section = None;
        self.scheduler.cancel_where(|t| *t == PageTimer::ScrollFrame);
        self.viewport.scroll_y = y;
        self.throttled_scroll(now);
    }

    fn clamp_scroll(&self, y: f64) -> f64 {
        if y.is_nan() {
            return self.viewport.scroll_y;
        }
        y.clamp(0.0, self.geometry.max_scroll(self.viewport.height))
    }

    fn throttled_scroll(&mut self, now: Instant) {
        if self.gate.try_acquire(now) {
            self.apply_scroll(now);
        }
    }

    /// Scroll handler body: navbar flag, scroll-spy, reveal, images and counters.
    fn apply_scroll(&mut self, now: Instant) {
        self.nav.on_scroll(&self.viewport);
        if let Some(images) = self.images.as_mut() {
            images.check_viewport(&self.viewport);
        }

        if self.counters.check(&self.viewport) > 0 && self.counters.is_running() {
            self.schedule_once(now, self.counters.frame(), PageTimer::CounterFrame);
        }
    }

    fn navigate(&mut self, section_id: &str, now: Instant) {
        let Some(request) = self.nav.scroll_to(section_id) else {
            return;
        };
        let top = self.clamp_scroll(request.top);

        match request.behavior {
            ScrollBehavior::Smooth => {
                self.smooth.scroll_to(top);
                self.smooth_section = Some(section_id.to_string());
                let frame = self.config.frame_interval();
                self.schedule_once(now, frame, PageTimer::ScrollFrame);
            }
            ScrollBehavior::Instant => self.user_scroll(top, now),
        }
    }

    fn pointer_move(&mut self, point: Point) {
        if let Some(cursor) = &self.cursor {
            cursor.move_to(point);
        }

        // Cards and controls live in document space
        let document_point = Point::new(point.x, point.y + self.viewport.scroll_y);
        let mut hovering = false;
        for index in 0..self.tilt.len() {
            if self.tilt.contains(index, document_point) {
                self.tilt.pointer_move(index, document_point);
                hovering = true;
            } else {
                self.tilt.pointer_leave(index);
            }
        }
        hovering = hovering
            || self.navbar_controls.iter().any(|rect| rect.contains(point))
            || self
                .placement
                .control_rects
                .iter()
                .any(|rect| rect.contains(document_point));

        if let Some(cursor) = &self.cursor {
            cursor.set_hovering(hovering);
        }
    }

    fn submit(&mut self, submission: ContactSubmission, now: Instant) {
        self.form.fill(submission);
        // Outcome is shown through the form message
        let _ = self.form.submit();

        self.scheduler.cancel_where(PageTimer::is_message);
        let visible = Duration::from_millis(self.config.message_visible_ms);
        self.scheduler
            .schedule_after(now, visible, PageTimer::FadeMessage(self.form.generation()));
    }

    fn schedule_once(&mut self, now: Instant, delay: Duration, timer: PageTimer) {
        if !self.scheduler.contains(&timer) {
            self.scheduler.schedule_after(now, delay, timer);
        }
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Run everything due at `now`: timers, the trailing scroll call and a
    /// settled resize. Returns how many timers fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        if !self.mounted {
            return 0;
        }

        let due = self.scheduler.take_due(now);
        let fired = due.len();
        for timer in due {
            self.fire(timer, now);
        }

        if self.gate.poll_trailing(now) {
            self.apply_scroll(now);
        }

        if let Some((width, height)) = self.resize.poll(now) {
            self.apply_resize(width, height, now);
        }

        fired
    }

    fn fire(&mut self, timer: PageTimer, now: Instant) {
        let frame = self.config.frame_interval();

        match timer {
            PageTimer::TypingStep => {
                if let Some(delay) = self.typing.as_mut().and_then(TypingEffect::step) {
                    self.scheduler.schedule_after(now, delay, PageTimer::TypingStep);
                }
            }
            PageTimer::CounterFrame => {
                if self.counters.tick() {
                    self.scheduler.schedule_after(now, frame, PageTimer::CounterFrame);
                }
            }
            PageTimer::FadeMessage(generation) => {
                if self.form.begin_fade(generation) {
                    let fade = Duration::from_millis(self.config.message_fade_ms);
                    self.scheduler
                        .schedule_after(now, fade, PageTimer::RemoveMessage(generation));
                }
            }
            PageTimer::RemoveMessage(generation) => {
                self.form.remove_message(generation);
            }
            PageTimer::ScrollFrame => {
                self.viewport.scroll_y = self.smooth.tick();
                let ran = self.gate.try_acquire(now);
                if ran {
                    self.apply_scroll(now);
                }
                if self.smooth.is_animating() {
                    self.scheduler.schedule_after(now, frame, PageTimer::ScrollFrame);
                } else {
                    self.smooth_section = None;
                    if !ran {
                        // Landing frame always reaches the handlers
                        self.apply_scroll(now);
                    }
                }
            }
            PageTimer::ParticleFrame => {
                if let Some(field) = self.particles.as_mut() {
                    field.step();
                    self.scheduler.schedule_after(now, frame, PageTimer::ParticleFrame);
                }
            }
        }
    }

    fn apply_resize(&mut self, width: f64, height: f64, now: Instant) {
        self.viewport.width = width;
        self.viewport.height = height;

        match compute_sections(&self.blocks, &self.viewport, &self.config) {
            Ok(geometry) => {
                self.nav.relayout(geometry.sections.clone());
                self.geometry = geometry;
                self.place_content();
            }
            Err(err) => warn!(error = %err, "section layout failed, keeping previous offsets"),
        }

        let clamped = self.clamp_scroll(self.viewport.scroll_y);
        if clamped != self.viewport.scroll_y {
            self.viewport.scroll_y = clamped;
            self.smooth.jump_to(clamped);
        }
        self.retarget_smooth_scroll();

        let desktop = self.config.is_desktop(width);
        match (&self.cursor, desktop) {
            (None, true) => self.cursor = Some(CursorFollower::new()),
            (Some(_), false) => self.cursor = None,
            _ => {}
        }
        if let Some(field) = self.particles.as_mut() {
            field.resize(width, height);
        }

        debug!(width, height, document_height = self.geometry.document_height, "resize applied");
        self.apply_scroll(now);
    }

    /// Move anchored content to its section's new offsets.
    fn place_content(&mut self) {
        let geometry = &self.geometry;
        let placement = &mut self.placement;

        if let Some(reveal) = self.nav.reveal_mut() {
            reveal.relayout(placement.reveal.iter().filter_map(|(index, anchor, height)| {
                anchor
                    .resolve(geometry)
                    .map(|top| ElementBounds::new(*index, top, *height))
            }));
        }
        for (index, anchor) in &placement.counters {
            if let Some(top) = anchor.resolve(geometry) {
                self.counters.set_top(*index, top);
            }
        }
        for (index, card) in &placement.cards {
            if let Some(rect) = card.resolve(geometry) {
                self.tilt.set_card(*index, rect);
            }
        }
        if let Some(images) = self.images.as_mut() {
            for (index, image) in &placement.images {
                if let Some(rect) = image.resolve(geometry) {
                    images.set_bounds(*index, rect.y, rect.height);
                }
            }
        }
        placement.control_rects = placement
            .controls
            .iter()
            .filter_map(|control| control.resolve(geometry))
            .collect();
    }

    /// Point a running smooth scroll at its section's new offset.
    fn retarget_smooth_scroll(&mut self) {
        let Some(section_id) = self.smooth_section.as_deref() else {
            return;
        };
        let Some(section) = self.geometry.section(section_id) else {
            return;
        };
        let top = (section.top_offset - self.config.header_offset).max(0.0);
        let top = self.clamp_scroll(top);
        debug!(section = %section_id, top, "smooth scroll retargeted");
        self.smooth.scroll_to(top);
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let trailing = self
            .gate
            .has_trailing()
            .then(|| self.gate.reopens_at())
            .flatten();

        [self.scheduler.next_deadline(), self.resize.deadline(), trailing]
            .into_iter()
            .flatten()
            .min()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Clear every pending timer and stop all animations.
    ///
    /// Idempotent. The page ignores events and ticks afterwards.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        let cleared = self.scheduler.clear();
        self.gate.reset();
        self.resize.cancel();
        self.smooth.jump_to(self.smooth.position());
        self.smooth_section = None;

        info!(cleared, "page torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn showcase(&self) -> &Showcase {
        &self.showcase
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn counters(&self) -> &StatsCounter {
        &self.counters
    }

    pub fn tilt(&self) -> &TiltEffect {
        &self.tilt
    }

    pub fn cursor(&self) -> Option<&CursorFollower> {
        self.cursor.as_ref()
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn images(&self) -> Option<&LazyImages> {
        self.images.as_ref()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.scheduler.contains(&PageTimer::ScrollFrame)
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Event Loop
// =============================================================================

/// Drive a page from the terminal until quit.
///
/// Polls crossterm with a timeout bounded by the next page deadline, so
/// timers fire on time without busy-waiting.
pub fn run(page: &mut Page) -> io::Result<()> {
    let mapper = InputMapper::new(page.config());
    let idle = page.config().frame_interval();

    input::enable_mouse()?;
    let result = (|| -> io::Result<()> {
        while page.is_mounted() {
            let now = Instant::now();
            let timeout = page
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(now))
                .unwrap_or(idle)
                .min(idle);

            if let Some(event) = input::poll_event(timeout)? {
                if let Some(event) = mapper.convert(event, page.viewport()) {
                    if !page.handle(event, Instant::now()) {
                        break;
                    }
                }
            }
            page.tick(Instant::now());
        }
        Ok(())
    })();
    let _ = input::disable_mouse();

    result
}
