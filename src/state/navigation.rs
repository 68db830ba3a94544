//! Navigation System - links, scroll-spy and the mobile menu
//!
//! Composes the scroll tracker with:
//! - Smooth scroll requests for link clicks (optimistic active link)
//! - The mobile menu `open` signal (toggle, close on navigate/outside click)
//! - The navbar `scrolled` signal (compact style past a threshold)
//! - An optional reveal animator fed from the same scroll ticks
//!
//! One controller covers every page variant. Its [`Capabilities`] decide
//! which scroll-driven features run:
//!
//! | Capabilities | Scroll tick does |
//! |--------------|------------------|
//! | `BASIC_NAV` | navbar flag only |
//! | `+ SCROLL_SPY` | + active section |
//! | `+ REVEAL` | + reveal check |
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::navigation::NavigationController;
//! use spark_folio::{Capabilities, FolioConfig, NavLink, Section};
//!
//! let mut nav = NavigationController::new(&FolioConfig::default(), Capabilities::full());
//! nav.register_sections(vec![Section::new("about", 0.0, 800.0)]);
//! nav.register_links(vec![NavLink::new("about", "About")]);
//!
//! if let Some(request) = nav.scroll_to("about") {
//!     renderer.smooth_scroll(request.top);
//! }
//! ```

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use super::reveal::RevealAnimator;
use super::scroll::ScrollTracker;
use crate::config::FolioConfig;
use crate::types::{
    Capabilities, MenuState, NavLink, Point, Rect, ScrollBehavior, ScrollRequest, ScrollState,
    Section, Viewport,
};

pub struct NavigationController {
    capabilities: Capabilities,
    scrolled_threshold: f64,
    tracker: ScrollTracker,
    reveal: Option<RevealAnimator>,
    links: Vec<NavLink>,
    menu_open: Signal<bool>,
    scrolled: Signal<bool>,
    menu_bounds: Option<Rect>,
    toggle_bounds: Option<Rect>,
}

impl NavigationController {
    /// Create a controller. `BASIC_NAV` is always included.
    ///
    /// With `REVEAL` in `capabilities` an empty reveal animator is attached.
    pub fn new(config: &FolioConfig, capabilities: Capabilities) -> Self {
        let capabilities = capabilities | Capabilities::BASIC_NAV;
        let reveal = capabilities
            .contains(Capabilities::REVEAL)
            .then(|| RevealAnimator::new(config.reveal_margin));

        Self {
            capabilities,
            scrolled_threshold: config.scrolled_threshold,
            tracker: ScrollTracker::new(config.header_offset),
            reveal,
            links: Vec::new(),
            menu_open: signal(false),
            scrolled: signal(false),
            menu_bounds: None,
            toggle_bounds: None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub fn register_sections(&mut self, sections: impl IntoIterator<Item = Section>) {
        self.tracker.register(sections);
        self.warn_dangling();
    }

    pub fn register_links(&mut self, links: impl IntoIterator<Item = NavLink>) {
        self.links = links.into_iter().collect();
        self.warn_dangling();
    }

    /// Attach (or replace) the reveal animator and enable `REVEAL`.
    pub fn attach_reveal(&mut self, reveal: RevealAnimator) {
        self.capabilities |= Capabilities::REVEAL;
        self.reveal = Some(reveal);
    }

    /// Hit areas for outside-click detection, in viewport coordinates.
    ///
    /// Without a toggle button the page has no mobile menu wiring and
    /// outside clicks are ignored.
    pub fn set_menu_geometry(&mut self, menu: Option<Rect>, toggle: Option<Rect>) {
        self.menu_bounds = menu;
        self.toggle_bounds = toggle;
    }

    fn warn_dangling(&self) {
        if self.tracker.sections().is_empty() || self.links.is_empty() {
            return;
        }
        for link in self.dangling_links() {
            warn!(section = %link.section_id, label = %link.label, "nav link targets unknown section");
        }
    }

    /// Links whose section id matches no registered section.
    pub fn dangling_links(&self) -> Vec<&NavLink> {
        self.links
            .iter()
            .filter(|link| self.tracker.section(&link.section_id).is_none())
            .collect()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a section.
    ///
    /// Marks the section active right away, closes the menu and returns the
    /// smooth scroll the renderer should perform. An unknown id is a silent
    /// no-op that returns `None`.
    pub fn scroll_to(&mut self, section_id: &str) -> Option<ScrollRequest> {
        let Some(section) = self.tracker.section(section_id) else {
            warn!(section = %section_id, "scroll target not found");
            return None;
        };

        let top = (section.top_offset - self.tracker.header_offset()).max(0.0);
        debug!(section = %section_id, top, "navigating");

        self.tracker.set_active(section_id);
        self.close_menu();

        Some(ScrollRequest {
            top,
            behavior: ScrollBehavior::Smooth,
        })
    }

    /// Apply a permitted scroll tick.
    pub fn on_scroll(&mut self, viewport: &Viewport) {
        self.scrolled.set(viewport.scroll_y > self.scrolled_threshold);

        if self.capabilities.contains(Capabilities::SCROLL_SPY) {
            self.tracker.update(viewport.scroll_y);
        } else {
            self.tracker.record_scroll(viewport.scroll_y);
        }

        if let Some(reveal) = self.reveal.as_mut() {
            reveal.check_viewport(viewport);
        }
    }

    /// Recompute section offsets after a resize.
    pub fn relayout(&mut self, sections: impl IntoIterator<Item = Section>) {
        if self.capabilities.contains(Capabilities::SCROLL_SPY) {
            self.tracker.relayout(sections);
        } else {
            self.tracker.register(sections);
        }
    }

    // =========================================================================
    // Mobile Menu
    // =========================================================================

    /// Flip the menu. Returns the new `open` state.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.menu_open.get();
        self.menu_open.set(open);
        open
    }

    pub fn close_menu(&self) {
        if self.menu_open.get() {
            self.menu_open.set(false);
        }
    }

    /// Close an open menu when `target` is outside both the menu panel and
    /// the toggle button. Returns `true` if the menu was closed.
    pub fn handle_outside_click(&self, target: Point) -> bool {
        let Some(toggle) = self.toggle_bounds else {
            return false;
        };
        if !self.menu_open.get() {
            return false;
        }

        let in_menu = self.menu_bounds.is_some_and(|menu| menu.contains(target));
        if in_menu || toggle.contains(target) {
            return false;
        }

        self.menu_open.set(false);
        true
    }

    /// Route a click: the toggle button flips the menu, anything else is
    /// checked as an outside click.
    pub fn handle_click(&self, target: Point) -> MenuState {
        match self.toggle_bounds {
            Some(toggle) if toggle.contains(target) => {
                self.toggle_menu();
            }
            _ => {
                self.handle_outside_click(target);
            }
        }
        self.menu_state()
    }

    // =========================================================================
    // State Access
    // =========================================================================

    pub fn menu_state(&self) -> MenuState {
        MenuState {
            open: self.menu_open.get(),
        }
    }

    pub fn menu_signal(&self) -> Signal<bool> {
        self.menu_open.clone()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn scrolled_signal(&self) -> Signal<bool> {
        self.scrolled.clone()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    pub fn active_section_id(&self) -> Option<String> {
        self.tracker.active_section_id()
    }

    /// The link pointing at the active section, if any.
    pub fn active_link(&self) -> Option<&NavLink> {
        let active = self.tracker.active_section_id()?;
        self.links.iter().find(|link| link.section_id == active)
    }

    pub fn is_link_active(&self, link: &NavLink) -> bool {
        self.tracker.is_active(&link.section_id)
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn reveal(&self) -> Option<&RevealAnimator> {
        self.reveal.as_ref()
    }

    pub fn reveal_mut(&mut self) -> Option<&mut RevealAnimator> {
        self.reveal.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementBounds;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("about", 0.0, 800.0),
            Section::new("physics", 800.0, 800.0),
            Section::new("ai", 1600.0, 800.0),
        ]
    }

    fn links() -> Vec<NavLink> {
        vec![
            NavLink::new("about", "About"),
            NavLink::new("physics", "Physics"),
            NavLink::new("ai", "AI"),
        ]
    }

    fn nav(capabilities: Capabilities) -> NavigationController {
        let mut nav = NavigationController::new(&FolioConfig::default(), capabilities);
        nav.register_sections(sections());
        nav.register_links(links());
        nav.set_menu_geometry(
            Some(Rect::new(0.0, 64.0, 1280.0, 300.0)),
            Some(Rect::new(1200.0, 16.0, 40.0, 40.0)),
        );
        nav
    }

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, 1280.0, 800.0)
    }

    #[test]
    fn test_basic_nav_always_present() {
        let nav = NavigationController::new(&FolioConfig::default(), Capabilities::empty());
        assert_eq!(nav.capabilities(), Capabilities::BASIC_NAV);
        assert!(nav.reveal().is_none());
    }

    #[test]
    fn test_scroll_to_subtracts_header() {
        let mut nav = nav(Capabilities::full());

        let request = nav.scroll_to("physics").unwrap();

        assert_eq!(request.top, 700.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_scroll_to_clamps_at_top() {
        let mut nav = nav(Capabilities::full());
        assert_eq!(nav.scroll_to("about").unwrap().top, 0.0);
    }

    #[test]
    fn test_scroll_to_sets_active_optimistically() {
        let mut nav = nav(Capabilities::full());
        nav.on_scroll(&viewport(0.0));

        nav.scroll_to("ai");

        // Scroll has not happened yet
        assert_eq!(nav.scroll_state().scroll_y, 0.0);
        assert_eq!(nav.active_section_id().as_deref(), Some("ai"));
        assert_eq!(nav.active_link().map(|l| l.label.as_str()), Some("AI"));
    }

    #[test]
    fn test_scroll_to_closes_menu() {
        let mut nav = nav(Capabilities::full());
        nav.toggle_menu();

        nav.scroll_to("physics");

        assert!(!nav.menu_state().open);
    }

    #[test]
    fn test_scroll_to_unknown_is_noop() {
        let mut nav = nav(Capabilities::full());
        nav.toggle_menu();
        nav.scroll_to("about");
        nav.toggle_menu();

        assert_eq!(nav.scroll_to("blog"), None);

        // Menu and active section untouched
        assert!(nav.menu_state().open);
        assert_eq!(nav.active_section_id().as_deref(), Some("about"));
    }

    #[test]
    fn test_toggle_menu_twice_restores() {
        let nav = nav(Capabilities::BASIC_NAV);
        let before = nav.menu_state();

        assert!(nav.toggle_menu());
        assert!(!nav.toggle_menu());

        assert_eq!(nav.menu_state(), before);
    }

    #[test]
    fn test_outside_click_closes_open_menu() {
        let nav = nav(Capabilities::BASIC_NAV);
        nav.toggle_menu();

        assert!(nav.handle_outside_click(Point::new(600.0, 700.0)));
        assert!(!nav.menu_state().open);
    }

    #[test]
    fn test_click_inside_menu_or_toggle_keeps_open() {
        let nav = nav(Capabilities::BASIC_NAV);
        nav.toggle_menu();

        assert!(!nav.handle_outside_click(Point::new(600.0, 100.0)));
        assert!(!nav.handle_outside_click(Point::new(1210.0, 20.0)));
        assert!(nav.menu_state().open);
    }

    #[test]
    fn test_outside_click_on_closed_menu_is_noop() {
        let nav = nav(Capabilities::BASIC_NAV);
        assert!(!nav.handle_outside_click(Point::new(600.0, 700.0)));
        assert!(!nav.menu_state().open);
    }

    #[test]
    fn test_outside_click_without_toggle_is_ignored() {
        let mut nav = nav(Capabilities::BASIC_NAV);
        nav.set_menu_geometry(Some(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        nav.toggle_menu();

        assert!(!nav.handle_outside_click(Point::new(600.0, 700.0)));
        assert!(nav.menu_state().open);
    }

    #[test]
    fn test_handle_click_routes_toggle() {
        let nav = nav(Capabilities::BASIC_NAV);

        assert!(nav.handle_click(Point::new(1210.0, 20.0)).open);
        assert!(!nav.handle_click(Point::new(1210.0, 700.0)).open);
    }

    #[test]
    fn test_on_scroll_sets_scrolled_flag() {
        let mut nav = nav(Capabilities::BASIC_NAV);

        nav.on_scroll(&viewport(50.0));
        assert!(!nav.is_scrolled());

        nav.on_scroll(&viewport(51.0));
        assert!(nav.is_scrolled());
    }

    #[test]
    fn test_basic_nav_does_not_track_active() {
        let mut nav = nav(Capabilities::BASIC_NAV);

        nav.on_scroll(&viewport(900.0));

        assert_eq!(nav.scroll_state().scroll_y, 900.0);
        assert_eq!(nav.active_section_id(), None);
    }

    #[test]
    fn test_scroll_spy_tracks_active() {
        let mut nav = nav(Capabilities::BASIC_NAV | Capabilities::SCROLL_SPY);

        nav.on_scroll(&viewport(800.0));
        assert_eq!(nav.active_section_id().as_deref(), Some("physics"));
        assert!(nav.is_link_active(&NavLink::new("physics", "Physics")));
        assert!(!nav.is_link_active(&NavLink::new("ai", "AI")));
    }

    #[test]
    fn test_scroll_feeds_reveal() {
        let mut nav = nav(Capabilities::full());
        let reveal = nav.reveal_mut().unwrap();
        reveal.register(vec![ElementBounds::new(3, 1500.0, 200.0)], &viewport(0.0));

        nav.on_scroll(&viewport(900.0));

        assert!(nav.reveal().unwrap().is_revealed(3));
    }

    #[test]
    fn test_attach_reveal_enables_capability() {
        let mut nav = nav(Capabilities::BASIC_NAV);
        nav.attach_reveal(RevealAnimator::new(0.0));

        assert!(nav.capabilities().contains(Capabilities::REVEAL));
        assert!(nav.reveal().is_some());
    }

    #[test]
    fn test_dangling_links() {
        let mut nav = nav(Capabilities::BASIC_NAV);
        let mut with_typo = links();
        with_typo.push(NavLink::new("contcat", "Contact"));
        nav.register_links(with_typo);

        let dangling = nav.dangling_links();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].section_id, "contcat");
    }

    #[test]
    fn test_relayout_keeps_active_under_scroll_spy() {
        let mut nav = nav(Capabilities::full());
        nav.on_scroll(&viewport(1700.0));

        nav.relayout(vec![
            Section::new("about", 0.0, 600.0),
            Section::new("physics", 600.0, 600.0),
            Section::new("ai", 1200.0, 600.0),
        ]);

        assert_eq!(nav.active_section_id().as_deref(), Some("ai"));
        assert_eq!(nav.scroll_to("ai").unwrap().top, 1100.0);
    }
}
