#![forbid(unsafe_code)]

//! Section navigation controller.
//!
//! Owns the highlighted section and keeps it, the scroll position, and the
//! location fragment in agreement.
//!
//! # Modes
//!
//! - **Free**: every scroll event re-derives the active section from the
//!   view line (see [`crate::scrollspy`]) and syncs the fragment with a
//!   history *replace*.
//! - **Guarded**: a click, key press, load, or history move pins the active
//!   section to its target and starts a smooth scroll. Scroll events leave
//!   the pinned section alone until the scroll-end signal or the fallback
//!   deadline releases the guard.
//!
//! # Invariants
//!
//! 1. The active section is always a member of [`Section::ALL`].
//! 2. While guarded, the active section equals the pending target.
//! 3. The guard clears no later than `guard_timeout` after it was last
//!    engaged, provided the host delivers either a timer callback, a
//!    [`tick`](NavController::tick), or any scroll event after the deadline.
//! 4. Explicit navigation pushes a history entry only when the fragment is
//!    not already canonical for the target.
//!
//! # Failure Modes
//!
//! - Missing anchor: state and fragment follow the request, the physical
//!   scroll and the guard are skipped.
//! - Unknown fragment: ignored, the active section is kept.

use std::time::Duration;

use folio_core::event::{KeyCode, KeyEvent, NavEvent};
use folio_core::fragment::{fragment_for, is_canonical, parse_fragment_with_suffix};
use folio_core::section::Section;

use crate::config::NavConfig;
use crate::guard::{GuardChange, GuardTicket, ReleaseReason, ScrollGuard};
use crate::layout::{LayoutProvider, NavHost};
use crate::scrollspy::{select_section, view_line};
use crate::subscription::ListenerKind;

const FREE_LISTENERS: &[ListenerKind] = &[
    ListenerKind::Scroll,
    ListenerKind::KeyDown,
    ListenerKind::HistoryNavigation,
];

const GUARDED_LISTENERS: &[ListenerKind] = &[
    ListenerKind::Scroll,
    ListenerKind::KeyDown,
    ListenerKind::HistoryNavigation,
    ListenerKind::ScrollEnd,
];

/// Snapshot of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    /// Highlighted section.
    pub active_section: Section,
    /// Destination of the in-flight programmatic scroll.
    pub pending_target: Option<Section>,
    /// Whether a programmatic scroll is believed in progress.
    pub is_programmatic: bool,
}

/// Effect of one controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: Section,
    pub active: Section,
    pub guard: GuardChange,
}

impl Transition {
    fn unchanged(active: Section) -> Self {
        Self {
            previous: active,
            active,
            guard: GuardChange::Unchanged,
        }
    }

    /// Whether the active section changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.active
    }
}

/// How a guarded navigation writes the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentWrite {
    /// New history entry unless already canonical.
    Push,
    /// Rewrite in place unless already canonical.
    Replace,
}

/// Scroll-synchronized section navigation state machine.
#[derive(Debug, Clone)]
pub struct NavController {
    config: NavConfig,
    active: Section,
    guard: ScrollGuard,
}

impl Default for NavController {
    fn default() -> Self {
        Self::new(NavConfig::default(), "")
    }
}

impl NavController {
    /// Create a controller. The active section starts at the section named
    /// by `initial_fragment`, or the first section.
    #[must_use]
    pub fn new(config: NavConfig, initial_fragment: &str) -> Self {
        let active = parse_fragment_with_suffix(initial_fragment, &config.fragment_suffix)
            .unwrap_or(Section::FIRST);
        let guard = ScrollGuard::new(config.guard_timeout);
        Self {
            config,
            active,
            guard,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[must_use]
    pub fn active_section(&self) -> Section {
        self.active
    }

    /// Whether scroll-derived recomputation is currently suppressed.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        self.guard.is_engaged()
    }

    /// Ticket of the pending fallback timer, if guarded.
    #[must_use]
    pub fn guard_ticket(&self) -> Option<GuardTicket> {
        self.guard.ticket()
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        NavState {
            active_section: self.active,
            pending_target: self.guard.pending_target(),
            is_programmatic: self.guard.is_engaged(),
        }
    }

    /// Listeners the host must keep bound in the current state.
    #[must_use]
    pub fn listeners(&self) -> &'static [ListenerKind] {
        if self.guard.is_engaged() {
            GUARDED_LISTENERS
        } else {
            FREE_LISTENERS
        }
    }

    /// Normalize a raw fragment with the configured suffix.
    #[must_use]
    pub fn resolve_fragment(&self, raw: &str) -> Option<Section> {
        parse_fragment_with_suffix(raw, &self.config.fragment_suffix)
    }

    /// Dispatch a canonical event.
    pub fn handle<H>(&mut self, event: &NavEvent, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        match event {
            NavEvent::Load { fragment } => self.load(fragment, host, now),
            NavEvent::Scroll => self.on_scroll(host, now),
            NavEvent::ScrollEnd => self.on_scroll_end(),
            NavEvent::Click(target) => self.navigate(*target, host, now),
            NavEvent::Key(key) => self.on_key(*key, host, now),
            NavEvent::HistoryNavigation { fragment } => {
                self.on_history_navigation(fragment, host, now)
            }
            NavEvent::Tick => self.tick(now),
        }
    }

    /// Initial page load.
    ///
    /// A valid fragment scrolls to its section (offset-aware, guarded) and is
    /// rewritten to canonical form in place. Otherwise the active section is
    /// derived from the current scroll position.
    pub fn load<H>(&mut self, fragment: &str, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        match self.resolve_fragment(fragment) {
            Some(target) => {
                tracing::debug!(%target, fragment, "deep link on load");
                self.go_to(target, host, now, FragmentWrite::Replace)
            }
            None => {
                if !fragment.is_empty() {
                    tracing::debug!(fragment, "ignoring unknown fragment on load");
                }
                self.recompute(host)
            }
        }
    }

    /// Explicit navigation from a click (or a key press).
    pub fn navigate<H>(&mut self, target: Section, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        self.go_to(target, host, now, FragmentWrite::Push)
    }

    /// Navigation requested by id from outside the page (`"about"`,
    /// `"#about"`, `"about-section"`). Unknown ids are ignored.
    pub fn navigate_to_id<H>(&mut self, id: &str, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        match self.resolve_fragment(id) {
            Some(target) => self.navigate(target, host, now),
            None => {
                tracing::debug!(id, "ignoring unknown section");
                Transition::unchanged(self.active)
            }
        }
    }

    /// Back/forward moved the fragment.
    pub fn on_history_navigation<H>(
        &mut self,
        fragment: &str,
        host: &mut H,
        now: Duration,
    ) -> Transition
    where
        H: NavHost + ?Sized,
    {
        match self.resolve_fragment(fragment) {
            Some(target) => self.go_to(target, host, now, FragmentWrite::Replace),
            None => {
                tracing::debug!(fragment, "ignoring unknown fragment from history");
                Transition::unchanged(self.active)
            }
        }
    }

    /// Left/right move to the adjacent section, clamped to the sequence.
    pub fn on_key<H>(&mut self, key: KeyEvent, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        if !key.is_down() {
            return Transition::unchanged(self.active);
        }
        let target = match key.code {
            KeyCode::Left if !self.active.is_first() => self.active.previous(),
            KeyCode::Right if !self.active.is_last() => self.active.next(),
            _ => return Transition::unchanged(self.active),
        };
        self.navigate(target, host, now)
    }

    /// A scroll event. Recomputes the active section unless guarded.
    pub fn on_scroll<H>(&mut self, host: &mut H, now: Duration) -> Transition
    where
        H: NavHost + ?Sized,
    {
        let released = self.guard.poll(now);

        if let Some(pending) = self.guard.pending_target() {
            let previous = self.active;
            self.active = pending;
            return Transition {
                previous,
                active: pending,
                guard: GuardChange::Unchanged,
            };
        }

        let mut transition = self.recompute(host);
        if released {
            transition.guard = GuardChange::Released(ReleaseReason::Timeout);
        }
        transition
    }

    /// The platform reported that scrolling settled.
    pub fn on_scroll_end(&mut self) -> Transition {
        let guard = if self.guard.release_on_scroll_end() {
            GuardChange::Released(ReleaseReason::ScrollEnd)
        } else {
            GuardChange::Unchanged
        };
        Transition {
            guard,
            ..Transition::unchanged(self.active)
        }
    }

    /// A fallback timer fired. Stale tickets are ignored.
    pub fn on_guard_timeout(&mut self, ticket: GuardTicket) -> Transition {
        let guard = if self.guard.expire(ticket) {
            GuardChange::Released(ReleaseReason::Timeout)
        } else {
            GuardChange::Unchanged
        };
        Transition {
            guard,
            ..Transition::unchanged(self.active)
        }
    }

    /// Host clock advanced; expire the guard if its deadline passed.
    pub fn tick(&mut self, now: Duration) -> Transition {
        let guard = if self.guard.poll(now) {
            GuardChange::Released(ReleaseReason::Timeout)
        } else {
            GuardChange::Unchanged
        };
        Transition {
            guard,
            ..Transition::unchanged(self.active)
        }
    }

    fn go_to<H>(
        &mut self,
        target: Section,
        host: &mut H,
        now: Duration,
        write: FragmentWrite,
    ) -> Transition
    where
        H: NavHost + ?Sized,
    {
        let previous = self.active;
        self.active = target;

        let guard = match self.destination(target, host) {
            Some(top) => {
                let ticket = self.guard.engage(target, now);
                host.smooth_scroll_to(top);
                GuardChange::Engaged(ticket)
            }
            None => {
                tracing::debug!(%target, "section anchor missing, skipping scroll");
                if self.guard.cancel() {
                    GuardChange::Released(ReleaseReason::Superseded)
                } else {
                    GuardChange::Unchanged
                }
            }
        };

        if !is_canonical(&host.fragment(), target) {
            let fragment = fragment_for(target);
            match write {
                FragmentWrite::Push => host.push_fragment(&fragment),
                FragmentWrite::Replace => host.replace_fragment(&fragment),
            }
        }

        tracing::debug!(from = %previous, to = %target, ?write, "navigated");
        Transition {
            previous,
            active: target,
            guard,
        }
    }

    /// Offset-aware scroll destination for `target`, if its anchor exists.
    fn destination<L>(&self, target: Section, layout: &L) -> Option<f64>
    where
        L: LayoutProvider + ?Sized,
    {
        let bounds = layout.section_bounds(target)?;
        Some(bounds.top - layout.nav_bar_height() - self.config.scroll_offset)
    }

    fn recompute<H>(&mut self, host: &mut H) -> Transition
    where
        H: NavHost + ?Sized,
    {
        let previous = self.active;
        let line = view_line(host.viewport(), host.nav_bar_height(), &self.config);
        let measured = Section::ALL
            .into_iter()
            .filter_map(|section| host.section_bounds(section).map(|b| (section, b)));
        let selection = select_section(line, measured);
        let current = selection.or(previous);
        self.active = current;

        tracing::trace!(line, ?selection, %current, "scrollspy");
        if current != previous {
            tracing::debug!(from = %previous, to = %current, "scrollspy moved active section");
        }

        if !is_canonical(&host.fragment(), current) {
            host.replace_fragment(&fragment_for(current));
        }

        Transition {
            previous,
            active: current,
            guard: GuardChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;
    use crate::memory::{MemoryHistory, MemoryHost, StaticLayout};
    use folio_core::event::KeyEventKind;
    use folio_core::geometry::SectionBounds;

    // Hero [0,800) About [800,1400) Experience [1400,2300)
    // Projects [2300,3300) Contact [3300,3800); viewport 800, nav 64.
    fn page(fragment: &str) -> MemoryHost {
        MemoryHost::new(
            StaticLayout::stacked([800.0, 600.0, 900.0, 1000.0, 500.0], 64.0, 800.0),
            MemoryHistory::new(fragment),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn user_scroll(host: &mut MemoryHost, y: f64) {
        host.layout.set_scroll_y(y);
    }

    #[test]
    fn initial_section_from_fragment() {
        let c = NavController::new(NavConfig::default(), "#experience-section");
        assert_eq!(c.active_section(), Section::Experience);
        let c = NavController::new(NavConfig::default(), "#nope");
        assert_eq!(c.active_section(), Section::Hero);
    }

    #[test]
    fn navigate_pins_and_scrolls_with_offset() {
        let mut host = page("");
        let mut c = NavController::default();
        let t = c.navigate(Section::Projects, &mut host, ms(0));
        assert!(t.changed());
        assert!(matches!(t.guard, GuardChange::Engaged(_)));
        // 2300 - 64 - 24
        assert_eq!(host.scroll_requests, [2212.0]);
        assert_eq!(host.history.fragment(), "#projects");
        assert_eq!(host.history.pushes(), 1);
        assert_eq!(
            c.state(),
            NavState {
                active_section: Section::Projects,
                pending_target: Some(Section::Projects),
                is_programmatic: true,
            }
        );
    }

    #[test]
    fn scroll_while_guarded_keeps_target() {
        let mut host = page("");
        let mut c = NavController::default();
        c.navigate(Section::Projects, &mut host, ms(0));
        // Smooth scroll passes through earlier sections.
        for (i, y) in [100.0, 900.0, 1500.0].into_iter().enumerate() {
            user_scroll(&mut host, y);
            c.on_scroll(&mut host, ms(100 * (i as u64 + 1)));
            assert_eq!(c.active_section(), Section::Projects);
        }
        assert_eq!(host.history.replaces(), 0);
    }

    #[test]
    fn scroll_end_returns_to_free_mode() {
        let mut host = page("");
        let mut c = NavController::default();
        c.navigate(Section::About, &mut host, ms(0));
        let t = c.on_scroll_end();
        assert_eq!(t.guard, GuardChange::Released(ReleaseReason::ScrollEnd));
        assert!(!c.is_guarded());
        user_scroll(&mut host, 0.0);
        c.on_scroll(&mut host, ms(10));
        assert_eq!(c.active_section(), Section::Hero);
        assert_eq!(host.history.fragment(), "#hero");
    }

    #[test]
    fn fallback_timer_releases_and_stale_timer_is_ignored() {
        let mut host = page("");
        let mut c = NavController::default();
        let first = match c.navigate(Section::About, &mut host, ms(0)).guard {
            GuardChange::Engaged(ticket) => ticket,
            other => panic!("expected engagement, got {other:?}"),
        };
        let second = c.guard_ticket();
        c.navigate(Section::Contact, &mut host, ms(500));
        assert_ne!(second, c.guard_ticket());
        assert_eq!(c.on_guard_timeout(first).guard, GuardChange::Unchanged);
        assert!(c.is_guarded());
        let current = c.guard_ticket().unwrap();
        assert_eq!(current.deadline(), ms(2000));
        assert_eq!(
            c.on_guard_timeout(current).guard,
            GuardChange::Released(ReleaseReason::Timeout)
        );
    }

    #[test]
    fn scroll_after_deadline_releases_and_recomputes() {
        let mut host = page("");
        let mut c = NavController::default();
        c.navigate(Section::Projects, &mut host, ms(0));
        user_scroll(&mut host, 0.0);
        let t = c.on_scroll(&mut host, ms(1500));
        assert_eq!(t.guard, GuardChange::Released(ReleaseReason::Timeout));
        assert_eq!(c.active_section(), Section::Hero);
        assert_eq!(host.history.fragment(), "#hero");
    }

    #[test]
    fn repeated_clicks_push_once() {
        let mut host = page("#contact");
        let mut c = NavController::new(NavConfig::default(), "#contact");
        c.navigate(Section::Contact, &mut host, ms(0));
        c.navigate(Section::Contact, &mut host, ms(10));
        assert_eq!(host.history.pushes(), 0);
        assert_eq!(host.history.len(), 1);

        let mut host = page("");
        let mut c = NavController::default();
        c.navigate(Section::Contact, &mut host, ms(0));
        c.navigate(Section::Contact, &mut host, ms(10));
        assert_eq!(host.history.pushes(), 1);
    }

    #[test]
    fn legacy_fragment_click_pushes_canonical() {
        let mut host = page("#about-section");
        let mut c = NavController::new(NavConfig::default(), "#about-section");
        c.navigate(Section::About, &mut host, ms(0));
        assert_eq!(host.history.fragment(), "#about");
        assert_eq!(host.history.pushes(), 1);
    }

    #[test]
    fn keyboard_clamps_at_bounds() {
        let mut host = page("");
        let mut c = NavController::default();
        let left = KeyEvent::new(KeyCode::Left);
        let t = c.on_key(left, &mut host, ms(0));
        assert!(!t.changed());
        assert_eq!(c.active_section(), Section::Hero);
        assert!(host.scroll_requests.is_empty());

        let mut c = NavController::new(NavConfig::default(), "#contact");
        assert_eq!(c.active_section(), Section::LAST);
        let right = KeyEvent::new(KeyCode::Right);
        let t = c.on_key(right, &mut host, ms(0));
        assert!(!t.changed());
        assert_eq!(c.active_section(), Section::LAST);
        assert!(host.scroll_requests.is_empty());
        assert_eq!(host.history.pushes(), 0);
    }

    #[test]
    fn keyboard_moves_to_neighbor() {
        let mut host = page("");
        let mut c = NavController::default();
        c.on_key(KeyEvent::new(KeyCode::Right), &mut host, ms(0));
        assert_eq!(c.active_section(), Section::About);
        c.on_key(KeyEvent::new(KeyCode::Right), &mut host, ms(10));
        assert_eq!(c.active_section(), Section::Experience);
        c.on_key(KeyEvent::new(KeyCode::Left), &mut host, ms(20));
        assert_eq!(c.active_section(), Section::About);
        assert_eq!(host.history.pushes(), 3);
    }

    #[test]
    fn key_release_and_other_keys_are_ignored() {
        let mut host = page("");
        let mut c = NavController::default();
        let release = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release);
        c.on_key(release, &mut host, ms(0));
        c.on_key(KeyEvent::new(KeyCode::Down), &mut host, ms(0));
        c.on_key(KeyEvent::new(KeyCode::Char('l')), &mut host, ms(0));
        assert_eq!(c.active_section(), Section::Hero);
        assert!(host.scroll_requests.is_empty());
    }

    #[test]
    fn free_scroll_replaces_fragment_without_new_entries() {
        let mut host = page("");
        let mut c = NavController::default();
        // line = 1500 + 64 + 24 + 160 = 1748 -> Experience
        user_scroll(&mut host, 1500.0);
        let t = c.on_scroll(&mut host, ms(0));
        assert_eq!(t.active, Section::Experience);
        assert_eq!(host.history.fragment(), "#experience");
        assert_eq!(host.history.len(), 1);
        c.on_scroll(&mut host, ms(5));
        assert_eq!(host.history.replaces(), 1);
    }

    #[test]
    fn history_navigation_scrolls_and_canonicalizes() {
        let mut host = page("#hero");
        let mut c = NavController::default();
        host.history.push_fragment("#projects-section");
        let fragment = host.history.fragment();
        let t = c.on_history_navigation(&fragment, &mut host, ms(0));
        assert_eq!(t.active, Section::Projects);
        assert!(matches!(t.guard, GuardChange::Engaged(_)));
        assert_eq!(host.scroll_requests, [2212.0]);
        assert_eq!(host.history.fragment(), "#projects");
        assert_eq!(host.history.len(), 2);
    }

    #[test]
    fn unknown_history_fragment_is_ignored() {
        let mut host = page("#about");
        let mut c = NavController::new(NavConfig::default(), "#about");
        let t = c.on_history_navigation("#unknown", &mut host, ms(0));
        assert!(!t.changed());
        assert_eq!(c.active_section(), Section::About);
        assert!(host.scroll_requests.is_empty());
        assert_eq!(host.history.replaces(), 0);
    }

    #[test]
    fn navigate_to_unknown_id_is_ignored() {
        let mut host = page("#about");
        let mut c = NavController::new(NavConfig::default(), "#about");
        let t = c.navigate_to_id("blog", &mut host, ms(0));
        assert!(!t.changed());
        assert!(matches!(t.guard, GuardChange::Unchanged));
        assert_eq!(
            c.state(),
            NavState {
                active_section: Section::About,
                pending_target: None,
                is_programmatic: false,
            }
        );
        assert!(host.scroll_requests.is_empty());
        assert_eq!(host.history.pushes(), 0);
        assert_eq!(host.history.replaces(), 0);
    }

    #[test]
    fn navigate_to_id_accepts_fragment_forms() {
        let mut host = page("");
        let mut c = NavController::default();
        let t = c.navigate_to_id("experience-section", &mut host, ms(0));
        assert_eq!(t.active, Section::Experience);
        assert_eq!(host.scroll_requests, [1312.0]);
        assert_eq!(host.history.fragment(), "#experience");
        assert_eq!(host.history.pushes(), 1);
    }

    #[test]
    fn load_with_unknown_fragment_canonicalizes_from_scroll() {
        let mut host = page("#nope");
        user_scroll(&mut host, 1500.0);
        let mut c = NavController::new(NavConfig::default(), "#nope");
        let t = c.load("#nope", &mut host, ms(0));
        // line = 1500 + 248 = 1748 -> Experience
        assert_eq!(t.active, Section::Experience);
        assert!(!c.is_guarded());
        assert!(host.scroll_requests.is_empty());
        assert_eq!(host.history.fragment(), "#experience");
        assert_eq!(host.history.replaces(), 1);
        assert_eq!(host.history.pushes(), 0);
        assert_eq!(host.history.len(), 1);
    }

    #[test]
    fn load_with_deep_link_scrolls_without_pushing() {
        let mut host = page("#contact");
        let mut c = NavController::new(NavConfig::default(), "#contact");
        let t = c.load("#contact", &mut host, ms(0));
        assert_eq!(t.active, Section::Contact);
        assert!(c.is_guarded());
        assert_eq!(host.scroll_requests, [3212.0]);
        assert_eq!(host.history.pushes(), 0);
        assert_eq!(host.history.replaces(), 0);
    }

    #[test]
    fn load_without_fragment_follows_scroll_position() {
        let mut host = page("");
        user_scroll(&mut host, 900.0);
        let mut c = NavController::default();
        let t = c.load("", &mut host, ms(0));
        // line = 900 + 248 = 1148 -> About
        assert_eq!(t.active, Section::About);
        assert!(!c.is_guarded());
        assert_eq!(host.history.fragment(), "#about");
    }

    #[test]
    fn missing_anchor_updates_state_but_skips_scroll() {
        let mut layout = StaticLayout::stacked([800.0, 600.0, 900.0, 1000.0, 500.0], 64.0, 800.0);
        layout.set_section(Section::Projects, None);
        let mut host = MemoryHost::new(layout, MemoryHistory::default());
        let mut c = NavController::default();
        let t = c.navigate(Section::Projects, &mut host, ms(0));
        assert_eq!(t.guard, GuardChange::Unchanged);
        assert_eq!(c.active_section(), Section::Projects);
        assert!(!c.is_guarded());
        assert!(host.scroll_requests.is_empty());
        assert_eq!(host.history.fragment(), "#projects");
    }

    #[test]
    fn missing_anchor_supersedes_inflight_guard() {
        let mut layout = StaticLayout::stacked([800.0, 600.0, 900.0, 1000.0, 500.0], 64.0, 800.0);
        layout.set_section(Section::Contact, None);
        let mut host = MemoryHost::new(layout, MemoryHistory::default());
        let mut c = NavController::default();
        c.navigate(Section::About, &mut host, ms(0));
        let t = c.navigate(Section::Contact, &mut host, ms(100));
        assert_eq!(t.guard, GuardChange::Released(ReleaseReason::Superseded));
        assert_eq!(c.state().pending_target, None);
    }

    #[test]
    fn gap_keeps_previous_section() {
        let layout = StaticLayout::new(folio_core::geometry::Viewport::new(0.0, 800.0, 4000.0))
            .with_section(Section::Hero, SectionBounds::new(0.0, 400.0))
            .with_section(Section::About, SectionBounds::new(1000.0, 400.0));
        let mut host = MemoryHost::new(layout, MemoryHistory::new("#hero"));
        let mut c = NavController::default();
        // line = 400 + 24 + 160 = 584, inside the gap.
        user_scroll(&mut host, 400.0);
        c.on_scroll(&mut host, ms(0));
        assert_eq!(c.active_section(), Section::Hero);
        assert_eq!(host.history.replaces(), 0);
    }

    #[test]
    fn listeners_follow_guard() {
        let mut host = page("");
        let mut c = NavController::default();
        assert!(!c.listeners().contains(&ListenerKind::ScrollEnd));
        c.navigate(Section::About, &mut host, ms(0));
        assert!(c.listeners().contains(&ListenerKind::ScrollEnd));
        c.on_scroll_end();
        assert!(!c.listeners().contains(&ListenerKind::ScrollEnd));
    }

    #[test]
    fn handle_dispatches_events() {
        let mut host = page("");
        let mut c = NavController::default();
        c.handle(&NavEvent::Click(Section::Experience), &mut host, ms(0));
        assert_eq!(c.active_section(), Section::Experience);
        let t = c.handle(&NavEvent::Tick, &mut host, ms(1499));
        assert_eq!(t.guard, GuardChange::Unchanged);
        let t = c.handle(&NavEvent::Tick, &mut host, ms(1500));
        assert_eq!(t.guard, GuardChange::Released(ReleaseReason::Timeout));
    }
}
