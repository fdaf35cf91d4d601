#![forbid(unsafe_code)]

//! Step-based navigator for host-driven pages.
//!
//! [`StepNavigator`] drives a [`NavController`] without threads, blocking,
//! or platform timers. The host (JavaScript, or a test) controls the loop:
//!
//! 1. Report measurements via [`StepNavigator::set_section`],
//!    [`StepNavigator::set_nav_bar_height`], and [`StepNavigator::set_viewport`].
//! 2. Push events via [`StepNavigator::push_event`].
//! 3. Advance time via [`StepNavigator::advance_time`].
//! 4. Call [`StepNavigator::step`] to process pending events.
//! 5. Apply [`StepNavigator::take_outputs`]: start the scroll commands,
//!    write the history ops, highlight the active section.
//!
//! Every step polls the guard deadline, so a programmatic scroll is
//! released within the guard timeout of host time even if the host never
//! reports a scroll end.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use folio_core::event::NavEvent;
//! use folio_core::section::Section;
//! use folio_runtime::{NavConfig, StaticLayout};
//! use folio_web::step_navigator::StepNavigator;
//!
//! let layout = StaticLayout::stacked([800.0, 600.0, 900.0, 1000.0, 500.0], 64.0, 800.0);
//! let mut nav = StepNavigator::with_layout(NavConfig::default(), layout);
//! nav.init("").unwrap();
//!
//! nav.push_event(NavEvent::Click(Section::About));
//! nav.step().unwrap();
//! let outputs = nav.take_outputs();
//! assert_eq!(outputs.active_section, Section::About);
//! assert_eq!(outputs.scroll_commands[0].top, 712.0);
//!
//! nav.advance_time(Duration::from_millis(1500));
//! let result = nav.step().unwrap();
//! assert!(!result.guarded);
//! ```

use core::time::Duration;

use folio_core::event::NavEvent;
use folio_core::geometry::{SectionBounds, Viewport};
use folio_core::section::Section;
use folio_runtime::{
    BindError, GuardChange, History, LayoutProvider, ListenerBinder, ListenerKind,
    ListenerRegistry, NavConfig, NavController, ScrollDriver, StaticLayout, scroll_progress,
};

use crate::input::{HostEvent, InputParseError};
use crate::{
    DeterministicClock, HistoryOp, ScrollCommand, WebEventSource, WebHostError, WebOutputs,
};

/// Result of a single [`StepNavigator::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Highlighted section after the step.
    pub active_section: Section,
    /// Whether the active section changed during the step.
    pub changed: bool,
    /// Whether a programmatic scroll is still guarded.
    pub guarded: bool,
}

/// The page as the host reported it, plus the writes the controller made.
///
/// Scroll requests are recorded, not applied: the host performs the smooth
/// scroll and reports the new offset through [`StepNavigator::set_viewport`].
/// History writes update the mirrored fragment immediately.
#[derive(Debug, Clone, Default)]
pub struct HostSurface {
    layout: StaticLayout,
    fragment: String,
    scroll_commands: Vec<ScrollCommand>,
    history_ops: Vec<HistoryOp>,
    bound: Vec<ListenerKind>,
}

impl HostSurface {
    #[must_use]
    pub fn new(layout: StaticLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn layout(&self) -> &StaticLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut StaticLayout {
        &mut self.layout
    }

    /// Mirror a fragment change the host observed (load or back/forward).
    pub fn set_fragment(&mut self, fragment: impl Into<String>) {
        self.fragment = fragment.into();
    }

    /// Listeners currently registered on the host side.
    #[must_use]
    pub fn bound_listeners(&self) -> &[ListenerKind] {
        &self.bound
    }

    fn drain_writes(&mut self) -> (Vec<ScrollCommand>, Vec<HistoryOp>) {
        (
            std::mem::take(&mut self.scroll_commands),
            std::mem::take(&mut self.history_ops),
        )
    }
}

impl LayoutProvider for HostSurface {
    fn section_bounds(&self, section: Section) -> Option<SectionBounds> {
        self.layout.section_bounds(section)
    }

    fn nav_bar_height(&self) -> f64 {
        self.layout.nav_bar_height()
    }

    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }
}

impl ScrollDriver for HostSurface {
    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_commands.push(ScrollCommand { top });
    }
}

impl History for HostSurface {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
        self.history_ops.push(HistoryOp::Push(fragment.to_string()));
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
        self.history_ops.push(HistoryOp::Replace(fragment.to_string()));
    }
}

impl ListenerBinder for HostSurface {
    fn bind(&mut self, kind: ListenerKind) -> Result<(), BindError> {
        if !self.bound.contains(&kind) {
            self.bound.push(kind);
        }
        Ok(())
    }

    fn unbind(&mut self, kind: ListenerKind) {
        self.bound.retain(|bound| *bound != kind);
    }
}

/// Host-driven, non-blocking navigator.
#[derive(Debug)]
pub struct StepNavigator {
    config: NavConfig,
    controller: NavController,
    surface: HostSurface,
    events: WebEventSource,
    clock: DeterministicClock,
    registry: ListenerRegistry,
    initialized: bool,
    torn_down: bool,
}

impl StepNavigator {
    /// Navigator with no measurements yet.
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self::with_layout(config, StaticLayout::default())
    }

    /// Navigator over an already measured page.
    #[must_use]
    pub fn with_layout(config: NavConfig, layout: StaticLayout) -> Self {
        Self {
            controller: NavController::new(config.clone(), ""),
            config,
            surface: HostSurface::new(layout),
            events: WebEventSource::new(),
            clock: DeterministicClock::new(),
            registry: ListenerRegistry::new(),
            initialized: false,
            torn_down: false,
        }
    }

    /// Load the page at `fragment` and register listeners.
    ///
    /// Must be called exactly once before [`step`](Self::step).
    pub fn init(&mut self, fragment: &str) -> Result<(), WebHostError> {
        if self.torn_down {
            return Err(WebHostError::TornDown);
        }
        if self.initialized {
            return Err(WebHostError::AlreadyInitialized);
        }
        self.initialized = true;
        self.surface.set_fragment(fragment);
        self.controller = NavController::new(self.config.clone(), fragment);
        let now = self.clock.now();
        self.controller.load(fragment, &mut self.surface, now);
        self.reconcile_listeners();
        tracing::debug!(
            fragment,
            active = %self.controller.active_section(),
            "step navigator initialized"
        );
        Ok(())
    }

    /// Process all pending events, then expire the guard if due.
    pub fn step(&mut self) -> Result<StepResult, WebHostError> {
        self.ensure_running()?;

        let before = self.controller.active_section();
        let mut events_processed: u32 = 0;
        while let Some(event) = self.events.read_event() {
            events_processed = events_processed.saturating_add(1);
            self.handle_event(&event);
        }

        let now = self.clock.now();
        if let GuardChange::Released(reason) = self.controller.tick(now).guard {
            tracing::trace!(?reason, "guard released on step");
        }
        self.reconcile_listeners();

        let active_section = self.controller.active_section();
        Ok(StepResult {
            events_processed,
            active_section,
            changed: active_section != before,
            guarded: self.controller.is_guarded(),
        })
    }

    fn handle_event(&mut self, event: &NavEvent) {
        // The browser has already moved `location` for these.
        match event {
            NavEvent::Load { fragment } | NavEvent::HistoryNavigation { fragment } => {
                self.surface.set_fragment(fragment.as_str());
            }
            _ => {}
        }
        let now = self.clock.now();
        let transition = self.controller.handle(event, &mut self.surface, now);
        if transition.changed() {
            tracing::debug!(
                from = %transition.previous,
                to = %transition.active,
                "active section changed"
            );
        }
        // Listener set can change mid-batch (guard engaged or released).
        self.reconcile_listeners();
    }

    /// Push a canonical event; processed on the next [`step`](Self::step).
    pub fn push_event(&mut self, event: NavEvent) {
        self.events.push_event(event);
    }

    /// Decode and push a JSON host event.
    pub fn push_json(&mut self, json: &str) -> Result<(), InputParseError> {
        let event = HostEvent::parse_nav_event(json)?;
        self.push_event(event);
        Ok(())
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Replace the whole measured layout.
    pub fn set_layout(&mut self, layout: StaticLayout) {
        *self.surface.layout_mut() = layout;
    }

    /// Report (or remove) one section's measured bounds.
    pub fn set_section(&mut self, section: Section, bounds: Option<SectionBounds>) {
        self.surface.layout_mut().set_section(section, bounds);
    }

    pub fn set_nav_bar_height(&mut self, height: f64) {
        self.surface.layout_mut().set_nav_bar_height(height);
    }

    /// Report the viewport; push a [`NavEvent::Scroll`] for it to count.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.surface.layout_mut().set_viewport(viewport);
    }

    /// Take the captured writes and current state, leaving writes empty.
    pub fn take_outputs(&mut self) -> WebOutputs {
        let (scroll_commands, history_ops) = self.surface.drain_writes();
        WebOutputs {
            scroll_commands,
            history_ops,
            active_section: self.controller.active_section(),
            progress: scroll_progress(self.surface.viewport()),
            listeners: self.registry.active().to_vec(),
        }
    }

    /// Unregister every listener. Further steps fail with
    /// [`WebHostError::TornDown`].
    pub fn teardown(&mut self) -> Result<(), WebHostError> {
        self.ensure_running()?;
        self.registry.stop_all(&mut self.surface);
        self.torn_down = true;
        tracing::debug!("step navigator torn down");
        Ok(())
    }

    #[must_use]
    pub fn controller(&self) -> &NavController {
        &self.controller
    }

    #[must_use]
    pub fn surface(&self) -> &HostSurface {
        &self.surface
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_running(&self) -> Result<(), WebHostError> {
        if self.torn_down {
            Err(WebHostError::TornDown)
        } else if !self.initialized {
            Err(WebHostError::NotInitialized)
        } else {
            Ok(())
        }
    }

    fn reconcile_listeners(&mut self) {
        let declared = self.controller.listeners();
        for err in self.registry.reconcile(declared, &mut self.surface) {
            tracing::warn!(error = %err, "host listener unavailable");
        }
    }
}
