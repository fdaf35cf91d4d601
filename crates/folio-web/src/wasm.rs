#![forbid(unsafe_code)]

//! Browser surface: binds the navigation controller to the live DOM.
//!
//! Listeners are plain `window` event listeners owned by [`DomBinder`] and
//! registered through the listener registry, so the `scrollend` listener only
//! exists while a programmatic scroll is guarded and everything is removed on
//! [`FolioNav::destroy`]. Callbacks hold a `Weak` to the shared state and do
//! nothing once the navigator is gone.
//!
//! A closure that unregisters itself from inside its own callback cannot be
//! dropped there; it is parked in a retired list and freed on the next
//! dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_content::{CONTACT_EMAIL, Portfolio};
use folio_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use folio_core::geometry::{SectionBounds, Viewport};
use folio_core::section::Section;
use folio_runtime::{
    BindError, Clipboard, ClipboardError, GuardChange, GuardTicket, History, LayoutProvider,
    ListenerBinder, ListenerKind, ListenerRegistry, NavConfig, NavController, ScrollDriver,
    Transition, copy_text, scroll_progress,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window};
use web_time::Instant;

const ACTIVE_ATTRIBUTE: &str = "data-active-section";
const NAV_BAR_SELECTOR: &str = "nav";

/// One DOM input, already classified.
enum DomEvent {
    Scroll,
    ScrollEnd,
    Key(KeyEvent),
    PopState,
    Timeout(GuardTicket),
}

/// Live page: layout from `getBoundingClientRect`, history from
/// `window.history`.
struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl LayoutProvider for DomHost {
    fn section_bounds(&self, section: Section) -> Option<SectionBounds> {
        let element = self.document.get_element_by_id(&section.anchor_id())?;
        let rect = element.get_bounding_client_rect();
        Some(SectionBounds::new(rect.top() + self.scroll_y(), rect.height()))
    }

    fn nav_bar_height(&self) -> f64 {
        match self.document.query_selector(NAV_BAR_SELECTOR) {
            Ok(Some(nav)) => nav.get_bounding_client_rect().height(),
            _ => 0.0,
        }
    }

    fn viewport(&self) -> Viewport {
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map_or(height, |root| f64::from(root.scroll_height()));
        Viewport::new(self.scroll_y(), height, document_height)
    }
}

impl ScrollDriver for DomHost {
    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl History for DomHost {
    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn push_fragment(&mut self, fragment: &str) {
        let result = self
            .window
            .history()
            .and_then(|h| h.push_state_with_url(&JsValue::NULL, "", Some(fragment)));
        if let Err(err) = result {
            tracing::warn!(fragment, error = ?err, "history push failed");
        }
    }

    fn replace_fragment(&mut self, fragment: &str) {
        let result = self
            .window
            .history()
            .and_then(|h| h.replace_state_with_url(&JsValue::NULL, "", Some(fragment)));
        if let Err(err) = result {
            tracing::warn!(fragment, error = ?err, "history replace failed");
        }
    }
}

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// Owns the `window` listener closures.
struct DomBinder {
    window: Window,
    shared: Weak<Shared>,
    closures: HashMap<ListenerKind, ListenerClosure>,
    retired: Vec<ListenerClosure>,
}

impl DomBinder {
    fn classify(kind: ListenerKind, event: &Event) -> Option<DomEvent> {
        match kind {
            ListenerKind::Scroll => Some(DomEvent::Scroll),
            ListenerKind::ScrollEnd => Some(DomEvent::ScrollEnd),
            ListenerKind::HistoryNavigation => Some(DomEvent::PopState),
            ListenerKind::KeyDown => {
                let key = event.dyn_ref::<KeyboardEvent>()?;
                Some(DomEvent::Key(key_event(key)))
            }
        }
    }
}

impl ListenerBinder for DomBinder {
    fn bind(&mut self, kind: ListenerKind) -> Result<(), BindError> {
        let shared = self.shared.clone();
        let closure: ListenerClosure = Closure::new(move |event: Event| {
            if let Some(dom_event) = DomBinder::classify(kind, &event) {
                dispatch(&shared, dom_event);
            }
        });
        self.window
            .add_event_listener_with_callback(kind.dom_event(), closure.as_ref().unchecked_ref())
            .map_err(|err| BindError::new(kind, format!("{err:?}")))?;
        if let Some(previous) = self.closures.insert(kind, closure) {
            self.retired.push(previous);
        }
        Ok(())
    }

    fn unbind(&mut self, kind: ListenerKind) {
        let Some(closure) = self.closures.remove(&kind) else {
            return;
        };
        let removed = self.window.remove_event_listener_with_callback(
            kind.dom_event(),
            closure.as_ref().unchecked_ref(),
        );
        if let Err(err) = removed {
            tracing::warn!(listener = %kind, error = ?err, "listener removal failed");
        }
        self.retired.push(closure);
    }
}

/// Pending fallback timer.
struct GuardTimer {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

/// `navigator.clipboard`, fire and forget.
struct DomClipboard {
    window: Window,
}

impl Clipboard for DomClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let navigator = self.window.navigator();
        // Absent outside secure contexts.
        let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .is_ok_and(|value| !value.is_undefined() && !value.is_null());
        if !present {
            return Err(ClipboardError::Unavailable);
        }
        let promise = navigator.clipboard().write_text(text);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                tracing::error!(error = ?err, "failed to copy to clipboard");
            }
        });
        Ok(())
    }
}

struct Inner {
    controller: NavController,
    host: DomHost,
    registry: ListenerRegistry,
    binder: DomBinder,
    timer: Option<GuardTimer>,
    retired_timers: Vec<Closure<dyn FnMut()>>,
    epoch: Instant,
}

impl Inner {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn dispatch(&mut self, event: DomEvent) {
        // Nothing retired can be on the JS stack any more.
        self.binder.retired.clear();
        self.retired_timers.clear();

        let now = self.now();
        let transition = match event {
            DomEvent::Scroll => self.controller.on_scroll(&mut self.host, now),
            DomEvent::ScrollEnd => self.controller.on_scroll_end(),
            DomEvent::Key(key) => self.controller.on_key(key, &mut self.host, now),
            DomEvent::PopState => {
                let fragment = self.host.fragment();
                self.controller
                    .on_history_navigation(&fragment, &mut self.host, now)
            }
            DomEvent::Timeout(ticket) => self.controller.on_guard_timeout(ticket),
        };
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        match transition.guard {
            GuardChange::Engaged(ticket) => self.schedule_timer(ticket),
            GuardChange::Released(_) => self.cancel_timer(),
            GuardChange::Unchanged => {}
        }
        if transition.changed() {
            self.mark_active(transition.active);
        }
        let declared = self.controller.listeners();
        for err in self.registry.reconcile(declared, &mut self.binder) {
            tracing::warn!(error = %err, "dom listener unavailable");
        }
    }

    fn schedule_timer(&mut self, ticket: GuardTicket) {
        self.cancel_timer();
        let shared = self.binder.shared.clone();
        let callback: Closure<dyn FnMut()> =
            Closure::new(move || dispatch(&shared, DomEvent::Timeout(ticket)));
        let delay = i32::try_from(ticket.remaining(self.now()).as_millis()).unwrap_or(i32::MAX);
        match self
            .host
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(handle) => self.timer = Some(GuardTimer { handle, callback }),
            // Scroll events still expire the guard through their deadline poll.
            Err(err) => tracing::warn!(error = ?err, "guard timer unavailable"),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.host.window.clear_timeout_with_handle(timer.handle);
            self.retired_timers.push(timer.callback);
        }
    }

    fn mark_active(&self, section: Section) {
        if let Some(root) = self.host.document.document_element()
            && let Err(err) = root.set_attribute(ACTIVE_ATTRIBUTE, section.as_str())
        {
            tracing::debug!(error = ?err, "could not mark active section");
        }
    }

    fn teardown(&mut self) {
        self.cancel_timer();
        self.registry.stop_all(&mut self.binder);
    }
}

struct Shared {
    inner: RefCell<Inner>,
}

fn dispatch(shared: &Weak<Shared>, event: DomEvent) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let Ok(mut inner) = shared.inner.try_borrow_mut() else {
        tracing::debug!("dropping re-entrant dom event");
        return;
    };
    inner.dispatch(event);
}

fn key_event(event: &KeyboardEvent) -> KeyEvent {
    let mut modifiers = Modifiers::NONE;
    modifiers.set(Modifiers::SHIFT, event.shift_key());
    modifiers.set(Modifiers::ALT, event.alt_key());
    modifiers.set(Modifiers::CTRL, event.ctrl_key());
    modifiers.set(Modifiers::SUPER, event.meta_key());
    let kind = if event.repeat() {
        KeyEventKind::Repeat
    } else {
        KeyEventKind::Press
    };
    KeyEvent::new(KeyCode::from_dom_key(&event.key()))
        .with_modifiers(modifiers)
        .with_kind(kind)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Section navigator mounted on the current page.
#[wasm_bindgen]
pub struct FolioNav {
    shared: Option<Rc<Shared>>,
}

#[wasm_bindgen]
impl FolioNav {
    /// Attach to `window`, honor the current fragment, and start listening.
    pub fn mount() -> Result<FolioNav, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let fragment = window.location().hash().unwrap_or_default();
        let config = NavConfig::default();

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| Shared {
            inner: RefCell::new(Inner {
                controller: NavController::new(config, &fragment),
                host: DomHost {
                    window: window.clone(),
                    document,
                },
                registry: ListenerRegistry::new(),
                binder: DomBinder {
                    window,
                    shared: weak.clone(),
                    closures: HashMap::new(),
                    retired: Vec::new(),
                },
                timer: None,
                retired_timers: Vec::new(),
                epoch: Instant::now(),
            }),
        });

        {
            let mut inner = shared.inner.borrow_mut();
            let inner = &mut *inner;
            let now = inner.now();
            let transition = inner.controller.load(&fragment, &mut inner.host, now);
            inner.mark_active(transition.active);
            inner.apply(transition);
        }
        tracing::debug!(fragment = %fragment, "folio navigator mounted");
        Ok(FolioNav {
            shared: Some(shared),
        })
    }

    /// Navigate to a section id (`"about"`, `"#about"`, `"about-section"`).
    /// Unknown ids and calls after `destroy()` are ignored.
    pub fn navigate(&mut self, id: &str) {
        let Ok(shared) = self.shared() else {
            tracing::debug!(id, "ignoring navigate on destroyed navigator");
            return;
        };
        let Ok(mut inner) = shared.inner.try_borrow_mut() else {
            tracing::debug!(id, "ignoring re-entrant navigate");
            return;
        };
        let inner = &mut *inner;
        let now = inner.now();
        let transition = inner.controller.navigate_to_id(id, &mut inner.host, now);
        inner.apply(transition);
    }

    /// Copy the contact email. Failures are logged, never thrown.
    #[wasm_bindgen(js_name = copyEmail)]
    pub fn copy_email(&self) -> bool {
        let Ok(shared) = self.shared() else {
            return false;
        };
        let window = shared.inner.borrow().host.window.clone();
        copy_text(&mut DomClipboard { window }, CONTACT_EMAIL)
    }

    /// Id of the highlighted section.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Result<String, JsValue> {
        let shared = self.shared()?;
        let id = shared.inner.borrow().controller.active_section().as_str();
        Ok(id.to_string())
    }

    /// Scroll progress percentage for the progress bar.
    pub fn progress(&self) -> Result<f64, JsValue> {
        let shared = self.shared()?;
        let viewport = shared.inner.borrow().host.viewport();
        Ok(scroll_progress(viewport))
    }

    /// Portfolio tables as JSON for the rendering layer.
    #[wasm_bindgen(js_name = contentJson)]
    pub fn content_json() -> Result<String, JsValue> {
        Portfolio::get().to_json().map_err(js_error)
    }

    /// Remove every listener and pending timer. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.inner.borrow_mut().teardown();
            tracing::debug!("folio navigator destroyed");
        }
    }
}

impl FolioNav {
    fn shared(&self) -> Result<&Rc<Shared>, JsValue> {
        self.shared
            .as_ref()
            .ok_or_else(|| JsValue::from_str("navigator destroyed"))
    }
}

impl Drop for FolioNav {
    fn drop(&mut self) {
        self.destroy();
    }
}
