use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use nav::{NavConfig, NavError, ViewportNavController, retain_valid_sections};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

mod dom_view;
use dom_view::{DomView, PageElements, dom_err};

mod timers;
use timers::BrowserTimers;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

type Controller = ViewportNavController<DomView, BrowserTimers>;

/// An event listener we registered and must remove again on teardown.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, NavError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

struct PageNav {
    controller: Controller,
    listeners: Vec<Listener>,
}

thread_local! {
    static STATE: RefCell<Option<PageNav>> = const { RefCell::new(None) };
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Runs one handler against the live controller.
///
/// Errors are logged, never thrown back into the browser's event dispatch.
fn with_nav<F>(event: &'static str, f: F)
where
    F: FnOnce(&mut Controller) -> Result<(), NavError>,
{
    let _ = STATE.try_with(|state| {
        let Ok(mut state) = state.try_borrow_mut() else {
            log_error(&format!("nav {event}: dropped re-entrant dispatch"));
            return;
        };
        let Some(page) = state.as_mut() else {
            return;
        };
        if let Err(err) = f(&mut page.controller) {
            log_error(&format!("nav {event}: {err}"));
        }

        let trace = page.controller.config().trace;
        for e in page.controller.drain_events() {
            if trace {
                web_sys::console::debug_1(&JsValue::from_str(&e.to_string()));
            }
        }
    });
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    Ok(())
}

/// Attaches the navigation controller to the page with the default config.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    init_with_config("")
}

/// Attaches the navigation controller using a (partial) JSON config.
///
/// Called again, it replaces the previous controller. Before the document
/// is parsed, setup is deferred to `DOMContentLoaded`.
#[wasm_bindgen]
pub fn init_with_config(config_json: &str) -> Result<(), JsValue> {
    init_inner(config_json).map_err(|err| {
        let msg = format!("nav init error: {err}");
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

fn init_inner(config_json: &str) -> Result<(), NavError> {
    let config = NavConfig::from_json(config_json)?;
    let window = web_sys::window().ok_or_else(|| NavError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| NavError::MissingElement("document".to_string()))?;

    if document.ready_state() == "loading" {
        let config_json = config_json.to_string();
        let deferred = Closure::once_into_js(move || {
            if let Err(err) = init_inner(&config_json) {
                log_error(&format!("nav init error: {err}"));
            }
        });
        return document
            .add_event_listener_with_callback("DOMContentLoaded", deferred.unchecked_ref())
            .map_err(dom_err);
    }

    teardown();

    let mut page = PageElements::discover(&document, &config)?;
    // A section without a usable id gets no menu entry; the rest still work.
    let (kept, rejected) = retain_valid_sections(std::mem::take(&mut page.sections));
    for err in &rejected {
        log_error(&format!("nav: skipping section: {err}"));
    }
    page.sections = kept;
    let sections = page.sections.iter().map(|(s, _)| s.clone()).collect();
    let view = DomView::new(
        window.clone(),
        document.clone(),
        config.clone(),
        page.nav_list.clone(),
        page.scroll_top.clone(),
        page.sections.iter().map(|(s, el)| (s.id.clone(), el.clone())),
    );
    let timers = BrowserTimers::new(window, |handle| {
        with_nav("timer", move |c| c.on_timer(handle).map(|_| ()))
    });
    let controller = ViewportNavController::new(config.clone(), view, timers, sections)?;
    let listeners = attach_listeners(&document, &page, &config)?;

    STATE.with(|state| {
        *state.borrow_mut() = Some(PageNav {
            controller,
            listeners,
        });
    });

    with_nav("build", |c| c.build_nav().map(|_| ()));
    web_sys::console::log_1(&JsValue::from_str("nav: attached"));
    Ok(())
}

fn attach_listeners(
    document: &Document,
    page: &PageElements,
    config: &NavConfig,
) -> Result<Vec<Listener>, NavError> {
    let mut listeners = Vec::new();

    listeners.push(Listener::attach(document, "scroll", |_| {
        with_nav("scroll", |c| c.check_active().map(|_| ()))
    })?);

    let anchor_attr = config.anchor_attribute.clone();
    listeners.push(Listener::attach(&page.nav_list, "click", move |event| {
        let Some(anchor) = event_element(&event)
            .filter(|el| el.tag_name().eq_ignore_ascii_case("li"))
            .and_then(|el| el.get_attribute(&anchor_attr))
        else {
            return;
        };
        with_nav("nav_click", move |c| c.nav_click(&anchor).map(|_| ()))
    })?);

    let toggle_class = config.classes.collapse_toggle.clone();
    let sections_sel = config.selectors.sections.clone();
    listeners.push(Listener::attach(&page.main, "click", move |event| {
        let Some(target) = event_element(&event) else {
            return;
        };
        if !target.class_list().contains(&toggle_class) {
            return;
        }
        let Ok(Some(section)) = target.closest(&sections_sel) else {
            return;
        };
        let id = section.id();
        with_nav("collapse", move |c| c.toggle_section(&id).map(|_| ()))
    })?);

    listeners.push(Listener::attach(&page.scroll_top, "click", |_| {
        with_nav("scroll_to_top", |c| c.scroll_to_top())
    })?);

    Ok(listeners)
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Removes all listeners and cancels pending work.
#[wasm_bindgen]
pub fn teardown() {
    let page = STATE
        .try_with(|state| state.try_borrow_mut().ok().and_then(|mut s| s.take()))
        .ok()
        .flatten();
    if let Some(mut page) = page {
        for listener in &page.listeners {
            listener.detach();
        }
        page.controller.shutdown();
    }
}

/// Current config as JSON (defaults if not attached).
#[wasm_bindgen]
pub fn nav_config() -> Result<String, JsValue> {
    let config = STATE
        .try_with(|state| {
            state
                .borrow()
                .as_ref()
                .map(|page| page.controller.config().clone())
        })
        .ok()
        .flatten()
        .unwrap_or_default();
    config
        .to_json()
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Ids of the currently active sections, as a JSON array.
#[wasm_bindgen]
pub fn active_sections() -> String {
    let ids: Vec<String> = STATE
        .try_with(|state| {
            state
                .borrow()
                .as_ref()
                .map(|page| {
                    page.controller
                        .active()
                        .ids()
                        .iter()
                        .map(|id| id.to_string())
                        .collect()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}
