//! Browser wiring: session storage, host-mutation observer, resize
//! listener and the feedback fade timers.
//!
//! Every callback re-derives what it needs from the DOM and the session, so
//! redundant firings (the observer sees our own changes too) are harmless.

pub mod bar;
pub mod page;

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MutationObserver, MutationObserverInit, window};

use crate::config::OverlayConfig;
use crate::quiz::FadeTicket;
use crate::session::{Action, Session};
use page::DomHost;

struct Overlay {
    session: Session<DomHost>,
    fade: FadeTimers,
}

/// Pending timers of the current fade, held only so that dropping them
/// cancels the fade.
#[derive(Default)]
struct FadeTimers {
    _start: Option<Timeout>,
    _clear: Option<Timeout>,
}

thread_local! {
    static OVERLAY: RefCell<Option<Overlay>> = const { RefCell::new(None) };
}

/// Run `f` on the live overlay. Skipped when the overlay is not started or
/// already borrowed further up the stack.
fn with_overlay<R>(f: impl FnOnce(&mut Overlay) -> R) -> Option<R> {
    OVERLAY.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

fn is_running() -> bool {
    OVERLAY.with(|cell| cell.try_borrow().map_or(true, |ov| ov.is_some()))
}

/// Configuration of the running overlay, if any.
pub fn running_config() -> Option<OverlayConfig> {
    with_overlay(|ov| ov.session.host().config().clone())
}

/// Inject the overlay. Called again while running, it switches the live
/// overlay to `config` and reconciles the page against it.
pub fn start(config: OverlayConfig) -> Result<(), JsValue> {
    crate::logging::init(config.level_filter());
    if is_running() {
        tracing::debug!("overlay already running, applying new configuration");
        with_overlay(|ov| {
            ov.session.host_mut().set_config(config);
            sync(ov);
        });
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let host = DomHost::new(win.clone(), config)?;
    let body = host
        .document()
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    OVERLAY.with(|cell| {
        cell.replace(Some(Overlay {
            session: Session::new(host),
            fade: FadeTimers::default(),
        }))
    });
    with_overlay(sync);

    // Host re-renders: re-assert bar, mask and positions
    {
        let closure = Closure::wrap(Box::new(
            move |_records: js_sys::Array, _obs: MutationObserver| {
                with_overlay(sync);
            },
        ) as Box<dyn FnMut(_, _)>);
        let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&body, &init)?;
        closure.forget();
    }

    // Window resize only moves things
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_overlay(page_reposition);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    tracing::info!("year quiz overlay started");
    Ok(())
}

/// Start now if the document body exists, otherwise on `DOMContentLoaded`.
pub fn start_when_ready(config: OverlayConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.body().is_some() {
        return start(config);
    }
    let closure: Closure<dyn FnMut(web_sys::Event)> = Closure::once(move |_evt: web_sys::Event| {
        // An explicit start before the page finished loading wins.
        if is_running() {
            return;
        }
        if let Err(err) = start(config) {
            tracing::warn!(?err, "overlay start failed");
        }
    });
    doc.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Level-triggered reconciliation: bar present, mask intact, fragments placed.
fn sync(ov: &mut Overlay) {
    if let Err(err) = bar::ensure_bar(ov.session.host()) {
        tracing::warn!(?err, "control bar unavailable");
    }
    ov.session.reconcile();
    page_reposition(ov);
}

fn page_reposition(ov: &mut Overlay) {
    bar::reposition(ov.session.host_mut());
}

/// Click handler of every bar button.
pub(crate) fn on_action(action: Action) {
    with_overlay(|ov| {
        let ticket = ov.session.dispatch(action);
        if action == Action::Reveal {
            ov.fade = FadeTimers::default();
        }
        if let Some(ticket) = ticket {
            schedule_fade(ov, ticket);
        }
    });
}

/// Replace any pending fade with a fresh visible → fading → cleared run.
fn schedule_fade(ov: &mut Overlay, ticket: FadeTicket) {
    let cfg = ov.session.host().config();
    let (visible_ms, fade_ms) = (cfg.feedback_visible_ms, cfg.feedback_fade_ms);

    ov.fade = FadeTimers::default();
    ov.fade._start = Some(Timeout::new(visible_ms, move || {
        with_overlay(|ov| {
            if !ov.session.fade_elapsed(ticket) {
                return;
            }
            ov.session.host().fade_result();
            ov.fade._clear = Some(Timeout::new(fade_ms, move || {
                with_overlay(|ov| ov.session.fade_finished(ticket));
            }));
        });
    }));
}
