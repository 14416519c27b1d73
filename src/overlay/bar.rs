//! Control bar and history label: built once, repositioned on every sync.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::page::{DomHost, rect_of, set_style};
use crate::layout::{self, Placement};
use crate::session::Action;

pub const BAR_ID: &str = "gc-yearmask-bar";
pub const GUESS_INPUT_ID: &str = "gc-quiz-input";
pub const RESULT_ID: &str = "gc-quiz-result";
pub const HISTORY_ID: &str = "gc-quiz-history";
/// Set on the bar once its controls exist.
const INIT_MARKER: &str = "data-gc-initialized";

const BAR_STYLE: &str = "position:fixed; z-index:2147483647; display:flex; align-items:center; gap:4px; padding:3px 6px; border-radius:999px; background:rgba(0,0,0,0.18); backdrop-filter:blur(4px); font-family:sans-serif;";
const BUTTON_STYLE: &str = "border:none; border-radius:999px; padding:2px 6px; font-size:11px; color:#fff; cursor:pointer; white-space:nowrap;";
const GUESS_STYLE: &str = "width:70px; padding:1px 4px; border-radius:999px; border:1px solid #ccc; font-size:11px; outline:none;";
const BUBBLE_STYLE: &str = "font-size:12px; padding:2px 8px; border-radius:999px; background:rgba(255,255,255,0.85); color:#333333; border:1px solid rgba(0,0,0,0.08); white-space:nowrap; text-shadow:0 0 1px rgba(255,255,255,0.6); pointer-events:none;";
const RESULT_EXTRA_STYLE: &str = "position:absolute; bottom:100%; left:50%; transform:translate(-50%, -4px); opacity:0; transition:opacity 0.5s ease;";
const HISTORY_EXTRA_STYLE: &str = "position:fixed; z-index:2147483647; font-weight:500; letter-spacing:0.2px;";

/// Make sure the bar exists with all its controls. Does nothing while the
/// host's year input is missing. Returns whether the controls were built by
/// this call.
pub fn ensure_bar(host: &DomHost) -> Result<bool, JsValue> {
    if host.year_input().is_none() {
        return Ok(false);
    }
    let doc = host.document();
    let bar: HtmlElement = match doc.get_element_by_id(BAR_ID) {
        Some(el) => el.dyn_into()?,
        None => {
            let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
            el.set_id(BAR_ID);
            el.set_attribute("style", BAR_STYLE)?;
            body(doc)?.append_child(&el)?;
            el
        }
    };

    let built = !bar.has_attribute(INIT_MARKER);
    if built {
        build_controls(doc, &bar)?;
        bar.set_attribute(INIT_MARKER, "1")?;
        tracing::debug!("control bar built");
    }
    Ok(built)
}

fn build_controls(doc: &Document, bar: &HtmlElement) -> Result<(), JsValue> {
    bar.set_inner_html("");
    for action in Action::BAR {
        if action == Action::Check {
            let gi = guess_input(doc)?;
            bar.append_child(&gi)?;
        }
        let b = button(doc, action)?;
        bar.append_child(&b)?;
    }

    let result: HtmlElement = doc.create_element("div")?.dyn_into()?;
    result.set_id(RESULT_ID);
    result.set_attribute("style", &format!("{BUBBLE_STYLE} {RESULT_EXTRA_STYLE}"))?;
    bar.append_child(&result)?;
    Ok(())
}

fn button(doc: &Document, action: Action) -> Result<HtmlElement, JsValue> {
    let b: HtmlElement = doc.create_element("button")?.dyn_into()?;
    b.set_text_content(Some(action.label()));
    b.set_attribute("type", "button")?;
    b.set_attribute("style", &format!("{BUTTON_STYLE} background:{};", action.color()))?;

    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        super::on_action(action);
    }) as Box<dyn FnMut(_)>);
    b.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(b)
}

fn guess_input(doc: &Document) -> Result<HtmlInputElement, JsValue> {
    let gi: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
    gi.set_id(GUESS_INPUT_ID);
    gi.set_type("number");
    gi.set_placeholder("Year");
    gi.set_attribute("style", GUESS_STYLE)?;
    Ok(gi)
}

/// Lazily create the history label; it lives directly under `body`.
pub fn ensure_history_label(doc: &Document) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(HISTORY_ID) {
        return el.dyn_into().map_err(JsValue::from);
    }
    let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
    el.set_id(HISTORY_ID);
    el.set_attribute("style", &format!("{BUBBLE_STYLE} {HISTORY_EXTRA_STYLE}"))?;
    body(doc)?.append_child(&el)?;
    Ok(el)
}

fn position_bar(host: &DomHost, bar: &HtmlElement) {
    let input = host.year_input().map(|i| rect_of(&i));
    let map = host.map_container().map(|m| rect_of(&m));
    apply(bar, &layout::bar_placement(input, map, host.config().fallback_top_px));
}

/// Pin the label beside the update control; left untouched when the
/// control cannot be found.
pub fn position_history_label(host: &mut DomHost, label: &HtmlElement) {
    let trigger = host.update_trigger().map(|t| rect_of(&t));
    if let Some(p) = layout::history_placement(trigger) {
        apply(label, &p);
    }
}

/// Reposition whatever overlay fragments currently exist.
pub fn reposition(host: &mut DomHost) {
    if let Some(bar) = host
        .document()
        .get_element_by_id(BAR_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        position_bar(host, &bar);
    }
    if let Some(label) = host
        .document()
        .get_element_by_id(HISTORY_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        position_history_label(host, &label);
    }
}

fn apply(el: &HtmlElement, p: &Placement) {
    set_style(el, "position", "fixed");
    set_style(el, "top", &p.top);
    set_style(el, "left", &p.left);
    set_style(el, "transform", &p.transform);
}

fn body(doc: &Document) -> Result<HtmlElement, JsValue> {
    doc.body().ok_or_else(|| JsValue::from_str("no body"))
}
