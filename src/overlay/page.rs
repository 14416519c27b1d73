//! `HostPage` over the real DOM: element lookup, the update-trigger scan,
//! notification strategies and the quiz fragments of the control bar.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit, Node,
    Window,
};

use super::bar;
use crate::config::OverlayConfig;
use crate::error::{OverlayError, Result};
use crate::host::{HostPage, NotifyStrategy};
use crate::layout::Rect;
use crate::locator::{CachedHandle, UpdateHints};
use crate::quiz::QuizOutcome;

// Attributes stashed on host elements while masked.
const REAL_YEAR_ATTR: &str = "data-gc-real-year";
const ORIGINAL_DISPLAY_ATTR: &str = "data-gc-original-display";

/// Elements that may carry the update action.
const TRIGGER_SELECTOR: &str = "img, input[type=image]";

pub struct DomHost {
    window: Window,
    document: Document,
    config: OverlayConfig,
    trigger: CachedHandle<HtmlElement>,
}

impl DomHost {
    pub fn new(window: Window, config: OverlayConfig) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| OverlayError::Dom("no document".into()))?;
        Ok(Self {
            window,
            document,
            config,
            trigger: CachedHandle::new(),
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Switch to another host contract. The cached update trigger is
    /// dropped since the hints may have changed.
    pub fn set_config(&mut self, config: OverlayConfig) {
        self.config = config;
        self.trigger = CachedHandle::new();
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn year_input(&self) -> Option<HtmlInputElement> {
        self.query(&self.config.year_input_selector)
    }

    fn secondary_readout(&self) -> Option<HtmlElement> {
        self.query(&self.config.secondary_readout_selector)
    }

    pub fn map_container(&self) -> Option<Element> {
        self.document.get_element_by_id(&self.config.map_container_id)
    }

    /// The host's update image, cached until it leaves the document.
    pub fn update_trigger(&mut self) -> Option<HtmlElement> {
        let body = self.document.body();
        let input = self.year_input();
        let document = &self.document;
        let hints = UpdateHints {
            title: &self.config.title_hints,
            handler: &self.config.handler_hints,
        };
        self.trigger.get_or_locate(
            |el| is_attached(body.as_ref(), el),
            || scan_for_trigger(document, input.as_ref()?, &hints),
        )
    }

    /// Start the result bubble's opacity transition.
    pub fn fade_result(&self) {
        if let Some(el) = self.by_id::<HtmlElement>(bar::RESULT_ID) {
            set_style(&el, "opacity", "0");
        }
    }

    fn query<T: JsCast>(&self, selector: &str) -> Option<T> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into()
            .ok()
    }

    fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn global_function(&self, name: &str) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()?
            .dyn_into()
            .ok()
    }

    fn notify(&mut self, strategy: NotifyStrategy) -> std::result::Result<bool, JsValue> {
        let Some(input) = self.year_input() else {
            return Ok(false);
        };
        match strategy {
            NotifyStrategy::EnterCallback => {
                let Some(f) = self.global_function(&self.config.enter_callback) else {
                    return Ok(false);
                };
                let event = js_sys::Object::new();
                js_sys::Reflect::set(&event, &"keyCode".into(), &13.into())?;
                js_sys::Reflect::set(&event, &"which".into(), &13.into())?;
                f.call2(&self.window, &input, &event)?;
            }
            NotifyStrategy::ElapsedCallback => {
                let Some(f) = self.global_function(&self.config.elapsed_callback) else {
                    return Ok(false);
                };
                f.call1(&self.window, &JsValue::FALSE)?;
            }
            NotifyStrategy::SyntheticEnter => {
                for kind in ["keydown", "keypress", "keyup"] {
                    let init = KeyboardEventInit::new();
                    init.set_key("Enter");
                    init.set_code("Enter");
                    init.set_key_code(13);
                    init.set_which(13);
                    init.set_bubbles(true);
                    let event = KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init)?;
                    input.dispatch_event(&event)?;
                }
            }
            NotifyStrategy::ClickTrigger => {
                let Some(trigger) = self.update_trigger() else {
                    return Ok(false);
                };
                trigger.click();
            }
        }
        Ok(true)
    }
}

fn is_attached(body: Option<&HtmlElement>, el: &HtmlElement) -> bool {
    let node: &Node = el;
    body.is_some_and(|b| b.contains(Some(node)))
}

/// First image-like element under the input's form (or nearest ancestor, or
/// the whole document) whose tooltip or click handler hints at an update.
fn scan_for_trigger(
    document: &Document,
    input: &HtmlInputElement,
    hints: &UpdateHints<'_>,
) -> Option<HtmlElement> {
    let root: Option<Element> = input
        .form()
        .map(|f| f.unchecked_into::<Element>())
        .or_else(|| input.closest("form").ok().flatten())
        .or_else(|| input.parent_element());
    let nodes = match &root {
        Some(el) => el.query_selector_all(TRIGGER_SELECTOR),
        None => document.query_selector_all(TRIGGER_SELECTOR),
    }
    .ok()?;

    (0..nodes.length())
        .filter_map(|i| nodes.item(i)?.dyn_into::<HtmlElement>().ok())
        .find(|el| {
            hints.matches(
                el.get_attribute("title").as_deref(),
                el.get_attribute("onclick").as_deref(),
            )
        })
        .inspect(|el| tracing::debug!(tag = %el.tag_name(), "update trigger located"))
}

pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        top: r.top(),
        left: r.left(),
        right: r.right(),
        bottom: r.bottom(),
    }
}

pub fn set_style(el: &HtmlElement, name: &str, value: &str) {
    let style = el.style();
    let res = if value.is_empty() {
        style.remove_property(name).map(|_| ())
    } else {
        style.set_property(name, value)
    };
    if let Err(err) = res {
        tracing::trace!(name, ?err, "style update rejected");
    }
}

impl HostPage for DomHost {
    fn year_input_value(&mut self) -> Option<String> {
        self.year_input().map(|i| i.value())
    }

    fn write_year_input(&mut self, value: &str) -> Result<()> {
        let input = self.year_input().ok_or(OverlayError::InputNotFound)?;
        input.set_value(value);
        Ok(())
    }

    fn saved_real_value(&mut self) -> Option<String> {
        self.year_input()?.get_attribute(REAL_YEAR_ATTR)
    }

    fn store_real_value(&mut self, value: &str) {
        if let Some(input) = self.year_input() {
            if let Err(err) = input.set_attribute(REAL_YEAR_ATTR, value) {
                tracing::warn!(?err, "could not save the real year");
            }
        }
    }

    fn clear_real_value(&mut self) {
        if let Some(input) = self.year_input() {
            let _ = input.remove_attribute(REAL_YEAR_ATTR);
        }
    }

    fn set_input_concealed(&mut self, concealed: bool) {
        let Some(input) = self.year_input() else {
            return;
        };
        let value = if concealed { "transparent" } else { "" };
        set_style(&input, "color", value);
        set_style(&input, "caret-color", value);
    }

    fn set_secondary_readout_hidden(&mut self, hidden: bool) {
        let Some(el) = self.secondary_readout() else {
            return;
        };
        if hidden {
            if !el.has_attribute(ORIGINAL_DISPLAY_ATTR) {
                let original = el.style().get_property_value("display").unwrap_or_default();
                let _ = el.set_attribute(ORIGINAL_DISPLAY_ATTR, &original);
            }
            set_style(&el, "display", "none");
        } else if let Some(original) = el.get_attribute(ORIGINAL_DISPLAY_ATTR) {
            set_style(&el, "display", &original);
            let _ = el.remove_attribute(ORIGINAL_DISPLAY_ATTR);
        }
    }

    fn try_notify(&mut self, strategy: NotifyStrategy) -> Result<bool> {
        self.notify(strategy).map_err(OverlayError::from)
    }

    fn guess_text(&mut self) -> Option<String> {
        self.by_id::<HtmlInputElement>(bar::GUESS_INPUT_ID)
            .map(|i| i.value())
    }

    fn clear_guess_input(&mut self) {
        if let Some(input) = self.by_id::<HtmlInputElement>(bar::GUESS_INPUT_ID) {
            input.set_value("");
        }
    }

    fn show_result(&mut self, outcome: &QuizOutcome) -> bool {
        let Some(el) = self.by_id::<HtmlElement>(bar::RESULT_ID) else {
            return false;
        };
        el.set_text_content(Some(&outcome.message()));
        set_style(&el, "color", outcome.tone().result_color());
        set_style(&el, "opacity", "1");
        true
    }

    fn clear_result(&mut self) {
        if let Some(el) = self.by_id::<HtmlElement>(bar::RESULT_ID) {
            el.set_text_content(Some(""));
        }
    }

    fn show_history(&mut self, outcome: &QuizOutcome) {
        match bar::ensure_history_label(&self.document) {
            Ok(label) => {
                label.set_text_content(Some(&outcome.history_line()));
                set_style(&label, "color", outcome.tone().history_color());
                bar::position_history_label(self, &label);
            }
            Err(err) => tracing::warn!(?err, "history label unavailable"),
        }
    }

    fn prompt_year(&mut self, default: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(
                "Enter the year to display (negative for BC)",
                default,
            )
            .ok()
            .flatten()
    }

    fn alert(&mut self, message: &str) {
        if self.window.alert_with_message(message).is_err() {
            tracing::warn!(message, "alert could not be shown");
        }
    }
}
