//! Autosave wiring for dynamic sections.
//!
//! Three layers of durability: `change` events save immediately, typing
//! saves after a 500 ms per-field debounce, and a 30-second interval plus a
//! `beforeunload` hook sweep every rendered section regardless of pending
//! debounces.

use super::context::WizardContext;
use super::sections;
use crate::shared::dom_forms;
use contracts::domain::custeio::forms::{Activity, CultureKind, FormId};
use gloo_timers::callback::{Interval, Timeout};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

pub const DEBOUNCE_MS: u32 = 500;
pub const BACKSTOP_INTERVAL_MS: u32 = 30_000;

/// Collects a section and saves it under its form id.
pub fn save_section(ctx: &WizardContext, section_root: &Element, form_id: &FormId) {
    let snapshot = dom_forms::collect(section_root);
    ctx.store.borrow_mut().save(form_id, snapshot);
}

fn is_debounced(el: &Element) -> bool {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return matches!(input.type_().as_str(), "text" | "number");
    }
    el.tag_name() == "TEXTAREA"
}

/// Wires every named control under `section_root`: `change` runs `save`
/// immediately; `input` on text/number/textarea controls runs it after the
/// debounce window. Each field gets its own timer slot keyed by
/// `key_prefix::field`, so overlapping edits across fields never cancel
/// each other.
pub(crate) fn attach_listeners(
    ctx: &WizardContext,
    section_root: &Element,
    key_prefix: &str,
    save: Rc<dyn Fn()>,
) {
    let Ok(controls) = section_root.query_selector_all("input, select, textarea") else {
        return;
    };
    for i in 0..controls.length() {
        let Some(node) = controls.get(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else { continue };
        let Some(name) = el.get_attribute("name").filter(|n| !n.is_empty()) else {
            continue;
        };

        {
            let save = save.clone();
            let on_change = Closure::wrap(Box::new(move |_: web_sys::Event| {
                save();
            }) as Box<dyn FnMut(web_sys::Event)>);
            let _ = el
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
            on_change.forget();
        }

        if is_debounced(&el) {
            let debouncers = ctx.debouncers.clone();
            let save = save.clone();
            let key = format!("{key_prefix}::{name}");
            let on_input = Closure::wrap(Box::new(move |_: web_sys::Event| {
                let save = save.clone();
                let timeout = Timeout::new(DEBOUNCE_MS, move || save());
                // Replacing the slot drops the previous timer for this
                // field only, resetting its window.
                debouncers.borrow_mut().insert(key.clone(), timeout);
            }) as Box<dyn FnMut(web_sys::Event)>);
            let _ = el.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref());
            on_input.forget();
        }
    }
}

/// Standard wiring for a section saved verbatim under one form id.
pub fn attach_autosave(ctx: &WizardContext, section_root: &Element, form_id: &FormId) {
    let save: Rc<dyn Fn()> = {
        let ctx = ctx.clone();
        let section_root = section_root.clone();
        let form_id = form_id.clone();
        Rc::new(move || save_section(&ctx, &section_root, &form_id))
    };
    attach_listeners(ctx, section_root, &form_id.as_string(), save);
}

fn save_matching(
    ctx: &WizardContext,
    document: &Document,
    selector: &str,
    id_of: impl Fn(&Element) -> Option<FormId>,
) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else { continue };
        if let Some(form_id) = id_of(&el) {
            save_section(ctx, &el, &form_id);
        }
    }
}

/// Sweeps every rendered section into the store, pending debounces or not.
/// Used before any tree mutation, by the periodic backstop, and on unload.
pub fn save_all_rendered(ctx: &WizardContext) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    save_matching(ctx, &document, ".form-atividade", |el| {
        let name = el.get_attribute("data-atividade")?;
        Activity::from_str(&name).map(FormId::Activity)
    });
    save_matching(ctx, &document, ".form-cultura", |el| {
        let kind = CultureKind::from_str(&el.get_attribute("data-culture-kind")?)?;
        let name = el.get_attribute("data-culture")?;
        Some(FormId::culture(kind, name))
    });
    sections::save_secundarias(ctx);
}

/// Installs the 30-second durability backstop. The interval is forgotten —
/// it lives for the rest of the page.
pub fn start_backstop(ctx: &WizardContext) {
    let ctx = ctx.clone();
    Interval::new(BACKSTOP_INTERVAL_MS, move || save_all_rendered(&ctx)).forget();
}

/// One final best-effort synchronous save when the page goes away.
pub fn install_unload_save(ctx: &WizardContext) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let ctx = ctx.clone();
    let on_unload = Closure::wrap(Box::new(move |_: web_sys::BeforeUnloadEvent| {
        save_all_rendered(&ctx);
    }) as Box<dyn FnMut(web_sys::BeforeUnloadEvent)>);
    let _ = window
        .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
    on_unload.forget();
}
