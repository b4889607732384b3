//! Dynamic section manager.
//!
//! Keeps three families of sub-forms in sync with user selections: one
//! section per checked activity, one per chosen culture (annual and
//! perennial), and one per secondary property up to the chosen count.
//! Sections are built from the schema registry, restored from the store,
//! and wired for autosave on creation. Removal always saves first — the
//! snapshot survives under its form id and a later toggle-on resumes from
//! it.

use super::autosave;
use super::context::WizardContext;
use crate::shared::dom_forms::{self, selector_escape};
use contracts::domain::custeio::forms::{Activity, CultureKind, FormId, SelectionKey};
use contracts::domain::custeio::schema::{
    activity_schema, culture_schema, secondary_owner_details_schema, secondary_owner_field,
    secondary_property_schema, ANNUAL_CULTURES, PERENNIAL_CULTURES,
};
use contracts::domain::custeio::selection::SelectionList;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub const ACTIVITY_FORMS_CONTAINER: &str = "formularios-atividades";
pub const SELECTED_ACTIVITIES_LIST: &str = "selecao-atividades";
pub const SECUNDARIAS_CONTAINER: &str = "secundarias-container";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn forms_container_id(kind: CultureKind) -> &'static str {
    match kind {
        CultureKind::Annual => "culturas-anuais-forms",
        CultureKind::Perennial => "culturas-perenes-forms",
    }
}

fn selected_list_id(kind: CultureKind) -> &'static str {
    match kind {
        CultureKind::Annual => "culturas-anuais-selecionadas",
        CultureKind::Perennial => "culturas-perenes-selecionadas",
    }
}

fn culture_names(kind: CultureKind) -> &'static [&'static str] {
    match kind {
        CultureKind::Annual => ANNUAL_CULTURES,
        CultureKind::Perennial => PERENNIAL_CULTURES,
    }
}

// ============================================================================
// Activities
// ============================================================================

fn activity_checked(document: &Document, activity: Activity) -> bool {
    document
        .query_selector(&format!("input[name=\"{}\"]", activity.field_name()))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

fn find_activity_section(container: &Element, activity: Activity) -> Option<Element> {
    container
        .query_selector(&format!(
            ".form-atividade[data-atividade=\"{}\"]",
            activity.as_str()
        ))
        .ok()
        .flatten()
}

/// Reconciles rendered activity sections with the checked boxes: saves
/// everything, removes sections for unchecked activities, builds sections
/// for newly checked ones (restoring saved data and wiring autosave), and
/// refreshes the summary list.
pub fn sync_activities(ctx: &WizardContext) {
    let Some(document) = document() else { return };
    let Some(container) = document.get_element_by_id(ACTIVITY_FORMS_CONTAINER) else {
        return;
    };

    // Save before any part of the tree changes under a pending debounce.
    autosave::save_all_rendered(ctx);

    let selected: Vec<Activity> = Activity::all()
        .into_iter()
        .filter(|a| activity_checked(&document, *a))
        .collect();

    for activity in Activity::all() {
        if selected.contains(&activity) {
            continue;
        }
        if let Some(section) = find_activity_section(&container, activity) {
            section.remove();
        }
    }

    for activity in &selected {
        if find_activity_section(&container, *activity).is_some() {
            continue;
        }
        let Some(section) = build_activity_section(ctx, &document, *activity) else {
            continue;
        };
        let _ = container.append_child(&section);

        let form_id = FormId::Activity(*activity);
        let saved = ctx.store.borrow().get(&form_id);
        if !saved.is_empty() {
            dom_forms::restore(&section, &saved);
        }
        autosave::attach_autosave(ctx, &section, &form_id);

        match activity {
            Activity::CulturaAnual => restore_cultures(ctx, CultureKind::Annual),
            Activity::CulturaPerene => restore_cultures(ctx, CultureKind::Perennial),
            _ => {}
        }
    }

    update_activities_list(&document, &selected);
}

fn build_activity_section(
    ctx: &WizardContext,
    document: &Document,
    activity: Activity,
) -> Option<Element> {
    let section = match activity {
        Activity::CulturaAnual => build_culture_picker(ctx, document, CultureKind::Annual)?,
        Activity::CulturaPerene => build_culture_picker(ctx, document, CultureKind::Perennial)?,
        _ => dom_forms::render_section(document, &activity_schema(activity)).ok()?,
    };
    let _ = section.class_list().add_1("form-atividade");
    let _ = section.set_attribute("data-atividade", activity.as_str());
    Some(section)
}

fn update_activities_list(document: &Document, selected: &[Activity]) {
    let Some(list) = document.get_element_by_id(SELECTED_ACTIVITIES_LIST) else {
        return;
    };
    list.set_inner_html("");
    for activity in selected {
        if let Ok(item) = document.create_element("li") {
            item.set_class_name("list-group-item");
            item.set_text_content(Some(activity.as_str()));
            let _ = list.append_child(&item);
        }
    }
}

// ============================================================================
// Culture pickers
// ============================================================================

fn build_culture_picker(
    ctx: &WizardContext,
    document: &Document,
    kind: CultureKind,
) -> Option<Element> {
    let section = document.create_element("div").ok()?;

    let title = document.create_element("h6").ok()?;
    title.set_class_name("text-center");
    title.set_text_content(Some(match kind {
        CultureKind::Annual => "Cultura Anual",
        CultureKind::Perennial => "Cultura Perene",
    }));
    let _ = section.append_child(&title);

    let prompt = document.create_element("h6").ok()?;
    prompt.set_class_name("text-center mt-3");
    prompt.set_text_content(Some(match kind {
        CultureKind::Annual => "Selecione uma ou mais cultura anual:",
        CultureKind::Perennial => "O produtor desenvolve mais de uma cultura perene?",
    }));
    let _ = section.append_child(&prompt);

    let group = document.create_element("div").ok()?;
    group.set_class_name("btn-group");
    for name in culture_names(kind) {
        let button = document.create_element("button").ok()?;
        let _ = button.set_attribute("type", "button");
        button.set_class_name("btn btn-info culture-toggle");
        let _ = button.set_attribute("data-culture", name);
        let _ = button.set_attribute("data-culture-kind", kind.as_str());
        button.set_text_content(Some(name));

        let ctx = ctx.clone();
        let name = name.to_string();
        let on_click = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            toggle_culture(&ctx, kind, &name);
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);
        let _ =
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();

        let _ = group.append_child(&button);
    }
    let _ = section.append_child(&group);

    let list_title = document.create_element("h6").ok()?;
    list_title.set_class_name("text-center mt-3");
    list_title.set_text_content(Some(match kind {
        CultureKind::Annual => "Culturas Selecionadas:",
        CultureKind::Perennial => "Culturas Perenes Selecionadas:",
    }));
    let _ = section.append_child(&list_title);

    let list = document.create_element("ul").ok()?;
    list.set_class_name("list-group");
    list.set_id(selected_list_id(kind));
    let _ = section.append_child(&list);

    let forms = document.create_element("div").ok()?;
    forms.set_class_name("mt-4");
    forms.set_id(forms_container_id(kind));
    let _ = section.append_child(&forms);

    Some(section)
}

fn find_culture_section(document: &Document, kind: CultureKind, name: &str) -> Option<Element> {
    document
        .query_selector(&format!(
            ".form-cultura[data-culture-kind=\"{}\"][data-culture=\"{}\"]",
            kind.as_str(),
            selector_escape(name)
        ))
        .ok()
        .flatten()
}

/// Flips one culture between absent and present. Every click re-derives the
/// state from the selection list, so repeated clicks toggle cleanly.
pub fn toggle_culture(ctx: &WizardContext, kind: CultureKind, name: &str) {
    autosave::save_all_rendered(ctx);

    let key = SelectionKey::for_kind(kind);
    let mut list = ctx.store.borrow().selection(key);
    if list.contains(name) {
        remove_culture_section(ctx, kind, name);
        list.remove(name);
    } else {
        // Creation is guarded by an existence check; the list keeps its
        // bookkeeping either way.
        add_culture_section(ctx, kind, name);
        list.push(name);
    }
    ctx.store.borrow_mut().set_selection(key, &list);

    update_culture_list(kind, &list);
    update_culture_buttons(kind, &list);
}

fn add_culture_section(ctx: &WizardContext, kind: CultureKind, name: &str) {
    let Some(document) = document() else { return };
    let Some(container) = document.get_element_by_id(forms_container_id(kind)) else {
        return;
    };
    if find_culture_section(&document, kind, name).is_some() {
        return;
    }

    let schema = culture_schema(kind, name);
    let Ok(section) = dom_forms::render_section(&document, &schema) else {
        return;
    };
    let _ = section.class_list().add_1("form-cultura");
    let _ = section.class_list().add_1("border");
    let _ = section.set_attribute("data-culture", name);
    let _ = section.set_attribute("data-culture-kind", kind.as_str());
    let _ = container.append_child(&section);

    let form_id = FormId::culture(kind, name);
    let saved = ctx.store.borrow().get(&form_id);
    if !saved.is_empty() {
        dom_forms::restore(&section, &saved);
    }
    autosave::attach_autosave(ctx, &section, &form_id);
}

fn remove_culture_section(ctx: &WizardContext, kind: CultureKind, name: &str) {
    let Some(document) = document() else { return };
    if let Some(section) = find_culture_section(&document, kind, name) {
        // Save-then-detach: the snapshot stays under its id for the next
        // toggle-on.
        autosave::save_section(ctx, &section, &FormId::culture(kind, name));
        section.remove();
    }
}

/// Rebuilds every listed culture section in list order, restoring saved
/// data. Existing sections are left alone, so rehydrating twice never
/// duplicates.
pub fn restore_cultures(ctx: &WizardContext, kind: CultureKind) {
    let list = ctx.store.borrow().selection(SelectionKey::for_kind(kind));
    for name in list.iter() {
        add_culture_section(ctx, kind, name);
    }
    update_culture_list(kind, &list);
    update_culture_buttons(kind, &list);
}

fn update_culture_list(kind: CultureKind, list: &SelectionList) {
    let Some(document) = document() else { return };
    let Some(ul) = document.get_element_by_id(selected_list_id(kind)) else {
        return;
    };
    ul.set_inner_html("");
    for name in list.iter() {
        if let Ok(item) = document.create_element("li") {
            item.set_class_name("list-group-item");
            item.set_text_content(Some(name));
            let _ = ul.append_child(&item);
        }
    }
}

fn update_culture_buttons(kind: CultureKind, list: &SelectionList) {
    let Some(document) = document() else { return };
    let Ok(buttons) = document.query_selector_all(&format!(
        ".culture-toggle[data-culture-kind=\"{}\"]",
        kind.as_str()
    )) else {
        return;
    };
    for i in 0..buttons.length() {
        let Some(node) = buttons.get(i) else { continue };
        let Ok(button) = node.dyn_into::<Element>() else { continue };
        let Some(name) = button.get_attribute("data-culture") else {
            continue;
        };
        let selected = list.contains(&name);
        let _ = button.class_list().toggle_with_force("btn-success", selected);
        let _ = button.class_list().toggle_with_force("btn-info", !selected);
    }
}

// ============================================================================
// Secondary properties
// ============================================================================

fn extras_id(index: usize) -> String {
    format!("secundaria-extras-{index}")
}

fn set_extras_visible(document: &Document, index: usize, visible: bool) {
    if let Some(extras) = document.get_element_by_id(&extras_id(index)) {
        if let Some(el) = extras.dyn_ref::<HtmlElement>() {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }
}

fn owner_answer(document: &Document, index: usize) -> Option<String> {
    document
        .query_selector(&format!("[name=\"{}\"]", secondary_owner_field(index)))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

/// Shows the owner-detail block of every rendered secondary property whose
/// ownership select answers "Não".
pub fn refresh_secundaria_extras(document: &Document, count: usize) {
    for index in 1..=count {
        let visible = owner_answer(document, index).as_deref() == Some("Não");
        set_extras_visible(document, index, visible);
    }
}

fn build_secundaria_section(document: &Document, index: usize) -> Option<Element> {
    let section = dom_forms::render_section(document, &secondary_property_schema(index)).ok()?;
    let _ = section.class_list().add_1("form-secundaria");
    let _ = section.class_list().add_1("border");
    let _ = section.set_attribute("data-index", &index.to_string());

    let extras = dom_forms::render_section(document, &secondary_owner_details_schema(index)).ok()?;
    extras.set_id(&extras_id(index));
    if let Some(el) = extras.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("display", "none");
    }
    let _ = section.append_child(&extras);

    if let Ok(Some(owner)) = section.query_selector(&format!(
        "[name=\"{}\"]",
        secondary_owner_field(index)
    )) {
        let on_change = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            let Some(document) = self::document() else { return };
            let answered_no = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| select.value() == "Não")
                .unwrap_or(false);
            set_extras_visible(&document, index, answered_no);
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ =
            owner.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
        on_change.forget();
    }

    Some(section)
}

/// Collects the rendered secondary-property sections into their reserved
/// store slot, recording the live count alongside the field values. With
/// nothing rendered there is nothing to record — earlier data survives,
/// the same soft-delete rule the cultures follow.
pub fn save_secundarias(ctx: &WizardContext) {
    let Some(document) = document() else { return };
    let Some(container) = document.get_element_by_id(SECUNDARIAS_CONTAINER) else {
        return;
    };
    let rendered = container
        .query_selector_all(".form-secundaria")
        .map(|l| l.length())
        .unwrap_or(0);
    if rendered == 0 {
        return;
    }
    let mut snapshot = dom_forms::collect(&container);
    snapshot.insert("num_secundarias".into(), rendered.to_string().into());
    ctx.store
        .borrow_mut()
        .save(&FormId::Selection(SelectionKey::Secundarias), snapshot);
}

/// Rebuilds the secondary-property sections for the chosen count, restoring
/// saved values and re-wiring autosave.
pub fn set_secondary_count(ctx: &WizardContext, count: usize) {
    let Some(document) = document() else { return };
    let Some(container) = document.get_element_by_id(SECUNDARIAS_CONTAINER) else {
        return;
    };

    // Keep whatever was typed before the tree is rebuilt.
    save_secundarias(ctx);

    container.set_inner_html("");
    for index in 1..=count {
        if let Some(section) = build_secundaria_section(&document, index) {
            let _ = container.append_child(&section);
        }
    }

    let saved = ctx
        .store
        .borrow()
        .get(&FormId::Selection(SelectionKey::Secundarias));
    if !saved.is_empty() {
        dom_forms::restore(&container, &saved);
    }
    refresh_secundaria_extras(&document, count);

    let save: Rc<dyn Fn()> = {
        let ctx = ctx.clone();
        Rc::new(move || save_secundarias(&ctx))
    };
    autosave::attach_listeners(ctx, &container, "selection:secundarias", save);

    save_secundarias(ctx);
}
