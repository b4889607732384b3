//! Collecting, restoring, rendering and validating form controls.
//!
//! Works on any subtree: a whole form, one dynamic section, one step panel.
//! Only named controls participate; checkbox/radio state travels as a flag,
//! every other control as its string value.

use contracts::domain::custeio::forms::{FieldValue, FormSnapshot};
use contracts::domain::custeio::schema::{FieldControl, FieldSpec, SectionSchema};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const CONTROL_SELECTOR: &str = "input, select, textarea";

/// Escapes a field name for use inside a double-quoted attribute selector.
pub fn selector_escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

fn control_name(el: &Element) -> Option<String> {
    el.get_attribute("name").filter(|n| !n.is_empty())
}

/// Reads one control's scalar state.
fn control_value(el: &Element) -> Option<FieldValue> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let value = match input.type_().as_str() {
            "checkbox" | "radio" => FieldValue::Flag(input.checked()),
            _ => FieldValue::Text(input.value()),
        };
        return Some(value);
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return Some(FieldValue::Text(select.value()));
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return Some(FieldValue::Text(area.value()));
    }
    None
}

fn set_control_value(el: &Element, value: &FieldValue) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        match input.type_().as_str() {
            "checkbox" | "radio" => input.set_checked(value.as_flag()),
            _ => input.set_value(value.as_text().unwrap_or_default()),
        }
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value.as_text().unwrap_or_default());
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value.as_text().unwrap_or_default());
    }
}

/// Scans every named control under `section_root` into a snapshot.
/// Empty sections yield an empty snapshot; no side effects.
pub fn collect(section_root: &Element) -> FormSnapshot {
    let mut snapshot = FormSnapshot::new();
    let Ok(controls) = section_root.query_selector_all(CONTROL_SELECTOR) else {
        return snapshot;
    };
    for i in 0..controls.length() {
        let Some(node) = controls.get(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else { continue };
        let Some(name) = control_name(&el) else { continue };
        if let Some(value) = control_value(&el) {
            snapshot.insert(name, value);
        }
    }
    snapshot
}

/// Applies a snapshot back onto matching controls under `section_root`.
/// Controls missing from the tree are skipped silently — partial snapshots
/// are expected after the schema grows. No validation happens here.
pub fn restore(section_root: &Element, snapshot: &FormSnapshot) {
    for (name, value) in snapshot {
        let selector = format!("[name=\"{}\"]", selector_escape(name));
        let Ok(Some(el)) = section_root.query_selector(&selector) else {
            continue;
        };
        set_control_value(&el, value);
    }
}

// ============================================================================
// Schema rendering
// ============================================================================

fn apply_number_attrs(input: &Element, min: Option<f64>, max: Option<f64>, step: Option<f64>) {
    if let Some(min) = min {
        let _ = input.set_attribute("min", &min.to_string());
    }
    if let Some(max) = max {
        let _ = input.set_attribute("max", &max.to_string());
    }
    if let Some(step) = step {
        let _ = input.set_attribute("step", &step.to_string());
    }
}

fn render_control(document: &Document, field: &FieldSpec) -> Result<Element, String> {
    let el = match &field.control {
        FieldControl::Text => {
            let input = document
                .create_element("input")
                .map_err(|e| format!("{e:?}"))?;
            let _ = input.set_attribute("type", "text");
            input.set_class_name("form-control");
            input
        }
        FieldControl::Number { min, max, step } => {
            let input = document
                .create_element("input")
                .map_err(|e| format!("{e:?}"))?;
            let _ = input.set_attribute("type", "number");
            input.set_class_name("form-control");
            apply_number_attrs(&input, *min, *max, *step);
            input
        }
        FieldControl::Select { options } => {
            let select = document
                .create_element("select")
                .map_err(|e| format!("{e:?}"))?;
            select.set_class_name("form-select");
            let placeholder = document
                .create_element("option")
                .map_err(|e| format!("{e:?}"))?;
            let _ = placeholder.set_attribute("value", "");
            placeholder.set_text_content(Some("Selecione..."));
            let _ = select.append_child(&placeholder);
            for option in *options {
                let el = document
                    .create_element("option")
                    .map_err(|e| format!("{e:?}"))?;
                let _ = el.set_attribute("value", option);
                el.set_text_content(Some(option));
                let _ = select.append_child(&el);
            }
            select
        }
        FieldControl::Checkbox => {
            let input = document
                .create_element("input")
                .map_err(|e| format!("{e:?}"))?;
            let _ = input.set_attribute("type", "checkbox");
            input.set_class_name("form-check-input");
            input
        }
        FieldControl::Textarea => {
            let area = document
                .create_element("textarea")
                .map_err(|e| format!("{e:?}"))?;
            area.set_class_name("form-control");
            let _ = area.set_attribute("rows", "3");
            area
        }
    };
    let _ = el.set_attribute("name", &field.name);
    if !matches!(field.control, FieldControl::Select { .. } | FieldControl::Checkbox) {
        let _ = el.set_attribute("placeholder", &field.label);
    }
    if field.required {
        let _ = el.set_attribute("required", "");
    }
    Ok(el)
}

/// Builds the DOM for one section from its schema. The returned root is an
/// unattached `div.form-section`; the caller decorates and mounts it.
pub fn render_section(document: &Document, schema: &SectionSchema) -> Result<Element, String> {
    let root = document
        .create_element("div")
        .map_err(|e| format!("{e:?}"))?;
    root.set_class_name("form-section");

    if !schema.title.is_empty() {
        let title = document
            .create_element("h6")
            .map_err(|e| format!("{e:?}"))?;
        title.set_class_name("fw-bold text-center mb-3");
        title.set_text_content(Some(&schema.title));
        let _ = root.append_child(&title);
    }

    for field in &schema.fields {
        if let Some(group) = field.group {
            let heading = document
                .create_element("h6")
                .map_err(|e| format!("{e:?}"))?;
            heading.set_class_name("mt-3");
            heading.set_text_content(Some(group));
            let _ = root.append_child(&heading);
        }

        let wrapper = document
            .create_element("div")
            .map_err(|e| format!("{e:?}"))?;
        wrapper.set_class_name("mb-3");

        let label = document
            .create_element("label")
            .map_err(|e| format!("{e:?}"))?;
        label.set_class_name("form-label");
        label.set_text_content(Some(&field.label));
        let _ = wrapper.append_child(&label);

        let control = render_control(document, field)?;
        let _ = wrapper.append_child(&control);
        let _ = root.append_child(&wrapper);
    }

    Ok(root)
}

// ============================================================================
// Required-field validation (data-collection variant)
// ============================================================================

fn set_error_visible(document: &Document, control: &Element, visible: bool) {
    let id = control.id();
    if id.is_empty() {
        return;
    }
    if let Some(error) = document.get_element_by_id(&format!("error-{id}")) {
        if let Some(el) = error.dyn_ref::<HtmlElement>() {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }
}

/// Validates every `required` control under `root`: empty-after-trimming
/// text (or an unchecked required checkbox) is invalid. Controls get
/// `is-invalid`/`is-valid` classes and a matching `error-<id>` element is
/// shown or hidden. Returns overall validity.
pub fn validate_required(root: &Element) -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return true;
    };
    let Ok(controls) =
        root.query_selector_all("input[required], select[required], textarea[required]")
    else {
        return true;
    };

    let mut valid = true;
    for i in 0..controls.length() {
        let Some(node) = controls.get(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else { continue };
        let ok = match control_value(&el) {
            Some(FieldValue::Text(value)) => !value.trim().is_empty(),
            Some(FieldValue::Flag(checked)) => checked,
            None => true,
        };
        let _ = el.class_list().toggle_with_force("is-invalid", !ok);
        let _ = el.class_list().toggle_with_force("is-valid", ok);
        set_error_visible(&document, &el, !ok);
        valid &= ok;
    }
    valid
}
