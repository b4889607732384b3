//! Forward-navigation gates of the custeio wizard.
//!
//! Backward moves are never gated; these checks only guard `next` on the
//! steps that have preconditions. Each returns the blocking-notice message
//! on failure.

use contracts::domain::custeio::forms::Activity;
use contracts::domain::custeio::schema::secondary_owner_field;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

/// Step indices with a gate.
const STEP_ATIVIDADES: usize = 2;
const STEP_SECUNDARIAS: usize = 4;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn select_value(document: &Document, name: &str) -> Option<String> {
    document
        .query_selector(&format!("[name=\"{name}\"]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

pub fn gate(step: usize) -> Result<(), String> {
    match step {
        STEP_ATIVIDADES => require_activity_selected(),
        STEP_SECUNDARIAS => require_secundarias_answered(),
        _ => Ok(()),
    }
}

fn require_activity_selected() -> Result<(), String> {
    let Some(document) = document() else {
        return Ok(());
    };
    let any_checked = Activity::all().into_iter().any(|activity| {
        document
            .query_selector(&format!("input[name=\"{}\"]", activity.field_name()))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.checked())
            .unwrap_or(false)
    });
    if any_checked {
        Ok(())
    } else {
        Err("Por favor, selecione pelo menos uma atividade rural.".to_string())
    }
}

fn require_secundarias_answered() -> Result<(), String> {
    let Some(document) = document() else {
        return Ok(());
    };
    let raw = select_value(&document, "num_secundarias").unwrap_or_default();
    let count: usize = raw.trim().parse().map_err(|_| {
        "Por favor, selecione a quantidade de propriedades secundárias.".to_string()
    })?;

    let all_answered = (1..=count).all(|index| {
        select_value(&document, &secondary_owner_field(index))
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    });
    if all_answered {
        Ok(())
    } else {
        Err(
            "Preencha o campo \"Você é o proprietário?\" para todas as propriedades secundárias."
                .to_string(),
        )
    }
}
