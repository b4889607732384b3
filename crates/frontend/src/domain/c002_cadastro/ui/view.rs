//! Registration ("coleta de dados") wizard: three steps of required fields
//! with inline validation, provider-aware contact prefill, and a uniqueness
//! check before the record is written.

use crate::app::{AppGlobalContext, AppPage};
use crate::domain::c002_cadastro::api;
use crate::shared::dom_forms;
use crate::shared::notify;
use crate::shared::step_nav::StepNavigator;
use crate::system::auth::context::use_auth;
use contracts::domain::cadastro::stamp_cliente;
use contracts::domain::custeio::forms::{FieldValue, FormSnapshot};
use contracts::domain::custeio::record::{snapshot_into_record, value_to_field};
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

const FORM_ID: &str = "cadastro-form";
const TOTAL_STEPS: usize = 3;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn form_root() -> Option<Element> {
    document()?.get_element_by_id(FORM_ID)
}

fn step_panel_id(step: usize) -> String {
    format!("cadastro-step-{}", step + 1)
}

fn record_to_snapshot(record: &Map<String, Value>) -> FormSnapshot {
    record
        .iter()
        .filter_map(|(key, value)| value_to_field(value).map(|field| (key.clone(), field)))
        .collect()
}

fn conflict_message(field: &str) -> &'static str {
    match field {
        "email" => "Esse e-mail já está em uso.",
        "contato" => "Esse número de celular já está em uso.",
        _ => "Esse valor já está em uso.",
    }
}

fn contact_input(document: &Document, name: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(name)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// The provider that established the session fixes the matching contact
/// field: a Google session owns the e-mail, a phone session owns the
/// number. A value already saved on the record always locks its field.
fn apply_provider_rules(user: &UserInfo, saved: &FormSnapshot) {
    let Some(document) = document() else { return };

    let saved_text = |name: &str| {
        saved
            .get(name)
            .and_then(FieldValue::as_text)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    if let Some(email) = contact_input(&document, "email") {
        if let Some(value) = saved_text("email") {
            email.set_value(&value);
            email.set_disabled(true);
        } else if user.is_google() {
            if let Some(value) = &user.email {
                email.set_value(value);
            }
            email.set_disabled(true);
        } else {
            email.set_disabled(false);
        }
    }

    if let Some(contato) = contact_input(&document, "contato") {
        if let Some(value) = saved_text("contato") {
            contato.set_value(&value);
            contato.set_disabled(true);
        } else if user.is_phone() {
            if let Some(value) = &user.telefone {
                contato.set_value(value);
            }
            contato.set_disabled(true);
        } else {
            contato.set_disabled(false);
        }
    }
}

fn required_text_field(id: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="mb-3">
            <label class="form-label" for=id>
                {label}
            </label>
            <input type="text" class="form-control" id=id name=id required />
            <span class="field-error" id=format!("error-{id}") style="display:none;">
                "Campo obrigatório"
            </span>
        </div>
    }
}

#[component]
pub fn CadastroPage() -> impl IntoView {
    let app_ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let steps = StepNavigator::new(TOTAL_STEPS);
    let busy = RwSignal::new(false);

    // Merge any previously saved record and apply the provider rules once
    // the session is known.
    Effect::new(move |_| {
        let Some(user) = auth_state.get().user else {
            return;
        };
        spawn_local(async move {
            match api::load_cliente(&user.uid).await {
                Ok(Some(record)) => {
                    let snapshot = record_to_snapshot(&record);
                    if let Some(form) = form_root() {
                        dom_forms::restore(&form, &snapshot);
                    }
                    apply_provider_rules(&user, &snapshot);
                }
                Ok(None) => {
                    log::info!("no saved record for {}, new registration", user.uid);
                    apply_provider_rules(&user, &FormSnapshot::new());
                }
                Err(e) => log::error!("failed to load client record: {e}"),
            }
        });
    });

    // Inline marks are the notice here; a blocked transition needs no
    // additional alert.
    let gate = |step: usize| -> Result<(), String> {
        let Some(document) = document() else {
            return Ok(());
        };
        let Some(root) = document.get_element_by_id(&step_panel_id(step)) else {
            return Ok(());
        };
        if dom_forms::validate_required(&root) {
            Ok(())
        } else {
            Err("campos obrigatórios pendentes".to_string())
        }
    };

    let next = move |_| {
        let _ = steps.try_next(gate);
    };
    let prev = move |_| steps.back();

    let on_submit = move |_| {
        if busy.get_untracked() {
            return;
        }
        let Some(user) = auth_state.get_untracked().user else {
            notify::alert("Você precisa estar logado para salvar o cadastro.");
            return;
        };
        let Some(root) = document().and_then(|d| d.get_element_by_id(&step_panel_id(2))) else {
            return;
        };
        if !dom_forms::validate_required(&root) {
            return;
        }
        let Some(form) = form_root() else { return };

        let mut snapshot = dom_forms::collect(&form);
        for value in snapshot.values_mut() {
            if let FieldValue::Text(text) = value {
                *text = text.trim().to_string();
            }
        }
        let mut record = Map::new();
        snapshot_into_record(&mut record, &snapshot);
        stamp_cliente(&mut record, &user.author(), &chrono::Utc::now().to_rfc3339());

        busy.set(true);
        spawn_local(async move {
            match api::find_conflicting_field(&record, &user.uid).await {
                Ok(Some(field)) => {
                    busy.set(false);
                    notify::alert(conflict_message(field));
                }
                Ok(None) => match api::save_cliente(&user.uid, &record).await {
                    Ok(()) => {
                        busy.set(false);
                        notify::alert("Dados salvos com sucesso!");
                        app_ctx.page.set(AppPage::Custeio);
                    }
                    Err(e) => {
                        log::error!("failed to save client record: {e}");
                        busy.set(false);
                        notify::alert("Erro ao salvar dados. Por favor, tente novamente.");
                    }
                },
                Err(e) => {
                    log::error!("uniqueness check failed: {e}");
                    busy.set(false);
                    notify::alert("Erro ao verificar unicidade. Por favor, tente novamente.");
                }
            }
        });
    };

    view! {
        <div class="cadastro-page">
            <div class="progress-indicator">{move || steps.progress_label()}</div>

            <form id=FORM_ID on:submit=move |ev| ev.prevent_default()>
                <div class="step" class:active=move || steps.is_active(0) id=step_panel_id(0)>
                    <h5>"Dados pessoais"</h5>
                    {required_text_field("nome", "Nome completo")}
                    {required_text_field("cpf", "CPF")}
                    {required_text_field("data_nascimento", "Data de nascimento")}
                    <div class="mb-3">
                        <label class="form-label" for="estado_civil">
                            "Estado civil"
                        </label>
                        <select class="form-select" id="estado_civil" name="estado_civil" required>
                            <option value="">"Selecione..."</option>
                            <option value="Solteiro(a)">"Solteiro(a)"</option>
                            <option value="Casado(a)">"Casado(a)"</option>
                            <option value="Divorciado(a)">"Divorciado(a)"</option>
                            <option value="Viúvo(a)">"Viúvo(a)"</option>
                        </select>
                        <span class="field-error" id="error-estado_civil" style="display:none;">
                            "Campo obrigatório"
                        </span>
                    </div>
                    <div class="step-nav">
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || steps.is_active(1) id=step_panel_id(1)>
                    <h5>"Contato e endereço"</h5>
                    {required_text_field("email", "E-mail")}
                    {required_text_field("contato", "Celular")}
                    {required_text_field("endereco", "Endereço")}
                    <div class="mb-3">
                        <label class="form-label" for="endereco1">
                            "Complemento"
                        </label>
                        <input type="text" class="form-control" id="endereco1" name="endereco1" />
                    </div>
                    {required_text_field("municipio", "Município")}
                    {required_text_field("uf", "UF")}
                    {required_text_field("cep", "CEP")}
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || steps.is_active(2) id=step_panel_id(2)>
                    <h5>"Atividade e renda"</h5>
                    {required_text_field("profissao", "Profissão")}
                    {required_text_field("renda_anual", "Renda anual (R$)")}
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button
                            type="button"
                            class="btn btn-success"
                            on:click=on_submit
                            disabled=move || busy.get()
                        >
                            {move || if busy.get() { "Salvando..." } else { "Salvar" }}
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
