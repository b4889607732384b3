use super::autosave;
use super::context::WizardContext;
use super::remote;
use super::sections;
use super::steps;
use crate::app::{AppGlobalContext, AppPage};
use crate::shared::notify;
use crate::system::auth::context::use_auth;
use contracts::domain::custeio::forms::Activity;
use contracts::shared::format::format_brl_input;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Fills the contact fields from the identity provider when the user has
/// not typed anything yet.
fn prefill_contact_defaults(user: &UserInfo) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let defaults = [
        ("nome", user.nome.as_deref()),
        ("email", user.email.as_deref()),
        ("contato", user.telefone.as_deref()),
    ];
    for (name, value) in defaults {
        let Some(value) = value else { continue };
        let Ok(Some(el)) = document.query_selector(&format!("input[name=\"{name}\"]")) else {
            continue;
        };
        let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        if input.value().is_empty() {
            input.set_value(value);
        }
    }
}

#[component]
pub fn CusteioWizard() -> impl IntoView {
    let app_ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let ctx = WizardContext::new();
    let wizard_steps = ctx.steps;
    let busy = ctx.busy;

    // One-time wiring after the form is in the tree: durability backstops,
    // then the remote record when the URL names one.
    {
        let ctx = ctx.clone();
        Effect::new(move |_| {
            autosave::start_backstop(&ctx);
            autosave::install_unload_save(&ctx);
            if let Some(id) = remote::record_id_from_url() {
                ctx.record_id.set(Some(id));
                let ctx = ctx.clone();
                spawn_local(async move {
                    if let Err(e) = remote::rehydrate(&ctx).await {
                        log::error!("failed to load saved record: {e}");
                        notify::alert("Não foi possível carregar a solicitação salva.");
                    }
                });
            }
        });
    }

    Effect::new(move |_| {
        if let Some(user) = auth_state.get().user {
            prefill_contact_defaults(&user);
        }
    });

    let next = move |_| {
        if let Err(message) = wizard_steps.try_next(steps::gate) {
            notify::alert(&message);
        }
    };
    let prev = move |_| wizard_steps.back();

    let on_activity_toggle = {
        let ctx = ctx.clone();
        move |_| sections::sync_activities(&ctx)
    };

    let on_secundarias_change = {
        let ctx = ctx.clone();
        move |ev: web_sys::Event| {
            let count = event_target_value(&ev).trim().parse::<usize>().unwrap_or(0);
            sections::set_secondary_count(&ctx, count);
        }
    };

    let valor_display = RwSignal::new(format_brl_input("0"));
    let on_valor_input = move |ev: web_sys::Event| {
        valor_display.set(format_brl_input(&event_target_value(&ev)));
    };

    let on_reset = {
        let ctx = ctx.clone();
        move |_| {
            if notify::confirm(
                "Tem certeza que deseja limpar todos os dados salvos? Esta ação não pode ser desfeita.",
            ) {
                ctx.store.borrow_mut().clear();
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            }
        }
    };

    let on_submit = {
        let ctx = ctx.clone();
        move |_| {
            if ctx.busy.get_untracked() {
                return;
            }
            let Some(user) = auth_state.get_untracked().user else {
                notify::alert("Você precisa estar logado para enviar a solicitação.");
                return;
            };
            ctx.busy.set(true);
            let ctx = ctx.clone();
            spawn_local(async move {
                match remote::submit(&ctx, &user).await {
                    Ok(id) => {
                        log::info!("application {id} submitted");
                        ctx.busy.set(false);
                        notify::alert(
                            "Solicitação enviada com sucesso! Agora conclua sua solicitação com os documentos e informações necessárias.",
                        );
                        app_ctx.page.set(AppPage::Documentos);
                    }
                    Err(e) => {
                        log::error!("submit failed: {e}");
                        ctx.busy.set(false);
                        notify::alert("Erro ao enviar. Tente novamente.");
                    }
                }
            });
        }
    };

    view! {
        <div class="custeio-wizard">
            <div class="progress-indicator" id="progress-indicator">
                {move || wizard_steps.progress_label()}
            </div>

            <form id={remote::FORM_ID} on:submit=move |ev| ev.prevent_default()>
                <div class="step" class:active=move || wizard_steps.is_active(0)>
                    <h5>"Dados do solicitante"</h5>
                    <div class="mb-3">
                        <label class="form-label">"Nome completo"</label>
                        <input type="text" class="form-control" name="nome" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"CPF"</label>
                        <input type="text" class="form-control" name="cpf" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"E-mail"</label>
                        <input type="text" class="form-control" name="email" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Celular"</label>
                        <input type="text" class="form-control" name="contato" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Estado civil"</label>
                        <select class="form-select" name="estado_civil">
                            <option value="">"Selecione..."</option>
                            <option value="Solteiro(a)">"Solteiro(a)"</option>
                            <option value="Casado(a)">"Casado(a)"</option>
                            <option value="Divorciado(a)">"Divorciado(a)"</option>
                            <option value="Viúvo(a)">"Viúvo(a)"</option>
                        </select>
                    </div>
                    <div class="step-nav">
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || wizard_steps.is_active(1)>
                    <h5>"Propriedade principal"</h5>
                    <div class="mb-3">
                        <label class="form-label">"Nome da propriedade"</label>
                        <input type="text" class="form-control" name="propriedade_nome" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Município / UF"</label>
                        <input type="text" class="form-control" name="propriedade_municipio" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Número de matrícula"</label>
                        <input type="text" class="form-control" name="propriedade_matricula" required />
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Área total (ha)"</label>
                        <input
                            type="number"
                            class="form-control"
                            name="propriedade_area_total"
                            min="0"
                            step="0.01"
                            required
                        />
                    </div>
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || wizard_steps.is_active(2)>
                    <h5>"Atividades rurais desenvolvidas"</h5>
                    {Activity::all()
                        .into_iter()
                        .map(|activity| {
                            let on_activity_toggle = on_activity_toggle.clone();
                            view! {
                                <div class="form-check">
                                    <input
                                        type="checkbox"
                                        class="form-check-input"
                                        name=activity.field_name()
                                        on:change=move |_| on_activity_toggle(())
                                    />
                                    <label class="form-check-label">{activity.as_str()}</label>
                                </div>
                            }
                        })
                        .collect_view()}
                    <h6 class="mt-3">"Atividades selecionadas:"</h6>
                    <ul class="list-group" id={sections::SELECTED_ACTIVITIES_LIST}></ul>
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || wizard_steps.is_active(3)>
                    <h5>"Detalhes das atividades"</h5>
                    <div id={sections::ACTIVITY_FORMS_CONTAINER} class="mt-3"></div>
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || wizard_steps.is_active(4)>
                    <h5>"Propriedades secundárias"</h5>
                    <div class="mb-3">
                        <label class="form-label">
                            "Quantidade de propriedades secundárias utilizadas"
                        </label>
                        <select
                            class="form-select"
                            name="num_secundarias"
                            on:change=on_secundarias_change
                        >
                            <option value="">"Selecione..."</option>
                            <option value="0">"0"</option>
                            <option value="1">"1"</option>
                            <option value="2">"2"</option>
                            <option value="3">"3"</option>
                            <option value="4">"4"</option>
                            <option value="5">"5"</option>
                        </select>
                    </div>
                    <div id={sections::SECUNDARIAS_CONTAINER}></div>
                    <div class="step-nav">
                        <button type="button" class="btn btn-secondary" on:click=prev>
                            "Anterior"
                        </button>
                        <button type="button" class="btn btn-primary" on:click=next>
                            "Próximo"
                        </button>
                    </div>
                </div>

                <div class="step" class:active=move || wizard_steps.is_active(5)>
                    <h5>"Crédito solicitado"</h5>
                    <div class="mb-3">
                        <label class="form-label">"Valor do crédito (R$)"</label>
                        <input
                            type="number"
                            class="form-control"
                            name="valor_credito"
                            min="0"
                            step="1000"
                            on:input=on_valor_input
                            required
                        />
                        <span class="valor-exibido">{move || valor_display.get()}</span>
                    </div>
                    <div class="mb-3">
                        <label class="form-label">"Finalidade do custeio"</label>
                        <textarea class="form-control" name="finalidade" rows="3"></textarea>
                    </div>
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
                            {move || if busy.get() { "Enviando..." } else { "Enviar Formulário" }}
                        </button>
                    </div>
                    <div class="step-nav mt-3">
                        <button type="button" class="btn btn-outline-danger" on:click=on_reset>
                            "Limpar dados salvos"
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
