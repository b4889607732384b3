use crate::domain::c003_documentos::api;
use crate::shared::notify;
use crate::system::auth::context::use_auth;
use contracts::domain::documentos::DocumentosPartition;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

fn reload(cliente_id: String, partition: RwSignal<DocumentosPartition>) {
    spawn_local(async move {
        match api::load_partition(&cliente_id).await {
            Ok(loaded) => partition.set(loaded),
            Err(e) => {
                log::error!("failed to load documents: {e}");
                notify::alert("Não foi possível carregar os documentos.");
            }
        }
    });
}

/// Checklist of the application's required documents: pending, submitted
/// and approved. Submitted documents can be rejected, which sends them back
/// to pending. Uploading itself happens in the mobile flow.
#[component]
pub fn DocumentosPage() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let partition = RwSignal::new(DocumentosPartition::default());

    Effect::new(move |_| {
        if let Some(user) = auth_state.get().user {
            reload(user.uid, partition);
        }
    });

    let on_reject = move |doc_name: String| {
        let Some(user) = auth_state.get_untracked().user else {
            return;
        };
        if !notify::confirm(&format!("Rejeitar o documento \"{doc_name}\"?")) {
            return;
        }
        spawn_local(async move {
            match api::reject_documento(&user.uid, &doc_name).await {
                Ok(()) => reload(user.uid, partition),
                Err(e) => {
                    log::error!("failed to reject document: {e}");
                    notify::alert("Erro ao rejeitar o documento. Tente novamente.");
                }
            }
        });
    };

    view! {
        <div class="documentos-page">
            <h5>"Documentos da solicitação"</h5>

            <h6 class="mt-3">"Pendentes"</h6>
            <ul class="list-group">
                {move || {
                    partition
                        .get()
                        .pendentes
                        .into_iter()
                        .map(|doc| view! { <li class="list-group-item">{doc}</li> })
                        .collect_view()
                }}
            </ul>

            <h6 class="mt-3">"Enviados"</h6>
            <ul class="list-group">
                {move || {
                    partition
                        .get()
                        .enviados
                        .into_iter()
                        .map(|doc| {
                            let name = doc.tipo.clone();
                            view! {
                                <li class="list-group-item">
                                    <a href=doc.url target="_blank">
                                        {doc.tipo.clone()}
                                    </a>
                                    <button
                                        class="btn btn-outline-danger btn-sm"
                                        on:click=move |_| on_reject(name.clone())
                                    >
                                        "Rejeitar"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <h6 class="mt-3">"Aprovados"</h6>
            <ul class="list-group">
                {move || {
                    partition
                        .get()
                        .aprovados
                        .into_iter()
                        .map(|doc| {
                            view! {
                                <li class="list-group-item approved">
                                    <a href=doc.url target="_blank">
                                        {doc.tipo.clone()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
