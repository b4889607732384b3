use crate::app::{AppGlobalContext, AppPage};
use crate::system::auth::context::{sign_out, use_auth};
use leptos::prelude::*;

const PAGES: [AppPage; 3] = [AppPage::Custeio, AppPage::Cadastro, AppPage::Documentos];

/// Header + content shell shared by every signed-in page.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-title">"Crédito Rural"</span>
                <nav class="app-nav">
                    {PAGES
                        .into_iter()
                        .map(|page| {
                            view! {
                                <button
                                    class=move || {
                                        if ctx.page.get() == page {
                                            "nav-item active"
                                        } else {
                                            "nav-item"
                                        }
                                    }
                                    on:click=move |_| ctx.page.set(page)
                                >
                                    {page.title()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="app-user">
                    <span class="app-user-name">
                        {move || {
                            auth_state
                                .get()
                                .user
                                .and_then(|u| u.nome.or(u.email))
                                .unwrap_or_default()
                        }}
                    </span>
                    <button class="nav-item" on:click=move |_| sign_out(set_auth_state)>
                        "Sair"
                    </button>
                </div>
            </header>
            <main class="app-content">{children()}</main>
        </div>
    }
}
