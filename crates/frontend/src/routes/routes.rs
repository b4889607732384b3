use crate::app::{AppGlobalContext, AppPage};
use crate::domain::c001_custeio::ui::wizard::CusteioWizard;
use crate::domain::c002_cadastro::ui::CadastroPage;
use crate::domain::c003_documentos::ui::DocumentosPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <Shell>
            {move || match ctx.page.get() {
                AppPage::Custeio => view! { <CusteioWizard /> }.into_any(),
                AppPage::Cadastro => view! { <CadastroPage /> }.into_any(),
                AppPage::Documentos => view! { <DocumentosPage /> }.into_any(),
            }}
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().user.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
