use leptos::prelude::*;

/// Gate shown while no session exists. Sign-in itself happens on the hosted
/// identity-provider page, which stores the session token and returns here.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <h3>"Crédito Rural"</h3>
            <p>"Você precisa estar logado para acessar a solicitação."</p>
            <a class="btn btn-primary" href="/sign-in">
                "Entrar"
            </a>
        </div>
    }
}
