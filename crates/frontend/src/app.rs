use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

/// Pages reachable from the header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPage {
    Custeio,
    Cadastro,
    Documentos,
}

impl AppPage {
    pub fn title(&self) -> &'static str {
        match self {
            AppPage::Custeio => "Solicitação de Custeio",
            AppPage::Cadastro => "Coleta de Dados",
            AppPage::Documentos => "Documentos",
        }
    }
}

/// App-wide navigation state, provided once at the root.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub page: RwSignal<AppPage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(AppPage::Custeio),
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
