use crate::api::ApiErrorKind;
use crate::pages::{AddItemPage, LoginPage, RegistrationPage, RootPage, RootAuthed};
use crate::state::{AppContext, AppState};
use crate::storage::save_user_to_storage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state.clone()));

    // Verify the stored token once on startup. Until this resolves the
    // session reports auth_loading and list consumers hold off.
    Effect::new(move |_| {
        let api_client = app_state.api_client.get_untracked();
        if !api_client.is_authenticated() {
            return;
        }

        let session = app_state.session;
        session.auth_loading.set(true);

        let app_state = app_state.clone();
        spawn_local(async move {
            match api_client.current_account().await {
                Ok(account) => {
                    save_user_to_storage(&account);
                    session.current_user.set(Some(account));
                }
                Err(e) if e.kind == ApiErrorKind::Unauthorized => {
                    // Stale or revoked token.
                    app_state.sign_out();
                    let path = window().location().pathname().unwrap_or_default();
                    let href = if path.is_empty() || path == "/" || path == "/login" {
                        "/login".to_string()
                    } else {
                        format!("/login?next={}", urlencoding::encode(&path))
                    };
                    let _ = window().location().set_href(&href);
                }
                Err(_) => {
                    // Backend unreachable; keep the cached user and let the
                    // first real request surface the error.
                }
            }
            session.auth_loading.set(false);
            session.changed();
        });
    });

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("signup") view=RegistrationPage />
                <Route path=path!("add") view=move || view! {
                    <RootAuthed>
                        <AddItemPage />
                    </RootAuthed>
                } />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
    }
}
