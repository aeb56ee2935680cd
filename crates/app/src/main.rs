use client::ApiClient;
use dioxus::prelude::*;

mod analytics;
mod auth;
mod routes;
mod storage;
use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    client::config::init_from_str(include_str!("../../../config.toml"));
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let api = use_hook(|| {
        let settings = &client::config::config().api;
        ApiClient::new(settings, storage::session_store())
    });

    match api {
        Ok(api) => rsx! {
            document::Link { rel: "stylesheet", href: MAIN_CSS }
            Shell { api }
        },
        Err(e) => {
            tracing::error!(error = %e, "could not start the API client");
            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                div { class: "startup-error",
                    h1 { "Camila AI" }
                    p { "No fue posible iniciar la aplicación: {e.friendly_message()}" }
                }
            }
        }
    }
}

/// Provides the client and the reactive session to every route.
#[component]
fn Shell(api: ApiClient) -> Element {
    let session = api.session().session();
    use_context_provider(|| AuthState::new(session));
    use_context_provider(|| api.clone());

    rsx! {
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
