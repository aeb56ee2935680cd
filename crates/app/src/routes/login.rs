use crate::auth::{use_api, use_auth};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{LoginPortal, LoginRequest};
use shared_ui::{Button, Callout, Card, Input, Tone};
use std::collections::HashMap;

/// Sign-in against one of the three login portals.
#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut portal = use_signal(LoginPortal::default);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if auth.is_authenticated() {
        navigator().replace(Route::Chat {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let request = LoginRequest {
            username_or_email: username.read().trim().to_string(),
            password: password(),
        };
        let chosen = portal();
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            field_errors.set(HashMap::new());

            match api.login(chosen, &request).await {
                Ok(_) => {
                    auth.reload(&api);
                    navigator().push(Route::Chat {});
                }
                Err(e) if !e.field_errors.is_empty() => field_errors.set(e.field_errors),
                Err(e) => {
                    tracing::warn!(portal = ?chosen, error = %e, "login failed");
                    error_msg.set(Some(e.friendly_message()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",
                title: "Iniciar sesión",
                description: "Selecciona tu tipo de acceso",

                div { class: "portal-picker", role: "radiogroup",
                    for option in LoginPortal::ALL {
                        button {
                            key: "{option.label()}",
                            r#type: "button",
                            role: "radio",
                            "aria-checked": portal() == option,
                            class: if portal() == option { "portal-option active" } else { "portal-option" },
                            onclick: move |_| portal.set(option),
                            "{option.label()}"
                        }
                    }
                }

                if let Some(err) = error_msg() {
                    Callout { tone: Tone::Alert, "{err}" }
                }

                form { class: "auth-form", onsubmit: handle_login,
                    Input {
                        label: "Usuario o email",
                        value: username(),
                        autocomplete: "username",
                        required: true,
                        error: field_errors.read().get("username_or_email").cloned(),
                        on_input: move |e: FormEvent| username.set(e.value()),
                    }
                    Input {
                        label: "Contraseña",
                        input_type: "password",
                        value: password(),
                        autocomplete: "current-password",
                        required: true,
                        error: field_errors.read().get("password").cloned(),
                        on_input: move |e: FormEvent| password.set(e.value()),
                    }
                    Button {
                        kind: "submit",
                        busy: loading(),
                        busy_label: "Ingresando...",
                        "Ingresar"
                    }
                }

                p { class: "auth-switch",
                    "¿No tienes cuenta? "
                    Link { to: Route::Register {}, "Regístrate" }
                }
            }
        }
    }
}
