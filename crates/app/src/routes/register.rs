use crate::auth::{use_api, use_auth};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::RegisterRequest;
use shared_ui::{Button, Callout, Card, Input, Tone};
use std::collections::HashMap;

/// Build a registration body; a blank email is sent as absent.
fn registration(username: &str, email: &str, password: &str) -> RegisterRequest {
    let email = email.trim();
    RegisterRequest {
        username: username.trim().to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
        password: password.to_string(),
    }
}

/// Self-service account creation. New accounts get the `user` role.
#[component]
pub fn Register() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if auth.is_authenticated() {
        navigator().replace(Route::Chat {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let request = registration(&username.read(), &email.read(), &password.read());
        spawn(async move {
            loading.set(true);
            error_msg.set(None);
            field_errors.set(HashMap::new());

            match api.register(&request).await {
                Ok(_) => {
                    auth.reload(&api);
                    navigator().push(Route::Chat {});
                }
                Err(e) if !e.field_errors.is_empty() => field_errors.set(e.field_errors),
                Err(e) => {
                    tracing::warn!(error = %e, "registration failed");
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
                title: "Crear cuenta",
                description: "Regístrate para guardar tus conversaciones",

                if let Some(err) = error_msg() {
                    Callout { tone: Tone::Alert, "{err}" }
                }

                form { class: "auth-form", onsubmit: handle_register,
                    Input {
                        label: "Usuario",
                        value: username(),
                        autocomplete: "username",
                        required: true,
                        error: field_errors.read().get("username").cloned(),
                        on_input: move |e: FormEvent| username.set(e.value()),
                    }
                    Input {
                        label: "Email (opcional)",
                        input_type: "email",
                        value: email(),
                        autocomplete: "email",
                        error: field_errors.read().get("email").cloned(),
                        on_input: move |e: FormEvent| email.set(e.value()),
                    }
                    Input {
                        label: "Contraseña",
                        input_type: "password",
                        value: password(),
                        autocomplete: "new-password",
                        required: true,
                        error: field_errors.read().get("password").cloned(),
                        on_input: move |e: FormEvent| password.set(e.value()),
                    }
                    Button {
                        kind: "submit",
                        busy: loading(),
                        busy_label: "Registrando...",
                        "Registrarse"
                    }
                }

                p { class: "auth-switch",
                    "¿Ya tienes cuenta? "
                    Link { to: Route::Login {}, "Inicia sesión" }
                }
            }
        }
    }
}
