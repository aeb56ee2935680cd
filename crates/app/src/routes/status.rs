use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_ui::{use_toast, Badge, Button, ButtonVariant, Card, LoadingState, PageHeader, Tone};

fn detector_tone(state: &str) -> Tone {
    match state.to_ascii_lowercase().as_str() {
        "available" | "active" | "enabled" | "ok" => Tone::Calm,
        _ => Tone::Caution,
    }
}

/// Backend detector availability and the analyses it reports.
#[component]
pub fn Status() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut status = use_resource(move || {
        let api = api.clone();
        async move {
            api.get_system_status()
                .await
                .map_err(|e| report_error(toast, auth, &api, "Error consultando estado", &e))
                .ok()
        }
    });

    rsx! {
        div { class: "status-page",
            PageHeader {
                title: "Estado del sistema",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| status.restart(),
                        "Actualizar"
                    }
                },
            }

            match status.read().as_ref() {
                None => rsx! { LoadingState { message: "Consultando estado..." } },
                Some(None) => rsx! {
                    Card { p { class: "muted", "No se pudo obtener el estado del sistema." } }
                },
                Some(Some(s)) => rsx! {
                    Card {
                        p {
                            strong { "Detector inteligente: " }
                            Badge { tone: detector_tone(&s.intelligent_detector), "{s.intelligent_detector}" }
                        }
                        h4 { "Capacidades" }
                        if s.analysis_capabilities.is_empty() {
                            p { class: "muted", "Sin capacidades reportadas" }
                        } else {
                            ul {
                                for cap in s.analysis_capabilities.iter() {
                                    li { key: "{cap}", "{cap}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
