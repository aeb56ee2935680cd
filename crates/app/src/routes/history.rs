use crate::analytics::as_percent;
use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{format_timestamp, ChatHistory, ConversationSummary};
use shared_ui::{use_toast, Card, LoadingState};

/// Past sessions of the signed-in user with transcript and summary.
#[component]
pub fn History() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();
    let mut selected = use_signal(|| Option::<String>::None);

    let sessions = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            let user_id = auth.user_id();
            async move {
                match api.get_sessions(&user_id).await {
                    Ok(list) => list.sessions,
                    Err(e) => {
                        report_error(toast, auth, &api, "Error cargando sesiones", &e);
                        Vec::new()
                    }
                }
            }
        })
    };

    let detail = use_resource(move || {
        let api = api.clone();
        let user_id = auth.user_id();
        let session = selected();
        async move {
            let session = session?;
            let history = api.get_history(&session).await;
            let summary = api.get_conversation_summary(&session, &user_id).await;
            match (history, summary) {
                (Ok(history), Ok(summary)) => Some((history, summary)),
                (Err(e), _) | (_, Err(e)) => {
                    report_error(toast, auth, &api, "Error cargando sesión", &e);
                    None
                }
            }
        }
    });

    let loading_detail = selected().is_some() && detail.read().is_none();
    let (transcript, summary): (Option<ChatHistory>, Option<ConversationSummary>) =
        match detail.read().as_ref().cloned().flatten() {
            Some((history, summary)) => (Some(history), Some(summary)),
            None => (None, None),
        };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./history.css") }

        div { class: "history-layout",
            Card { title: "Sesiones",
                match sessions.read().as_ref() {
                    None => rsx! { LoadingState { lines: 4 } },
                    Some(list) if list.is_empty() => rsx! { p { class: "muted", "Aún no tienes sesiones" } },
                    Some(list) => rsx! {
                        ul { class: "session-list",
                            for s in list.iter().cloned() {
                                li { key: "{s.session_id}",
                                    button {
                                        class: if selected().as_deref() == Some(s.session_id.as_str()) { "session-item active" } else { "session-item" },
                                        onclick: {
                                            let id = s.session_id.clone();
                                            move |_| selected.set(Some(id.clone()))
                                        },
                                        div { class: "session-id", "{s.session_id}" }
                                        div { class: "muted",
                                            "msgs: {s.message_count} | "
                                            {s.last_updated.as_deref().map(format_timestamp).unwrap_or_else(|| "—".to_string())}
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }

            Card { title: "Historial",
                description: selected().map(|id| format!("Sesión: {id}")).unwrap_or_default(),
                if loading_detail {
                    LoadingState {}
                } else {
                    div { class: "history-transcript",
                        match transcript.as_ref() {
                            Some(history) if !history.messages.is_empty() => rsx! {
                                for (i, m) in history.messages.iter().enumerate() {
                                    div {
                                        key: "{i}",
                                        class: if m.role == "user" { "chat-row chat-row-user" } else { "chat-row" },
                                        div { class: if m.role == "user" { "bubble bubble-user" } else { "bubble bubble-bot" },
                                            div { class: "bubble-text", "{m.content}" }
                                            div { class: "bubble-time", "{format_timestamp(&m.timestamp)}" }
                                        }
                                    }
                                }
                            },
                            _ => rsx! { p { class: "muted", "Selecciona una sesión" } },
                        }
                    }

                    div { class: "history-summary",
                        h4 { "Resumen" }
                        SummaryFacts { summary }
                    }
                }
            }
        }
    }
}

#[component]
fn SummaryFacts(summary: Option<ConversationSummary>) -> Element {
    let Some(summary) = summary else {
        return rsx! { p { class: "muted", "—" } };
    };
    if !summary.is_active() {
        return rsx! { p { class: "muted", "No hay conversación activa" } };
    }

    let state = summary.conversation_state.clone().unwrap_or_default();
    let trust = as_percent(Some(summary.trust_level));
    let follow_up = if summary.needs_follow_up { "Sí" } else { "No" };
    let areas = summary.concern_areas.join(", ");

    rsx! {
        dl { class: "summary-facts",
            div { dt { "Estado" } dd { "{state}" } }
            div { dt { "Turnos" } dd { "{summary.turn_number}" } }
            div { dt { "Confianza" } dd { "{trust}%" } }
            div { dt { "Seguimiento" } dd { "{follow_up}" } }
            div { class: "summary-wide", dt { "Áreas" } dd { "{areas}" } }
        }
    }
}
