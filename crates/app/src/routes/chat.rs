use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{
    format_timestamp, AppError, ChatMode, ChatRequest, ChatResponse, ConversationTurn,
    ConversationalRequest,
};
use shared_ui::{use_toast, Badge, Button, Callout, Card, Textarea, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

/// A rendered bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub content: String,
    pub at: String,
}

/// The two bubbles of a completed exchange.
pub fn exchange(message: &str, sent_at: String, reply: &ChatResponse) -> [ChatLine; 2] {
    [
        ChatLine {
            speaker: Speaker::User,
            content: message.to_string(),
            at: sent_at,
        },
        ChatLine {
            speaker: Speaker::Assistant,
            content: reply.response.clone(),
            at: reply.timestamp.clone(),
        },
    ]
}

/// Completed exchanges as the conversational endpoint expects them.
pub fn history_turns(lines: &[ChatLine]) -> Vec<ConversationTurn> {
    lines
        .iter()
        .map(|line| ConversationTurn {
            role: line.speaker.as_str().to_string(),
            content: line.content.clone(),
            timestamp: line.at.clone(),
        })
        .collect()
}

/// Chip colour for a detected symptom's severity label.
pub fn severity_tone(severity: &str) -> Tone {
    match severity {
        "critical" => Tone::Crisis,
        "severe" => Tone::Alert,
        "moderate" => Tone::Caution,
        _ => Tone::Calm,
    }
}

fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Crisis lines. The compact form sits above the transcript.
#[component]
pub fn EmergencyContact(#[props(default = false)] compact: bool) -> Element {
    if compact {
        return rsx! {
            Callout { tone: Tone::Crisis, title: "🆘 Atención inmediata requerida",
                "Llama a Línea 106 (Colombia), 123 o 911 si hay peligro inminente."
            }
        };
    }
    rsx! {
        Callout { tone: Tone::Crisis, title: "Ayuda inmediata",
            ul { class: "emergency-lines",
                li { "📞 Línea 106: Atención psicosocial 24/7 (Colombia)" }
                li { "🚓 Línea 123: Emergencias" }
                li { "🏥 Urgencias más cercanas" }
            }
            p { "Permanece acompañado. Tu seguridad es lo más importante." }
        }
    }
}

/// Chat screen shared by the standard and conversational routes. Each
/// mount starts a fresh conversation.
#[component]
pub fn ChatView(mode: ChatMode) -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut input = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut lines = use_signal(Vec::<ChatLine>::new);
    let mut session_id = use_signal(|| Option::<String>::None);
    let mut last = use_signal(|| Option::<ChatResponse>::None);

    let send = use_callback(move |()| {
        let message = input.read().trim().to_string();
        if message.is_empty() || sending() {
            return;
        }
        sending.set(true);
        let api = api.clone();
        let user_id = auth.user_id();
        let current_session = session_id();
        let sent_at = now_iso();

        spawn(async move {
            let result: Result<ChatResponse, AppError> = match mode {
                ChatMode::Standard => {
                    let request = ChatRequest {
                        message: message.clone(),
                        user_id,
                        session_id: current_session.clone(),
                    };
                    api.send_message(&request).await
                }
                ChatMode::Conversational => {
                    let request = ConversationalRequest {
                        message: message.clone(),
                        user_id,
                        session_id: current_session.clone(),
                        conversation_history: history_turns(&lines.read()),
                    };
                    api.send_conversational(&request).await
                }
            };

            match result {
                Ok(reply) => {
                    if current_session.is_none() && !reply.session_id.is_empty() {
                        session_id.set(Some(reply.session_id.clone()));
                    }
                    if reply.is_crisis() {
                        tracing::warn!(urgency = reply.urgency_level.as_str(), "crisis reply received");
                    }
                    lines.write().extend(exchange(&message, sent_at, &reply));
                    last.set(Some(reply));
                    input.set(String::new());
                }
                Err(e) => report_error(toast, auth, &api, "Error enviando mensaje", &e),
            }
            sending.set(false);
        });
    });

    let reply = last();
    let crisis = reply.as_ref().map(ChatResponse::is_crisis).unwrap_or(false);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./chat.css") }

        div { class: "chat-layout",
            section { class: "chat-panel",
                div { class: "chat-header",
                    div {
                        h2 { class: "chat-title",
                            "Chat"
                            if mode == ChatMode::Conversational {
                                span { class: "chat-mode", " (Conversacional)" }
                            }
                        }
                        if let Some(id) = session_id() {
                            div { class: "chat-session", "Sesión: {id}" }
                        }
                    }
                    if let Some(reply) = reply.as_ref() {
                        Badge { tone: Tone::from_urgency(reply.urgency_level.as_str()),
                            "Urgencia: {reply.urgency_level.as_str().to_uppercase()}"
                        }
                    }
                }

                if crisis {
                    EmergencyContact { compact: true }
                }

                div { class: "chat-transcript",
                    if lines.read().is_empty() {
                        p { class: "chat-empty", "Escribe un mensaje para comenzar…" }
                    }
                    for (i, line) in lines.read().iter().enumerate() {
                        div {
                            key: "{i}",
                            class: if line.speaker == Speaker::User { "chat-row chat-row-user" } else { "chat-row" },
                            div { class: if line.speaker == Speaker::User { "bubble bubble-user" } else { "bubble bubble-bot" },
                                div { class: "bubble-text", "{line.content}" }
                                div { class: "bubble-time", "{format_timestamp(&line.at)}" }
                            }
                        }
                    }
                }

                div { class: "chat-compose",
                    Textarea {
                        value: input(),
                        placeholder: "Escribe tu mensaje…",
                        rows: 2,
                        disabled: sending(),
                        on_input: move |e: FormEvent| input.set(e.value()),
                        on_enter: move |_| send(()),
                    }
                    Button {
                        busy: sending(),
                        busy_label: "Enviando…",
                        onclick: move |_| send(()),
                        "Enviar"
                    }
                }
            }

            aside { class: "chat-analysis",
                Card { title: "Análisis",
                    match reply.as_ref() {
                        None => rsx! { p { class: "muted", "Sin datos" } },
                        Some(reply) => rsx! { AnalysisPanel { reply: reply.clone() } },
                    }
                }
            }
        }
    }
}

#[component]
fn AnalysisPanel(reply: ChatResponse) -> Element {
    let confidence = crate::analytics::as_percent(reply.confidence);
    let processing = reply.processing_time.unwrap_or(0.0);
    let kind = reply.conversation_type.clone().unwrap_or_default();
    let tone = reply
        .emotional_tone
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "N/A".to_string());

    rsx! {
        dl { class: "analysis-facts",
            div { dt { "Tipo" } dd { "{kind}" } }
            div { dt { "Tono" } dd { "{tone}" } }
            div { dt { "Confianza" } dd { "{confidence}%" } }
            div { dt { "Tiempo" } dd { "{processing:.3}s" } }
        }

        h4 { class: "analysis-heading", "Síntomas detectados" }
        if reply.detected_symptoms.is_empty() {
            p { class: "muted", "Ninguno" }
        }
        ul { class: "analysis-symptoms",
            for (i, symptom) in reply.detected_symptoms.iter().enumerate() {
                li { key: "{i}",
                    Badge { "{symptom.symptom_type}" }
                    Badge { tone: severity_tone(&symptom.severity), "{symptom.severity}" }
                    if !symptom.indicators.is_empty() {
                        span { class: "muted", "(" {symptom.indicators.join(", ")} ")" }
                    }
                }
            }
        }

        h4 { class: "analysis-heading", "Recomendaciones" }
        if reply.recommendations.is_empty() {
            p { class: "muted", "—" }
        }
        ul { class: "analysis-recommendations",
            for (i, recommendation) in reply.recommendations.iter().enumerate() {
                li { key: "{i}", "{recommendation}" }
            }
        }
    }
}
