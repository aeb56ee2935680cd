mod lexicon;
mod upload;

use crate::analytics::{
    polyline_points, severity_series, trend_groups, wellbeing_score, SeverityPoint,
};
use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{has_permission, Permission, SymptomTrends};
use shared_ui::{
    use_toast, Badge, Card, FormSelect, LoadingState, Meter, PageHeader, SelectOption, StatCard,
    Tone,
};

use lexicon::LexiconManager;
use upload::DocumentUpload;

pub const DAY_WINDOWS: [u32; 3] = [7, 30, 90];
pub const DEFAULT_DAY_WINDOW: u32 = 30;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 160.0;

/// Symptom trends for the signed-in user, plus the document and lexicon tools.
#[component]
pub fn Dashboard() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();
    let mut days = use_signal(|| DEFAULT_DAY_WINDOW);

    let trends = use_resource(move || {
        let api = api.clone();
        let user_id = auth.user_id();
        let window = days();
        async move {
            match api.get_symptom_trends(&user_id, window, true).await {
                Ok(trends) => trends,
                Err(e) => {
                    report_error(toast, auth, &api, "Error cargando tendencias", &e);
                    SymptomTrends::default()
                }
            }
        }
    });

    let role = Some(auth.role());
    let can_upload = has_permission(role, Permission::UploadDocuments);
    let can_manage_lexicon = has_permission(role, Permission::ManageLexicon);

    let window_options: Vec<SelectOption> = DAY_WINDOWS
        .iter()
        .map(|d| SelectOption::new(d.to_string(), format!("{d} días")))
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard",
            PageHeader {
                title: "Dashboard",
                subtitle: "Evolución de síntomas",
                actions: rsx! {
                    FormSelect {
                        value: days().to_string(),
                        options: window_options,
                        on_change: move |v: String| {
                            if let Ok(d) = v.parse::<u32>() {
                                days.set(d);
                            }
                        },
                    }
                },
            }

            match trends.read().as_ref() {
                None => rsx! { LoadingState { lines: 6 } },
                Some(data) => rsx! { TrendPanels { trends: data.clone() } },
            }

            if can_upload {
                DocumentUpload {}
            }
            if can_manage_lexicon {
                LexiconManager {}
            }
        }
    }
}

#[component]
fn TrendPanels(trends: SymptomTrends) -> Element {
    let series = severity_series(&trends.symptom_progression);
    let score = wellbeing_score(&series);
    let (improving, worsening) = trend_groups(&trends.severity_trends);

    rsx! {
        div { class: "dashboard-grid",
            EmotionalStatusCard { score, improving, worsening }

            Card { class: "dashboard-wide", title: "Severidad promedio de síntomas",
                SeverityChart { series }
                p { class: "muted chart-footnote", "1: mínima — 5: crítica. Promedio diario de todos los síntomas." }
            }

            Card { title: "Efectividad estimada de recomendaciones",
                if trends.recommendations_effectiveness.is_empty() {
                    p { class: "muted", "Sin datos suficientes" }
                }
                for (name, value) in trends.recommendations_effectiveness.iter() {
                    Meter { key: "{name}", label: name.clone(), value: *value }
                }
            }

            Card { title: "Indicadores de mejora",
                if trends.improvement_indicators.is_empty() {
                    p { class: "muted", "Sin indicadores destacados" }
                }
                ul { class: "dashboard-list",
                    for (i, item) in trends.improvement_indicators.iter().enumerate() {
                        li { key: "{i}", "{item}" }
                    }
                }
            }

            Card { title: "Patrones preocupantes",
                if trends.concerning_patterns.is_empty() {
                    p { class: "muted", "Sin patrones preocupantes" }
                }
                ul { class: "dashboard-list dashboard-list-alert",
                    for (i, item) in trends.concerning_patterns.iter().enumerate() {
                        li { key: "{i}", "{item}" }
                    }
                }
            }
        }
    }
}

#[component]
fn EmotionalStatusCard(score: f64, improving: Vec<String>, worsening: Vec<String>) -> Element {
    let tone = if score >= 70.0 {
        Tone::Calm
    } else if score >= 40.0 {
        Tone::Caution
    } else {
        Tone::Alert
    };
    let stable = improving.is_empty() && worsening.is_empty();
    let improving_text = improving.join(", ");
    let worsening_text = worsening.join(", ");

    rsx! {
        Card { title: "Estado emocional",
            StatCard { label: "Bienestar", value: format!("{score:.0}"), hint: "sobre 100" }
            div { class: "status-tags",
                if !improving.is_empty() {
                    Badge { tone: Tone::Calm, "Mejorando: {improving_text}" }
                }
                if !worsening.is_empty() {
                    Badge { tone: Tone::Alert, "Empeorando: {worsening_text}" }
                }
                if stable {
                    Badge { tone, "Estable" }
                }
            }
        }
    }
}

#[component]
fn SeverityChart(series: Vec<SeverityPoint>) -> Element {
    if series.len() < 2 {
        return rsx! { p { class: "muted", "Sin datos suficientes" } };
    }
    let points = polyline_points(&series, CHART_WIDTH, CHART_HEIGHT);
    let first = series.first().map(|p| p.date.clone()).unwrap_or_default();
    let last = series.last().map(|p| p.date.clone()).unwrap_or_default();

    rsx! {
        svg {
            class: "severity-chart",
            view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
            preserve_aspect_ratio: "none",
            polyline { class: "severity-line", points: "{points}" }
        }
        div { class: "chart-axis",
            span { "{first}" }
            span { "{last}" }
        }
    }
}
