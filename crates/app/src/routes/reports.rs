use crate::analytics::{
    csv_data_url, group_by_user, report_csv, report_filename, report_stats, unique_users,
    ReportFilter,
};
use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdSearch};
use dioxus_free_icons::Icon;
use shared_types::{parse_timestamp, UserHistoryEntry};
use shared_ui::{
    use_toast, Badge, Button, ButtonVariant, Card, FormSelect, Input, LoadingState, PageHeader,
    SelectOption, StatCard,
};

fn display_time(entry: &UserHistoryEntry) -> String {
    parse_timestamp(&entry.timestamp)
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.timestamp.clone())
}

/// Every user's exchanges, for psychologists.
#[component]
pub fn PsychologistReports() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut search = use_signal(String::new);
    let mut user = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut selected = use_signal(|| Option::<UserHistoryEntry>::None);

    let history = use_resource(move || {
        let api = api.clone();
        async move {
            match api.get_all_users_history().await {
                Ok(entries) => entries,
                Err(e) => {
                    report_error(toast, auth, &api, "Error cargando historiales", &e);
                    Vec::new()
                }
            }
        }
    });

    let Some(entries) = history.read().as_ref().cloned() else {
        return rsx! { LoadingState { message: "Cargando reportes..." } };
    };

    let filter = ReportFilter {
        search: search(),
        user: user(),
        date: date(),
    };
    let filtered = filter.apply(&entries);
    let now = chrono::Local::now().naive_local();
    let stats = report_stats(&filtered, now);
    let groups = group_by_user(&filtered);
    let user_options: Vec<SelectOption> = unique_users(&entries)
        .into_iter()
        .map(|u| SelectOption::new(u.clone(), u))
        .collect();

    let csv_href = csv_data_url(&report_csv(&filtered));
    let csv_name = report_filename(now.date());
    let can_export = !filtered.is_empty();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./reports.css") }

        div { class: "reports-page",
            PageHeader {
                title: "Reportes de Usuarios",
                subtitle: "Historial completo de conversaciones de todos los usuarios",
                actions: rsx! {
                    if can_export {
                        a {
                            class: "button",
                            "data-style": "primary",
                            href: "{csv_href}",
                            download: "{csv_name}",
                            Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                            " Exportar CSV"
                        }
                    } else {
                        Button { disabled: true, "Exportar CSV" }
                    }
                },
            }

            div { class: "reports-filters",
                Input {
                    label: "Buscar en mensajes",
                    value: search(),
                    placeholder: "Buscar...",
                    on_input: move |e: FormEvent| search.set(e.value()),
                }
                FormSelect {
                    label: "Usuario",
                    value: user(),
                    options: user_options,
                    placeholder: "Todos los usuarios",
                    on_change: move |v: String| user.set(v),
                }
                Input {
                    label: "Fecha",
                    input_type: "date",
                    value: date(),
                    on_input: move |e: FormEvent| date.set(e.value()),
                }
            }

            div { class: "reports-stats",
                StatCard { label: "Total Conversaciones", value: stats.total.to_string() }
                StatCard { label: "Usuarios Únicos", value: stats.unique_users.to_string() }
                StatCard { label: "Hoy", value: stats.today.to_string() }
                StatCard { label: "Esta Semana", value: stats.this_week.to_string() }
            }

            if groups.is_empty() {
                div { class: "reports-empty",
                    Icon::<LdSearch> { icon: LdSearch, width: 32, height: 32 }
                    p { "No se encontraron conversaciones con los filtros aplicados" }
                }
            }

            for (name, items) in groups.iter() {
                Card {
                    key: "{name}",
                    title: name.clone(),
                    description: format!("({} conversaciones)", items.len()),
                    div { class: "report-entries",
                        for (i, entry) in items.iter().enumerate() {
                            button {
                                key: "{i}",
                                class: "report-entry",
                                onclick: {
                                    let entry = (*entry).clone();
                                    move |_| selected.set(Some(entry.clone()))
                                },
                                div { class: "report-entry-meta",
                                    span { class: "muted", {display_time(entry)} }
                                    Badge { "{entry.mode_label()}" }
                                }
                                p { strong { "Mensaje: " } "{entry.message}" }
                                p { class: "muted", strong { "Respuesta: " } "{entry.response}" }
                            }
                        }
                    }
                }
            }
        }

        if let Some(entry) = selected() {
            div { class: "modal-backdrop", onclick: move |_| selected.set(None),
                div {
                    class: "modal",
                    role: "dialog",
                    "aria-modal": "true",
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    h3 { "Detalle de Conversación" }
                    dl { class: "modal-facts",
                        dt { "Usuario" } dd { "{entry.display_username()}" }
                        dt { "Fecha" } dd { {display_time(&entry)} }
                        dt { "Modo" } dd { "{entry.mode_label()}" }
                    }
                    h4 { "Mensaje del usuario" }
                    p { class: "modal-text", "{entry.message}" }
                    h4 { "Respuesta del asistente" }
                    p { class: "modal-text", "{entry.response}" }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| selected.set(None),
                        "Cerrar"
                    }
                }
            }
        }
    }
}
