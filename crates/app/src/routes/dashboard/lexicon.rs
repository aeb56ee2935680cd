use crate::analytics::manual_keyword;
use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{KeywordOrigin, SymptomKeyword, SYMPTOM_TYPES};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, DataTable, DataTableCell, DataTableRow, FormSelect,
    Input, SelectOption, ToastOptions,
};

const DEFAULT_MANUAL_WEIGHT: f64 = 1.0;

fn symptom_options() -> Vec<SelectOption> {
    SYMPTOM_TYPES.iter().map(|s| SelectOption::new(*s, *s)).collect()
}

/// The global keyword lexicon: filter, add and remove entries.
#[component]
pub fn LexiconManager() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut filter = use_signal(String::new);
    let mut pending_delete = use_signal(|| Option::<SymptomKeyword>::None);

    let mut new_symptom = use_signal(|| SYMPTOM_TYPES[0].to_string());
    let mut new_keyword = use_signal(String::new);
    let mut new_weight = use_signal(|| DEFAULT_MANUAL_WEIGHT.to_string());
    let mut new_source = use_signal(|| KeywordOrigin::User);
    let mut new_active = use_signal(|| true);
    let mut adding = use_signal(|| false);

    let mut lexicon = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            let symptom = filter();
            async move {
                match api.list_symptom_keywords(Some(symptom.as_str())).await {
                    Ok(list) => list.items,
                    Err(e) => {
                        report_error(toast, auth, &api, "Error cargando léxico", &e);
                        Vec::new()
                    }
                }
            }
        })
    };

    let delete_api = api.clone();
    let confirm_delete = move |_| {
        let Some(item) = pending_delete() else {
            return;
        };
        let api = delete_api.clone();
        spawn(async move {
            match api.delete_symptom_keyword(&item.id).await {
                Ok(_) => {
                    toast.success(format!("Eliminada \"{}\"", item.keyword), ToastOptions::new());
                    lexicon.restart();
                }
                Err(e) => report_error(toast, auth, &api, "Error eliminando palabra clave", &e),
            }
            pending_delete.set(None);
        });
    };

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        let weight = new_weight.read().trim().parse::<f64>().unwrap_or(DEFAULT_MANUAL_WEIGHT);
        let Some(item) = manual_keyword(
            &new_symptom.read(),
            &new_keyword.read(),
            weight,
            new_source(),
            new_active(),
        ) else {
            toast.error("Escribe una palabra clave".to_string(), ToastOptions::new());
            return;
        };
        let api = api.clone();
        spawn(async move {
            adding.set(true);
            match api.upsert_symptom_keywords(vec![item]).await {
                Ok(result) => {
                    toast.success(
                        format!(
                            "Léxico actualizado: insertados {}, actualizados {}",
                            result.inserted, result.updated
                        ),
                        ToastOptions::new(),
                    );
                    new_keyword.set(String::new());
                    lexicon.restart();
                }
                Err(e) => report_error(toast, auth, &api, "Error agregando palabra clave", &e),
            }
            adding.set(false);
        });
    };

    let source_options: Vec<SelectOption> = KeywordOrigin::ALL
        .iter()
        .map(|o| SelectOption::new(o.as_str(), o.as_str()))
        .collect();

    rsx! {
        Card {
            title: "Léxico de síntomas",
            actions: rsx! {
                FormSelect {
                    value: filter(),
                    options: symptom_options(),
                    placeholder: "Todos",
                    on_change: move |v: String| filter.set(v),
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| lexicon.restart(),
                    "Actualizar"
                }
            },

            if let Some(item) = pending_delete() {
                div { class: "lexicon-confirm", role: "alertdialog",
                    span { "¿Eliminar esta palabra clave? " strong { "{item.keyword}" } }
                    Button { variant: ButtonVariant::Danger, onclick: confirm_delete, "Eliminar" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| pending_delete.set(None),
                        "Cancelar"
                    }
                }
            }

            match lexicon.read().as_ref() {
                None => rsx! { p { class: "muted", "Cargando..." } },
                Some(items) => rsx! {
                    DataTable {
                        columns: ["Síntoma", "Keyword", "Peso", "Fuente", "Activo", "Acciones"]
                            .iter()
                            .map(|c| c.to_string())
                            .collect::<Vec<_>>(),
                        empty_message: "Sin palabras clave",
                        is_empty: items.is_empty(),
                        for item in items.iter().cloned() {
                            DataTableRow { key: "{item.id}",
                                DataTableCell { "{item.symptom_type}" }
                                DataTableCell { "{item.keyword}" }
                                DataTableCell { "{item.weight:.2}" }
                                DataTableCell { "{item.source}" }
                                DataTableCell { if item.active { "Sí" } else { "No" } }
                                DataTableCell {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let item = item.clone();
                                            move |_| pending_delete.set(Some(item.clone()))
                                        },
                                        "Eliminar"
                                    }
                                }
                            }
                        }
                    }
                },
            }

            form { class: "lexicon-form", onsubmit: handle_add,
                FormSelect {
                    label: "Síntoma",
                    value: new_symptom(),
                    options: symptom_options(),
                    on_change: move |v: String| new_symptom.set(v),
                }
                Input {
                    label: "Palabra clave",
                    value: new_keyword(),
                    placeholder: "p. ej. insomnio",
                    on_input: move |e: FormEvent| new_keyword.set(e.value()),
                }
                Input {
                    label: "Peso",
                    input_type: "number",
                    value: new_weight(),
                    on_input: move |e: FormEvent| new_weight.set(e.value()),
                }
                FormSelect {
                    label: "Fuente",
                    value: new_source().as_str().to_string(),
                    options: source_options,
                    on_change: move |v: String| new_source.set(KeywordOrigin::parse(&v)),
                }
                label { class: "lexicon-active",
                    input {
                        r#type: "checkbox",
                        checked: new_active(),
                        onchange: move |e: FormEvent| new_active.set(e.checked()),
                    }
                    "Activo"
                }
                Button { kind: "submit", busy: adding(), busy_label: "Agregando...", "Agregar" }
            }
        }
    }
}
