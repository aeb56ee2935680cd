use crate::analytics::mapped_keywords;
use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{AppError, DocumentKeyword, KeywordExtractionRequest, SYMPTOM_TYPES};
use shared_ui::{
    use_toast, Button, Card, DataTable, DataTableCell, DataTableRow, FormSelect, SelectOption,
    ToastOptions,
};
use std::collections::BTreeMap;

const ACCEPTED_FILES: &str = ".pdf,.md,.txt,text/markdown,text/plain,application/pdf";
const DOCUMENT_PAGE_SIZE: u32 = 50;
const EXTRACTION_TOP_K: u32 = 80;

struct PickedFile {
    name: String,
    bytes: Vec<u8>,
}

/// Upload a document, extract its keywords and map them onto symptoms.
#[component]
pub fn DocumentUpload() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut picked = use_signal(|| Option::<PickedFile>::None);
    let mut uploading = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut selected_doc = use_signal(|| Option::<String>::None);
    let mut keywords = use_signal(Vec::<DocumentKeyword>::new);
    let mut mapping = use_signal(BTreeMap::<String, String>::new);

    let mut documents = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            let user_id = auth.user_id();
            async move {
                match api.list_documents(DOCUMENT_PAGE_SIZE, 0, Some(&user_id)).await {
                    Ok(docs) => docs,
                    Err(e) => {
                        report_error(toast, auth, &api, "Error cargando documentos", &e);
                        Vec::new()
                    }
                }
            }
        })
    };

    let handle_file = move |evt: FormEvent| async move {
        let files = evt.files();
        if let Some(f) = files.first() {
            let name = f.name();
            match f.read_bytes().await {
                Ok(bytes) => picked.set(Some(PickedFile {
                    name,
                    bytes: bytes.to_vec(),
                })),
                Err(_) => {
                    tracing::warn!(filename = %f.name(), "could not read the selected file");
                    toast.error("No se pudo leer el archivo".to_string(), ToastOptions::new());
                }
            }
        }
    };

    let open_document = {
        let api = api.clone();
        use_callback(move |id: String| {
            let api = api.clone();
            selected_doc.set(Some(id.clone()));
            mapping.set(BTreeMap::new());
            spawn(async move {
                match api.get_document(&id).await {
                    Ok(doc) => keywords.set(doc.keywords),
                    Err(e) => report_error(toast, auth, &api, "Error cargando documento", &e),
                }
            });
        })
    };

    let upload_api = api.clone();
    let handle_upload = move |_| {
        let Some((name, bytes)) = picked.read().as_ref().map(|f| (f.name.clone(), f.bytes.clone()))
        else {
            return;
        };
        let api = upload_api.clone();
        let user_id = auth.user_id();
        spawn(async move {
            uploading.set(true);
            let result: Result<String, AppError> = async {
                let uploaded = api
                    .upload_document(&user_id, Some(name.as_str()), &name, bytes)
                    .await?;
                api.extract_keywords(&KeywordExtractionRequest::from_document(
                    uploaded.document_id.clone(),
                    EXTRACTION_TOP_K,
                ))
                .await?;
                Ok(uploaded.document_id)
            }
            .await;

            match result {
                Ok(document_id) => {
                    tracing::info!(%document_id, "document uploaded and analysed");
                    picked.set(None);
                    documents.restart();
                    open_document.call(document_id);
                }
                Err(e) => report_error(toast, auth, &api, "Error subiendo documento", &e),
            }
            uploading.set(false);
        });
    };

    let handle_save = move |_| {
        let items = mapped_keywords(&keywords.read(), &mapping.read());
        if items.is_empty() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            saving.set(true);
            match api.upsert_symptom_keywords(items).await {
                Ok(result) => {
                    toast.success(
                        format!(
                            "Actualizado léxico: insertados {}, actualizados {}",
                            result.inserted, result.updated
                        ),
                        ToastOptions::new(),
                    );
                    mapping.set(BTreeMap::new());
                }
                Err(e) => report_error(toast, auth, &api, "Error aplicando al léxico", &e),
            }
            saving.set(false);
        });
    };

    let symptom_options: Vec<SelectOption> = SYMPTOM_TYPES
        .iter()
        .map(|s| SelectOption::new(*s, *s))
        .collect();
    let has_file = picked.read().is_some();
    let can_save = !mapping.read().is_empty();

    rsx! {
        Card { title: "Cargar documento (PDF, MD, TXT)",
            div { class: "upload-row",
                form { onchange: handle_file,
                    input {
                        r#type: "file",
                        accept: ACCEPTED_FILES,
                        disabled: uploading(),
                    }
                }
                Button {
                    disabled: !has_file,
                    busy: uploading(),
                    busy_label: "Subiendo...",
                    onclick: handle_upload,
                    "Subir y extraer palabras clave"
                }
            }

            h4 { class: "section-title", "Documentos" }
            match documents.read().as_ref() {
                None => rsx! { p { class: "muted", "Cargando..." } },
                Some(docs) if docs.is_empty() => rsx! { p { class: "muted", "Sin documentos" } },
                Some(docs) => rsx! {
                    ul { class: "document-list",
                        for doc in docs.iter().cloned() {
                            li { key: "{doc.id}",
                                button {
                                    class: if selected_doc().as_deref() == Some(doc.id.as_str()) { "document-item active" } else { "document-item" },
                                    onclick: {
                                        let id = doc.id.clone();
                                        move |_| open_document.call(id.clone())
                                    },
                                    div { class: "document-title",
                                        "{doc.title} "
                                        span { class: "muted", "({doc.filename})" }
                                    }
                                    div { class: "muted",
                                        if doc.extracted { "Palabras extraídas ✅" } else { "Pendiente ⏳" }
                                    }
                                }
                            }
                        }
                    }
                },
            }

            if selected_doc().is_some() {
                h4 { class: "section-title", "Palabras clave del documento" }
                DataTable {
                    columns: vec!["Palabra".to_string(), "Peso".to_string(), "Síntoma".to_string()],
                    empty_message: "Sin palabras clave",
                    is_empty: keywords.read().is_empty(),
                    for k in keywords.read().iter().cloned() {
                        DataTableRow { key: "{k.keyword}",
                            DataTableCell { "{k.keyword}" }
                            DataTableCell { "{k.weight:.3}" }
                            DataTableCell {
                                FormSelect {
                                    value: mapping
                                        .read()
                                        .get(&k.keyword)
                                        .cloned()
                                        .or_else(|| k.symptom_type.clone())
                                        .unwrap_or_default(),
                                    options: symptom_options.clone(),
                                    placeholder: "—",
                                    on_change: {
                                        let keyword = k.keyword.clone();
                                        move |value: String| {
                                            if value.is_empty() {
                                                mapping.write().remove(&keyword);
                                            } else {
                                                mapping.write().insert(keyword.clone(), value);
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
                div { class: "upload-actions",
                    Button {
                        disabled: !can_save,
                        busy: saving(),
                        busy_label: "Guardando...",
                        onclick: handle_save,
                        "Agregar/Actualizar en léxico global"
                    }
                }
            }
        }
    }
}
