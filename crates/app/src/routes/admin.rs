use crate::auth::{report_error, use_api, use_auth};
use dioxus::prelude::*;
use shared_types::{AdminUser, CreateRoleRequest, RoleRecord};
use shared_ui::{
    use_toast, Button, Card, DataTable, DataTableCell, DataTableRow, FormSelect, Input,
    LoadingState, PageHeader, SelectOption, ToastOptions,
};
use std::collections::HashMap;

/// Users and roles administration.
#[component]
pub fn Admin() -> Element {
    let api = use_api();
    let auth = use_auth();
    let toast = use_toast();

    let mut role_name = use_signal(String::new);
    let mut role_description = use_signal(String::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut creating = use_signal(|| false);

    let mut users = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move {
                match api.list_users().await {
                    Ok(users) => users,
                    Err(e) => {
                        report_error(toast, auth, &api, "Error cargando usuarios", &e);
                        Vec::<AdminUser>::new()
                    }
                }
            }
        })
    };

    let mut roles = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move {
                match api.list_roles().await {
                    Ok(roles) => roles,
                    Err(e) => {
                        report_error(toast, auth, &api, "Error cargando roles", &e);
                        Vec::<RoleRecord>::new()
                    }
                }
            }
        })
    };

    let assign = {
        let api = api.clone();
        use_callback(move |(user_id, new_role): (String, String)| {
            if new_role.is_empty() {
                return;
            }
            let api = api.clone();
            spawn(async move {
                match api.assign_user_role(&user_id, &new_role).await {
                    Ok(_) => {
                        tracing::info!(%user_id, role = %new_role, "role assigned");
                        toast.success(format!("Rol actualizado a {new_role}"), ToastOptions::new());
                        users.restart();
                    }
                    Err(e) => report_error(toast, auth, &api, "Error asignando rol", &e),
                }
            });
        })
    };

    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let request = CreateRoleRequest {
            name: role_name.read().trim().to_string(),
            description: role_description.read().trim().to_string(),
        };
        let api = api.clone();
        spawn(async move {
            creating.set(true);
            field_errors.set(HashMap::new());
            match api.create_role(&request).await {
                Ok(role) => {
                    toast.success(format!("Rol \"{}\" creado", role.name), ToastOptions::new());
                    role_name.set(String::new());
                    role_description.set(String::new());
                    roles.restart();
                }
                Err(e) if !e.field_errors.is_empty() => field_errors.set(e.field_errors),
                Err(e) => report_error(toast, auth, &api, "Error creando rol", &e),
            }
            creating.set(false);
        });
    };

    let role_options: Vec<SelectOption> = roles
        .read()
        .as_ref()
        .map(|list| list.iter().map(|r| SelectOption::new(r.name.clone(), r.name.clone())).collect())
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./admin.css") }

        div { class: "admin-page",
            PageHeader { title: "Administración", subtitle: "Usuarios y roles" }

            Card { title: "Usuarios",
                match users.read().as_ref() {
                    None => rsx! { LoadingState { lines: 4 } },
                    Some(list) => rsx! {
                        DataTable {
                            columns: ["ID", "Usuario", "Email", "Rol", "Acción"]
                                .iter()
                                .map(|c| c.to_string())
                                .collect::<Vec<_>>(),
                            empty_message: "Sin usuarios",
                            is_empty: list.is_empty(),
                            for user in list.iter().cloned() {
                                DataTableRow { key: "{user.id}",
                                    DataTableCell { "{user.id}" }
                                    DataTableCell { "{user.username}" }
                                    DataTableCell { {user.email.clone().unwrap_or_else(|| "—".to_string())} }
                                    DataTableCell { {user.role.clone().unwrap_or_else(|| "—".to_string())} }
                                    DataTableCell {
                                        FormSelect {
                                            value: user.role.clone().unwrap_or_default(),
                                            options: role_options.clone(),
                                            placeholder: "Cambiar rol",
                                            on_change: {
                                                let id = user.id.clone();
                                                move |value: String| assign.call((id.clone(), value))
                                            },
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }

            div { class: "admin-grid",
                Card { title: "Roles",
                    match roles.read().as_ref() {
                        None => rsx! { LoadingState { lines: 3 } },
                        Some(list) if list.is_empty() => rsx! { p { class: "muted", "Sin roles" } },
                        Some(list) => rsx! {
                            ul { class: "role-list",
                                for role in list.iter() {
                                    li { key: "{role.id}",
                                        strong { "{role.name}" }
                                        span { class: "muted",
                                            {role.description.clone().filter(|d| !d.is_empty()).unwrap_or_else(|| "—".to_string())}
                                        }
                                    }
                                }
                            }
                        },
                    }
                }

                Card { title: "Crear rol",
                    form { class: "role-form", onsubmit: handle_create,
                        Input {
                            label: "Nombre del rol",
                            value: role_name(),
                            required: true,
                            error: field_errors.read().get("name").cloned(),
                            on_input: move |e: FormEvent| role_name.set(e.value()),
                        }
                        Input {
                            label: "Descripción",
                            value: role_description(),
                            error: field_errors.read().get("description").cloned(),
                            on_input: move |e: FormEvent| role_description.set(e.value()),
                        }
                        Button { kind: "submit", busy: creating(), busy_label: "Creando...", "Crear" }
                    }
                }
            }
        }
    }
}
