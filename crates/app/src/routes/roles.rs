use dioxus::prelude::*;
use shared_types::{has_permission, Permission, Role, PERMISSION_TABLE_VERSION};
use shared_ui::{Badge, Card, DataTable, DataTableCell, DataTableRow, PageHeader, Tone};

/// Read-only view of the compiled role → permission table.
#[component]
pub fn RoleManagement() -> Element {
    let mut columns = vec!["Permiso".to_string()];
    columns.extend(Role::ALL.iter().map(|r| r.label().to_string()));

    rsx! {
        div { class: "roles-page",
            PageHeader {
                title: "Gestión de Roles",
                subtitle: "Permisos por rol (tabla v{PERMISSION_TABLE_VERSION})",
            }
            Card {
                description: "Los permisos se definen en la aplicación y no se editan en tiempo de ejecución.",
                DataTable { columns,
                    for permission in Permission::ALL {
                        DataTableRow { key: "{permission.as_str()}",
                            DataTableCell { class: "mono", "{permission.as_str()}" }
                            for role in Role::ALL {
                                DataTableCell { key: "{role.as_str()}",
                                    if has_permission(Some(role), permission) {
                                        Badge { tone: Tone::Calm, "Sí" }
                                    } else {
                                        span { class: "muted", "—" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
