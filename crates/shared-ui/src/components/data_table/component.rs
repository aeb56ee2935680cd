use dioxus::prelude::*;

/// Scrollable table. `columns` become the header row; children are rows.
#[component]
pub fn DataTable(
    columns: Vec<String>,
    #[props(default)] empty_message: String,
    #[props(default = false)] is_empty: bool,
    children: Element,
) -> Element {
    let span = columns.len().max(1).to_string();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                thead {
                    tr {
                        for column in columns.iter() {
                            th { key: "{column}", "{column}" }
                        }
                    }
                }
                tbody {
                    if is_empty {
                        tr {
                            td { class: "data-table-empty", colspan: "{span}", "{empty_message}" }
                        }
                    } else {
                        {children}
                    }
                }
            }
        }
    }
}

#[component]
pub fn DataTableRow(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let has_click = onclick.is_some();
    rsx! {
        tr {
            class: if has_click { "data-table-row clickable" } else { "data-table-row" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        td { class: "{class}", {children} }
    }
}
