use dioxus::prelude::*;

/// Surface for one block of a page. `title` and `description` render a
/// header row; `actions` sits at its right edge.
#[component]
pub fn Card(
    #[props(default)] title: String,
    #[props(default)] description: String,
    #[props(default)] actions: Option<Element>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);
    let has_header = !title.is_empty() || !description.is_empty() || actions.is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        section {
            ..merged,
            if has_header {
                header { class: "card-header",
                    div {
                        if !title.is_empty() {
                            h3 { class: "card-title", "{title}" }
                        }
                        if !description.is_empty() {
                            p { class: "card-description", "{description}" }
                        }
                    }
                    if let Some(actions) = actions {
                        div { class: "card-actions", {actions} }
                    }
                }
            }
            div { class: "card-content", {children} }
        }
    }
}

/// A labelled number, used for the report and dashboard summaries.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card",
            span { class: "stat-card-label", "{label}" }
            span { class: "stat-card-value", "{value}" }
            if !hint.is_empty() {
                span { class: "stat-card-hint", "{hint}" }
            }
        }
    }
}
