use dioxus::prelude::*;

/// Pulsing placeholder block.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    let base = vec![Attribute::new("class", "skeleton", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
        }
    }
}

/// A few skeleton lines with an accessible loading message.
#[component]
pub fn LoadingState(
    #[props(default = "Cargando...".to_string())] message: String,
    #[props(default = 3)] lines: usize,
) -> Element {
    rsx! {
        div { class: "loading-state", role: "status", "aria-live": "polite",
            span { class: "visually-hidden", "{message}" }
            for i in 0..lines {
                Skeleton { key: "{i}", class: "skeleton-line" }
            }
        }
    }
}
