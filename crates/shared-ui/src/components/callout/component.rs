use crate::Tone;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdShield};
use dioxus_free_icons::Icon;

/// Full-width message block. `Alert` and `Crisis` use `role="alert"` so
/// assistive technology announces them immediately.
#[component]
pub fn Callout(
    #[props(default)] tone: Tone,
    #[props(default)] title: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let urgent = matches!(tone, Tone::Alert | Tone::Crisis);
    let base = vec![
        Attribute::new("class", "callout", None, false),
        Attribute::new("data-tone", tone.as_str(), None, false),
        Attribute::new("role", if urgent { "alert" } else { "status" }, None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            span { class: "callout-icon",
                if urgent {
                    Icon::<LdBell> { icon: LdBell, width: 18, height: 18 }
                } else {
                    Icon::<LdShield> { icon: LdShield, width: 18, height: 18 }
                }
            }
            div { class: "callout-body",
                if !title.is_empty() {
                    strong { class: "callout-title", "{title}" }
                }
                div { class: "callout-text", {children} }
            }
        }
    }
}
