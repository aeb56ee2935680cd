use dioxus::prelude::*;

/// Multi-line input. When `on_enter` is set, Enter without Shift calls it
/// instead of inserting a newline.
#[component]
pub fn Textarea(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] on_enter: Option<EventHandler<()>>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = 3)] rows: u32,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "textarea", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "textarea-wrapper",
            if !label.is_empty() {
                span { class: "textarea-label", "{label}" }
            }
            textarea {
                value: value,
                placeholder: placeholder,
                rows: "{rows}",
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
                onkeydown: move |evt: KeyboardEvent| {
                    if let Some(handler) = &on_enter {
                        if matches!(evt.key(), Key::Enter) && !evt.modifiers().contains(Modifiers::SHIFT) {
                            evt.prevent_default();
                            handler.call(());
                        }
                    }
                },
                ..merged,
            }
        }
    }
}
