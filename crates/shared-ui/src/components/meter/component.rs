use dioxus::prelude::*;

/// Ratio in `0.0..=1.0` clamped for display.
pub fn meter_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value.clamp(0.0, 1.0) * 100.0).round()
}

/// Horizontal bar for a 0..1 value such as recommendation effectiveness.
#[component]
pub fn Meter(label: String, value: f64) -> Element {
    let percent = meter_percent(value);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "meter",
            div { class: "meter-header",
                span { class: "meter-label", "{label}" }
                span { class: "meter-value", "{percent}%" }
            }
            div {
                class: "meter-track",
                role: "meter",
                "aria-valuemin": "0",
                "aria-valuemax": "100",
                "aria-valuenow": "{percent}",
                div { class: "meter-fill", style: "width: {percent}%;" }
            }
        }
    }
}
