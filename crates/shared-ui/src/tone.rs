/// Emotional weight of a piece of UI, from neutral chrome to a crisis alert.
///
/// Each tone maps to a `data-tone` attribute that the component stylesheets
/// key their colours on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Calm,
    Caution,
    Alert,
    Crisis,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Calm => "calm",
            Tone::Caution => "caution",
            Tone::Alert => "alert",
            Tone::Crisis => "crisis",
        }
    }

    /// Tone for an urgency string as the assistant reports it.
    pub fn from_urgency(level: &str) -> Self {
        match level {
            "moderate" => Tone::Caution,
            "high" => Tone::Alert,
            "critical" => Tone::Crisis,
            "low" => Tone::Calm,
            _ => Tone::Neutral,
        }
    }
}
