use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Urgency assigned by the backend to an assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Moderate => "moderate",
            UrgencyLevel::High => "high",
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::Unknown => "low",
        }
    }
}

/// Which chat endpoint produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Standard,
    Conversational,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Standard => "standard",
            ChatMode::Conversational => "conversational",
        }
    }
}

/// `POST /chat` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// One turn of the running conversation sent back to the conversational endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

/// `POST /chat/conversational` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationalRequest {
    pub message: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// A symptom the backend recognized in a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DetectedSymptom {
    #[serde(default)]
    pub symptom_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Reply from either chat endpoint. Fields the standard endpoint omits default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatResponse {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub urgency_level: UrgencyLevel,
    #[serde(default)]
    pub detected_symptoms: Vec<DetectedSymptom>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub conversation_type: Option<String>,
    #[serde(default)]
    pub conversation_state: Option<String>,
    #[serde(default)]
    pub emotional_tone: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

impl ChatResponse {
    /// Show the emergency-contact banner.
    pub fn is_crisis(&self) -> bool {
        self.urgency_level == UrgencyLevel::Critical
            || self.conversation_state.as_deref() == Some("crisis")
    }
}

/// A stored message of a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HistoryMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

/// `GET /chat/history/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatHistory {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub message_count: u32,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// `GET /chat/sessions?user_id=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

pub const NO_ACTIVE_CONVERSATION: &str = "no_active_conversation";

/// `GET /chat/conversation-summary/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConversationSummary {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conversation_state: Option<String>,
    #[serde(default)]
    pub turn_number: u32,
    #[serde(default)]
    pub trust_level: f64,
    #[serde(default)]
    pub needs_follow_up: bool,
    #[serde(default)]
    pub concern_areas: Vec<String>,
}

impl ConversationSummary {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() != Some(NO_ACTIVE_CONVERSATION)
    }
}

/// One exchange in the all-users history used by the psychologist reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserHistoryEntry {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub response: String,
    /// `standard`, `conversational`, or whatever newer mode the backend logs.
    #[serde(default)]
    pub mode: Option<String>,
}

pub const GUEST_DISPLAY_NAME: &str = "Invitado";

impl UserHistoryEntry {
    /// Username, or "Invitado" for anonymous exchanges.
    pub fn display_username(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(GUEST_DISPLAY_NAME)
    }

    pub fn mode_label(&self) -> &str {
        self.mode
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(ChatMode::Standard.as_str())
    }
}

/// Parse a backend timestamp into local wall-clock time. Values with an
/// offset are converted to the local zone; naive values are taken as local.
///
/// Accepts RFC 3339 (with offset or `Z`), naive ISO date-times with or
/// without fractional seconds, and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD HH:MM:SS`, or the raw text when it does not parse.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}
