use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symptom categories the lexicon maps keywords onto.
pub const SYMPTOM_TYPES: [&str; 5] = ["depression", "anxiety", "stress", "insomnia", "irritability"];

/// Severity labels, ordered from mildest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Some(Severity::Minimal),
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "severe" => Some(Severity::Severe),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// 1 (minimal) through 5 (critical).
    pub fn score(&self) -> f64 {
        match self {
            Severity::Minimal => 1.0,
            Severity::Mild => 2.0,
            Severity::Moderate => 3.0,
            Severity::Severe => 4.0,
            Severity::Critical => 5.0,
        }
    }
}

/// A severity reading, either a label or a raw number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityValue {
    Score(f64),
    Label(String),
}

impl SeverityValue {
    /// Numeric score; unknown labels count as minimal.
    pub fn score(&self) -> f64 {
        match self {
            SeverityValue::Score(n) => *n,
            SeverityValue::Label(label) => Severity::parse(label).map(|s| s.score()).unwrap_or(1.0),
        }
    }
}

impl Default for SeverityValue {
    fn default() -> Self {
        SeverityValue::Score(1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProgressionPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub severity: SeverityValue,
}

/// Direction a symptom is moving, as labelled by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendTag {
    #[serde(rename = "mejorando")]
    Improving,
    #[serde(rename = "empeorando")]
    Worsening,
    #[serde(rename = "estable", other)]
    Stable,
}

/// `GET /symptoms/trends/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SymptomTrends {
    #[serde(default)]
    pub symptom_progression: BTreeMap<String, Vec<ProgressionPoint>>,
    #[serde(default)]
    pub severity_trends: BTreeMap<String, TrendTag>,
    #[serde(default)]
    pub recommendations_effectiveness: BTreeMap<String, f64>,
    #[serde(default)]
    pub improvement_indicators: Vec<String>,
    #[serde(default)]
    pub concerning_patterns: Vec<String>,
}

/// `GET /symptoms/system-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SystemStatus {
    #[serde(default)]
    pub intelligent_detector: String,
    #[serde(default)]
    pub analysis_capabilities: Vec<String>,
}
