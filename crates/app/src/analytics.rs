//! Pure computations behind the dashboard and report views.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use shared_types::{
    parse_timestamp, DocumentKeyword, KeywordOrigin, ProgressionPoint, SymptomKeywordInput,
    TrendTag, UserHistoryEntry,
};
use std::collections::BTreeMap;

// --- Symptom trends ---

/// Average severity (1 = minimal … 5 = critical) across every symptom on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityPoint {
    pub date: String,
    pub average: f64,
}

/// Severity used for the well-being score when there is no data.
pub const NEUTRAL_SEVERITY: f64 = 3.0;

fn day_key(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}

/// Flatten every symptom's progression and average by calendar day, oldest first.
pub fn severity_series(progression: &BTreeMap<String, Vec<ProgressionPoint>>) -> Vec<SeverityPoint> {
    let mut by_day: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for point in progression.values().flatten() {
        let entry = by_day.entry(day_key(&point.date)).or_insert((0.0, 0));
        entry.0 += point.severity.score();
        entry.1 += 1;
    }
    by_day
        .into_iter()
        .map(|(date, (sum, count))| SeverityPoint {
            date: date.to_string(),
            average: sum / f64::from(count),
        })
        .collect()
}

/// 0..=100, higher is better, from the most recent daily average.
pub fn wellbeing_score(series: &[SeverityPoint]) -> f64 {
    let latest = series.last().map(|p| p.average).unwrap_or(NEUTRAL_SEVERITY);
    ((1.0 - (latest - 1.0) / 4.0) * 100.0).clamp(0.0, 100.0)
}

/// Symptom names tagged improving and worsening, in key order.
pub fn trend_groups(trends: &BTreeMap<String, TrendTag>) -> (Vec<String>, Vec<String>) {
    let pick = |wanted: TrendTag| {
        trends
            .iter()
            .filter(|(_, tag)| **tag == wanted)
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>()
    };
    (pick(TrendTag::Improving), pick(TrendTag::Worsening))
}

/// SVG `points` for the severity series in a `width` x `height` box with the
/// y axis fixed to 1..5.
pub fn polyline_points(series: &[SeverityPoint], width: f64, height: f64) -> String {
    let step = if series.len() > 1 {
        width / (series.len() - 1) as f64
    } else {
        0.0
    };
    series
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if series.len() > 1 { step * i as f64 } else { width / 2.0 };
            let ratio = ((p.average - 1.0) / 4.0).clamp(0.0, 1.0);
            let y = height - ratio * height;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `0.734` -> `73`.
pub fn as_percent(ratio: Option<f64>) -> u32 {
    let value = ratio.unwrap_or(0.0);
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * 100.0).round() as u32
}

// --- Document ingestion and lexicon ---

pub const DEFAULT_DOCUMENT_WEIGHT: f64 = 0.2;

/// Lexicon weight for a keyword extracted from a document: boosted by 20%
/// and kept within `0.1..=1.0`. Missing weights count as 0.2.
pub fn lexicon_weight(extracted: Option<f64>) -> f64 {
    let raw = extracted
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(DEFAULT_DOCUMENT_WEIGHT);
    (raw * 1.2).clamp(0.1, 1.0)
}

/// Lexicon entries for the keywords a reviewer mapped to a symptom.
pub fn mapped_keywords(
    keywords: &[DocumentKeyword],
    mapping: &BTreeMap<String, String>,
) -> Vec<SymptomKeywordInput> {
    mapping
        .iter()
        .filter(|(_, symptom)| !symptom.is_empty())
        .map(|(keyword, symptom)| {
            let extracted = keywords
                .iter()
                .find(|k| &k.keyword == keyword)
                .map(|k| k.weight);
            SymptomKeywordInput {
                keyword: keyword.to_lowercase(),
                symptom_type: symptom.clone(),
                weight: lexicon_weight(extracted),
                source: KeywordOrigin::Doc,
                active: true,
            }
        })
        .collect()
}

pub const MANUAL_WEIGHT_RANGE: (f64, f64) = (0.1, 5.0);

/// A manually entered lexicon entry. `None` when the keyword is blank.
/// Unusable weights become 1.0; the rest are kept within 0.1..=5.0.
pub fn manual_keyword(
    symptom_type: &str,
    keyword: &str,
    weight: f64,
    source: KeywordOrigin,
    active: bool,
) -> Option<SymptomKeywordInput> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return None;
    }
    let weight = if weight.is_finite() && weight > 0.0 {
        weight.clamp(MANUAL_WEIGHT_RANGE.0, MANUAL_WEIGHT_RANGE.1)
    } else {
        1.0
    };
    Some(SymptomKeywordInput {
        keyword,
        symptom_type: symptom_type.to_string(),
        weight,
        source,
        active,
    })
}

// --- Psychologist reports ---

/// Text, user and day filters of the reports view. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub search: String,
    pub user: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

fn entry_day(entry: &UserHistoryEntry) -> Option<NaiveDate> {
    parse_timestamp(&entry.timestamp).map(|dt| dt.date())
}

impl ReportFilter {
    pub fn matches(&self, entry: &UserHistoryEntry) -> bool {
        let username = entry.username.as_deref().unwrap_or_default().to_lowercase();

        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !entry.message.to_lowercase().contains(&search)
            && !entry.response.to_lowercase().contains(&search)
            && !username.contains(&search)
        {
            return false;
        }

        let user = self.user.trim().to_lowercase();
        if !user.is_empty() && !username.contains(&user) {
            return false;
        }

        let date = self.date.trim();
        if !date.is_empty() {
            let day = entry_day(entry).map(|d| d.format("%Y-%m-%d").to_string());
            if day.as_deref() != Some(date) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, entries: &'a [UserHistoryEntry]) -> Vec<&'a UserHistoryEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct non-empty usernames, sorted.
pub fn unique_users(entries: &[UserHistoryEntry]) -> Vec<String> {
    let mut users: Vec<String> = entries
        .iter()
        .filter_map(|e| e.username.clone())
        .filter(|u| !u.is_empty())
        .collect();
    users.sort();
    users.dedup();
    users
}

/// Entries grouped by display username, groups in first-seen order.
pub fn group_by_user<'a>(
    entries: &[&'a UserHistoryEntry],
) -> Vec<(String, Vec<&'a UserHistoryEntry>)> {
    let mut groups: Vec<(String, Vec<&'a UserHistoryEntry>)> = Vec::new();
    for entry in entries {
        let name = entry.display_username();
        match groups.iter_mut().find(|(user, _)| user == name) {
            Some((_, items)) => items.push(entry),
            None => groups.push((name.to_string(), vec![entry])),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub unique_users: usize,
    pub today: usize,
    pub this_week: usize,
}

/// Counters over the filtered entries. "This week" is the trailing seven days.
pub fn report_stats(entries: &[&UserHistoryEntry], now: NaiveDateTime) -> ReportStats {
    let week_ago = now - Duration::days(7);
    let parsed: Vec<Option<NaiveDateTime>> =
        entries.iter().map(|e| parse_timestamp(&e.timestamp)).collect();
    ReportStats {
        total: entries.len(),
        unique_users: group_by_user(entries).len(),
        today: parsed
            .iter()
            .flatten()
            .filter(|dt| dt.date() == now.date())
            .count(),
        this_week: parsed.iter().flatten().filter(|dt| **dt > week_ago).count(),
    }
}

pub const CSV_HEADERS: [&str; 6] = ["Usuario", "Fecha", "Hora", "Mensaje", "Respuesta", "Modo"];

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// CSV report of `entries`: unquoted header row, every data cell quoted.
pub fn report_csv(entries: &[&UserHistoryEntry]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    for entry in entries {
        let parsed = parse_timestamp(&entry.timestamp);
        let date = parsed.map(|dt| dt.format("%Y-%m-%d").to_string()).unwrap_or_default();
        let time = parsed.map(|dt| dt.format("%H:%M:%S").to_string()).unwrap_or_default();
        let cells = [
            entry.display_username(),
            date.as_str(),
            time.as_str(),
            entry.message.as_str(),
            entry.response.as_str(),
            entry.mode_label(),
        ];
        lines.push(cells.iter().map(|c| csv_cell(c)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

pub fn report_filename(today: NaiveDate) -> String {
    format!("reporte_psicologico_{}.csv", today.format("%Y-%m-%d"))
}

/// `data:` URL for an `<a download>` link.
pub fn csv_data_url(csv: &str) -> String {
    format!("data:text/csv;charset=utf-8,{}", urlencoding::encode(csv))
}
