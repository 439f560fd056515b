use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// An ISO-8601 timestamp as supplied by the client, paired with the instant it denotes.
///
/// The raw text is what gets stored and echoed back; the instant is only used
/// to decide whether an announcement is inside its active window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoTimestamp {
    raw: String,
    instant: DateTime<Utc>,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl IsoTimestamp {
    /// Parse an ISO-8601 string. Values without an offset are taken as UTC.
    /// Years outside 1..=9999 are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let instant = parse_instant(raw).filter(|dt| (1..=9999).contains(&dt.year()))?;
        Some(Self {
            raw: raw.to_string(),
            instant,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(stripped) = s.strip_suffix('Z') {
        if let Some(naive) = parse_naive(stripped) {
            return Some(naive.and_utc());
        }
    }
    if let Some(naive) = parse_naive(s) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
