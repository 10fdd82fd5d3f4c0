use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Generates a fresh opaque identifier for entities created without one.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a stored ISO-8601 value into a UTC instant.
///
/// Accepts full RFC 3339 instants as well as bare `YYYY-MM-DD` dates, which
/// are read as midnight UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats the `YYYY-MM` key used by budgets and alert flags.
pub fn month_key<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Month key of a stored instant string, if it parses.
pub fn month_key_of(raw: &str) -> Option<String> {
    parse_instant(raw).map(|instant| month_key(&instant))
}

/// Formats an instant the way every write path stores dates.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_dates_as_utc_midnight() {
        let instant = parse_instant("2024-03-01").expect("date parses");
        assert_eq!(format_instant(instant), "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn parses_offset_instants_into_utc() {
        let instant = parse_instant("2024-03-01T01:30:00+02:00").expect("instant parses");
        assert_eq!(month_key(&instant), "2024-02");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("").is_none());
    }
}
