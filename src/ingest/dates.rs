// src/ingest/dates.rs
//! Best-effort date normalization for board payloads. Never fails: unparseable input is `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalize a date string to ISO-8601.
///
/// Timestamps become UTC `YYYY-MM-DDTHH:MM:SSZ`; bare dates stay `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(to_iso_utc(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(to_iso_utc(dt.with_timezone(&Utc)));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(to_iso_utc(Utc.from_utc_datetime(&ndt)));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// Epoch milliseconds (Lever `createdAt`) to ISO-8601 UTC.
pub fn from_epoch_millis(ms: i64) -> Option<String> {
    Utc.timestamp_millis_opt(ms).single().map(to_iso_utc)
}

fn to_iso_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_with_offset_is_converted_to_utc() {
        assert_eq!(
            normalize_date("2024-03-01T10:15:00-05:00").as_deref(),
            Some("2024-03-01T15:15:00Z")
        );
    }

    #[test]
    fn long_month_date() {
        assert_eq!(normalize_date("January 5, 2024").as_deref(), Some("2024-01-05"));
        assert_eq!(normalize_date("Feb 29, 2024").as_deref(), Some("2024-02-29"));
    }

    #[test]
    fn naive_timestamp_is_treated_as_utc() {
        assert_eq!(
            normalize_date("2024-06-10T08:00:00").as_deref(),
            Some("2024-06-10T08:00:00Z")
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("last tuesday"), None);
        assert_eq!(normalize_date("2024-02-30"), None);
    }

    #[test]
    fn epoch_millis() {
        assert_eq!(
            from_epoch_millis(1_700_000_000_000).as_deref(),
            Some("2023-11-14T22:13:20Z")
        );
    }
}
