//! Lenient timestamp parsing for match windows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-less date-time layouts, interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Minute-precision layouts carrying a numeric offset. RFC 3339 needs seconds.
const OFFSET_MINUTE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Parses a timestamp string into a UTC instant.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset), minute-precision
/// date-times with `Z` or a numeric offset, date-times without an offset
/// (taken as UTC), and bare dates (UTC midnight). Returns `None` for
/// anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let with_offset = match trimmed.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => trimmed.to_owned(),
    };
    if let Some(parsed) = OFFSET_MINUTE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&with_offset, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parses_rfc3339_with_zulu_suffix() {
        assert_eq!(
            parse_timestamp("2030-01-01T00:00:00Z"),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_normalizes_numeric_offset_to_utc() {
        assert_eq!(
            parse_timestamp("2030-01-01T02:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_offsetless_date_time_is_utc() {
        let expected = Utc.with_ymd_and_hms(2030, 6, 15, 18, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2030-06-15T18:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2030-06-15 18:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2030-06-15T18:30"), Some(expected));
    }

    #[test]
    fn test_minute_precision_with_zulu_suffix() {
        assert_eq!(
            parse_timestamp("2030-01-01T00:00Z"),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_minute_precision_with_numeric_offset_is_normalized() {
        assert_eq!(
            parse_timestamp("2030-01-01T00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2029, 12, 31, 22, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2030-01-01 03:30-01:30"),
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 5, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        assert_eq!(
            parse_timestamp("2030-06-15"),
            Some(Utc.with_ymd_and_hms(2030, 6, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2030-02-30T00:00:00Z"), None);
        assert_eq!(parse_timestamp("2030-13-01"), None);
    }
}
