use chrono::{NaiveDate, NaiveTime, Timelike};

/// Calendar date from `YYYY-MM-DD` or from the date part of a date-time string.
pub(super) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10)?;
    let rest = &value[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Wall-clock time from `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`. Fractions
/// of a second are dropped.
pub(super) fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
        .and_then(|time| time.with_nanosecond(0))
}

/// Split a date-time string into its date and (optional) literal time.
///
/// Any `Z` or `±HH:MM` suffix is discarded rather than applied, so
/// "2025-04-10T09:00:00Z" stays at 09:00 whatever the local offset.
pub(super) fn parse_date_time(value: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let value = value.trim();
    let date = parse_date(value)?;
    let rest = value[10..].trim_start_matches(['T', ' ']);
    if rest.is_empty() {
        return Some((date, None));
    }

    let time_end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ':' || c == '.'))
        .unwrap_or(rest.len());
    let time = parse_time(&rest[..time_end])?;
    Some((date, Some(time)))
}
