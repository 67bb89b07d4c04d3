//! Lenient parsing of FHIR `date` and `dateTime` values.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

/// Normalizes a FHIR date to `YYYY-MM-DD`.
///
/// Accepts full dates, the partial forms `YYYY` and `YYYY-MM` (padded to the
/// first day), and RFC 3339 date-times (their calendar date). Returns `None`
/// for anything else.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_date(value.trim()).and_then(format_date)
}

/// Normalizes a FHIR dateTime.
///
/// RFC 3339 values are re-rendered in RFC 3339. Date-times without an offset
/// are rendered as `YYYY-MM-DDTHH:MM:SS` (with the fraction, if any). Plain or
/// partial dates are rendered as `YYYY-MM-DD`. Returns `None` for anything
/// else.
pub fn normalize_date_time(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(date_time) = OffsetDateTime::parse(value, &Rfc3339) {
        return date_time.format(&Rfc3339).ok();
    }
    if let Some(date_time) = parse_local_date_time(value) {
        return format_local_date_time(date_time);
    }
    parse_date(value).and_then(format_date)
}

fn parse_date(value: &str) -> Option<Date> {
    if let Ok(date) = Date::parse(value, format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    if let Ok(date_time) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(date_time.date());
    }
    if let Some(date_time) = parse_local_date_time(value) {
        return Some(date_time.date());
    }
    parse_partial_date(value)
}

/// Parses a date-time that carries no UTC offset.
fn parse_local_date_time(value: &str) -> Option<PrimitiveDateTime> {
    let formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    formats
        .into_iter()
        .find_map(|format| PrimitiveDateTime::parse(value, format).ok())
}

fn format_local_date_time(date_time: PrimitiveDateTime) -> Option<String> {
    if date_time.nanosecond() == 0 {
        date_time
            .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
            .ok()
    } else {
        date_time
            .format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"
            ))
            .ok()
    }
}

fn parse_partial_date(value: &str) -> Option<Date> {
    let (year, month) = match value.split_once('-') {
        Some((year, month)) if month.len() == 2 => (year, month.parse::<u8>().ok()?),
        Some(_) => return None,
        None => (value, 1),
    };

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year.parse().ok()?, month, 1).ok()
}

fn format_date(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}
