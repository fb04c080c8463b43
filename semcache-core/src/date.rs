//! HTTP-date helpers.

use chrono::{DateTime, Utc};

/// Parses an HTTP-date.
///
/// Accepts the IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`) and the obsolete
/// RFC 850 (`Sunday, 06-Nov-94 08:49:37 GMT`) and asctime
/// (`Sun Nov  6 08:49:37 1994`) formats, plus RFC 2822 dates with a numeric
/// offset. Returns `None` for anything else.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    match httpdate::parse_http_date(value) {
        Ok(time) => Some(DateTime::<Utc>::from(time)),
        Err(_) => DateTime::parse_from_rfc2822(value)
            .ok()
            .map(|date| date.with_timezone(&Utc)),
    }
}

/// Formats a timestamp as an IMF-fixdate.
pub fn format_http_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
