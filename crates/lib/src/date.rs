use chrono::{DateTime, NaiveDate, TimeZone, Utc};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid date ({0:?}): expected YYYY-MM-DD or an RFC 3339 date-time")]
    Invalid(String),
}

/// Renders a date as `DD Month YYYY` in UTC, e.g. `07 March 2024`.
#[must_use]
pub fn format(date: &DateTime<Utc>) -> String {
    date.format("%d %B %Y").to_string()
}

/// Parses a front matter date.
///
/// A bare `YYYY-MM-DD` is taken as midnight UTC. Full date-times must be
/// RFC 3339 and are converted to UTC.
pub fn parse(value: &str) -> Result<DateTime<Utc>, Error> {
    let value = value.trim();

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::Invalid(value.to_owned()))?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::Invalid(value.to_owned()))
}
