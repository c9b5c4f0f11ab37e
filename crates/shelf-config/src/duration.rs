//! Human-readable duration strings (`"90s"`, `"5m"`, `"1h30m"`).

use std::time::Duration;

/// Invalid duration string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid duration {0:?} (expected e.g. \"500ms\", \"90s\", \"5m\", \"1h30m\")")]
pub struct DurationError(String);

/// Parse a duration made of `<number><unit>` pairs.
///
/// Units: `ms`, `s`, `m`, `h`. Numbers may be fractional (`"1.5h"`). A bare
/// `"0"` is accepted as zero.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use shelf_config::parse_duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// assert!(parse_duration("5 minutes").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError(input.to_owned());

    let s = input.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest.find(is_number).unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ms" => 0.001,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        let part = Duration::try_from_secs_f64(value * scale).map_err(|_| invalid())?;
        total = total.checked_add(part).ok_or_else(invalid)?;
    }

    Ok(total)
}
