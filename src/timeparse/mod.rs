use std::sync::OnceLock;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use regex::Regex;
use thiserror::Error;


static END_TIME_RE: OnceLock<Regex> = OnceLock::new();

fn end_time_regex() -> &'static Regex {
    END_TIME_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])$")
            .unwrap_or_else(|error| panic!("end time regex failed to compile: {error}"))
    })
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error(r#"invalid time format, use something like "5:30PM" or "11:45AM""#)]
    InvalidFormat,
    #[error("invalid time values, hours must be 1-12 and minutes 0-59")]
    InvalidValue,
}

/// Resolves a 12-hour wall-clock string such as "5:30PM" to the next instant
/// with that wall clock in the offset `now` carries: today if the time is
/// still strictly ahead, otherwise tomorrow.
///
/// The offset is a process-wide setting baked into `now`; callers displaying
/// the result back to users must name the offset in effect.
pub fn parse_end_time(
    text: &str,
    now: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>, TimeParseError> {
    let captures = end_time_regex()
        .captures(text)
        .ok_or(TimeParseError::InvalidFormat)?;

    let hours: u32 = captures[1].parse().map_err(|_| TimeParseError::InvalidFormat)?;
    let minutes: u32 = captures[2].parse().map_err(|_| TimeParseError::InvalidFormat)?;
    let is_pm = captures[3].eq_ignore_ascii_case("PM");

    if !(1..=12).contains(&hours) || minutes > 59 {
        return Err(TimeParseError::InvalidValue);
    }

    let hour24 = match (is_pm, hours) {
        (false, 12) => 0,
        (false, hours) => hours,
        (true, 12) => 12,
        (true, hours) => hours + 12,
    };

    let wall = now
        .date_naive()
        .and_hms_opt(hour24, minutes, 0)
        .ok_or(TimeParseError::InvalidValue)?;
    let candidate = now
        .offset()
        .from_local_datetime(&wall)
        .single()
        .ok_or(TimeParseError::InvalidValue)?;

    // "5:30PM" sent after 17:30 means tomorrow. Fixed offsets have no DST,
    // so adding a day keeps the same wall clock.
    if candidate > now {
        Ok(candidate)
    } else {
        Ok(candidate + Duration::days(1))
    }
}
