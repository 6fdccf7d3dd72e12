//! Wall-clock helpers.
//!
//! Opening hours, breaks and unavailability windows are stored as local
//! wall-clock times and exchanged as `"HH:MM"` strings. Appointments are UTC
//! instants. The helpers here convert between the two using the
//! establishment's IANA timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses `"HH:MM"` (seconds are accepted and must be zero-padded).
pub fn parse_hhmm(value: &str) -> BookingResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| BookingError::validation(format!("Invalid time '{}', expected HH:MM", value)))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Weekday index with Sunday as 0, matching the `day_of_week` column.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

pub fn validate_day_of_week(day: i16) -> BookingResult<()> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(BookingError::validation(format!(
            "day_of_week must be between 0 (Sunday) and 6 (Saturday), got {}",
            day
        )))
    }
}

pub fn parse_timezone(name: &str) -> BookingResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BookingError::validation(format!("Unknown timezone '{}'", name)))
}

/// Resolves a local wall-clock time to UTC. Times skipped by a DST jump
/// resolve to `None`; ambiguous times take the earlier instant.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn utc_to_local(tz: Tz, instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// Serde adapter for `NaiveTime` fields exchanged as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}
