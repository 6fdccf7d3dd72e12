use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::time::{hhmm, validate_day_of_week, weekday_index};

/// Blackout window for one employee, either every given weekday or on a
/// single date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unavailability {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub day_of_week: Option<i16>,
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Unavailability {
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        applies_on(self.day_of_week, self.date, date)
    }
}

pub fn applies_on(day_of_week: Option<i16>, on: Option<NaiveDate>, date: NaiveDate) -> bool {
    match (on, day_of_week) {
        (Some(on), _) => on == date,
        (None, Some(day)) => day == weekday_index(date),
        (None, None) => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnavailabilityRequest {
    pub day_of_week: Option<i16>,
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub reason: Option<String>,
}

impl CreateUnavailabilityRequest {
    pub fn validate(&self) -> BookingResult<()> {
        match (self.day_of_week, self.date) {
            (Some(day), None) => validate_day_of_week(day)?,
            (None, Some(_)) => {}
            _ => {
                return Err(BookingError::validation(
                    "Exactly one of day_of_week or date must be set",
                ));
            }
        }
        if self.start_time >= self.end_time {
            return Err(BookingError::validation("start_time must be before end_time"));
        }
        Ok(())
    }
}
