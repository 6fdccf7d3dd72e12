use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::time::{format_hhmm, hhmm};

/// Opening hours of one weekday, with its breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "hhmm")]
    pub opening_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub closing_time: NaiveTime,
    pub breaks: Vec<BreakInterval>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakInterval {
    pub id: Uuid,
    pub opening_hour_id: Uuid,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BreakRequest {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// Replaces the hours and breaks of one weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertOpeningHoursRequest {
    #[serde(with = "hhmm")]
    pub opening_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub closing_time: NaiveTime,
    #[serde(default)]
    pub breaks: Vec<BreakRequest>,
}

impl UpsertOpeningHoursRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.opening_time >= self.closing_time {
            return Err(BookingError::validation(format!(
                "opening_time {} must be before closing_time {}",
                format_hhmm(self.opening_time),
                format_hhmm(self.closing_time)
            )));
        }

        for interval in &self.breaks {
            if interval.start_time >= interval.end_time {
                return Err(BookingError::validation(format!(
                    "Break {}-{} must start before it ends",
                    format_hhmm(interval.start_time),
                    format_hhmm(interval.end_time)
                )));
            }
            if interval.start_time < self.opening_time || interval.end_time > self.closing_time {
                return Err(BookingError::validation(format!(
                    "Break {}-{} must lie within opening hours",
                    format_hhmm(interval.start_time),
                    format_hhmm(interval.end_time)
                )));
            }
        }

        let mut sorted = self.breaks.clone();
        sorted.sort_by_key(|b| b.start_time);
        if sorted.windows(2).any(|pair| pair[1].start_time < pair[0].end_time) {
            return Err(BookingError::validation("Breaks must not overlap"));
        }

        Ok(())
    }
}
