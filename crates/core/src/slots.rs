//! # Slot Generator
//!
//! Builds the static template of candidate start times for one day of opening
//! hours. Each boundary from opening to closing, stepped by a fixed interval,
//! becomes one slot. A slot runs until the next boundary or closing time,
//! whichever comes first, and is marked unavailable when it lies wholly
//! inside a break.
//!
//! The template does not look at appointments or employee unavailability.
//! See [`crate::availability`] for the per-date reconciliation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::store_hours::OpeningHours;
use crate::time::{format_hhmm, minutes_of_day, parse_hhmm, time_from_minutes};

pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTemplate {
    /// Start of the slot as `"HH:MM"`
    pub time: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub day_of_week: i16,
    pub slots: Vec<SlotTemplate>,
}

/// Generates the slot template for a single day.
///
/// A break is only applied when both of its ends are present.
///
/// # Errors
///
/// Returns `BookingError::Validation` when `interval_minutes` is zero or the
/// opening time is not before the closing time.
pub fn generate_slots(
    open: NaiveTime,
    close: NaiveTime,
    break_start: Option<NaiveTime>,
    break_end: Option<NaiveTime>,
    interval_minutes: u32,
) -> BookingResult<Vec<SlotTemplate>> {
    let breaks: Vec<(NaiveTime, NaiveTime)> = match (break_start, break_end) {
        (Some(start), Some(end)) => vec![(start, end)],
        _ => Vec::new(),
    };
    generate_with_breaks(open, close, &breaks, interval_minutes)
}

/// String form of [`generate_slots`], taking `"HH:MM"` values.
pub fn generate_slots_from_strings(
    open: &str,
    close: &str,
    break_start: Option<&str>,
    break_end: Option<&str>,
    interval_minutes: u32,
) -> BookingResult<Vec<SlotTemplate>> {
    let open = parse_hhmm(open)?;
    let close = parse_hhmm(close)?;
    let break_start = break_start.map(parse_hhmm).transpose()?;
    let break_end = break_end.map(parse_hhmm).transpose()?;
    generate_slots(open, close, break_start, break_end, interval_minutes)
}

/// Generates the slot template for a day with any number of breaks.
pub fn generate_with_breaks(
    open: NaiveTime,
    close: NaiveTime,
    breaks: &[(NaiveTime, NaiveTime)],
    interval_minutes: u32,
) -> BookingResult<Vec<SlotTemplate>> {
    if interval_minutes == 0 {
        return Err(BookingError::validation("Slot interval must be positive"));
    }
    if open >= close {
        return Err(BookingError::validation(format!(
            "Opening time {} must be before closing time {}",
            format_hhmm(open),
            format_hhmm(close)
        )));
    }

    let open = minutes_of_day(open);
    let close = minutes_of_day(close);
    let breaks: Vec<(u32, u32)> = breaks
        .iter()
        .map(|(start, end)| (minutes_of_day(*start), minutes_of_day(*end)))
        .collect();

    let mut slots = Vec::new();
    let mut minute = open;
    while minute < close {
        let Some(time) = time_from_minutes(minute) else {
            break;
        };
        let slot_end = minute.saturating_add(interval_minutes).min(close);
        let in_break = breaks
            .iter()
            .any(|(start, end)| *start <= minute && slot_end <= *end);
        slots.push(SlotTemplate {
            time: format_hhmm(time),
            available: !in_break,
        });
        minute = match minute.checked_add(interval_minutes) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(slots)
}

/// Builds one template per configured weekday, ordered Sunday first.
///
/// Days with invalid stored hours are skipped rather than failing the week.
pub fn weekly_template(hours: &[OpeningHours], interval_minutes: u32) -> Vec<DayTemplate> {
    let mut days: Vec<DayTemplate> = hours
        .iter()
        .filter_map(|day| {
            let breaks: Vec<(NaiveTime, NaiveTime)> = day
                .breaks
                .iter()
                .map(|b| (b.start_time, b.end_time))
                .collect();
            generate_with_breaks(day.opening_time, day.closing_time, &breaks, interval_minutes)
                .ok()
                .map(|slots| DayTemplate {
                    day_of_week: day.day_of_week,
                    slots,
                })
        })
        .collect();
    days.sort_by_key(|d| d.day_of_week);
    days
}
